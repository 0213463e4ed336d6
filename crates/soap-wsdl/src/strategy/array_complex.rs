//! SOAP-encoded arrays: `complexContent/restriction base="soap-enc:Array"`.
//!
//! Only one level of nesting is representable this way. Deeper arrays must
//! be modelled as objects with array properties, or generated with
//! [`ArrayOfTypeSequence`](super::ArrayOfTypeSequence).

use std::sync::Arc;

use super::{DefaultComplexType, DocumentationStrategy};
use crate::diagnostic::SoapError;
use crate::types;
use crate::wsdl::{Wsdl, SOAP_ENC_NS, TYPES_NS};

#[derive(Debug, Clone, Default)]
pub struct ArrayOfTypeComplex {
    inner: DefaultComplexType,
}

impl ArrayOfTypeComplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documentation(self, documentation: Arc<dyn DocumentationStrategy>) -> Self {
        Self {
            inner: self.inner.with_documentation(documentation),
        }
    }

    pub fn add_complex_type(&self, type_name: &str, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        if let Some(existing) = wsdl.scan_registered_types(type_name) {
            return Ok(existing);
        }

        let shape = types::resolve(type_name)?;
        match shape.depth {
            0 => self.inner.add_complex_type(&shape.singular, wsdl),
            1 => {
                let singular = wsdl.canonical_type_name(&shape.singular);
                let native = format!("{}[]", singular);
                if let Some(existing) = wsdl.scan_registered_types(&native) {
                    wsdl.add_type(type_name, &existing);
                    return Ok(existing);
                }
                self.add_array_of_complex_type(&singular, &native, type_name, wsdl)
            }
            _ => Err(SoapError::NestedArrayTooDeep {
                type_name: type_name.to_string(),
            }),
        }
    }

    fn add_array_of_complex_type(
        &self,
        singular: &str,
        native: &str,
        type_name: &str,
        wsdl: &mut Wsdl,
    ) -> Result<String, SoapError> {
        let short = wsdl.translate_type(singular);
        let local = format!("ArrayOf{}", short);
        let qualified = wsdl.qualify(&local);
        wsdl.add_type(native, &qualified);
        wsdl.add_type(type_name, &qualified);

        self.inner.add_complex_type(singular, wsdl)?;

        let schema = wsdl.schema();
        let doc = wsdl.document_mut();
        let complex_type = doc.append_element(schema, "xsd:complexType");
        doc.set_attribute(complex_type, "name", local.as_str());
        let content = doc.append_element(complex_type, "xsd:complexContent");
        let restriction = doc.append_element(content, "xsd:restriction");
        doc.set_attribute(restriction, "base", format!("{}:Array", SOAP_ENC_NS));
        let attribute = doc.append_element(restriction, "xsd:attribute");
        doc.set_attribute(attribute, "ref", format!("{}:arrayType", SOAP_ENC_NS));
        doc.set_attribute(attribute, "wsdl:arrayType", format!("{}:{}[]", TYPES_NS, short));

        Ok(qualified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{ClassDescriptor, FieldDescriptor, InMemoryCatalog};
    use crate::strategy::ComplexTypeStrategy;

    fn wsdl() -> Wsdl {
        let catalog = InMemoryCatalog::new()
            .with_class(
                ClassDescriptor::new("ComplexTest")
                    .field(FieldDescriptor::reflect("var", "/** @var int */").with_default()),
            )
            .with_class(
                ClassDescriptor::new("ComplexTypeA")
                    .field(FieldDescriptor::reflect("baz", "/** @var ComplexTypeB[] */").with_default()),
            )
            .with_class(
                ClassDescriptor::new("ComplexTypeB")
                    .field(FieldDescriptor::reflect("bar", "/** @var string */"))
                    .field(FieldDescriptor::reflect("foo", "/** @var string */")),
            );
        let mut wsdl = Wsdl::new("MyService", "http://localhost/MyService.php", Arc::new(catalog)).unwrap();
        wsdl.set_complex_type_strategy(ArrayOfTypeComplex::new().into());
        wsdl
    }

    fn complex_type_names(wsdl: &mut Wsdl) -> Vec<String> {
        let schema = wsdl.schema();
        let doc = wsdl.document();
        doc.child_elements(schema)
            .map(|c| doc.attribute(c, "name").unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_array_of_objects() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(complex_type_names(&mut wsdl), vec!["ComplexTest", "ArrayOfComplexTest"]);

        let root = wsdl.definitions();
        let doc = wsdl.document();
        let restriction = doc.descendants_named(root, "xsd:restriction")[0];
        assert_eq!(doc.attribute(restriction, "base"), Some("soap-enc:Array"));
        let attribute = doc.find_child(restriction, "xsd:attribute").unwrap();
        assert_eq!(doc.attribute(attribute, "ref"), Some("soap-enc:arrayType"));
        assert_eq!(doc.attribute(attribute, "wsdl:arrayType"), Some("tns:ComplexTest[]"));
    }

    #[test]
    fn test_generic_notation_is_one_level() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.add_complex_type("array<ComplexTest>").unwrap(),
            "tns:ArrayOfComplexTest"
        );
    }

    #[test]
    fn test_idempotent() {
        let mut wsdl = wsdl();
        let first = wsdl.add_complex_type("ComplexTest[]").unwrap();
        let strategy = ComplexTypeStrategy::from(ArrayOfTypeComplex::new());
        let second = strategy.add_complex_type("ComplexTest[]", &mut wsdl).unwrap();
        assert_eq!(first, second);
        assert_eq!(complex_type_names(&mut wsdl).len(), 2);
    }

    #[test]
    fn test_plain_object_delegates_to_default() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTest").unwrap(), "tns:ComplexTest");
        assert_eq!(complex_type_names(&mut wsdl), vec!["ComplexTest"]);
    }

    #[test]
    fn test_nested_too_deep() {
        let mut wsdl = wsdl();
        let err = wsdl.add_complex_type("ComplexTest[][]").unwrap_err();
        assert!(err
            .to_string()
            .contains("cannot return nested ArrayOfObject deeper than one level"));
        assert!(wsdl.types().is_empty());
    }

    #[test]
    fn test_object_with_array_field() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTypeA").unwrap(), "tns:ComplexTypeA");
        assert_eq!(
            complex_type_names(&mut wsdl),
            vec!["ComplexTypeB", "ArrayOfComplexTypeB", "ComplexTypeA"]
        );

        let root = wsdl.definitions();
        let doc = wsdl.document();
        let baz = doc
            .descendants_named(root, "xsd:element")
            .into_iter()
            .find(|e| doc.attribute(*e, "name") == Some("baz"))
            .unwrap();
        assert_eq!(doc.attribute(baz, "type"), Some("tns:ArrayOfComplexTypeB"));
        assert_eq!(doc.attribute(baz, "nillable"), None);
    }

    #[test]
    fn test_both_notations_share_one_definition() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("ComplexTest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(wsdl.get_type("array<ComplexTest>").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(wsdl.get_type("\\complextest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(complex_type_names(&mut wsdl), vec!["ComplexTest", "ArrayOfComplexTest"]);
    }

    #[test]
    fn test_scalar_array_needs_a_class() {
        let mut wsdl = wsdl();
        assert!(matches!(
            wsdl.add_complex_type("string[]"),
            Err(SoapError::ClassNotFound { .. })
        ));
    }
}
