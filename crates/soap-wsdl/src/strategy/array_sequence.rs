//! Arrays as `xsd:sequence` of unbounded `item` elements, nested to any depth.
//!
//! `string[][]` becomes `ArrayOfString` (items of `xsd:string`) plus
//! `ArrayOfArrayOfString` (items of `tns:ArrayOfString`).

use std::sync::Arc;

use super::{DefaultComplexType, DocumentationStrategy};
use crate::diagnostic::SoapError;
use crate::types::{self, ucfirst};
use crate::wsdl::Wsdl;

#[derive(Debug, Clone, Default)]
pub struct ArrayOfTypeSequence {
    inner: DefaultComplexType,
}

impl ArrayOfTypeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documentation(self, documentation: Arc<dyn DocumentationStrategy>) -> Self {
        Self {
            inner: self.inner.with_documentation(documentation),
        }
    }

    pub fn add_complex_type(&self, type_name: &str, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        let shape = types::resolve(type_name)?;

        if shape.depth == 0 {
            if let Some(existing) = wsdl.scan_registered_types(type_name) {
                return Ok(existing);
            }
            return self.inner.add_complex_type(type_name, wsdl);
        }

        let singular = wsdl.canonical_type_name(&shape.singular);
        let mut array_type = String::new();
        for level in 1..=shape.depth {
            array_type = self.type_at_level(&singular, level, wsdl)?;
            let child_type = self.type_at_level(&singular, level - 1, wsdl)?;
            let native = format!("{}{}", singular, "[]".repeat(level));
            self.add_sequence_type(&array_type, &child_type, &native, wsdl);
        }
        Ok(array_type)
    }

    /// Qualified name of the array type `level` levels deep; level 0 is the
    /// singular type itself.
    fn type_at_level(&self, singular: &str, level: usize, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        if level == 0 {
            return wsdl.get_type(singular);
        }
        let short = ucfirst(&wsdl.translate_type(singular));
        Ok(wsdl.qualify(&format!("{}{}", "ArrayOf".repeat(level), short)))
    }

    fn add_sequence_type(&self, array_type: &str, child_type: &str, native: &str, wsdl: &mut Wsdl) {
        if wsdl.scan_registered_types(native).is_some() {
            return;
        }
        wsdl.add_type(native, array_type);

        let local = array_type
            .split_once(':')
            .map_or(array_type, |(_, local)| local);
        let schema = wsdl.schema();
        let doc = wsdl.document_mut();
        let complex_type = doc.append_element(schema, "xsd:complexType");
        doc.set_attribute(complex_type, "name", local);
        let sequence = doc.append_element(complex_type, "xsd:sequence");
        let element = doc.append_element(sequence, "xsd:element");
        doc.set_attribute(element, "name", "item");
        doc.set_attribute(element, "type", child_type);
        doc.set_attribute(element, "minOccurs", "0");
        doc.set_attribute(element, "maxOccurs", "unbounded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{ClassDescriptor, FieldDescriptor, InMemoryCatalog};

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
        wsdl.set_complex_type_strategy(ArrayOfTypeSequence::new().into());
        wsdl
    }

    /// (name, item type) of every complex type in the schema.
    fn sequences(wsdl: &mut Wsdl) -> Vec<(String, String)> {
        let schema = wsdl.schema();
        let doc = wsdl.document();
        doc.child_elements(schema)
            .filter_map(|c| {
                let name = doc.attribute(c, "name")?.to_string();
                let item = doc
                    .descendants_named(c, "xsd:element")
                    .into_iter()
                    .find(|e| doc.attribute(*e, "name") == Some("item"))
                    .and_then(|e| doc.attribute(e, "type"))
                    .unwrap_or_default()
                    .to_string();
                Some((name, item))
            })
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_three_levels_of_strings() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.add_complex_type("string[][][]").unwrap(),
            "tns:ArrayOfArrayOfArrayOfString"
        );
        assert_eq!(
            sequences(&mut wsdl),
            pairs(&[
                ("ArrayOfString", "xsd:string"),
                ("ArrayOfArrayOfString", "tns:ArrayOfString"),
                ("ArrayOfArrayOfArrayOfString", "tns:ArrayOfArrayOfString"),
            ])
        );

        let root = wsdl.definitions();
        let doc = wsdl.document();
        let item = doc.descendants_named(root, "xsd:element")[0];
        assert_eq!(doc.attribute(item, "minOccurs"), Some("0"));
        assert_eq!(doc.attribute(item, "maxOccurs"), Some("unbounded"));
    }

    #[test]
    fn test_generic_notation() {
        let mut wsdl = wsdl();
        assert_eq!(
            wsdl.add_complex_type("array<array<int>>").unwrap(),
            "tns:ArrayOfArrayOfInt"
        );
        // Both notations share one registration per level
        assert_eq!(wsdl.add_complex_type("int[]").unwrap(), "tns:ArrayOfInt");
        assert_eq!(sequences(&mut wsdl).len(), 2);
    }

    #[test]
    fn test_duplicates_emitted_once() {
        let mut wsdl = wsdl();
        for type_name in ["string[]", "int[]", "string[]", "int[]"] {
            wsdl.add_complex_type(type_name).unwrap();
        }
        assert_eq!(
            sequences(&mut wsdl),
            pairs(&[("ArrayOfString", "xsd:string"), ("ArrayOfInt", "xsd:int")])
        );
    }

    #[test]
    fn test_class_spellings_share_one_definition() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.get_type("ComplexTest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(wsdl.get_type("complextest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(wsdl.get_type("array<\\ComplexTest>").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(
            sequences(&mut wsdl),
            pairs(&[("ComplexTest", ""), ("ArrayOfComplexTest", "tns:ComplexTest")])
        );
    }

    #[test]
    fn test_shared_lower_levels() {
        let mut wsdl = wsdl();
        wsdl.add_complex_type("string[]").unwrap();
        wsdl.add_complex_type("string[][]").unwrap();
        assert_eq!(
            sequences(&mut wsdl),
            pairs(&[
                ("ArrayOfString", "xsd:string"),
                ("ArrayOfArrayOfString", "tns:ArrayOfString"),
            ])
        );
    }

    #[test]
    fn test_object_items() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTest[]").unwrap(), "tns:ArrayOfComplexTest");
        assert_eq!(
            sequences(&mut wsdl),
            pairs(&[("ComplexTest", ""), ("ArrayOfComplexTest", "tns:ComplexTest")])
        );
    }

    #[test]
    fn test_object_with_array_field() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTypeA").unwrap(), "tns:ComplexTypeA");
        let names: Vec<_> = sequences(&mut wsdl).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["ComplexTypeB", "ArrayOfComplexTypeB", "ComplexTypeA"]);
    }

    #[test]
    fn test_plain_object_and_unknown_class() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.add_complex_type("ComplexTest").unwrap(), "tns:ComplexTest");
        assert!(matches!(
            wsdl.add_complex_type("Missing[]"),
            Err(SoapError::ClassNotFound { .. })
        ));
    }
}
