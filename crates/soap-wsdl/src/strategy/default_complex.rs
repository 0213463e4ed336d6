//! `xsd:complexType/xsd:all` built from a class's public fields.

use std::sync::Arc;
use tracing::debug;

use super::DocumentationStrategy;
use crate::diagnostic::SoapError;
use crate::reflect::Visibility;
use crate::wsdl::Wsdl;

#[derive(Debug, Clone, Default)]
pub struct DefaultComplexType {
    documentation: Option<Arc<dyn DocumentationStrategy>>,
}

impl DefaultComplexType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches field and type documentation to every generated complex type.
    pub fn with_documentation(mut self, documentation: Arc<dyn DocumentationStrategy>) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn documentation(&self) -> Option<&Arc<dyn DocumentationStrategy>> {
        self.documentation.as_ref()
    }

    pub fn add_complex_type(&self, type_name: &str, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        let catalog = wsdl.catalog();
        let class = catalog
            .class(type_name)
            .ok_or_else(|| SoapError::ClassNotFound {
                type_name: type_name.to_string(),
            })?;

        let native = class.name.trim_start_matches('\\');
        if let Some(existing) = wsdl.scan_registered_types(native) {
            return Ok(existing);
        }

        let local = wsdl.translate_type(native);
        let qualified = wsdl.qualify(&local);
        // Register before the body so self references terminate
        wsdl.add_type(native, &qualified);

        let complex_type = wsdl.document_mut().create_element("xsd:complexType");
        wsdl.document_mut().set_attribute(complex_type, "name", local.as_str());
        let all = wsdl.document_mut().create_element("xsd:all");

        for field in &class.fields {
            let Some(field_type) = field.type_name.as_deref() else {
                continue;
            };
            if field.visibility != Visibility::Public {
                continue;
            }

            let resolved = wsdl.get_type(field_type.trim())?;
            let doc = wsdl.document_mut();
            let element = doc.create_element("xsd:element");
            doc.set_attribute(element, "name", field.name.as_str());
            doc.set_attribute(element, "type", resolved);
            if field.default_is_null {
                doc.set_attribute(element, "nillable", "true");
            }

            if let Some(documentation) = &self.documentation {
                let text = documentation.property_documentation(field);
                if !text.is_empty() {
                    wsdl.add_documentation(element, &text);
                }
            }
            wsdl.document_mut().append_child(all, element);
        }

        wsdl.document_mut().append_child(complex_type, all);
        if let Some(documentation) = &self.documentation {
            let text = documentation.complex_type_documentation(class);
            if !text.is_empty() {
                wsdl.add_documentation(complex_type, &text);
            }
        }

        let schema = wsdl.schema();
        wsdl.document_mut().append_child(schema, complex_type);
        debug!(native, qualified = %qualified, "emitted complex type");
        Ok(qualified)
    }
}
