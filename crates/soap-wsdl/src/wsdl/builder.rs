//! Element-level builder API.

use indexmap::IndexMap;

use super::uri::URI_ATTRIBUTES;
use super::{sanitize_uri, Wsdl, XSD_NS, XSD_NS_URI};
use crate::config::{SoapVersion, Style};
use crate::diagnostic::SoapError;
use crate::xml::{Document, NodeId};

/// One `part` of a message.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    /// `<part name=".." type=".."/>`
    Type(String),
    /// Arbitrary attributes, e.g. `element`.
    Attributes(IndexMap<String, String>),
}

impl MessagePart {
    /// `<part name=".." element=".."/>`
    pub fn element(qualified: impl Into<String>) -> Self {
        let mut attributes = IndexMap::new();
        attributes.insert("element".to_string(), qualified.into());
        MessagePart::Attributes(attributes)
    }
}

/// Model group of an element's anonymous complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    Sequence,
    All,
    Choice,
}

impl Compositor {
    fn element_name(&self) -> &'static str {
        match self {
            Compositor::Sequence => "xsd:sequence",
            Compositor::All => "xsd:all",
            Compositor::Choice => "xsd:choice",
        }
    }
}

/// A schema `xsd:element`, optionally with an anonymous complex type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSpec {
    pub attributes: IndexMap<String, String>,
    pub content: Option<(Compositor, Vec<ElementSpec>)>,
}

impl ElementSpec {
    pub fn new(name: impl Into<String>) -> Self {
        let mut attributes = IndexMap::new();
        attributes.insert("name".to_string(), name.into());
        Self {
            attributes,
            content: None,
        }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, compositor: Compositor, children: Vec<ElementSpec>) -> Self {
        self.content = Some((compositor, children));
        self
    }

    pub fn sequence(self, children: Vec<ElementSpec>) -> Self {
        self.with_content(Compositor::Sequence, children)
    }

    fn name(&self) -> Option<&str> {
        self.attributes
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

impl Wsdl {
    /// Sets attributes on a node, sanitizing the ones that carry URIs.
    fn set_attributes(&mut self, node: NodeId, attributes: &IndexMap<String, String>) -> Result<(), SoapError> {
        for (key, value) in attributes {
            let value = if URI_ATTRIBUTES.contains(&key.as_str()) {
                sanitize_uri(value)?
            } else {
                value.clone()
            };
            self.doc.set_attribute(node, key, value);
        }
        Ok(())
    }

    /// Adds a `message` with one `part` per entry.
    pub fn add_message(&mut self, name: &str, parts: &IndexMap<String, MessagePart>) -> Result<NodeId, SoapError> {
        let message = self.doc.create_element("message");
        self.doc.set_attribute(message, "name", name);

        for (part_name, part) in parts {
            let node = self.doc.append_element(message, "part");
            self.doc.set_attribute(node, "name", part_name.as_str());
            match part {
                MessagePart::Type(type_name) => self.doc.set_attribute(node, "type", type_name.as_str()),
                MessagePart::Attributes(attributes) => self.set_attributes(node, attributes)?,
            }
        }

        // Messages stay ahead of port types, bindings and services
        let definitions = self.definitions;
        let reference = self
            .doc
            .child_elements(definitions)
            .find(|c| matches!(self.doc.local_name(*c), "portType" | "binding" | "service"));
        match reference {
            Some(reference) => self.doc.insert_before(definitions, message, reference),
            None => self.doc.append_child(definitions, message),
        }
        Ok(message)
    }

    pub fn add_port_type(&mut self, name: &str) -> NodeId {
        let port_type = self.doc.append_element(self.definitions, "portType");
        self.doc.set_attribute(port_type, "name", name);
        port_type
    }

    /// Adds an `operation` to a port type. Blank message names are skipped.
    pub fn add_port_operation(
        &mut self,
        port_type: NodeId,
        name: &str,
        input: Option<&str>,
        output: Option<&str>,
        fault: Option<&str>,
    ) -> NodeId {
        let operation = self.doc.append_element(port_type, "operation");
        self.doc.set_attribute(operation, "name", name);

        for (child, message) in [("input", input), ("output", output), ("fault", fault)] {
            if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
                let node = self.doc.append_element(operation, child);
                self.doc.set_attribute(node, "message", message);
            }
        }
        operation
    }

    pub fn add_binding(&mut self, name: &str, port_type: &str) -> NodeId {
        let binding = self.doc.append_element(self.definitions, "binding");
        self.doc.set_attribute(binding, "name", name);
        self.doc.set_attribute(binding, "type", port_type);
        binding
    }

    /// Adds an `operation` to a binding.
    ///
    /// Input and output attributes go on a nested `soap:body`; fault
    /// attributes go on the `fault` element itself. Empty maps emit nothing.
    pub fn add_binding_operation(
        &mut self,
        binding: NodeId,
        name: &str,
        input: &IndexMap<String, String>,
        output: &IndexMap<String, String>,
        fault: &IndexMap<String, String>,
        version: SoapVersion,
    ) -> Result<NodeId, SoapError> {
        let operation = self.doc.append_element(binding, "operation");
        self.doc.set_attribute(operation, "name", name);

        for (child, attributes) in [("input", input), ("output", output)] {
            if attributes.is_empty() {
                continue;
            }
            let node = self.doc.append_element(operation, child);
            let body = self.doc.append_element(node, format!("{}:body", version.prefix()));
            self.set_attributes(body, attributes)?;
        }

        if !fault.is_empty() {
            let node = self.doc.append_element(operation, "fault");
            self.set_attributes(node, fault)?;
        }

        Ok(operation)
    }

    /// Appends `soap:binding` to a binding.
    pub fn add_soap_binding(&mut self, binding: NodeId, style: Style, transport: &str, version: SoapVersion) -> NodeId {
        let soap_binding = self
            .doc
            .append_element(binding, format!("{}:binding", version.prefix()));
        self.doc.set_attribute(soap_binding, "style", style.as_str());
        self.doc.set_attribute(soap_binding, "transport", transport);
        soap_binding
    }

    /// Inserts `soap:operation` as the first child of a binding operation.
    pub fn add_soap_operation(&mut self, operation: NodeId, action: &str, version: SoapVersion) -> Result<NodeId, SoapError> {
        let action = sanitize_uri(action)?;
        let soap_operation = self
            .doc
            .create_element(format!("{}:operation", version.prefix()));
        self.doc.set_attribute(soap_operation, "soapAction", action);
        self.doc.insert_first(operation, soap_operation);
        Ok(soap_operation)
    }

    /// Appends a `service` with a single port bound to `binding` at `location`.
    pub fn add_service(
        &mut self,
        name: &str,
        port_name: &str,
        binding: &str,
        location: &str,
        version: SoapVersion,
    ) -> Result<NodeId, SoapError> {
        let location = sanitize_uri(location)?;

        let service = self.doc.append_element(self.definitions, "service");
        self.doc.set_attribute(service, "name", name);

        let port = self.doc.append_element(service, "port");
        self.doc.set_attribute(port, "name", port_name);
        self.doc.set_attribute(port, "binding", binding);

        let address = self
            .doc
            .append_element(port, format!("{}:address", version.prefix()));
        self.doc.set_attribute(address, "location", location);
        Ok(service)
    }

    /// Inserts documentation as the first child of `node`.
    ///
    /// Schema nodes get `xsd:annotation/xsd:documentation`; WSDL nodes get a
    /// plain `documentation` element.
    pub fn add_documentation(&mut self, node: NodeId, text: &str) -> NodeId {
        let (wrapper, holder) = if self.is_schema_node(node) {
            let annotation = self.doc.create_element("xsd:annotation");
            let documentation = self.doc.append_element(annotation, "xsd:documentation");
            (annotation, documentation)
        } else {
            let documentation = self.doc.create_element("documentation");
            (documentation, documentation)
        };

        let text = self.doc.create_text(text);
        self.doc.append_child(holder, text);
        self.doc.insert_first(node, wrapper);
        wrapper
    }

    fn is_schema_node(&self, node: NodeId) -> bool {
        match self.doc.namespace_uri(node) {
            Some(uri) => uri == XSD_NS_URI,
            // Detached nodes cannot see the root's declarations
            None => self.doc.prefix(node) == Some(XSD_NS),
        }
    }

    /// Appends an `xsd:element` to the schema and returns its qualified name.
    pub fn add_element(&mut self, spec: &ElementSpec) -> Result<String, SoapError> {
        let name = spec
            .name()
            .ok_or_else(|| SoapError::InvalidElement {
                message: "element has no name".to_string(),
            })?
            .to_string();

        let element = self.build_element(spec)?;
        let schema = self.schema();
        self.doc.append_child(schema, element);
        Ok(self.qualify(&name))
    }

    fn build_element(&mut self, spec: &ElementSpec) -> Result<NodeId, SoapError> {
        let element = self.doc.create_element("xsd:element");
        self.set_attributes(element, &spec.attributes)?;

        if let Some((compositor, children)) = &spec.content {
            let complex_type = self.doc.append_element(element, "xsd:complexType");
            if !children.is_empty() {
                let container = self.doc.append_element(complex_type, compositor.element_name());
                for child in children {
                    let child = self.build_element(child)?;
                    self.doc.append_child(container, child);
                }
            }
        }
        Ok(element)
    }

    /// Imports a foreign `types` element into this document.
    pub fn add_types(&mut self, source: &Document, types: NodeId) -> NodeId {
        let imported = self.doc.import(source, types);
        self.insert_types_section(imported);
        imported
    }
}
