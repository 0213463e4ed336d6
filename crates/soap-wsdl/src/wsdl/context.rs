//! Type registry and schema section of a [`Wsdl`].

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::{Wsdl, TYPES_NS};
use crate::diagnostic::SoapError;
use crate::types::xsd_scalar;
use crate::xml::NodeId;

impl Wsdl {
    /// Records that `native` is described by `qualified`.
    ///
    /// The first registration wins; later calls for the same name are ignored.
    pub fn add_type(&mut self, native: &str, qualified: &str) {
        if self.included_types.contains_key(native) {
            return;
        }
        debug!(native, qualified, "registered type");
        self.included_types
            .insert(native.to_string(), qualified.to_string());
    }

    /// Every registered native type and its qualified WSDL name.
    pub fn types(&self) -> &IndexMap<String, String> {
        &self.included_types
    }

    /// Qualified name already registered for exactly `native`.
    pub fn scan_registered_types(&self, native: &str) -> Option<String> {
        self.included_types.get(native).cloned()
    }

    /// Registry key for a singular type: the catalog's spelling of a class
    /// without the leading `\`, otherwise the name as written.
    pub fn canonical_type_name(&self, singular: &str) -> String {
        match self.catalog.class(singular) {
            Some(class) => class.name.trim_start_matches('\\').to_string(),
            None => singular.to_string(),
        }
    }

    /// Qualifies a local name into the service namespace.
    pub fn qualify(&self, local: &str) -> String {
        format!("{}:{}", TYPES_NS, local)
    }

    /// The `types/xsd:schema` element, created on first use.
    pub fn schema(&mut self) -> NodeId {
        if let Some(schema) = self.schema {
            return schema;
        }

        let types = self.doc.create_element("types");
        let schema = self.doc.append_element(types, "xsd:schema");
        self.doc.set_attribute(schema, "targetNamespace", self.uri.as_str());
        self.insert_types_section(types);
        self.schema = Some(schema);
        schema
    }

    /// Places a `types` element ahead of every message, port type, binding
    /// and service. Only `documentation` and earlier `types` may precede it.
    pub(super) fn insert_types_section(&mut self, types: NodeId) {
        let definitions = self.definitions;
        let reference = self
            .doc
            .child_elements(definitions)
            .find(|c| !matches!(self.doc.local_name(*c), "documentation" | "types"));
        match reference {
            Some(reference) => self.doc.insert_before(definitions, types, reference),
            None => self.doc.append_child(definitions, types),
        }
    }

    /// Qualified XSD name for a native type.
    ///
    /// Scalars map directly; everything else goes through the active complex
    /// type strategy. `void` maps to the empty string.
    pub fn get_type(&mut self, type_name: &str) -> Result<String, SoapError> {
        match xsd_scalar(type_name) {
            Some(scalar) => Ok(scalar.to_string()),
            None => self.add_complex_type(type_name),
        }
    }

    /// Emits (or reuses) a schema definition for `type_name` using the active
    /// strategy and returns its qualified name.
    pub fn add_complex_type(&mut self, type_name: &str) -> Result<String, SoapError> {
        if let Some(existing) = self.included_types.get(type_name) {
            return Ok(existing.clone());
        }
        let strategy = self.strategy_handle();
        trace!(type_name, strategy = strategy.name(), "dispatching complex type");
        strategy.add_complex_type(type_name, self)
    }
}
