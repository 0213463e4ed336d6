//! The WSDL document under construction.
//!
//! [`Wsdl`] owns the DOM, the registry of native types that already have a
//! schema definition, and the class map. It is the context every complex type
//! strategy receives, and it exposes the element-level builder API used by
//! [`AutoDiscover`](crate::AutoDiscover).

mod builder;
mod context;
mod uri;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use indexmap::IndexMap;
use tracing::debug;

use crate::diagnostic::SoapError;
use crate::reflect::TypeCatalog;
use crate::strategy::ComplexTypeStrategy;
use crate::xml::{Document, NodeId};

pub use builder::{Compositor, ElementSpec, MessagePart};
pub use uri::sanitize_uri;

pub const WSDL_NS_URI: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP_11_NS_URI: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const SOAP_12_NS_URI: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
pub const XSD_NS_URI: &str = "http://www.w3.org/2001/XMLSchema";
pub const SOAP_ENC_URI: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Prefix of the service's own namespace.
pub const TYPES_NS: &str = "tns";
pub const XSD_NS: &str = "xsd";
pub const SOAP_ENC_NS: &str = "soap-enc";
pub const WSDL_NS: &str = "wsdl";

/// A WSDL 1.1 document and its type registry.
#[derive(Debug)]
pub struct Wsdl {
    doc: Document,
    definitions: NodeId,
    schema: Option<NodeId>,
    uri: String,
    included_types: IndexMap<String, String>,
    class_map: IndexMap<String, String>,
    strategy: Arc<ComplexTypeStrategy>,
    catalog: Arc<dyn TypeCatalog>,
}

impl Wsdl {
    /// Creates an empty `definitions` document for service `name` at `uri`.
    pub fn new(name: &str, uri: &str, catalog: Arc<dyn TypeCatalog>) -> Result<Self, SoapError> {
        let uri = sanitize_uri(uri)?;

        let mut doc = Document::new();
        let definitions = doc.create_element("definitions");
        doc.set_attribute(definitions, "xmlns", WSDL_NS_URI);
        doc.set_attribute(definitions, "xmlns:tns", uri.as_str());
        doc.set_attribute(definitions, "xmlns:soap", SOAP_11_NS_URI);
        doc.set_attribute(definitions, "xmlns:xsd", XSD_NS_URI);
        doc.set_attribute(definitions, "xmlns:soap-enc", SOAP_ENC_URI);
        doc.set_attribute(definitions, "xmlns:wsdl", WSDL_NS_URI);
        doc.set_attribute(definitions, "xmlns:soap12", SOAP_12_NS_URI);
        doc.set_attribute(definitions, "name", name);
        doc.set_attribute(definitions, "targetNamespace", uri.as_str());
        doc.set_root(definitions);

        Ok(Self {
            doc,
            definitions,
            schema: None,
            uri,
            included_types: IndexMap::new(),
            class_map: IndexMap::new(),
            strategy: Arc::new(ComplexTypeStrategy::default()),
            catalog,
        })
    }

    /// The sanitized target namespace.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Changes the target namespace, rewriting every attribute that mentions
    /// the previous one.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), SoapError> {
        let uri = sanitize_uri(uri)?;
        let old = std::mem::replace(&mut self.uri, uri.clone());

        if old != uri {
            self.doc.map_attribute_values(|value| {
                value.contains(old.as_str()).then(|| value.replace(old.as_str(), &uri))
            });
        }
        self.doc.set_attribute(self.definitions, "xmlns:tns", uri.as_str());
        debug!(from = %old, to = %uri, "rewrote target namespace");
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// The root `definitions` element.
    pub fn definitions(&self) -> NodeId {
        self.definitions
    }

    pub fn class_map(&self) -> &IndexMap<String, String> {
        &self.class_map
    }

    /// Replaces the native-to-WSDL type name overrides.
    pub fn set_class_map(&mut self, class_map: IndexMap<String, String>) -> Result<(), SoapError> {
        if let Some((from, to)) = class_map
            .iter()
            .find(|(from, to)| from.trim().is_empty() || to.trim().is_empty())
        {
            return Err(SoapError::InvalidClassMap {
                from: from.clone(),
                to: to.clone(),
            });
        }
        self.class_map = class_map;
        Ok(())
    }

    pub fn complex_type_strategy(&self) -> &ComplexTypeStrategy {
        &self.strategy
    }

    pub fn set_complex_type_strategy(&mut self, strategy: ComplexTypeStrategy) {
        self.strategy = Arc::new(strategy);
    }

    pub(crate) fn strategy_handle(&self) -> Arc<ComplexTypeStrategy> {
        Arc::clone(&self.strategy)
    }

    pub fn catalog(&self) -> Arc<dyn TypeCatalog> {
        Arc::clone(&self.catalog)
    }

    /// WSDL name for a native type: the class map wins, otherwise the last
    /// segment of the namespaced name.
    pub fn translate_type(&self, type_name: &str) -> String {
        if let Some(mapped) = self.class_map.get(type_name) {
            return mapped.clone();
        }
        let trimmed = type_name.trim_matches('\\');
        trimmed.rsplit('\\').next().unwrap_or(trimmed).to_string()
    }

    pub fn to_xml(&self) -> Result<String, SoapError> {
        self.doc.to_xml()
    }

    /// Writes the serialized document to `out`.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), SoapError> {
        let xml = self.to_xml()?;
        out.write_all(xml.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| SoapError::io("<stream>", e.to_string()))
    }

    /// Writes the serialized document to a file.
    pub fn dump(&self, path: &Path) -> Result<(), SoapError> {
        let xml = self.to_xml()?;
        let file = File::create(path).map_err(|e| SoapError::io(path, e.to_string()))?;
        let mut out = BufWriter::new(file);
        out.write_all(xml.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| SoapError::io(path, e.to_string()))?;
        debug!(path = %path.display(), bytes = xml.len(), "dumped wsdl");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::InMemoryCatalog;
    use tempfile::TempDir;

    const URI: &str = "http://localhost/MyService.php";

    fn wsdl() -> Wsdl {
        Wsdl::new("MyService", URI, Arc::new(InMemoryCatalog::new())).unwrap()
    }

    #[test]
    fn test_new_binds_namespaces() {
        let wsdl = wsdl();
        let doc = wsdl.document();
        let root = wsdl.definitions();
        assert_eq!(doc.lookup_namespace(root, None), Some(WSDL_NS_URI));
        assert_eq!(doc.lookup_namespace(root, Some("soap")), Some(SOAP_11_NS_URI));
        assert_eq!(doc.lookup_namespace(root, Some("soap12")), Some(SOAP_12_NS_URI));
        assert_eq!(doc.lookup_namespace(root, Some("tns")), Some(URI));
        assert_eq!(doc.lookup_namespace(root, Some("xsd")), Some(XSD_NS_URI));
        assert_eq!(doc.lookup_namespace(root, Some("soap-enc")), Some(SOAP_ENC_URI));
        assert_eq!(doc.lookup_namespace(root, Some("wsdl")), Some(WSDL_NS_URI));
        assert_eq!(doc.attribute(root, "name"), Some("MyService"));
        assert_eq!(doc.attribute(root, "targetNamespace"), Some(URI));
    }

    #[test]
    fn test_set_uri_rewrites_attributes() {
        let mut wsdl = wsdl();
        let schema = wsdl.schema();
        wsdl.set_uri("http://example.com/other").unwrap();

        let doc = wsdl.document();
        let root = wsdl.definitions();
        assert_eq!(doc.lookup_namespace(root, Some("tns")), Some("http://example.com/other"));
        assert_eq!(doc.attribute(root, "targetNamespace"), Some("http://example.com/other"));
        assert_eq!(doc.attribute(schema, "targetNamespace"), Some("http://example.com/other"));
        assert_eq!(wsdl.uri(), "http://example.com/other");
    }

    #[test]
    fn test_set_uri_rejects_empty() {
        let mut wsdl = wsdl();
        assert!(matches!(wsdl.set_uri("  "), Err(SoapError::InvalidUri { .. })));
        assert_eq!(wsdl.uri(), URI);
    }

    #[test]
    fn test_translate_type() {
        let mut wsdl = wsdl();
        assert_eq!(wsdl.translate_type("\\SomeType"), "SomeType");
        assert_eq!(wsdl.translate_type("SomeType\\"), "SomeType");
        assert_eq!(wsdl.translate_type("\\SomeNamespace\\SomeType\\"), "SomeType");
        assert_eq!(wsdl.translate_type("SomeNamespace\\SomeType"), "SomeType");

        let mut map = IndexMap::new();
        map.insert("SomeType".to_string(), "SomeOtherType".to_string());
        wsdl.set_class_map(map).unwrap();
        assert_eq!(wsdl.translate_type("SomeType"), "SomeOtherType");
        assert!(wsdl.class_map().contains_key("SomeType"));
    }

    #[test]
    fn test_set_class_map_rejects_blank_entries() {
        let mut wsdl = wsdl();
        let mut map = IndexMap::new();
        map.insert("Book".to_string(), " ".to_string());
        assert!(matches!(
            wsdl.set_class_map(map),
            Err(SoapError::InvalidClassMap { .. })
        ));
    }

    #[test]
    fn test_dump_matches_to_xml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("service.wsdl");
        let wsdl = wsdl();

        wsdl.dump(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, wsdl.to_xml().unwrap());

        let mut buffer = Vec::new();
        wsdl.write_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), written);
    }

    #[test]
    fn test_dump_reports_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("service.wsdl");
        assert!(matches!(wsdl().dump(&path), Err(SoapError::IoError { .. })));
    }
}
