//! Discovery configuration.
//!
//! Binding and body styles are plain structs with defaults that match the
//! SOAP 1.1 rpc/encoded convention. A whole discovery session can also be
//! described in a JSON file and loaded with [`DiscoveryConfig::load`].

use std::fmt;
use std::path::Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::SoapError;

/// Default transport for `soap:binding`.
pub const HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

/// Default `encodingStyle` for encoded bodies.
pub const SOAP_ENCODING: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// SOAP message shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Rpc,
    Document,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Rpc => "rpc",
            Style::Document => "document",
        }
    }

    fn parse(value: &str) -> Result<Self, SoapError> {
        match value {
            "rpc" => Ok(Style::Rpc),
            "document" => Ok(Style::Document),
            other => Err(SoapError::InvalidOption {
                key: "style".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `use` attribute of `soap:body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyUse {
    #[default]
    Encoded,
    Literal,
}

impl BodyUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyUse::Encoded => "encoded",
            BodyUse::Literal => "literal",
        }
    }
}

/// SOAP protocol version of the binding extension elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SoapVersion {
    #[default]
    #[serde(rename = "1.1")]
    Soap11,
    #[serde(rename = "1.2")]
    Soap12,
}

impl SoapVersion {
    /// Prefix bound on `definitions` for this version's extension elements.
    pub fn prefix(&self) -> &'static str {
        match self {
            SoapVersion::Soap11 => "soap",
            SoapVersion::Soap12 => "soap12",
        }
    }
}

/// Style and transport of the generated `soap:binding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingStyle {
    pub style: Style,
    pub transport: String,
}

impl Default for BindingStyle {
    fn default() -> Self {
        Self {
            style: Style::Rpc,
            transport: HTTP_TRANSPORT.to_string(),
        }
    }
}

impl BindingStyle {
    /// Merges `style` and `transport` keys into the current values.
    ///
    /// Keys that are absent keep their previous value.
    pub fn merge(&mut self, options: &IndexMap<String, String>) -> Result<(), SoapError> {
        if let Some(style) = options.get("style") {
            self.style = Style::parse(style)?;
        }
        if let Some(transport) = options.get("transport") {
            self.transport = transport.clone();
        }
        Ok(())
    }
}

/// Attributes of every `soap:body` in the binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationBodyStyle {
    #[serde(rename = "use")]
    pub use_: BodyUse,

    #[serde(rename = "encodingStyle", skip_serializing_if = "Option::is_none", default)]
    pub encoding_style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub namespace: Option<String>,
}

impl Default for OperationBodyStyle {
    fn default() -> Self {
        Self {
            use_: BodyUse::Encoded,
            encoding_style: Some(SOAP_ENCODING.to_string()),
            namespace: None,
        }
    }
}

impl OperationBodyStyle {
    /// Builds a body style from a raw option map. The `use` key is mandatory.
    pub fn from_options(options: &IndexMap<String, String>) -> Result<Self, SoapError> {
        let use_ = match options.get("use").map(String::as_str) {
            None => return Err(SoapError::MissingBodyUse),
            Some("encoded") => BodyUse::Encoded,
            Some("literal") => BodyUse::Literal,
            Some(other) => {
                return Err(SoapError::InvalidOption {
                    key: "use".to_string(),
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            use_,
            encoding_style: options.get("encodingStyle").cloned(),
            namespace: options.get("namespace").cloned(),
        })
    }

    /// Attribute list in emission order.
    pub fn to_attributes(&self) -> IndexMap<String, String> {
        let mut attributes = IndexMap::new();
        attributes.insert("use".to_string(), self.use_.as_str().to_string());
        if let Some(encoding_style) = &self.encoding_style {
            attributes.insert("encodingStyle".to_string(), encoding_style.clone());
        }
        if let Some(namespace) = &self.namespace {
            attributes.insert("namespace".to_string(), namespace.clone());
        }
        attributes
    }
}

/// A complete discovery session, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Service name; defaults to the short name of the discovered class.
    #[serde(rename = "serviceName", skip_serializing_if = "Option::is_none", default)]
    pub service_name: Option<String>,

    /// Endpoint URI, also used as the target namespace.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uri: Option<String>,

    /// Raw `soap:binding` options merged over the defaults.
    #[serde(rename = "bindingStyle", default)]
    pub binding_style: IndexMap<String, String>,

    /// Raw `soap:body` options; must contain `use` when present.
    #[serde(rename = "operationBodyStyle", skip_serializing_if = "Option::is_none", default)]
    pub operation_body_style: Option<IndexMap<String, String>>,

    /// Native type name to WSDL type name overrides.
    #[serde(rename = "classMap", default)]
    pub class_map: IndexMap<String, String>,

    /// Name of the complex type strategy, e.g. `ArrayOfTypeSequence`.
    #[serde(rename = "complexTypeStrategy", skip_serializing_if = "Option::is_none", default)]
    pub complex_type_strategy: Option<String>,

    #[serde(rename = "soapVersion", default)]
    pub soap_version: SoapVersion,
}

impl DiscoveryConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, SoapError> {
        serde_json::from_str(content).map_err(|e| SoapError::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, SoapError> {
        let content = std::fs::read_to_string(path).map_err(|e| SoapError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| SoapError::IoError {
            path: path.to_path_buf(),
            message: format!("Failed to parse discovery config: {}", e),
        })
    }

    /// Save the configuration to disk.
    pub fn save(&self, path: &Path) -> Result<(), SoapError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| SoapError::IoError {
            path: path.to_path_buf(),
            message: format!("Failed to serialize discovery config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SoapError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
