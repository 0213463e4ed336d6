//! Service discovery.
//!
//! [`AutoDiscover`] walks a class's public methods, or a list of free
//! functions, and emits a complete WSDL document for them: schema types,
//! messages, a port type, a SOAP binding and a service.
//!
//! ```text
//!   class / functions
//!          │
//!          ▼
//!   ┌──────────────┐  widest prototype   ┌──────────────┐
//!   │ AutoDiscover │ ──────────────────▶ │ per function │
//!   └──────────────┘                     └──────┬───────┘
//!                                               │ get_type / add_message /
//!                                               │ add_*_operation
//!                                               ▼
//!                                        ┌──────────────┐
//!                                        │     Wsdl     │
//!                                        └──────────────┘
//! ```

mod operation;
mod strategy;

pub use strategy::{DiscoveryStrategy, ReflectionDiscovery};

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::{BindingStyle, DiscoveryConfig, OperationBodyStyle, SoapVersion};
use crate::diagnostic::SoapError;
use crate::reflect::{FunctionDescriptor, TypeCatalog};
use crate::strategy::ComplexTypeStrategy;
use crate::wsdl::{sanitize_uri, Wsdl};

/// Builds a WSDL document from a class or a set of functions.
#[derive(Debug)]
pub struct AutoDiscover {
    catalog: Arc<dyn TypeCatalog>,
    service_name: Option<String>,
    uri: Option<String>,
    class: Option<String>,
    functions: Vec<String>,
    strategy: Option<ComplexTypeStrategy>,
    class_map: IndexMap<String, String>,
    binding_style: BindingStyle,
    operation_body_style: OperationBodyStyle,
    soap_version: SoapVersion,
    discovery: Arc<dyn DiscoveryStrategy>,
}

impl AutoDiscover {
    pub fn new(catalog: Arc<dyn TypeCatalog>) -> Self {
        Self {
            catalog,
            service_name: None,
            uri: None,
            class: None,
            functions: Vec::new(),
            strategy: None,
            class_map: IndexMap::new(),
            binding_style: BindingStyle::default(),
            operation_body_style: OperationBodyStyle::default(),
            soap_version: SoapVersion::default(),
            discovery: Arc::new(ReflectionDiscovery),
        }
    }

    /// Creates a session from a stored configuration.
    pub fn with_config(catalog: Arc<dyn TypeCatalog>, config: &DiscoveryConfig) -> Result<Self, SoapError> {
        let mut discover = Self::new(catalog);
        discover.apply_config(config)?;
        Ok(discover)
    }

    /// Applies every option set in `config` on top of the current state.
    pub fn apply_config(&mut self, config: &DiscoveryConfig) -> Result<(), SoapError> {
        if let Some(name) = &config.service_name {
            self.set_service_name(name)?;
        }
        if let Some(uri) = &config.uri {
            self.set_uri(uri)?;
        }
        self.set_binding_style(&config.binding_style)?;
        if let Some(options) = &config.operation_body_style {
            self.set_operation_body_style(options)?;
        }
        if !config.class_map.is_empty() {
            self.set_class_map(config.class_map.clone())?;
        }
        if let Some(name) = &config.complex_type_strategy {
            let strategy = ComplexTypeStrategy::from_name(name).ok_or_else(|| SoapError::InvalidDefaultStrategy {
                strategy: name.clone(),
            })?;
            self.set_complex_type_strategy(strategy);
        }
        self.set_soap_version(config.soap_version);
        Ok(())
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// Sets the service name. It must start with a letter or an underscore.
    pub fn set_service_name(&mut self, name: &str) -> Result<(), SoapError> {
        let valid = name
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_');
        if !valid {
            return Err(SoapError::InvalidServiceName { name: name.to_string() });
        }
        self.service_name = Some(name.to_string());
        Ok(())
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Sets the endpoint URI, which also becomes the target namespace.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), SoapError> {
        self.uri = Some(sanitize_uri(uri)?);
        Ok(())
    }

    pub fn binding_style(&self) -> &BindingStyle {
        &self.binding_style
    }

    /// Merges `style` and `transport` over the current binding style.
    pub fn set_binding_style(&mut self, options: &IndexMap<String, String>) -> Result<(), SoapError> {
        self.binding_style.merge(options)
    }

    pub fn operation_body_style(&self) -> &OperationBodyStyle {
        &self.operation_body_style
    }

    /// Replaces the `soap:body` style. `use` is required.
    pub fn set_operation_body_style(&mut self, options: &IndexMap<String, String>) -> Result<(), SoapError> {
        self.operation_body_style = OperationBodyStyle::from_options(options)?;
        Ok(())
    }

    pub fn set_soap_version(&mut self, version: SoapVersion) {
        self.soap_version = version;
    }

    pub fn set_complex_type_strategy(&mut self, strategy: ComplexTypeStrategy) {
        self.strategy = Some(strategy);
    }

    pub fn class_map(&self) -> &IndexMap<String, String> {
        &self.class_map
    }

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

    pub fn set_discovery_strategy(&mut self, discovery: Arc<dyn DiscoveryStrategy>) {
        self.discovery = discovery;
    }

    /// Publishes the public methods of `class`.
    pub fn set_class(&mut self, class: &str) {
        self.class = Some(class.to_string());
    }

    /// Publishes a free function. Adding the same function twice, under any
    /// spelling the catalog accepts, is a no-op.
    pub fn add_function(&mut self, name: &str) -> Result<(), SoapError> {
        let canonical = self
            .catalog
            .function(name)
            .map(|function| function.name.clone())
            .ok_or_else(|| SoapError::UnknownFunction { name: name.to_string() })?;
        if !self.functions.contains(&canonical) {
            self.functions.push(canonical);
        }
        Ok(())
    }

    /// Generates the WSDL document.
    ///
    /// Every call starts from a fresh document, so repeated calls with the
    /// same configuration yield the same output.
    pub fn generate(&self) -> Result<Wsdl, SoapError> {
        if self.class.is_some() && !self.functions.is_empty() {
            return Err(SoapError::MixedDiscovery);
        }
        let uri = self.uri.as_deref().ok_or(SoapError::MissingUri)?;

        let class = match &self.class {
            Some(name) => Some(
                self.catalog
                    .class(name)
                    .cloned()
                    .ok_or_else(|| SoapError::UnknownClass { name: name.clone() })?,
            ),
            None => None,
        };

        let service_name = match (&self.service_name, &class) {
            (Some(name), _) => name.clone(),
            (None, Some(class)) => class.short_name().to_string(),
            (None, None) => return Err(SoapError::MissingServiceName),
        };

        let functions: Vec<FunctionDescriptor> = match &class {
            Some(class) => class.service_methods().cloned().collect(),
            None => self
                .functions
                .iter()
                .map(|name| {
                    self.catalog
                        .function(name)
                        .cloned()
                        .ok_or_else(|| SoapError::UnknownFunction { name: name.clone() })
                })
                .collect::<Result<_, _>>()?,
        };

        let mut wsdl = Wsdl::new(&service_name, uri, self.catalog.clone())?;
        if !self.class_map.is_empty() {
            wsdl.set_class_map(self.class_map.clone())?;
        }
        if let Some(strategy) = &self.strategy {
            wsdl.set_complex_type_strategy(strategy.clone());
        }
        wsdl.schema();

        let port_name = format!("{}Port", service_name);
        let binding_name = format!("{}Binding", service_name);

        let port_type = wsdl.qualify(&port_name);
        let binding_type = wsdl.qualify(&binding_name);

        let port = wsdl.add_port_type(&port_name);
        let binding = wsdl.add_binding(&binding_name, &port_type);
        wsdl.add_soap_binding(
            binding,
            self.binding_style.style,
            &self.binding_style.transport,
            self.soap_version,
        );
        wsdl.add_service(
            &format!("{}Service", service_name),
            &port_name,
            &binding_type,
            uri,
            self.soap_version,
        )?;

        for function in &functions {
            debug!(function = %function.name, "discovering operation");
            self.add_function_to_wsdl(function, &mut wsdl, uri, port, binding)?;
        }

        info!(
            service = %service_name,
            operations = functions.len(),
            types = wsdl.types().len(),
            "generated wsdl"
        );
        Ok(wsdl)
    }

    /// Generates the document and serializes it.
    pub fn to_xml(&self) -> Result<String, SoapError> {
        self.generate()?.to_xml()
    }

    /// Generates the document and writes it to `path`.
    pub fn dump(&self, path: &Path) -> Result<(), SoapError> {
        self.generate()?.dump(path)
    }
}
