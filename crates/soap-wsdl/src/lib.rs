//! # SOAP WSDL
//!
//! This crate synthesizes WSDL 1.1 documents from service descriptors. A
//! class or a set of free functions goes in; a document with XML Schema
//! types, messages, a port type, a SOAP binding and a service comes out.
//!
//! ## Architecture
//!
//! ```text
//! Descriptors (classes, functions)
//!        │
//!        ▼
//! ┌──────────────┐
//! │ TypeCatalog  │  Lookup by name
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │ AutoDiscover │  One operation per method
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Wsdl     │  Type registry + builder
//! │  (get_type)  │
//! └──────┬───────┘
//!        │ non-scalar types
//!        ▼
//! ┌──────────────┐
//! │  Strategies  │  complexType / arrays / composite
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use soap_wsdl::{AutoDiscover, InMemoryCatalog};
//!
//! let catalog = InMemoryCatalog::new().with_class(calculator);
//!
//! let mut discover = AutoDiscover::new(Arc::new(catalog));
//! discover.set_class("App\\Calculator");
//! discover.set_uri("http://example.com/calculator")?;
//!
//! let xml = discover.to_xml()?;
//! ```

pub mod config;
pub mod diagnostic;
pub mod discover;
pub mod reflect;
pub mod server;
pub mod strategy;
pub mod types;
pub mod wsdl;
pub mod xml;

pub use config::{BindingStyle, DiscoveryConfig, OperationBodyStyle, SoapVersion, Style};
pub use diagnostic::{ErrorKind, SoapError};
pub use discover::{AutoDiscover, DiscoveryStrategy, ReflectionDiscovery};
pub use reflect::{ClassDescriptor, FieldDescriptor, FunctionDescriptor, InMemoryCatalog, TypeCatalog};
pub use server::{DocumentLiteralWrapper, ServiceObject};
pub use strategy::ComplexTypeStrategy;
pub use wsdl::Wsdl;
