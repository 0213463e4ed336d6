//! Toolkit error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Coarse classification of a [`SoapError`].
///
/// Every variant is fatal for the call that raised it. Generation never
/// returns a partial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised by a setter or builder call with bad input.
    Configuration,
    /// Raised while resolving a type or an operation during generation.
    Resolution,
    /// Raised by `generate()` when the discovery session is incomplete.
    State,
    /// Reading or writing a file failed.
    Io,
    /// Request unwrapping in the document/literal wrapper failed.
    Dispatch,
}

/// Errors that can occur while building or serving a WSDL.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum SoapError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Uri contains invalid characters or is empty")]
    #[diagnostic(
        code(soap::config::invalid_uri),
        help("Pass an absolute endpoint URI such as http://example.com/service")
    )]
    InvalidUri {
        uri: String,
    },

    #[error("Key \"use\" is required in Operation soap:body style.")]
    #[diagnostic(
        code(soap::config::missing_body_use),
        help("Set \"use\" to either \"encoded\" or \"literal\"")
    )]
    MissingBodyUse,

    #[error("Unknown value \"{value}\" for \"{key}\"")]
    #[diagnostic(code(soap::config::invalid_option))]
    InvalidOption {
        key: String,
        value: String,
    },

    #[error("Service name \"{name}\" must start with a letter or an underscore")]
    #[diagnostic(code(soap::config::invalid_service_name))]
    InvalidServiceName {
        name: String,
    },

    #[error("Function \"{name}\" is not known to the type catalog")]
    #[diagnostic(
        code(soap::config::unknown_function),
        help("Register the function descriptor with the catalog before adding it")
    )]
    UnknownFunction {
        name: String,
    },

    #[error("Class \"{name}\" is not known to the type catalog")]
    #[diagnostic(code(soap::config::unknown_class))]
    UnknownClass {
        name: String,
    },

    #[error("Strategy for Complex Type \"{type_name}\" is not a valid strategy object.")]
    #[diagnostic(
        code(soap::config::invalid_strategy),
        help("Valid strategy names are: AnyType, DefaultComplexType, ArrayOfTypeComplex, ArrayOfTypeSequence")
    )]
    InvalidStrategy {
        type_name: String,
        strategy: String,
    },

    #[error("Default Strategy for Complex Types is not a valid strategy object.")]
    #[diagnostic(
        code(soap::config::invalid_default_strategy),
        help("Valid strategy names are: AnyType, DefaultComplexType, ArrayOfTypeComplex, ArrayOfTypeSequence")
    )]
    InvalidDefaultStrategy {
        strategy: String,
    },

    #[error("Class map entry \"{from}\" => \"{to}\" is invalid")]
    #[diagnostic(code(soap::config::invalid_class_map))]
    InvalidClassMap {
        from: String,
        to: String,
    },

    #[error("Invalid discovery configuration: {message}")]
    #[diagnostic(code(soap::config::invalid_config))]
    InvalidConfig {
        message: String,
    },

    #[error("Schema element definition is invalid: {message}")]
    #[diagnostic(code(soap::config::invalid_element))]
    InvalidElement {
        message: String,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Cannot add a complex type {type_name} that is not an object or where class could not be found in \"DefaultComplexType\" strategy.")]
    #[diagnostic(code(soap::resolve::class_not_found))]
    ClassNotFound {
        type_name: String,
    },

    #[error("ArrayOfTypeComplex cannot return nested ArrayOfObject deeper than one level. Use array object properties to return deep nested data.")]
    #[diagnostic(
        code(soap::resolve::array_too_deep),
        help("Switch to the ArrayOfTypeSequence strategy for arbitrarily nested arrays")
    )]
    NestedArrayTooDeep {
        type_name: String,
    },

    #[error("Type \"{type_name}\" mixes the T[] and array<T> notations")]
    #[diagnostic(
        code(soap::resolve::mixed_array_notation),
        help("Use either Foo[][] or array<array<Foo>>, not both")
    )]
    MixedArrayNotation {
        type_name: String,
    },

    #[error("No prototypes could be found for the \"{function}\" function")]
    #[diagnostic(code(soap::resolve::no_prototypes))]
    NoPrototypes {
        function: String,
    },

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Can either dump functions or a class as a service, not both.")]
    #[diagnostic(code(soap::state::mixed_discovery))]
    MixedDiscovery,

    #[error("Missing uri. You have to explicitly configure the Endpoint Uri by calling AutoDiscover::set_uri().")]
    #[diagnostic(code(soap::state::missing_uri))]
    MissingUri,

    #[error("No service name given. Call AutoDiscover::set_service_name().")]
    #[diagnostic(code(soap::state::missing_service_name))]
    MissingServiceName,

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access file '{path}': {message}")]
    #[diagnostic(code(soap::io::file_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Malformed XML: {message}")]
    #[diagnostic(code(soap::io::xml_error))]
    XmlError {
        message: String,
    },

    // =========================================================================
    // Dispatch Errors
    // =========================================================================
    #[error("Expecting exactly one argument that is the document/literal wrapper, got {count}")]
    #[diagnostic(code(soap::dispatch::wrapper_arity))]
    WrapperArity {
        count: usize,
    },

    #[error("Method {method} does not exist on delegate object {delegate}")]
    #[diagnostic(code(soap::dispatch::unknown_method))]
    UnknownMethod {
        method: String,
        delegate: String,
    },

    #[error("Received unknown argument {argument} which is not an argument to {delegate}::{method}")]
    #[diagnostic(code(soap::dispatch::unknown_argument))]
    UnknownArgument {
        argument: String,
        delegate: String,
        method: String,
    },

    #[error("Document/literal request for {method} must be an object")]
    #[diagnostic(code(soap::dispatch::invalid_request))]
    InvalidRequest {
        method: String,
    },
}

impl SoapError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlError {
            message: message.into(),
        }
    }

    /// Returns the taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUri { .. }
            | Self::MissingBodyUse
            | Self::InvalidOption { .. }
            | Self::InvalidServiceName { .. }
            | Self::UnknownFunction { .. }
            | Self::UnknownClass { .. }
            | Self::InvalidStrategy { .. }
            | Self::InvalidDefaultStrategy { .. }
            | Self::InvalidClassMap { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidElement { .. } => ErrorKind::Configuration,
            Self::ClassNotFound { .. }
            | Self::NestedArrayTooDeep { .. }
            | Self::MixedArrayNotation { .. }
            | Self::NoPrototypes { .. } => ErrorKind::Resolution,
            Self::MixedDiscovery | Self::MissingUri | Self::MissingServiceName => ErrorKind::State,
            Self::IoError { .. } | Self::XmlError { .. } => ErrorKind::Io,
            Self::WrapperArity { .. }
            | Self::UnknownMethod { .. }
            | Self::UnknownArgument { .. }
            | Self::InvalidRequest { .. } => ErrorKind::Dispatch,
        }
    }
}
