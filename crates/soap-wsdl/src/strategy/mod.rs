//! Complex type strategies.
//!
//! A strategy turns a native type name that is not a scalar into an XML
//! Schema definition inside the [`Wsdl`] it is handed, and returns the
//! qualified name to reference it by. The set of strategies is closed:
//!
//! | Strategy              | Produces                                            |
//! |-----------------------|-----------------------------------------------------|
//! | `AnyType`             | always `xsd:anyType`, no schema output              |
//! | `DefaultComplexType`  | `xsd:complexType/xsd:all` from public fields        |
//! | `ArrayOfTypeComplex`  | SOAP-encoded `soap-enc:Array` restriction, 1 level  |
//! | `ArrayOfTypeSequence` | `xsd:sequence` of `item`, any depth                 |
//! | `Composite`           | per-type dispatch with a fallback                   |
//!
//! Every strategy registers a type before building its body, so a class that
//! refers to itself resolves to its own, not yet complete, definition.

mod array_complex;
mod array_sequence;
mod composite;
mod default_complex;
mod documentation;

pub use array_complex::ArrayOfTypeComplex;
pub use array_sequence::ArrayOfTypeSequence;
pub use composite::{Composite, StrategySlot};
pub use default_complex::DefaultComplexType;
pub use documentation::{DocumentationStrategy, ReflectionDocumentation};

use crate::diagnostic::SoapError;
use crate::wsdl::Wsdl;

/// Qualified name returned by [`ComplexTypeStrategy::AnyType`].
pub const ANY_TYPE: &str = "xsd:anyType";

#[derive(Debug, Clone)]
pub enum ComplexTypeStrategy {
    AnyType,
    DefaultComplexType(DefaultComplexType),
    ArrayOfTypeComplex(ArrayOfTypeComplex),
    ArrayOfTypeSequence(ArrayOfTypeSequence),
    Composite(Composite),
}

impl Default for ComplexTypeStrategy {
    fn default() -> Self {
        ComplexTypeStrategy::DefaultComplexType(DefaultComplexType::default())
    }
}

impl ComplexTypeStrategy {
    /// Instantiates a strategy by name. A namespace prefix is ignored, so
    /// `Soap\ArrayOfTypeSequence` works too.
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.trim_matches('\\').rsplit('\\').next().unwrap_or(name);
        match short {
            "AnyType" => Some(ComplexTypeStrategy::AnyType),
            "DefaultComplexType" => Some(ComplexTypeStrategy::DefaultComplexType(DefaultComplexType::default())),
            "ArrayOfTypeComplex" => Some(ComplexTypeStrategy::ArrayOfTypeComplex(ArrayOfTypeComplex::default())),
            "ArrayOfTypeSequence" => Some(ComplexTypeStrategy::ArrayOfTypeSequence(ArrayOfTypeSequence::default())),
            "Composite" => Some(ComplexTypeStrategy::Composite(Composite::default())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComplexTypeStrategy::AnyType => "AnyType",
            ComplexTypeStrategy::DefaultComplexType(_) => "DefaultComplexType",
            ComplexTypeStrategy::ArrayOfTypeComplex(_) => "ArrayOfTypeComplex",
            ComplexTypeStrategy::ArrayOfTypeSequence(_) => "ArrayOfTypeSequence",
            ComplexTypeStrategy::Composite(_) => "Composite",
        }
    }

    /// Emits or reuses the schema definition of `type_name` in `wsdl`.
    pub fn add_complex_type(&self, type_name: &str, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        match self {
            ComplexTypeStrategy::AnyType => Ok(ANY_TYPE.to_string()),
            ComplexTypeStrategy::DefaultComplexType(strategy) => strategy.add_complex_type(type_name, wsdl),
            ComplexTypeStrategy::ArrayOfTypeComplex(strategy) => strategy.add_complex_type(type_name, wsdl),
            ComplexTypeStrategy::ArrayOfTypeSequence(strategy) => strategy.add_complex_type(type_name, wsdl),
            ComplexTypeStrategy::Composite(strategy) => strategy.add_complex_type(type_name, wsdl),
        }
    }
}

impl From<DefaultComplexType> for ComplexTypeStrategy {
    fn from(strategy: DefaultComplexType) -> Self {
        ComplexTypeStrategy::DefaultComplexType(strategy)
    }
}

impl From<ArrayOfTypeComplex> for ComplexTypeStrategy {
    fn from(strategy: ArrayOfTypeComplex) -> Self {
        ComplexTypeStrategy::ArrayOfTypeComplex(strategy)
    }
}

impl From<ArrayOfTypeSequence> for ComplexTypeStrategy {
    fn from(strategy: ArrayOfTypeSequence) -> Self {
        ComplexTypeStrategy::ArrayOfTypeSequence(strategy)
    }
}

impl From<Composite> for ComplexTypeStrategy {
    fn from(strategy: Composite) -> Self {
        ComplexTypeStrategy::Composite(strategy)
    }
}
