//! Per-type strategy dispatch.

use std::borrow::Cow;
use indexmap::IndexMap;
use tracing::trace;

use super::ComplexTypeStrategy;
use crate::diagnostic::SoapError;
use crate::wsdl::Wsdl;

/// A strategy reference held by [`Composite`].
#[derive(Debug, Clone)]
pub enum StrategySlot {
    /// A configured strategy.
    Instance(Box<ComplexTypeStrategy>),
    /// A strategy name, instantiated when first needed.
    Named(String),
}

impl StrategySlot {
    fn resolve(&self) -> Option<Cow<'_, ComplexTypeStrategy>> {
        match self {
            StrategySlot::Instance(strategy) => Some(Cow::Borrowed(strategy.as_ref())),
            StrategySlot::Named(name) => ComplexTypeStrategy::from_name(name).map(Cow::Owned),
        }
    }

    fn label(&self) -> String {
        match self {
            StrategySlot::Instance(strategy) => strategy.name().to_string(),
            StrategySlot::Named(name) => name.clone(),
        }
    }
}

impl From<ComplexTypeStrategy> for StrategySlot {
    fn from(strategy: ComplexTypeStrategy) -> Self {
        StrategySlot::Instance(Box::new(strategy))
    }
}

impl From<&str> for StrategySlot {
    fn from(name: &str) -> Self {
        StrategySlot::Named(name.to_string())
    }
}

/// Routes each type to the strategy configured for it, or to a default.
///
/// Lookups use the exact type name, so `Book` and `Book[]` can be handled by
/// different strategies.
#[derive(Debug, Clone)]
pub struct Composite {
    type_map: IndexMap<String, StrategySlot>,
    default_strategy: StrategySlot,
}

impl Default for Composite {
    fn default() -> Self {
        Self {
            type_map: IndexMap::new(),
            default_strategy: StrategySlot::Named("DefaultComplexType".to_string()),
        }
    }
}

impl Composite {
    pub fn new(type_map: IndexMap<String, StrategySlot>, default_strategy: impl Into<StrategySlot>) -> Self {
        Self {
            type_map,
            default_strategy: default_strategy.into(),
        }
    }

    pub fn connect_type_to_strategy(&mut self, type_name: impl Into<String>, strategy: impl Into<StrategySlot>) {
        self.type_map.insert(type_name.into(), strategy.into());
    }

    pub fn with_type(mut self, type_name: impl Into<String>, strategy: impl Into<StrategySlot>) -> Self {
        self.connect_type_to_strategy(type_name, strategy);
        self
    }

    pub fn default_strategy(&self) -> Result<Cow<'_, ComplexTypeStrategy>, SoapError> {
        self.default_strategy
            .resolve()
            .ok_or_else(|| SoapError::InvalidDefaultStrategy {
                strategy: self.default_strategy.label(),
            })
    }

    pub fn strategy_of_type(&self, type_name: &str) -> Result<Cow<'_, ComplexTypeStrategy>, SoapError> {
        match self.type_map.get(type_name) {
            Some(slot) => slot.resolve().ok_or_else(|| SoapError::InvalidStrategy {
                type_name: type_name.to_string(),
                strategy: slot.label(),
            }),
            None => self.default_strategy(),
        }
    }

    pub fn add_complex_type(&self, type_name: &str, wsdl: &mut Wsdl) -> Result<String, SoapError> {
        let strategy = self.strategy_of_type(type_name)?;
        trace!(type_name, strategy = strategy.name(), "composite dispatch");
        strategy.add_complex_type(type_name, wsdl)
    }
}
