//! Lookup of class and function descriptors by name.

use std::fmt;
use indexmap::IndexMap;

use super::{ClassDescriptor, FunctionDescriptor};

/// Read-only source of descriptors consumed during generation.
///
/// Lookups ignore case and a leading namespace separator, so `\App\Book`,
/// `app\book` and `App\Book` name the same class.
pub trait TypeCatalog: fmt::Debug + Send + Sync {
    fn class(&self, name: &str) -> Option<&ClassDescriptor>;

    fn function(&self, name: &str) -> Option<&FunctionDescriptor>;
}

fn catalog_key(name: &str) -> String {
    name.trim().trim_start_matches('\\').to_lowercase()
}

/// A catalog backed by in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    classes: IndexMap<String, ClassDescriptor>,
    functions: IndexMap<String, FunctionDescriptor>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: ClassDescriptor) {
        self.classes.insert(catalog_key(&class.name), class);
    }

    pub fn add_function(&mut self, function: FunctionDescriptor) {
        self.functions.insert(catalog_key(&function.name), function);
    }

    pub fn with_class(mut self, class: ClassDescriptor) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_function(mut self, function: FunctionDescriptor) -> Self {
        self.add_function(function);
        self
    }
}

impl TypeCatalog for InMemoryCatalog {
    fn class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(&catalog_key(name))
    }

    fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions.get(&catalog_key(name))
    }
}
