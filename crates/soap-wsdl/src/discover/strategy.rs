//! How types, return values and documentation are read from descriptors.

use std::fmt;

use crate::reflect::{FunctionDescriptor, Parameter, Prototype};

/// Hook for overriding what discovery reads from a descriptor.
pub trait DiscoveryStrategy: fmt::Debug + Send + Sync {
    fn function_documentation(&self, function: &FunctionDescriptor) -> String;

    fn parameter_type(&self, parameter: &Parameter) -> String;

    fn return_type(&self, function: &FunctionDescriptor, prototype: &Prototype) -> String;

    /// Whether the operation expects no response.
    fn is_one_way(&self, function: &FunctionDescriptor, prototype: &Prototype) -> bool;
}

/// Takes everything from the descriptors as-is; `void` functions are one-way.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionDiscovery;

impl DiscoveryStrategy for ReflectionDiscovery {
    fn function_documentation(&self, function: &FunctionDescriptor) -> String {
        function.description.clone()
    }

    fn parameter_type(&self, parameter: &Parameter) -> String {
        parameter.type_name.clone()
    }

    fn return_type(&self, _function: &FunctionDescriptor, prototype: &Prototype) -> String {
        prototype.return_type.clone()
    }

    fn is_one_way(&self, _function: &FunctionDescriptor, prototype: &Prototype) -> bool {
        prototype.return_type == "void"
    }
}
