//! Documentation providers for generated complex types.

use std::fmt;

use crate::reflect::{docblock, ClassDescriptor, FieldDescriptor};

/// Supplies `xsd:documentation` text for complex types and their elements.
///
/// An empty string means "no documentation".
pub trait DocumentationStrategy: fmt::Debug + Send + Sync {
    fn property_documentation(&self, field: &FieldDescriptor) -> String;

    fn complex_type_documentation(&self, class: &ClassDescriptor) -> String;
}

/// Reads the free text of doc-comments, stopping at the first tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReflectionDocumentation;

impl DocumentationStrategy for ReflectionDocumentation {
    fn property_documentation(&self, field: &FieldDescriptor) -> String {
        docblock::documentation_text(&field.doc_comment)
    }

    fn complex_type_documentation(&self, class: &ClassDescriptor) -> String {
        docblock::documentation_text(&class.doc_comment)
    }
}
