//! Server-side helpers for document/literal services.

mod document_literal;

pub use document_literal::DocumentLiteralWrapper;

use serde_json::Value;

use crate::diagnostic::SoapError;

/// A service object that can be invoked by method name.
pub trait ServiceObject {
    /// Name used in dispatch errors.
    fn name(&self) -> &str;

    /// Parameter names of `method` in declaration order, or `None` when the
    /// method does not exist.
    fn parameters(&self, method: &str) -> Option<Vec<String>>;

    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, SoapError>;
}
