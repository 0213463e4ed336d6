//! Diagnostic types for error reporting.

mod error;

pub use error::{ErrorKind, SoapError};
