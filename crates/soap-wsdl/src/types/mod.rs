//! Type name handling shared by the strategies and the builder.

mod scalar;
mod type_name;

pub use scalar::{normalize_alias, xsd_scalar};
pub use type_name::{resolve, ucfirst, ArrayShape, Notation};
