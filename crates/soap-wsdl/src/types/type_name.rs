//! Array shape detection for native type names.
//!
//! Two notations are understood: `Foo[]` (depth = number of `[]` suffixes) and
//! `array<Foo>` (depth = number of nested `array<` wrappers). A single type
//! name must use one of them throughout.

use crate::diagnostic::SoapError;

/// Which array notation a type name used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Not an array.
    None,
    /// `Foo[]`, `Foo[][]`
    Brackets,
    /// `array<Foo>`, `array<array<Foo>>`
    Generic,
}

/// Singular base type and nesting depth of a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayShape {
    pub singular: String,
    pub depth: usize,
    pub notation: Notation,
}

impl ArrayShape {
    pub fn is_array(&self) -> bool {
        self.depth > 0
    }
}

const GENERIC_OPEN: &str = "array<";

fn is_generic(name: &str) -> bool {
    name.len() > GENERIC_OPEN.len()
        && name
            .get(..GENERIC_OPEN.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(GENERIC_OPEN))
        && name.ends_with('>')
}

fn contains_generic(name: &str) -> bool {
    name.to_ascii_lowercase().contains(GENERIC_OPEN)
}

/// Splits a type name into its singular base type and array depth.
///
/// Hybrids such as `array<Foo[]>` or `array<Foo>[]` are rejected.
pub fn resolve(type_name: &str) -> Result<ArrayShape, SoapError> {
    let trimmed = type_name.trim();
    let mixed = || SoapError::MixedArrayNotation {
        type_name: type_name.to_string(),
    };

    if is_generic(trimmed) {
        let mut inner = trimmed;
        let mut depth = 0;
        while is_generic(inner) {
            inner = inner[GENERIC_OPEN.len()..inner.len() - 1].trim();
            depth += 1;
        }
        if inner.contains("[]") || contains_generic(inner) {
            return Err(mixed());
        }
        return Ok(ArrayShape {
            singular: inner.to_string(),
            depth,
            notation: Notation::Generic,
        });
    }

    let mut inner = trimmed;
    let mut depth = 0;
    while let Some(stripped) = inner.strip_suffix("[]") {
        inner = stripped;
        depth += 1;
    }
    if depth > 0 && (contains_generic(inner) || inner.contains("[]")) {
        return Err(mixed());
    }

    Ok(ArrayShape {
        singular: inner.to_string(),
        depth,
        notation: if depth > 0 { Notation::Brackets } else { Notation::None },
    })
}

/// Upper-cases the first character.
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
