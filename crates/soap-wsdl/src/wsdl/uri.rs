//! URI sanitization for attribute values.

use crate::diagnostic::SoapError;

/// Attributes whose values are URIs and go through [`sanitize_uri`].
pub(crate) const URI_ATTRIBUTES: [&str; 4] = ["location", "soapAction", "targetNamespace", "encodingStyle"];

/// Trims and escapes a URI for use in an attribute value.
///
/// Markup characters are escaped once: an `&` that already starts an entity
/// reference is kept as-is, so `a&amp;b` stays `a&amp;b` while `a&b` becomes
/// `a&amp;b`.
pub fn sanitize_uri(uri: &str) -> Result<String, SoapError> {
    let trimmed = uri.trim();
    if trimmed.is_empty() {
        return Err(SoapError::InvalidUri {
            uri: uri.to_string(),
        });
    }

    let mut escaped = String::with_capacity(trimmed.len());
    for (index, c) in trimmed.char_indices() {
        match c {
            '&' if starts_entity(&trimmed[index + 1..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    Ok(escaped)
}

fn starts_entity(rest: &str) -> bool {
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(digits) = body.strip_prefix('#') {
        return !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    }
    body.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && body.chars().all(|c| c.is_ascii_alphanumeric())
}
