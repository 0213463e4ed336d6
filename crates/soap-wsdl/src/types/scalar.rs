//! Native scalar names and their XSD equivalents.

/// Maps a scalar type name to its qualified XSD name, ignoring case.
///
/// `void` maps to the empty string. Returns `None` for anything that needs a
/// complex type.
pub fn xsd_scalar(type_name: &str) -> Option<&'static str> {
    let mapped = match type_name.to_ascii_lowercase().as_str() {
        "string" | "str" => "xsd:string",
        "long" => "xsd:long",
        "int" | "integer" => "xsd:int",
        "float" => "xsd:float",
        "double" => "xsd:double",
        "boolean" | "bool" => "xsd:boolean",
        "array" => "soap-enc:Array",
        "object" => "xsd:struct",
        "mixed" => "xsd:anyType",
        "date" => "xsd:date",
        "datetime" => "xsd:dateTime",
        "void" => "",
        _ => return None,
    };
    Some(mapped)
}

/// Canonical spelling for doc-comment type aliases, ignoring case.
pub fn normalize_alias(type_name: &str) -> String {
    match type_name.to_ascii_lowercase().as_str() {
        "integer" => "int".to_string(),
        "boolean" => "bool".to_string(),
        "double" => "float".to_string(),
        _ => type_name.to_string(),
    }
}
