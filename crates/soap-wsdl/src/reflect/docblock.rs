//! Doc-comment reading at the reflection boundary.
//!
//! Only the handful of tags the WSDL builder cares about are understood:
//! `@param type $name`, `@return type` and `@var type`. Type aliases are
//! normalized here and nowhere else.

use indexmap::IndexMap;

use crate::types::normalize_alias;

fn clean_line(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix("/**").unwrap_or(line);
    let line = line.strip_suffix("*/").unwrap_or(line);
    line.trim_matches(|c: char| c == ' ' || c == '\t' || c == '*' || c == '\r')
}

/// One-line summary: every non-tag line joined with spaces.
pub fn description(doc_comment: &str) -> String {
    doc_comment
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty() && !line.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Free-text documentation up to the first tag, preserving line breaks.
pub fn documentation_text(doc_comment: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in doc_comment.lines().skip(1) {
        let line = line.trim().trim_start_matches('*').trim();
        if line.starts_with('/') || starts_with_tag(line) {
            break;
        }
        if lines.is_empty() && line.is_empty() {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn starts_with_tag(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('@') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn tag_arguments<'a>(doc_comment: &'a str, tag: &'a str) -> impl Iterator<Item = Vec<&'a str>> + 'a {
    doc_comment.lines().filter_map(move |line| {
        let rest = &line[line.find(tag)? + tag.len()..];
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        Some(rest.split_whitespace().collect())
    })
}

/// `@param` types in declaration order, paired with the parameter name.
pub fn param_types(doc_comment: &str) -> Vec<(String, String)> {
    tag_arguments(doc_comment, "@param")
        .filter_map(|args| {
            let type_name = args.first()?;
            let name = args.get(1)?.strip_prefix('$')?;
            let name: String = name
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if name.is_empty() {
                return None;
            }
            Some((name, normalize_alias(type_name)))
        })
        .collect()
}

/// `@param` types keyed by parameter name.
pub fn param_types_by_name(doc_comment: &str) -> IndexMap<String, String> {
    param_types(doc_comment).into_iter().collect()
}

/// Type of the first `@return` tag.
pub fn return_type(doc_comment: &str) -> Option<String> {
    tag_arguments(doc_comment, "@return")
        .find_map(|args| args.first().map(|t| normalize_alias(t)))
}

/// Type of the first `@var` tag, as written.
pub fn var_type(doc_comment: &str) -> Option<String> {
    tag_arguments(doc_comment, "@var")
        .find_map(|args| args.first().map(|t| t.trim().to_string()))
}
