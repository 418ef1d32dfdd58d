//! Suffix grammar of type expressions.
//!
//! `T[]` is an array of `T`, `T?` an optional `T`. On struct fields a
//! trailing `$` marks a binary extension. Only one suffix is stripped at a
//! time; nesting goes through aliases.

pub fn is_array(type_name: &str) -> bool {
    type_name.ends_with("[]")
}

pub fn is_optional(type_name: &str) -> bool {
    type_name.ends_with('?')
}

pub fn is_extension(type_name: &str) -> bool {
    type_name.ends_with('$')
}

/// Strip a trailing `$`.
pub fn strip_extension(type_name: &str) -> &str {
    type_name.strip_suffix('$').unwrap_or(type_name)
}

/// Strip one `[]` or `?` suffix.
pub fn fundamental_type(type_name: &str) -> &str {
    type_name
        .strip_suffix("[]")
        .or_else(|| type_name.strip_suffix('?'))
        .unwrap_or(type_name)
}
