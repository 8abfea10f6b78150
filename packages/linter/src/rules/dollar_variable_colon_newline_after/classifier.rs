use crate::whitespace::is_single_line;

/// Whether a trimmed variable value is exempt from the newline check.
///
/// Parenthesized values spanning several lines (maps, continued arithmetic,
/// lists) lay themselves out; a one-line `(...)` is still checked.
pub fn is_exempt(trimmed_value: &str) -> bool {
    trimmed_value.starts_with('(') && trimmed_value.ends_with(')') && !is_single_line(trimmed_value)
}
