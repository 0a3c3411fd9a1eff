//! POSIX shell quoting.

use std::borrow::Cow;

const fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '%' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '@' | '_')
}

/// Quotes `value` so a POSIX shell reads it back as one word.
///
/// Strings made only of safe characters are returned unchanged; anything
/// else is wrapped in single quotes, with embedded single quotes written as
/// `'"'"'`.
#[must_use]
pub fn shell_escape(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed("''");
    }
    if value.chars().all(is_safe) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(format!("'{}'", value.replace('\'', r#"'"'"'"#)))
}

/// Escapes each argument and joins them with single spaces.
#[must_use]
pub fn join_escaped<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| shell_escape(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
