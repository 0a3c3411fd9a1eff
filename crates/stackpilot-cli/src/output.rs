//! Formatted output helpers for CLI commands.

use stackpilot_common::types::ContainerRecord;

/// Serializes the inventory as JSON, on one line unless `pretty` is set.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn inventory_json(records: &[ContainerRecord], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}

/// One line of `stk files` output.
#[must_use]
pub fn file_status(name: &str, exists: bool) -> String {
    if exists {
        name.to_owned()
    } else {
        format!("{name} (missing)")
    }
}

/// Returns `true` for `.env` and `.env.<suffix>` file names.
#[must_use]
pub fn is_env_file_name(name: &str) -> bool {
    name == ".env" || name.strip_prefix(".env.").is_some_and(|suffix| !suffix.is_empty())
}
