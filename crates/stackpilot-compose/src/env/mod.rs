//! Environment file decoding and compose file resolution.
//!
//! The project environment file selects which compose files apply through
//! the `COMPOSE_FILES` key. When the key is absent the single default
//! `docker-compose.server.yml` is used. A missing or undecodable file is an
//! error, never a reason to fall back to the default.

pub mod lexer;

use std::collections::BTreeMap;
use std::path::Path;

use stackpilot_common::constants::{
    COMPOSE_FILES_KEY, COMPOSE_FILES_SEPARATOR, DEFAULT_COMPOSE_FILE,
};
use stackpilot_common::error::{Result, StackpilotError};
use stackpilot_common::fs::FileSystem;

use self::lexer::Line;

/// Variables declared in an environment file. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDeclaration {
    vars: BTreeMap<String, String>,
}

impl EnvDeclaration {
    /// Decodes environment file content. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::EnvParse`] naming the first line that is
    /// not blank, a comment, or a `KEY=VALUE` assignment.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut vars = BTreeMap::new();
        for (idx, raw) in content.lines().enumerate() {
            match lexer::parse_line(raw) {
                Ok(Line::Assignment { key, value }) => {
                    let _ = vars.insert(key, value);
                }
                Ok(Line::Blank | Line::Comment) => {}
                Err(message) => {
                    return Err(StackpilotError::EnvParse {
                        path: origin.to_path_buf(),
                        line: idx + 1,
                        message,
                    });
                }
            }
        }
        Ok(Self { vars })
    }

    /// Reads and decodes the environment file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::NotFound`] if the file does not exist and
    /// [`StackpilotError::EnvParse`] if it is not UTF-8 or not decodable.
    pub fn load(fs: &impl FileSystem, path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading environment file");
        let bytes = fs
            .read(path)
            .map_err(|e| StackpilotError::from_io("environment file", path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| StackpilotError::EnvParse {
            path: path.to_path_buf(),
            line: 0,
            message: format!("content is not valid UTF-8: {e}"),
        })?;
        Self::parse(&content, path)
    }

    /// Returns the value of `key`, if declared.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Ordered compose file list selected by this declaration.
    ///
    /// Segments of `COMPOSE_FILES` are used verbatim, so the list is never
    /// empty: an empty value yields one empty segment.
    #[must_use]
    pub fn compose_files(&self) -> Vec<String> {
        self.get(COMPOSE_FILES_KEY).map_or_else(
            || vec![DEFAULT_COMPOSE_FILE.to_owned()],
            |files| {
                files
                    .split(COMPOSE_FILES_SEPARATOR)
                    .map(str::to_owned)
                    .collect()
            },
        )
    }
}

/// Resolves the ordered compose file list declared by the environment file
/// at `env_path`.
///
/// # Errors
///
/// Returns [`StackpilotError::NotFound`] when the file is missing and
/// [`StackpilotError::EnvParse`] when it cannot be decoded.
pub fn resolve(fs: &impl FileSystem, env_path: &Path) -> Result<Vec<String>> {
    let files = EnvDeclaration::load(fs, env_path)?.compose_files();
    tracing::info!(env = %env_path.display(), files = ?files, "resolved compose files");
    Ok(files)
}
