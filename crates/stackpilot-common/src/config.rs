//! Project configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackpilotError};
use crate::fs::FileSystem;

/// Settings for one invocation against a project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project root; compose files and the env file are resolved against it.
    pub root: PathBuf,
    /// Environment file, relative to `root`.
    pub env_file: String,
    /// Orchestration binary, possibly several words (`docker compose`).
    pub compose_binary: String,
    /// Print commands instead of running them.
    pub dry_run: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            env_file: crate::constants::DEFAULT_ENV_FILE.to_owned(),
            compose_binary: crate::constants::DEFAULT_COMPOSE_BINARY.to_owned(),
            dry_run: false,
        }
    }
}

impl ProjectConfig {
    /// Full path of the environment file.
    #[must_use]
    pub fn env_path(&self) -> PathBuf {
        self.root.join(&self.env_file)
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::Config`] for an empty binary or env file name,
    /// and [`StackpilotError::NotFound`] when the root is not a directory or
    /// a link to one.
    pub fn validate(&self, fs: &impl FileSystem) -> Result<()> {
        if self.compose_binary.trim().is_empty() {
            return Err(StackpilotError::Config {
                message: "compose binary must not be empty".into(),
            });
        }
        if self.env_file.is_empty() {
            return Err(StackpilotError::Config {
                message: "environment file name must not be empty".into(),
            });
        }
        if !fs.resolves_to_dir(&self.root) {
            return Err(StackpilotError::NotFound {
                kind: "project root",
                path: self.root.clone(),
            });
        }
        Ok(())
    }
}
