//! Orchestration command line assembly.

use std::fmt;
use std::path::Path;

use stackpilot_common::error::{Result, StackpilotError};
use stackpilot_common::fs::FileSystem;

use crate::escape::shell_escape;

/// A fully assembled orchestration command.
///
/// Renders (through [`fmt::Display`]) as
/// `<binary> --env-file <env_file> -f <file>... <sub_command>`. The env file
/// and compose file names are shell-escaped; the binary and sub-command are
/// written as given since they may hold several words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    binary: String,
    env_file: String,
    files: Vec<String>,
    sub_command: String,
}

impl CommandLine {
    /// Creates a command line from already resolved parts.
    #[must_use]
    pub fn new(
        binary: impl Into<String>,
        env_file: impl Into<String>,
        files: Vec<String>,
        sub_command: impl Into<String>,
    ) -> Self {
        Self {
            binary: binary.into(),
            env_file: env_file.into(),
            files,
            sub_command: sub_command.into(),
        }
    }

    /// Resolves the compose files declared by `root/env_file` and assembles
    /// the command line around them.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::Config`] for a blank binary, and the
    /// resolver's `NotFound`/`EnvParse` errors for the environment file.
    pub fn build(
        fs: &impl FileSystem,
        env_file: &str,
        root: &Path,
        binary: &str,
        sub_command: &str,
    ) -> Result<Self> {
        if binary.trim().is_empty() {
            return Err(StackpilotError::Config {
                message: "compose binary must not be empty".into(),
            });
        }
        let files = stackpilot_compose::env::resolve(fs, &root.join(env_file))?;
        Ok(Self::new(binary, env_file, files, sub_command))
    }

    /// First word of the binary, the executable actually looked up on `PATH`.
    #[must_use]
    pub fn program(&self) -> &str {
        self.binary.split_whitespace().next().unwrap_or_default()
    }

    /// Orchestration binary as given.
    #[must_use]
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Environment file passed with `--env-file`.
    #[must_use]
    pub fn env_file(&self) -> &str {
        &self.env_file
    }

    /// Compose files, in the order they are passed with `-f`.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Trailing sub-command.
    #[must_use]
    pub fn sub_command(&self) -> &str {
        &self.sub_command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --env-file {}", self.binary, shell_escape(&self.env_file))?;
        for file in &self.files {
            write!(f, " -f {}", shell_escape(file))?;
        }
        if !self.sub_command.is_empty() {
            write!(f, " {}", self.sub_command)?;
        }
        Ok(())
    }
}
