//! Child process execution for the orchestration binary.

use std::path::Path;
use std::process::{Command, Stdio};

use stackpilot_common::error::{Result, StackpilotError};

use crate::command::CommandLine;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    /// Outcome of a process that exited with `code`.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns `true` for exit code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs an assembled command line.
pub trait ProcessRunner {
    /// Runs `command` with `cwd` as working directory and waits for it.
    ///
    /// # Errors
    ///
    /// Returns [`StackpilotError::ChildProcess`] if the process cannot be
    /// started. A non-zero exit is not an error at this level.
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<ExitOutcome>;
}

/// Runs commands through the platform shell with the terminal inherited,
/// so interactive output and input pass straight through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<ExitOutcome> {
        let line = command.to_string();
        tracing::info!(cmd = %line, cwd = %cwd.display(), "running orchestration command");

        let program = command.program();
        // Relative programs are looked up from the directory the shell runs in.
        let resolved = which::which_in(program, std::env::var_os("PATH"), cwd).map_err(|e| {
            StackpilotError::ChildProcess {
                command: line.clone(),
                message: format!("`{program}` not found: {e}"),
            }
        })?;
        tracing::debug!(program, path = %resolved.display(), "resolved binary");

        let status = shell(&line)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| StackpilotError::ChildProcess {
                command: line.clone(),
                message: e.to_string(),
            })?;

        let outcome = ExitOutcome {
            code: status.code(),
        };
        tracing::debug!(cmd = %line, code = ?outcome.code, "orchestration command finished");
        Ok(outcome)
    }
}

#[cfg(not(windows))]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("sh");
    let _ = cmd.arg("-c").arg(line);
    cmd
}

#[cfg(windows)]
fn shell(line: &str) -> Command {
    let mut cmd = Command::new("cmd");
    let _ = cmd.arg("/C").arg(line);
    cmd
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn shell_runner_reports_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cmd = CommandLine::new("sh -c 'exit 3'", ".env", vec!["a.yml".into()], "");
        let outcome = ShellRunner.run(&cmd, dir.path()).expect("run");
        assert_eq!(outcome, ExitOutcome::exited(3));
        assert!(!outcome.success());
    }

    #[test]
    fn shell_runner_uses_working_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("marker"), "").expect("write");
        let cmd = CommandLine::new("sh -c 'test -f marker'", ".env", Vec::new(), "");
        let outcome = ShellRunner.run(&cmd, dir.path()).expect("run");
        assert!(outcome.success());
    }

    #[test]
    fn shell_runner_finds_relative_binary_from_working_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let bin = dir.path().join("bin");
        std::fs::create_dir(&bin).expect("mkdir");
        let script = bin.join("compose");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").expect("write");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");

        let cmd = CommandLine::new("./bin/compose", ".env", Vec::new(), "ps");
        let outcome = ShellRunner.run(&cmd, dir.path()).expect("run");
        assert!(outcome.success());
    }

    #[test]
    fn shell_runner_fails_for_unknown_binary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cmd = CommandLine::new("stackpilot-no-such-binary", ".env", Vec::new(), "ps");
        let err = ShellRunner.run(&cmd, dir.path()).expect_err("missing binary");
        assert!(matches!(err, StackpilotError::ChildProcess { .. }));
    }
}
