//! Dry-run or execution of an assembled command line.
//!
//! A failing orchestration command is reported and absorbed: [`Forwarder::run`]
//! logs the error and returns `None` instead of propagating it. There are
//! no retries.

use std::path::Path;

use stackpilot_common::error::StackpilotError;

use crate::command::CommandLine;
use crate::runner::{ExitOutcome, ProcessRunner};

/// What happened to a forwarded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing was spawned; carries the rendered command line.
    DryRun(String),
    /// The command ran and exited successfully.
    Exited(ExitOutcome),
}

/// Forwards command lines to a [`ProcessRunner`].
#[derive(Debug, Clone, Default)]
pub struct Forwarder<R> {
    runner: R,
}

impl<R: ProcessRunner> Forwarder<R> {
    /// Creates a forwarder around `runner`.
    #[must_use]
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the underlying runner.
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `command` in `root`, or only renders it when `dry_run` is set.
    ///
    /// Returns `None` when the command could not be started or exited
    /// unsuccessfully; the failure has already been logged at error level.
    pub fn run(&self, command: &CommandLine, root: &Path, dry_run: bool) -> Option<Dispatch> {
        self.run_reporting(command, root, dry_run, |_| {})
    }

    /// Like [`Forwarder::run`], but also hands any failure to `on_failure`
    /// so callers can surface it independently of the log filter.
    pub fn run_reporting(
        &self,
        command: &CommandLine,
        root: &Path,
        dry_run: bool,
        on_failure: impl FnOnce(&StackpilotError),
    ) -> Option<Dispatch> {
        let line = command.to_string();
        if dry_run {
            tracing::info!(cmd = %line, "dry run, not executing");
            return Some(Dispatch::DryRun(line));
        }

        let err = match self.runner.run(command, root) {
            Ok(outcome) if outcome.success() => return Some(Dispatch::Exited(outcome)),
            Ok(outcome) => StackpilotError::ChildProcess {
                command: line,
                message: outcome.code.map_or_else(
                    || "terminated by signal".to_owned(),
                    |code| format!("exited with status {code}"),
                ),
            },
            Err(err) => err,
        };
        report(&err);
        on_failure(&err);
        None
    }
}

fn report(err: &StackpilotError) {
    tracing::error!(error = %err, "orchestration command failed");
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use stackpilot_common::error::Result;

    use super::*;

    /// Records every invocation and answers with a fixed result.
    struct RecordingRunner {
        calls: RefCell<Vec<(String, PathBuf)>>,
        answer: fn() -> Result<ExitOutcome>,
    }

    impl RecordingRunner {
        fn answering(answer: fn() -> Result<ExitOutcome>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                answer,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, command: &CommandLine, cwd: &Path) -> Result<ExitOutcome> {
            self.calls
                .borrow_mut()
                .push((command.to_string(), cwd.to_path_buf()));
            (self.answer)()
        }
    }

    fn command() -> CommandLine {
        CommandLine::new("docker compose", ".env", vec!["x.yml".into()], "up -d")
    }

    #[test]
    fn dry_run_never_spawns() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome::exited(0))));
        let dispatch = forwarder.run(&command(), Path::new("/app"), true);
        assert_eq!(
            dispatch,
            Some(Dispatch::DryRun(
                "docker compose --env-file .env -f x.yml up -d".into()
            ))
        );
        assert_eq!(forwarder.runner().call_count(), 0);
    }

    #[test]
    fn run_executes_once_in_root() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome::exited(0))));
        let dispatch = forwarder.run(&command(), Path::new("/app"), false);
        assert_eq!(dispatch, Some(Dispatch::Exited(ExitOutcome::exited(0))));
        let calls = forwarder.runner().calls.borrow();
        assert_eq!(
            calls.as_slice(),
            [(
                "docker compose --env-file .env -f x.yml up -d".to_owned(),
                PathBuf::from("/app")
            )]
        );
    }

    #[test]
    fn non_zero_exit_is_absorbed() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome::exited(1))));
        assert_eq!(forwarder.run(&command(), Path::new("/app"), false), None);
        assert_eq!(forwarder.runner().call_count(), 1);
    }

    #[test]
    fn signal_termination_is_absorbed() {
        let forwarder =
            Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome { code: None })));
        assert_eq!(forwarder.run(&command(), Path::new("/app"), false), None);
    }

    #[test]
    fn spawn_error_is_absorbed() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| {
            Err(StackpilotError::ChildProcess {
                command: "docker compose".into(),
                message: "No such file or directory".into(),
            })
        }));
        assert_eq!(forwarder.run(&command(), Path::new("/app"), false), None);
        assert_eq!(forwarder.runner().call_count(), 1);
    }

    #[test]
    fn failure_is_handed_to_reporter() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome::exited(2))));
        let mut reported = None;
        let dispatch = forwarder.run_reporting(&command(), Path::new("/app"), false, |err| {
            reported = Some(err.to_string());
        });
        assert_eq!(dispatch, None);
        let message = reported.expect("failure reported");
        assert!(message.contains("exited with status 2"), "{message}");
    }

    #[test]
    fn success_is_not_reported() {
        let forwarder = Forwarder::new(RecordingRunner::answering(|| Ok(ExitOutcome::exited(0))));
        let mut reported = false;
        let _ = forwarder.run_reporting(&command(), Path::new("/app"), true, |_| reported = true);
        let _ = forwarder.run_reporting(&command(), Path::new("/app"), false, |_| reported = true);
        assert!(!reported);
    }
}
