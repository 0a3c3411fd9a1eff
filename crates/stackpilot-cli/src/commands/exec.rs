//! `stk exec` — Forward a command to the compose binary.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use stackpilot_common::config::ProjectConfig;
use stackpilot_common::fs::{FileSystem, LocalFs};
use stackpilot_runtime::command::CommandLine;
use stackpilot_runtime::escape::join_escaped;
use stackpilot_runtime::forwarder::{Dispatch, Forwarder};
use stackpilot_runtime::runner::{ProcessRunner, ShellRunner};

/// Arguments for the `exec` command.
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Compose sub-command and its arguments (for example `up -d`).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Executes the `exec` command.
///
/// With `--debug` the assembled command line is printed instead of run. A
/// failing compose command is reported on stderr and turned into a non-zero
/// exit code.
///
/// # Errors
///
/// Returns an error if the environment file is missing or undecodable.
pub fn execute(config: &ProjectConfig, args: &ExecArgs) -> anyhow::Result<ExitCode> {
    run(
        &LocalFs,
        &Forwarder::new(ShellRunner),
        config,
        args,
        &mut io::stdout(),
        &mut io::stderr(),
    )
}

fn run<R: ProcessRunner>(
    fs: &impl FileSystem,
    forwarder: &Forwarder<R>,
    config: &ProjectConfig,
    args: &ExecArgs,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let sub_command = join_escaped(&args.args);
    let command = CommandLine::build(
        fs,
        &config.env_file,
        &config.root,
        &config.compose_binary,
        &sub_command,
    )?;

    let mut failure = None;
    let dispatch = forwarder.run_reporting(&command, &config.root, config.dry_run, |err| {
        failure = Some(err.to_string());
    });
    match dispatch {
        Some(Dispatch::DryRun(line)) => {
            writeln!(out, "{line}")?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Dispatch::Exited(_)) => Ok(ExitCode::SUCCESS),
        None => {
            if let Some(message) = failure {
                writeln!(diag, "stk: {message}")?;
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::Path;

    use stackpilot_common::error::Result;
    use stackpilot_common::fs::MemoryFs;
    use stackpilot_runtime::runner::ExitOutcome;

    use super::*;

    /// Counts invocations and exits with a fixed code.
    struct FixedRunner {
        code: i32,
        calls: Cell<usize>,
    }

    impl FixedRunner {
        fn exiting(code: i32) -> Self {
            Self {
                code,
                calls: Cell::new(0),
            }
        }
    }

    impl ProcessRunner for FixedRunner {
        fn run(&self, _command: &CommandLine, _cwd: &Path) -> Result<ExitOutcome> {
            self.calls.set(self.calls.get() + 1);
            Ok(ExitOutcome::exited(self.code))
        }
    }

    fn project() -> MemoryFs {
        MemoryFs::new().with_file("/p/.env", "COMPOSE_FILES=a.yml,b.yml\n")
    }

    fn config(dry_run: bool) -> ProjectConfig {
        ProjectConfig {
            root: "/p".into(),
            dry_run,
            ..ProjectConfig::default()
        }
    }

    fn args(words: &[&str]) -> ExecArgs {
        ExecArgs {
            args: words.iter().map(|w| (*w).to_owned()).collect(),
        }
    }

    #[test]
    fn dry_run_prints_command_without_spawning() {
        let forwarder = Forwarder::new(FixedRunner::exiting(0));
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let code = run(&project(), &forwarder, &config(true), &args(&["up", "-d"]), &mut out, &mut diag)
            .expect("run");
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "docker compose --env-file .env -f a.yml -f b.yml up -d\n"
        );
        assert_eq!(forwarder.runner().calls.get(), 0);
    }

    #[test]
    fn failure_is_reported_on_stderr() {
        let forwarder = Forwarder::new(FixedRunner::exiting(17));
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let code = run(&project(), &forwarder, &config(false), &args(&["ps"]), &mut out, &mut diag)
            .expect("run");
        assert_eq!(code, ExitCode::FAILURE);
        assert!(out.is_empty());
        let diag = String::from_utf8(diag).expect("utf8");
        assert!(diag.starts_with("stk: command `docker compose"), "{diag}");
        assert!(diag.contains("exited with status 17"), "{diag}");
    }

    #[test]
    fn success_is_silent() {
        let forwarder = Forwarder::new(FixedRunner::exiting(0));
        let (mut out, mut diag) = (Vec::new(), Vec::new());
        let code = run(&project(), &forwarder, &config(false), &args(&["ps"]), &mut out, &mut diag)
            .expect("run");
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out.is_empty() && diag.is_empty());
        assert_eq!(forwarder.runner().calls.get(), 1);
    }
}
