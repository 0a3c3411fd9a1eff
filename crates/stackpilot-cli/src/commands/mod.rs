//! CLI command definitions and dispatch.

pub mod envs;
pub mod exec;
pub mod files;
pub mod info;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stackpilot_common::config::ProjectConfig;
use stackpilot_common::constants::{DEFAULT_COMPOSE_BINARY, DEFAULT_ENV_FILE};
use stackpilot_common::fs::LocalFs;

/// stackpilot — run docker compose with the files your `.env` selects.
#[derive(Parser, Debug)]
#[command(name = "stk", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Project root holding the environment and compose files.
    #[arg(long, global = true, env = "STACKPILOT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Environment file, relative to the project root.
    #[arg(long, global = true, env = "STACKPILOT_ENV_FILE", default_value = DEFAULT_ENV_FILE)]
    pub env_file: String,

    /// Compose binary to invoke.
    #[arg(long, global = true, env = "STACKPILOT_COMPOSE", default_value = DEFAULT_COMPOSE_BINARY)]
    pub compose: String,

    /// Print commands instead of running them, and show resolution details.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Project settings selected by the global flags.
    #[must_use]
    pub fn project_config(&self) -> ProjectConfig {
        ProjectConfig {
            root: self.root.clone(),
            env_file: self.env_file.clone(),
            compose_binary: self.compose.clone(),
            dry_run: self.debug,
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forward a command to the compose binary with the resolved files.
    Exec(exec::ExecArgs),
    /// Print the container inventory of the resolved files as JSON.
    Info(info::InfoArgs),
    /// List the resolved compose files.
    Files(files::FilesArgs),
    /// List environment files in the project root.
    Envs(envs::EnvsArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the command fails
/// with a fatal error.
pub fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.project_config();
    config.validate(&LocalFs)?;
    tracing::debug!(?config, "project configuration");

    match cli.command {
        Command::Exec(args) => exec::execute(&config, &args),
        Command::Info(args) => info::execute(&config, &args),
        Command::Files(args) => files::execute(&config, &args),
        Command::Envs(args) => envs::execute(&config, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stk", "info", "--root", "/srv/app", "--env-file", ".env.prod", "--debug",
        ])
        .expect("parse");
        let config = cli.project_config();
        assert_eq!(config.root, PathBuf::from("/srv/app"));
        assert_eq!(config.env_file, ".env.prod");
        assert!(config.dry_run);
        assert!(matches!(cli.command, Command::Info(_)));
    }

    #[test]
    fn exec_collects_trailing_arguments() {
        let cli = Cli::try_parse_from(["stk", "exec", "up", "-d", "--build"]).expect("parse");
        match cli.command {
            Command::Exec(args) => assert_eq!(args.args, vec!["up", "-d", "--build"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_match_project_defaults() {
        let cli = Cli::try_parse_from(["stk", "files"]).expect("parse");
        let config = cli.project_config();
        assert_eq!(config.env_file, DEFAULT_ENV_FILE);
        assert_eq!(config.compose_binary, DEFAULT_COMPOSE_BINARY);
        assert!(!config.dry_run);
    }
}
