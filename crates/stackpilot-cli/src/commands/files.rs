//! `stk files` — List the compose files selected by the environment file.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use stackpilot_common::config::ProjectConfig;
use stackpilot_common::fs::{FileSystem, LocalFs};
use stackpilot_compose::env;

use crate::output::file_status;

/// Arguments for the `files` command.
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Exit with a failure status if any listed file is missing.
    #[arg(long)]
    pub strict: bool,
}

/// Executes the `files` command.
///
/// # Errors
///
/// Returns an error if the environment file is missing or undecodable.
pub fn execute(config: &ProjectConfig, args: &FilesArgs) -> anyhow::Result<ExitCode> {
    run(&LocalFs, config, args, &mut io::stdout())
}

fn run(
    fs: &impl FileSystem,
    config: &ProjectConfig,
    args: &FilesArgs,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let files = env::resolve(fs, &config.env_path())?;

    let mut missing = 0usize;
    for file in &files {
        let exists = fs.is_file(&config.root.join(file));
        if !exists {
            missing += 1;
        }
        writeln!(out, "{}", file_status(file, exists))?;
    }

    if missing > 0 {
        tracing::warn!(missing, "some compose files do not exist");
    }
    if args.strict && missing > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
