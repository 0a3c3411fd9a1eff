//! `stk info` — Print the container inventory of the resolved compose files.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use stackpilot_common::config::ProjectConfig;
use stackpilot_common::fs::{FileSystem, LocalFs};
use stackpilot_compose::{env, inventory};

/// Arguments for the `info` command.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Pretty-print the JSON instead of writing a single line.
    #[arg(long)]
    pub pretty: bool,
}

/// Executes the `info` command.
///
/// Writes one JSON array of container records to stdout. With `--debug`,
/// the root, environment file and resolved files are shown on stderr.
///
/// # Errors
///
/// Returns an error if the environment file or any compose file is missing
/// or malformed.
pub fn execute(config: &ProjectConfig, args: &InfoArgs) -> anyhow::Result<ExitCode> {
    run(&LocalFs, config, args, &mut io::stdout(), &mut io::stderr())
}

fn run(
    fs: &impl FileSystem,
    config: &ProjectConfig,
    args: &InfoArgs,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let files = env::resolve(fs, &config.env_path())?;

    if config.dry_run {
        writeln!(diag, "Root: {}", config.root.display())?;
        writeln!(diag, "Env-file: {}", config.env_file)?;
        writeln!(diag, "Files: {files:?}")?;
    }

    let records = inventory::extract_all(fs, &files, &config.root)?;
    writeln!(out, "{}", crate::output::inventory_json(&records, args.pretty)?)?;
    Ok(ExitCode::SUCCESS)
}
