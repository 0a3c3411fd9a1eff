//! `stk envs` — List environment files available in the project root.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Args;
use stackpilot_common::config::ProjectConfig;
use stackpilot_common::error::StackpilotError;
use stackpilot_common::fs::{FileSystem, LocalFs};

use crate::output::is_env_file_name;

/// Arguments for the `envs` command.
#[derive(Args, Debug)]
pub struct EnvsArgs {}

/// Executes the `envs` command.
///
/// Prints `.env` and `.env.*` files (regular files or symlinks) found
/// directly in the root, marking the one currently selected with `*`.
///
/// # Errors
///
/// Returns an error if the root cannot be listed.
pub fn execute(config: &ProjectConfig, _args: &EnvsArgs) -> anyhow::Result<ExitCode> {
    run(&LocalFs, config, &mut io::stdout())
}

fn run(
    fs: &impl FileSystem,
    config: &ProjectConfig,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let entries = fs
        .files(&config.root)
        .map_err(|e| StackpilotError::from_io("project root", &config.root, e))?;

    let names: Vec<String> = entries
        .iter()
        .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
        .filter(|name| is_env_file_name(name))
        .collect();

    if names.is_empty() {
        writeln!(out, "No environment files found in {}", config.root.display())?;
        return Ok(ExitCode::SUCCESS);
    }

    for name in &names {
        let marker = if *name == config.env_file { "*" } else { " " };
        writeln!(out, "{marker} {name}")?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use stackpilot_common::fs::MemoryFs;

    use super::*;

    fn config(root: impl Into<std::path::PathBuf>, env_file: &str) -> ProjectConfig {
        ProjectConfig {
            root: root.into(),
            env_file: env_file.into(),
            ..ProjectConfig::default()
        }
    }

    fn listing(fs: &impl FileSystem, config: &ProjectConfig) -> String {
        let mut out = Vec::new();
        let code = run(fs, config, &mut out).expect("run");
        assert_eq!(code, ExitCode::SUCCESS);
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn marks_selected_file() {
        let fs = MemoryFs::new()
            .with_file("/p/.env", "")
            .with_file("/p/.env.prod", "")
            .with_file("/p/docker-compose.yml", "")
            .with_dir("/p/.env.d");
        assert_eq!(listing(&fs, &config("/p", ".env.prod")), "  .env\n* .env.prod\n");
    }

    #[test]
    fn reports_empty_root() {
        let fs = MemoryFs::new().with_file("/p/.envrc", "");
        assert_eq!(
            listing(&fs, &config("/p", ".env")),
            "No environment files found in /p\n"
        );
    }

    #[test]
    fn unlistable_root_is_an_error() {
        let err = run(&MemoryFs::new(), &config("/missing", ".env"), &mut Vec::new())
            .expect_err("missing root");
        assert!(err.to_string().contains("/missing"));
    }

    #[cfg(unix)]
    #[test]
    fn lists_symlinked_env_and_skips_decoys() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".env.staging"), "A=1").expect("write");
        std::fs::write(dir.path().join(".envrc"), "use nix").expect("write");
        std::os::unix::fs::symlink(dir.path().join(".env.staging"), dir.path().join(".env"))
            .expect("symlink");

        assert_eq!(
            listing(&LocalFs, &config(dir.path(), ".env")),
            "* .env\n  .env.staging\n"
        );
    }
}
