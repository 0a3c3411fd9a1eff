//! Command forwarding to the orchestration binary.
//!
//! Assembles `<binary> --env-file <file> -f <compose>... <sub-command>` from
//! the project's resolved compose files and either returns it (dry-run) or
//! runs it through a [`ProcessRunner`](runner::ProcessRunner).

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod command;
pub mod escape;
pub mod forwarder;
pub mod runner;
