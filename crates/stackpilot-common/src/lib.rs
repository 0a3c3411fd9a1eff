//! # stackpilot-common
//!
//! Shared types, error definitions, configuration models, constants and
//! the filesystem capability used across the entire stackpilot workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the primitives the resolver, the inventory
//! extractor and the command forwarder build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod types;
