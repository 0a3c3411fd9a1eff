//! # stackpilot-compose
//!
//! Works out which compose files a project uses and what they declare.
//!
//! Handles:
//! - **Env**: Decoding the project environment file and resolving the
//!   ordered `COMPOSE_FILES` list.
//! - **Document**: Loading a compose file into an explicit optional-field
//!   service model.
//! - **Inventory**: Deriving normalized container records from services.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod document;
pub mod env;
pub mod inventory;
