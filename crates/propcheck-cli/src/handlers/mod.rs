//! Command handlers
//!
//! Each handler module contains the execution logic for one CLI command
//! plus pure helpers that the tests exercise directly.

pub mod check;
pub mod distance;
pub mod whitelist;

pub use check::{execute_check, resolve_config};
pub use distance::{describe_distance, execute_distance};
pub use whitelist::{execute_whitelist, list_whitelist};
