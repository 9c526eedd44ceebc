//! CLI tool for inspecting capacity-aware partition distribution.
//!
//! Provides commands for:
//! - Per-member load
//! - The full partition table
//! - Key lookups
//! - Ring neighbours

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
