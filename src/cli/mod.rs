//! CLI module
//!
//! Command-line interface to a Cuckoo sandbox.
//!
//! # Commands
//!
//! - `check` - Verify the API key
//! - `status` - Show server status
//! - `tasks` - List, stream and manage analysis tasks
//! - `machines` - List and inspect analysis machines
//! - `files` - Look up samples
//! - `memory` - List memory dumps of a task
//! - `vpn` - Show VPN status

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, FileCommands, MachineCommands, MemoryCommands, OutputFormat, TaskCommands,
};
pub use runner::Runner;

#[cfg(test)]
mod tests;
