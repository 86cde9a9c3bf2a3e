//! CLI commands and argument parsing

use crate::config::{ENV_API_KEY, ENV_BASE_URL};
use crate::types::{FileId, TaskId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cuckoo sandbox API client
#[derive(Parser, Debug)]
#[command(name = "cuckoo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Cuckoo REST API
    #[arg(short, long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// API key sent as a bearer token
    #[arg(short = 'k', long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify that the API key is accepted
    Check,

    /// Show server status
    Status,

    /// Analysis tasks
    #[command(subcommand)]
    Tasks(TaskCommands),

    /// Analysis machines
    #[command(subcommand)]
    Machines(MachineCommands),

    /// Samples
    #[command(subcommand)]
    Files(FileCommands),

    /// Memory dumps
    #[command(subcommand)]
    Memory(MemoryCommands),

    /// Show VPN status
    Vpn,
}

/// `tasks` subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List one page of tasks
    List {
        /// Maximum number of tasks
        #[arg(long, default_value = "10")]
        limit: u32,

        /// Number of tasks to skip
        #[arg(long, default_value = "0")]
        offset: u32,
    },

    /// Stream every task, one JSON document per line (Ctrl-C stops)
    All {
        /// Tasks requested per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Stop after this many tasks
        #[arg(long)]
        max_tasks: Option<usize>,
    },

    /// Show one task
    View {
        /// Task id
        id: TaskId,
    },

    /// List the tasks created for a sample
    Sample {
        /// Sample id
        sample_id: i64,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: TaskId,
    },

    /// Queue a task for another run
    Reschedule {
        /// Task id
        id: TaskId,

        /// Priority of the new run (server default 1)
        #[arg(long)]
        priority: Option<u32>,
    },

    /// Regenerate the report of a task
    Rereport {
        /// Task id
        id: TaskId,
    },

    /// Create a reboot task from an analysis
    Reboot {
        /// Task id
        id: TaskId,
    },
}

/// `machines` subcommands
#[derive(Subcommand, Debug)]
pub enum MachineCommands {
    /// List all machines
    List,

    /// Show one machine
    View {
        /// Machine name
        name: String,
    },
}

/// `files` subcommands
#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Look up a sample
    View(FileLookup),
}

/// Exactly one lookup key for `files view`
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct FileLookup {
    /// Sample id
    #[arg(long)]
    pub id: Option<i64>,

    /// MD5 digest
    #[arg(long)]
    pub md5: Option<String>,

    /// SHA256 digest
    #[arg(long)]
    pub sha256: Option<String>,
}

impl FileLookup {
    /// The lookup key that was given
    pub fn file_id(&self) -> Option<FileId> {
        match (self.id, &self.md5, &self.sha256) {
            (Some(id), _, _) => Some(FileId::Id(id)),
            (None, Some(md5), _) => Some(FileId::Md5(md5.clone())),
            (None, None, Some(sha256)) => Some(FileId::Sha256(sha256.clone())),
            (None, None, None) => None,
        }
    }
}

/// `memory` subcommands
#[derive(Subcommand, Debug)]
pub enum MemoryCommands {
    /// List the memory dumps of a task
    List {
        /// Task id
        task_id: TaskId,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
