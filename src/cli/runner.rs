//! CLI runner - executes commands

use crate::cli::commands::{
    Cli, Commands, FileCommands, MachineCommands, MemoryCommands, OutputFormat, TaskCommands,
};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.load_config()?)?;

        match &self.cli.command {
            Commands::Check => self.check(&client).await,
            Commands::Status => self.output(&client.cuckoo_status().await?),
            Commands::Tasks(command) => self.tasks(&client, command).await,
            Commands::Machines(MachineCommands::List) => {
                self.output(&client.list_machines().await?)
            }
            Commands::Machines(MachineCommands::View { name }) => {
                self.output(&client.view_machine(name).await?)
            }
            Commands::Files(FileCommands::View(lookup)) => {
                let file = lookup
                    .file_id()
                    .ok_or_else(|| Error::config("one of --id, --md5 or --sha256 is required"))?;
                self.output(&client.view_file(&file).await?)
            }
            Commands::Memory(MemoryCommands::List { task_id }) => {
                self.output(&client.list_memory_dumps(*task_id).await?)
            }
            Commands::Vpn => self.output(&client.vpn_status().await?),
        }
    }

    /// Build the client config: file first, then flags and environment
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                ClientConfig::from_file(path)?
            }
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(api_key) = &self.cli.api_key {
            config.api_key.clone_from(api_key);
        }
        if let Commands::Tasks(TaskCommands::All {
            page_size: Some(page_size),
            ..
        }) = &self.cli.command
        {
            config.pagination.page_size = *page_size;
        }

        Ok(config)
    }

    /// Check the API key
    async fn check(&self, client: &Client) -> Result<()> {
        info!(base_url = client.http().base_url(), "checking connection");

        match client.check_auth().await {
            Ok(()) => self.output(&json!({
                "status": "SUCCEEDED",
                "message": "Connection successful"
            })),
            Err(e) => self.output(&json!({
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            })),
        }
    }

    async fn tasks(&self, client: &Client, command: &TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List { limit, offset } => {
                self.output(&client.list_tasks(*limit, *offset).await?)
            }
            TaskCommands::All { max_tasks, .. } => self.stream_tasks(client, *max_tasks).await,
            TaskCommands::View { id } => self.output(&client.view_task(*id).await?),
            TaskCommands::Sample { sample_id } => {
                self.output(&client.list_tasks_for_sample(*sample_id).await?)
            }
            TaskCommands::Delete { id } => {
                client.delete_task(*id).await?;
                self.output(&json!({"task_id": id, "deleted": true}))
            }
            TaskCommands::Reschedule { id, priority } => {
                client.reschedule_task(*id, *priority).await?;
                self.output(&json!({"task_id": id, "rescheduled": true}))
            }
            TaskCommands::Rereport { id } => {
                client.rereport_task(*id).await?;
                self.output(&json!({"task_id": id, "rereported": true}))
            }
            TaskCommands::Reboot { id } => self.output(&client.reboot_task(*id).await?),
        }
    }

    /// Print every task as it arrives until the listing ends, Ctrl-C is
    /// pressed or `max_tasks` have been printed
    async fn stream_tasks(&self, client: &Client, max_tasks: Option<usize>) -> Result<()> {
        let cancel = CancellationToken::new();
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupted, stopping task listing");
                interrupt.cancel();
            }
        });

        let mut stream = client.stream_all_tasks(&cancel);
        let mut printed = 0usize;
        while let Some(task) = stream.next_task().await {
            self.output(&task)?;
            printed += 1;
            if max_tasks.is_some_and(|max| printed >= max) {
                stream.cancel();
                break;
            }
        }

        let limited = max_tasks.is_some_and(|max| printed >= max);
        match stream.finish().await {
            Ok(stats) => {
                debug!(?stats, "task listing finished");
                Ok(())
            }
            Err(Error::Cancelled | Error::ConsumerClosed) if limited => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Output a value
    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Render a value in the selected output format
    pub(crate) fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(rendered)
    }
}
