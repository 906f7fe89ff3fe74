pub mod commands;
pub mod output;

use std::env;
use std::path::PathBuf;
use std::process::exit;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::application::GitClient;
use crate::common::error::WorkflowError;
use crate::infrastructure::filesystem::config_store::ConfigStore;
use commands::{
    CloneCommand, DetectCommand, ForgetCommand, LocalCommand, LocalOperation, RemoteCommand,
    RemoteOperation,
};
use output::{OperationFailed, Printer};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// gitlane - everyday git workflows with remembered credentials
#[derive(Parser, Debug)]
#[command(name = "gitlane")]
#[command(about = "Everyday git workflows with remembered credentials")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// YAML file with client settings
    #[arg(long, global = true, env = "GITLANE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Credentials accepted by the remote commands
#[derive(Args, Debug, Clone)]
pub struct AuthArgs {
    /// Username; may be omitted for personal access tokens
    #[arg(short, long, env = "GITLANE_USERNAME", default_value = "")]
    pub username: String,

    /// Password or personal access token (ghp_...)
    #[arg(
        short,
        long,
        env = "GITLANE_PASSWORD",
        hide_env_values = true,
        default_value = ""
    )]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone a repository and remember its credentials
    Clone {
        /// URL of the repository
        url: String,

        /// Destination directory (defaults to a free directory named after the repository)
        target: Option<String>,

        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Fetch and fast-forward the current branch
    Pull {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Push the current branch
    Push {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Fetch from the remote without touching the working tree
    Fetch {
        #[command(flatten)]
        auth: AuthArgs,
    },

    /// Stage all changes, deletions and untracked files included
    Stage,

    /// Commit staged changes
    Commit {
        /// Commit message (defaults to the configured message)
        #[arg(short, long, default_value = "")]
        message: String,
    },

    /// Show modified, staged and untracked files
    Status,

    /// Discard changes to tracked files
    Restore,

    /// Show repository, remote and stored credentials
    Detect,

    /// Remove stored credentials from the repository
    Forget,
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.cli.no_color || self.cli.json {
            colored::control::set_override(false);
        }

        match self.handle_command().await {
            Ok(()) => Ok(()),
            // details were already printed by the output layer
            Err(e) if e.is::<OperationFailed>() => exit(1),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(self) -> anyhow::Result<()> {
        let client = Arc::new(self.build_client()?);
        let printer = Printer::new(self.cli.json);

        let interrupt = client.interrupt_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, aborting transfer");
                interrupt.store(true, Ordering::SeqCst);
            }
        });

        match self.cli.command {
            Commands::Clone { url, target, auth } => {
                let command = CloneCommand {
                    url,
                    target,
                    username: auth.username,
                    password: auth.password,
                };
                command.execute(&client, printer).await
            }
            Commands::Pull { auth } => {
                RemoteCommand::new(RemoteOperation::Pull, auth.username, auth.password)
                    .execute(&client, printer)
                    .await
            }
            Commands::Push { auth } => {
                RemoteCommand::new(RemoteOperation::Push, auth.username, auth.password)
                    .execute(&client, printer)
                    .await
            }
            Commands::Fetch { auth } => {
                RemoteCommand::new(RemoteOperation::Fetch, auth.username, auth.password)
                    .execute(&client, printer)
                    .await
            }
            Commands::Stage => {
                LocalCommand::new(LocalOperation::Stage)
                    .execute(&client, printer)
                    .await
            }
            Commands::Commit { message } => {
                LocalCommand::new(LocalOperation::Commit { message })
                    .execute(&client, printer)
                    .await
            }
            Commands::Status => {
                LocalCommand::new(LocalOperation::Status)
                    .execute(&client, printer)
                    .await
            }
            Commands::Restore => {
                LocalCommand::new(LocalOperation::Restore)
                    .execute(&client, printer)
                    .await
            }
            Commands::Detect => DetectCommand.execute(&client, printer).await,
            Commands::Forget => ForgetCommand.execute(&client, printer).await,
        }
    }

    fn build_client(&self) -> anyhow::Result<GitClient> {
        let work_dir = match &self.cli.directory {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };

        let config = ConfigStore::new()
            .read_or_default(self.cli.config.as_ref())
            .map_err(WorkflowError::from)
            .context("Failed to load configuration")?;

        tracing::debug!(dir = %work_dir.display(), remote = %config.remote_name, "client ready");
        Ok(GitClient::with_config(work_dir, config))
    }
}
