use std::sync::Arc;

use colored::Colorize;

use super::run_blocking;
use crate::application::GitClient;
use crate::presentation::cli::output::Printer;

/// Handler for the clone command
pub struct CloneCommand {
    pub url: String,
    pub target: Option<String>,
    pub username: String,
    pub password: String,
}

impl CloneCommand {
    pub async fn execute(self, client: &Arc<GitClient>, printer: Printer) -> anyhow::Result<()> {
        if !printer.is_json() {
            println!("{} Cloning {}...", "::".blue().bold(), self.url);
        }

        let Self {
            url,
            target,
            username,
            password,
        } = self;
        let target = target.unwrap_or_default();
        let result =
            run_blocking(client, move |c| c.clone(&url, &username, &password, &target)).await?;

        printer.operation("clone", &result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
    Pull,
    Push,
    Fetch,
}

impl RemoteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Fetch => "fetch",
        }
    }
}

/// Handler for pull, push and fetch
pub struct RemoteCommand {
    pub operation: RemoteOperation,
    pub username: String,
    pub password: String,
}

impl RemoteCommand {
    pub fn new(operation: RemoteOperation, username: String, password: String) -> Self {
        Self {
            operation,
            username,
            password,
        }
    }

    pub async fn execute(self, client: &Arc<GitClient>, printer: Printer) -> anyhow::Result<()> {
        let Self {
            operation,
            username,
            password,
        } = self;

        if !printer.is_json() {
            println!(
                "{} Running {} against '{}'...",
                "::".blue().bold(),
                operation.as_str(),
                client.config().remote_name
            );
        }

        let result = run_blocking(client, move |c| match operation {
            RemoteOperation::Pull => c.pull(&username, &password),
            RemoteOperation::Push => c.push(&username, &password),
            RemoteOperation::Fetch => c.fetch(&username, &password),
        })
        .await?;

        printer.operation(operation.as_str(), &result)
    }
}
