use std::sync::Arc;

use super::run_blocking;
use crate::application::GitClient;
use crate::domain::entities::operation::OperationResult;
use crate::presentation::cli::output::Printer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOperation {
    Stage,
    Commit { message: String },
    Status,
    Restore,
}

impl LocalOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Commit { .. } => "commit",
            Self::Status => "status",
            Self::Restore => "restore",
        }
    }
}

/// Handler for the commands that only touch the working tree
pub struct LocalCommand {
    pub operation: LocalOperation,
}

impl LocalCommand {
    pub fn new(operation: LocalOperation) -> Self {
        Self { operation }
    }

    pub async fn execute(self, client: &Arc<GitClient>, printer: Printer) -> anyhow::Result<()> {
        let name = self.operation.as_str();

        let result = match self.operation {
            LocalOperation::Status => {
                let report = run_blocking(client, |c| c.status_report()).await?;
                return match report {
                    Ok(report) => printer.status(&report),
                    Err(e) => printer.operation(name, &OperationResult::failure(e)),
                };
            }
            LocalOperation::Stage => run_blocking(client, |c| c.stage()).await?,
            LocalOperation::Commit { message } => {
                run_blocking(client, move |c| c.commit(&message)).await?
            }
            LocalOperation::Restore => run_blocking(client, |c| c.restore()).await?,
        };

        printer.operation(name, &result)
    }
}
