use std::sync::Arc;

use super::run_blocking;
use crate::application::GitClient;
use crate::presentation::cli::output::Printer;

/// Handler for the detect command
pub struct DetectCommand;

impl DetectCommand {
    pub async fn execute(self, client: &Arc<GitClient>, printer: Printer) -> anyhow::Result<()> {
        let info = run_blocking(client, |c| c.detect_repository()).await?;
        printer.repository_info(&info)
    }
}

/// Handler for the forget command
pub struct ForgetCommand;

impl ForgetCommand {
    pub async fn execute(self, client: &Arc<GitClient>, printer: Printer) -> anyhow::Result<()> {
        let result = run_blocking(client, |c| c.forget_credentials()).await?;
        printer.operation("forget", &result)
    }
}
