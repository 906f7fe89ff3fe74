use crate::application::git_client::{engine_failure, GitClient};
use crate::common::error::WorkflowError;
use crate::domain::entities::operation::OperationResult;
use crate::domain::entities::status_report::StatusReport;

/// Length of the abbreviated commit id in commit messages
const SHORT_HASH_LEN: usize = 7;

impl GitClient {
    /// Stage every modified, deleted and untracked file
    pub fn stage(&self) -> OperationResult {
        self.with_repository("stage", |repo| {
            let files = repo.file_statuses().map_err(engine_failure)?;
            let count = files.iter().filter(|f| f.needs_staging()).count();

            repo.stage_all().map_err(engine_failure)?;
            Ok(format!("Staged {} file(s)", count))
        })
    }

    /// Commit the staged changes; an empty message uses the configured default
    pub fn commit(&self, message: &str) -> OperationResult {
        self.with_repository("commit", |repo| {
            let files = repo.file_statuses().map_err(engine_failure)?;
            let staged = files.iter().filter(|f| f.is_staged()).count();
            if staged == 0 {
                return Err(WorkflowError::validation_error(
                    "staging",
                    "no changes staged for commit",
                ));
            }

            let config = self.config();
            let message = if message.is_empty() {
                config.default_commit_message.as_str()
            } else {
                message
            };

            let oid = repo
                .commit(message, &config.author_name, &config.author_email)
                .map_err(engine_failure)?;
            let hash = oid.to_string();
            Ok(format!(
                "Committed {} file(s): {}",
                staged,
                &hash[..SHORT_HASH_LEN.min(hash.len())]
            ))
        })
    }

    /// Human-readable report of modified, staged and untracked files
    pub fn status(&self) -> OperationResult {
        self.with_repository("status", |repo| {
            let files = repo.file_statuses().map_err(engine_failure)?;
            Ok(StatusReport::from_files(&files).render())
        })
    }

    /// Structured form of [`GitClient::status`]
    pub fn status_report(&self) -> Result<StatusReport, WorkflowError> {
        let repo = self.open_repository()?;
        let files = repo.file_statuses().map_err(engine_failure)?;
        Ok(StatusReport::from_files(&files))
    }

    /// Discard changes to tracked files; untracked files are left alone
    pub fn restore(&self) -> OperationResult {
        self.with_repository("restore", |repo| {
            let files = repo.file_statuses().map_err(engine_failure)?;
            let count = files.iter().filter(|f| f.is_worktree_modified()).count();

            repo.reset_hard().map_err(engine_failure)?;
            Ok(format!("Restored {} file(s)", count))
        })
    }
}
