use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::services::error_categorizer::categorize;
use crate::common::error::WorkflowError;
use crate::common::result::{ResultExt, WorkflowResult};
use crate::domain::entities::client_config::ClientConfig;
use crate::domain::entities::credentials::Credentials;
use crate::domain::entities::operation::{OperationResult, Outcome};
use crate::infrastructure::filesystem::credential_store::CredentialStore;
use crate::infrastructure::git::repository::{GitRepository, GitRepositoryError};

/// Entry point for every workflow operation on one working directory.
///
/// Each operation returns an [`OperationResult`](crate::domain::entities::OperationResult)
/// and never panics. Calls block the current thread; long transfers can be
/// aborted from another thread through [`GitClient::interrupt_handle`].
#[derive(Debug)]
pub struct GitClient {
    work_dir: PathBuf,
    config: ClientConfig,
    interrupt: Arc<AtomicBool>,
}

impl GitClient {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(work_dir, ClientConfig::default())
    }

    pub fn with_config(work_dir: impl Into<PathBuf>, config: ClientConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            config,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Retarget the client, e.g. at a freshly cloned repository
    pub fn set_work_dir(&mut self, work_dir: impl Into<PathBuf>) {
        self.work_dir = work_dir.into();
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Flag that aborts in-flight transfers and refuses new ones once set
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// True when `dir` holds a `.git` directory
    pub fn is_repository(dir: impl AsRef<Path>) -> bool {
        dir.as_ref().join(".git").is_dir()
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(&self.work_dir)
    }

    pub(crate) fn interrupt_flag(&self) -> &AtomicBool {
        &self.interrupt
    }

    pub(crate) fn open_repository(&self) -> WorkflowResult<GitRepository> {
        GitRepository::open(&self.work_dir).map_err(engine_failure)
    }

    /// Run a local operation against the opened repository
    pub(crate) fn with_repository<F>(&self, operation: &str, f: F) -> OperationResult
    where
        F: FnOnce(&GitRepository) -> WorkflowResult<String>,
    {
        tracing::info!(operation, dir = %self.work_dir.display(), "operation started");
        let outcome = Outcome::from(self.open_repository().and_then(|repo| f(&repo)));
        log_outcome(operation, &outcome);
        outcome.into()
    }

    /// Best-effort save of the caller's credentials next to `repo_path`
    pub(crate) fn remember_credentials(
        &self,
        repo_path: &Path,
        url: &str,
        username: &str,
        password: &str,
    ) {
        if url.is_empty() {
            tracing::debug!("remote has no URL, credentials not saved");
            return;
        }

        let creds = Credentials::new(url, username, password);
        CredentialStore::new(repo_path)
            .save(&creds)
            .ok_logged("persisting credentials");
    }
}

pub(crate) fn log_outcome(operation: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Completed(message) => tracing::info!(operation, %message, "operation completed"),
        Outcome::UpToDate => tracing::info!(operation, "already up-to-date"),
        Outcome::Failed(error) => tracing::info!(operation, %error, "operation failed"),
    }
}

/// Engine failure as a workflow error; interruptions are not categorized
pub(crate) fn engine_failure(error: GitRepositoryError) -> WorkflowError {
    match error {
        GitRepositoryError::Interrupted => WorkflowError::Cancelled,
        other => categorize(other).into(),
    }
}
