use crate::application::git_client::{engine_failure, log_outcome, GitClient};
use crate::common::result::WorkflowResult;
use crate::domain::entities::operation::{OperationResult, Outcome};
use crate::domain::value_objects::basic_auth::BasicAuth;
use crate::infrastructure::git::repository::SyncStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteAction {
    Pull,
    Push,
    Fetch,
}

impl RemoteAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Fetch => "fetch",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            Self::Pull => "Pull completed successfully",
            Self::Push => "Push completed successfully",
            Self::Fetch => "Fetch completed successfully",
        }
    }
}

impl GitClient {
    /// Fetch from the configured remote and fast-forward the current branch
    pub fn pull(&self, username: &str, password: &str) -> OperationResult {
        self.sync_remote(RemoteAction::Pull, username, password)
    }

    /// Push the current branch to the same branch on the configured remote
    pub fn push(&self, username: &str, password: &str) -> OperationResult {
        self.sync_remote(RemoteAction::Push, username, password)
    }

    pub fn fetch(&self, username: &str, password: &str) -> OperationResult {
        self.sync_remote(RemoteAction::Fetch, username, password)
    }

    fn sync_remote(&self, action: RemoteAction, username: &str, password: &str) -> OperationResult {
        tracing::info!(
            operation = action.as_str(),
            remote = %self.config().remote_name,
            dir = %self.work_dir().display(),
            "operation started"
        );

        let outcome = self
            .try_sync_remote(action, username, password)
            .unwrap_or_else(Outcome::Failed);

        log_outcome(action.as_str(), &outcome);
        outcome.into()
    }

    fn try_sync_remote(
        &self,
        action: RemoteAction,
        username: &str,
        password: &str,
    ) -> WorkflowResult<Outcome> {
        let repo = self.open_repository()?;
        let remote_name = self.config().remote_name.as_str();
        let remote_url = repo.remote_url(remote_name).map_err(engine_failure)?;

        let auth = BasicAuth::select(username, password);
        let interrupt = self.interrupt_flag();
        let status = match action {
            RemoteAction::Pull => repo.pull(remote_name, &auth, interrupt),
            RemoteAction::Push => repo.push(remote_name, &auth, interrupt),
            RemoteAction::Fetch => repo.fetch(remote_name, &auth, interrupt),
        }
        .map_err(engine_failure)?;

        Ok(match status {
            SyncStatus::Updated => {
                self.remember_credentials(repo.path(), &remote_url, username, password);
                Outcome::Completed(action.success_message().to_string())
            }
            // nothing was transferred, so the credentials are left untouched
            SyncStatus::UpToDate => Outcome::UpToDate,
        })
    }
}
