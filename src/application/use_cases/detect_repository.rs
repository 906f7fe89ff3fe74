use crate::application::git_client::GitClient;
use crate::domain::entities::operation::{OperationResult, RepositoryInfo};

impl GitClient {
    /// Inspect the working directory. Never fails: anything that cannot be
    /// read is reported as absent.
    pub fn detect_repository(&self) -> RepositoryInfo {
        if !Self::is_repository(self.work_dir()) {
            return RepositoryInfo::default();
        }

        let remote_name = &self.config().remote_name;
        let repo = match self.open_repository() {
            Ok(repo) => repo,
            Err(e) => {
                tracing::debug!(error = %e, "repository could not be opened");
                return RepositoryInfo {
                    is_repo: true,
                    ..RepositoryInfo::default()
                };
            }
        };
        let remote_url = repo.remote_url(remote_name).unwrap_or_else(|e| {
            tracing::debug!(remote = %remote_name, error = %e, "no remote URL");
            String::new()
        });

        let credentials = match self.credential_store().load() {
            Ok(creds) => Some(creds),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                tracing::warn!(error = %e, "stored credentials unreadable");
                None
            }
        };

        RepositoryInfo {
            is_repo: true,
            remote_url,
            credentials,
        }
    }

    /// Remove every stored credential record from the repository
    pub fn forget_credentials(&self) -> OperationResult {
        match self.credential_store().clear() {
            Ok(()) => OperationResult::success("Stored credentials removed"),
            Err(e) => OperationResult::failure(e),
        }
    }
}
