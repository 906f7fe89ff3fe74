use crate::application::git_client::{engine_failure, log_outcome, GitClient};
use crate::application::services::clone_target::CloneTargetResolver;
use crate::domain::entities::operation::{OperationResult, Outcome};
use crate::domain::value_objects::basic_auth::BasicAuth;
use crate::infrastructure::git::repository::GitRepository;

impl GitClient {
    /// Clone `url` and remember the credentials inside the new clone.
    ///
    /// An empty `target_dir` picks a free directory under the working
    /// directory named after the repository. The success message is the path
    /// of the clone.
    pub fn clone(
        &self,
        url: &str,
        username: &str,
        password: &str,
        target_dir: &str,
    ) -> OperationResult {
        let target = CloneTargetResolver::new(self.work_dir()).resolve(url, target_dir);
        let auth = BasicAuth::select(username, password);
        tracing::info!(operation = "clone", url, target = %target.display(), "operation started");

        let outcome = match GitRepository::clone_from(url, &target, &auth, self.interrupt_flag()) {
            Ok(repo) => {
                self.remember_credentials(repo.path(), url, username, password);
                Outcome::Completed(target.display().to_string())
            }
            Err(e) => Outcome::Failed(engine_failure(e)),
        };

        log_outcome("clone", &outcome);
        outcome.into()
    }
}
