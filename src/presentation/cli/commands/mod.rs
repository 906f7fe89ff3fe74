pub mod local;
pub mod remote;
pub mod repository;

pub use local::{LocalCommand, LocalOperation};
pub use remote::{CloneCommand, RemoteCommand, RemoteOperation};
pub use repository::{DetectCommand, ForgetCommand};

use std::sync::Arc;

use crate::application::GitClient;

/// Run a blocking client call on tokio's blocking pool
pub(crate) async fn run_blocking<T, F>(client: &Arc<GitClient>, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&GitClient) -> T + Send + 'static,
    T: Send + 'static,
{
    let client = Arc::clone(client);
    tokio::task::spawn_blocking(move || f(&client))
        .await
        .map_err(|e| anyhow::anyhow!("worker task failed: {}", e))
}
