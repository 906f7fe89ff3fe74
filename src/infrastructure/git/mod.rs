pub mod callbacks;
pub mod repository;

// Re-export main types for convenience
pub use callbacks::remote_callbacks;
pub use repository::{GitRepository, GitRepositoryError, SyncStatus};
