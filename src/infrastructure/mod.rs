/// Infrastructure layer modules
///
/// Concrete implementations for external system interactions:
/// - Git operations on top of libgit2 (clone, fetch, push, status, commit)
/// - File system stores (credential records, YAML settings)
pub mod filesystem;
pub mod git;

// Re-export commonly used types
pub use filesystem::{ConfigStore, CredentialStore};
pub use git::GitRepository;
