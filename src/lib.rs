//! # gitlane - everyday git workflows with remembered credentials
//!
//! `gitlane` wraps libgit2 with a small, uniform API for the operations a
//! single-repository workflow needs: clone, pull, push, fetch, stage, commit,
//! status, restore and repository detection.
//!
//! ## Features
//!
//! - **Credential memory**: credentials used for a successful remote operation
//!   are stored in the repository's own `.git/config`, readable only by the owner
//! - **Token support**: a bare personal access token (`ghp_...`) works without a username
//! - **Actionable errors**: failures are categorized as authentication, network
//!   or git operation problems and carry a remediation hint
//! - **Collision-free clones**: clone targets never overwrite existing directories
//!
//! ## Architecture
//!
//! - [`domain`]: Credentials, operation results and status value objects
//! - [`application`]: The [`GitClient`] facade, error categorization and clone targets
//! - [`infrastructure`]: libgit2 wrapper and file-backed stores
//! - [`presentation`]: CLI interface
//! - [`common`]: Shared error and result types
//!
//! ## Examples
//!
//! ```rust,no_run
//! use gitlane::GitClient;
//!
//! let client = GitClient::new("/path/to/repo");
//!
//! let result = client.pull("", "ghp_exampletoken");
//! if result.is_success() {
//!     println!("{}", result.message());
//! } else if let Some(error) = result.error() {
//!     eprintln!("{}", error);
//! }
//!
//! let info = client.detect_repository();
//! println!("remote: {}", info.remote_url);
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::application::GitClient;
pub use crate::common::error::{ErrorCategory, GitError, WorkflowError};
pub use crate::common::result::WorkflowResult as Result;
pub use crate::domain::entities::{Credentials, OperationResult, RepositoryInfo};
