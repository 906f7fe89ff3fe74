//! Operations of [`GitClient`](crate::application::GitClient), one file per
//! family: cloning, remote synchronization, working tree and detection.

pub mod clone_repository;
pub mod detect_repository;
pub mod remote_sync;
pub mod working_tree;
