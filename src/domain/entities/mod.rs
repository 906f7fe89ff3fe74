pub mod client_config;
pub mod credentials;
pub mod operation;
pub mod status_report;

pub use client_config::ClientConfig;
pub use credentials::Credentials;
pub use operation::{OperationResult, Outcome, RepositoryInfo};
pub use status_report::StatusReport;
