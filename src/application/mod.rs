/// Application layer: the operation facade and the services it relies on
pub mod git_client;
pub mod services;
pub mod use_cases;

pub use git_client::GitClient;
