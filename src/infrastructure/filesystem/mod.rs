pub mod config_document;
pub mod config_store;
pub mod credential_store;

pub use config_store::{ConfigStore, ConfigStoreError};
pub use credential_store::{CredentialStore, CredentialStoreError};
