use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config_document::{ConfigDocument, Section};
use crate::domain::entities::credentials::Credentials;

/// Credential store related errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error(".git directory not found at {0}")]
    RepositoryNotInitialized(String),

    #[error("config file not found at {0}")]
    ConfigNotFound(String),

    #[error("no credentials found in config file")]
    NoCredentialsFound,

    #[error("failed to read config file: {0}")]
    ReadFailed(#[source] io::Error),

    #[error("failed to write config file: {0}")]
    WriteFailed(#[source] io::Error),

    #[error("failed to set config file permissions: {0}")]
    PermissionsFailed(#[source] io::Error),
}

impl CredentialStoreError {
    /// Absence of the repository, the document or a usable record
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotInitialized(_) | Self::ConfigNotFound(_) | Self::NoCredentialsFound
        )
    }
}

/// Stores one credential record per remote URL inside `<root>/.git/config`.
///
/// Unrelated sections of the document are preserved verbatim. There is no
/// locking: concurrent writers race and the last write wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    repo_path: PathBuf,
}

impl CredentialStore {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn git_dir(&self) -> PathBuf {
        self.repo_path.join(".git")
    }

    pub fn config_path(&self) -> PathBuf {
        self.git_dir().join("config")
    }

    /// Replace the record for `creds.url` and restrict the file to its owner
    pub fn save(&self, creds: &Credentials) -> Result<(), CredentialStoreError> {
        let git_dir = self.git_dir();
        if !git_dir.exists() {
            return Err(CredentialStoreError::RepositoryNotInitialized(
                git_dir.display().to_string(),
            ));
        }

        let config_path = self.config_path();
        let mut doc = match fs::read_to_string(&config_path) {
            Ok(text) => ConfigDocument::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => ConfigDocument::parse(""),
            Err(e) => return Err(CredentialStoreError::ReadFailed(e)),
        };

        let replaced = doc.remove_credential(&creds.url);
        doc.push_section(Section::credential(creds));

        write_document(&config_path, &doc)?;
        restrict_permissions(&config_path)?;

        tracing::debug!(url = %creds.url, replaced, "saved credentials");
        Ok(())
    }

    /// Last complete credential record in the document.
    ///
    /// The scan does not filter by URL; when several records exist the last
    /// complete one wins.
    pub fn load(&self) -> Result<Credentials, CredentialStoreError> {
        let config_path = self.config_path();
        let text = match fs::read_to_string(&config_path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CredentialStoreError::ConfigNotFound(
                    config_path.display().to_string(),
                ))
            }
            Err(e) => return Err(CredentialStoreError::ReadFailed(e)),
        };

        ConfigDocument::parse(&text)
            .last_complete_credentials()
            .ok_or(CredentialStoreError::NoCredentialsFound)
    }

    /// Remove every credential record; a missing document is not an error
    pub fn clear(&self) -> Result<(), CredentialStoreError> {
        let config_path = self.config_path();
        let text = match fs::read_to_string(&config_path) {
            Ok(text) => text,
            // also covers a missing .git directory
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CredentialStoreError::ReadFailed(e)),
        };

        let mut doc = ConfigDocument::parse(&text);
        let removed = doc.remove_all_credentials();
        write_document(&config_path, &doc)?;

        tracing::debug!(removed, "cleared credentials");
        Ok(())
    }
}

fn write_document(path: &Path, doc: &ConfigDocument) -> Result<(), CredentialStoreError> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(CredentialStoreError::WriteFailed)?;
    io::Write::write_all(&mut file, doc.serialize().as_bytes())
        .map_err(CredentialStoreError::WriteFailed)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), CredentialStoreError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(CredentialStoreError::PermissionsFailed)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), CredentialStoreError> {
    Ok(())
}
