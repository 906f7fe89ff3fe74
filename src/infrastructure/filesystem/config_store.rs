use std::fs;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::domain::entities::client_config::ClientConfig;

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {0}")]
    ConfigFileNotFound(String),

    #[error("Configuration file read failed: {0}")]
    ReadFailed(String),

    #[error("YAML parsing failed: {0}")]
    YamlParsingFailed(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Reads client settings from YAML files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    validate_on_read: bool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            validate_on_read: true,
        }
    }

    /// Store that skips validation, for callers that patch the config afterwards
    pub fn without_validation() -> Self {
        Self {
            validate_on_read: false,
        }
    }

    /// Read client configuration from a YAML file.
    ///
    /// Keys missing from the file fall back to [`ClientConfig::default`].
    pub fn read_client_config<P: AsRef<Path>>(
        &self,
        config_path: P,
    ) -> Result<ClientConfig, ConfigStoreError> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            return Err(ConfigStoreError::ConfigFileNotFound(
                config_path.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(config_path)
            .map_err(|e| ConfigStoreError::ReadFailed(e.to_string()))?;

        // an empty file deserializes to unit, not to a mapping
        let config: ClientConfig = if contents.trim().is_empty() {
            ClientConfig::default()
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ConfigStoreError::YamlParsingFailed(e.to_string()))?
        };

        if self.validate_on_read {
            self.validate_client_config(&config)?;
        }

        tracing::debug!(
            path = %config_path.display(),
            remote = %config.remote_name,
            "loaded client config"
        );
        Ok(config)
    }

    /// Read the file when a path is given, defaults otherwise
    pub fn read_or_default<P: AsRef<Path>>(
        &self,
        config_path: Option<P>,
    ) -> Result<ClientConfig, ConfigStoreError> {
        match config_path {
            Some(path) => self.read_client_config(path),
            None => Ok(ClientConfig::default()),
        }
    }

    pub fn validate_client_config(&self, config: &ClientConfig) -> Result<(), ConfigStoreError> {
        config.validate().map_err(|errors| {
            let mut messages = Vec::new();
            for (field, field_errors) in errors.field_errors() {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    messages.push(format!("{}: {}", field, message));
                }
            }
            messages.sort();
            ConfigStoreError::ValidationFailed(messages.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("gitlane.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_full_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "remote_name: upstream\n\
             author_name: Jane Doe\n\
             author_email: jane@example.com\n\
             default_commit_message: Sync\n",
        );

        let config = ConfigStore::new().read_client_config(&path).unwrap();
        assert_eq!(config.remote_name, "upstream");
        assert_eq!(config.author_name, "Jane Doe");
        assert_eq!(config.author_email, "jane@example.com");
        assert_eq!(config.default_commit_message, "Sync");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigStore::new().read_client_config(temp_dir.path().join("absent.yml"));
        assert!(matches!(result, Err(ConfigStoreError::ConfigFileNotFound(_))));
    }

    #[test]
    fn test_read_empty_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "\n");
        let config = ConfigStore::new().read_client_config(&path).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_read_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "remote_name: [unclosed\n");
        let result = ConfigStore::new().read_client_config(&path);
        assert!(matches!(result, Err(ConfigStoreError::YamlParsingFailed(_))));
    }

    #[test]
    fn test_validation_failure_names_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "author_email: nobody\n");

        let err = ConfigStore::new().read_client_config(&path).unwrap_err();
        match err {
            ConfigStoreError::ValidationFailed(message) => {
                assert!(message.contains("author_email"))
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(ConfigStore::without_validation()
            .read_client_config(&path)
            .is_ok());
    }

    #[test]
    fn test_read_or_default_without_path() {
        let config = ConfigStore::new()
            .read_or_default(None::<&Path>)
            .unwrap();
        assert_eq!(config.remote_name, "origin");
    }
}
