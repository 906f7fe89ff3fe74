use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_REMOTE_NAME: &str = "origin";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update files";
pub const DEFAULT_AUTHOR_NAME: &str = "Gitlane User";
pub const DEFAULT_AUTHOR_EMAIL: &str = "user@gitlane.local";

/// Tunables of the git client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ClientConfig {
    /// Remote used by pull/push/fetch and detection
    #[validate(length(min = 1, max = 255))]
    pub remote_name: String,

    /// Author and committer name recorded on commits
    #[validate(length(min = 1))]
    pub author_name: String,

    #[validate(email)]
    pub author_email: String,

    /// Substituted when `commit` receives an empty message
    #[validate(length(min = 1))]
    pub default_commit_message: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_email: DEFAULT_AUTHOR_EMAIL.to_string(),
            default_commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author_name = name.into();
        self.author_email = email.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.remote_name, "origin");
        assert_eq!(config.default_commit_message, "Update files");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let config = ClientConfig::default().with_author("Someone", "not-an-email");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_remote_rejected() {
        let config = ClientConfig {
            remote_name: String::new(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ClientConfig = serde_yaml::from_str("remote_name: upstream\n").unwrap();
        assert_eq!(config.remote_name, "upstream");
        assert_eq!(config.author_email, DEFAULT_AUTHOR_EMAIL);
    }
}
