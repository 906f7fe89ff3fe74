use std::fmt;
use thiserror::Error;

use crate::infrastructure::filesystem::config_store::ConfigStoreError;
use crate::infrastructure::filesystem::credential_store::CredentialStoreError;

/// Boxed underlying failure kept on a [`GitError`] for unwrapping.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Category of a failure reported by the engine or the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad or missing credentials
    Authentication,
    /// Connectivity, DNS or timeout problems
    Network,
    /// Repository state, missing remotes and generic engine failures
    GitOperation,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authentication => "Authentication",
            Self::Network => "Network",
            Self::GitOperation => "Git Operation",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized engine failure with a remediation hint.
///
/// Built by [`crate::application::services::error_categorizer`]; the original
/// error stays reachable through [`std::error::Error::source`].
#[derive(Debug)]
pub struct GitError {
    category: ErrorCategory,
    message: String,
    hint: String,
    cause: BoxedCause,
}

impl GitError {
    pub fn new(
        category: ErrorCategory,
        message: impl Into<String>,
        hint: impl Into<String>,
        cause: impl Into<BoxedCause>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            hint: hint.into(),
            cause: cause.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Remediation hint, empty when none applies
    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hint.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}\nHint: {}", self.message, self.hint)
        }
    }
}

impl std::error::Error for GitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Engine or transport failure routed through the categorizer
    #[error(transparent)]
    Git(#[from] GitError),

    /// Locally detected precondition failure
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Credential storage failed: {source}")]
    CredentialError {
        #[from]
        source: CredentialStoreError,
    },

    #[error("Configuration error: {source}")]
    ConfigError {
        #[from]
        source: ConfigStoreError,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl WorkflowError {
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Category of the failure when it came from the engine
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Git(e) => Some(e.category()),
            _ => None,
        }
    }

    /// Remediation hint, empty for local errors
    pub fn hint(&self) -> &str {
        match self {
            Self::Git(e) => e.hint(),
            _ => "",
        }
    }
}
