use crate::common::error::WorkflowError;
use crate::common::result::WorkflowResult;
use crate::domain::entities::credentials::Credentials;

/// Message reported when the engine had nothing to do
pub const UP_TO_DATE_MESSAGE: &str = "Already up-to-date";

/// How a single facade call ended
#[derive(Debug)]
pub enum Outcome {
    /// Work was performed; carries the human-readable summary
    Completed(String),
    /// The engine reported there was nothing to synchronize
    UpToDate,
    Failed(WorkflowError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

impl From<WorkflowResult<String>> for Outcome {
    fn from(result: WorkflowResult<String>) -> Self {
        match result {
            Ok(message) => Self::Completed(message),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Uniform result of every facade operation.
///
/// `success` is true exactly when no error is present; the message is empty
/// on failure.
#[derive(Debug)]
pub struct OperationResult {
    success: bool,
    message: String,
    error: Option<WorkflowError>,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<WorkflowError>) -> Self {
        Self {
            success: false,
            message: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.error.as_ref()
    }

    /// The same information as a `Result`: the message on success, the error
    /// on failure.
    pub fn into_result(self) -> WorkflowResult<String> {
        match self.error {
            None => Ok(self.message),
            Some(e) => Err(e),
        }
    }
}

impl From<Outcome> for OperationResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed(message) => Self::success(message),
            Outcome::UpToDate => Self::success(UP_TO_DATE_MESSAGE),
            Outcome::Failed(e) => Self::failure(e),
        }
    }
}

/// What `detect_repository` found in the working directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub is_repo: bool,
    /// First URL of the origin remote, empty when unavailable
    pub remote_url: String,
    pub credentials: Option<Credentials>,
}
