use crate::common::error::WorkflowError;

/// Result alias used across the crate
///
/// # Examples
///
/// ```
/// use gitlane::common::result::WorkflowResult;
/// use gitlane::common::error::WorkflowError;
///
/// fn example_function() -> WorkflowResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> WorkflowResult<()> {
///     Err(WorkflowError::validation_error("message", "must not be empty"))
/// }
/// ```
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Helpers for best-effort steps whose failure must not escalate
pub trait ResultExt<T> {
    /// Converts to an `Option`, logging the error at warn level
    ///
    /// # Arguments
    ///
    /// * `context` - what was being attempted, included in the log event
    ///
    /// # Examples
    ///
    /// ```
    /// use gitlane::common::result::ResultExt;
    ///
    /// let failed: Result<(), std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::PermissionDenied, "read-only"
    /// ));
    /// assert_eq!(failed.ok_logged("persist credentials"), None);
    /// ```
    fn ok_logged(self, context: &str) -> Option<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn ok_logged(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "{} failed, continuing", context);
                None
            }
        }
    }
}
