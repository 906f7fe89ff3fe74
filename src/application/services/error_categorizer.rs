//! Maps engine and transport failures to [`GitError`]s with remediation hints.
//!
//! Levels are checked in a fixed order and the first match wins:
//! authentication, network, repository not found, then everything else.
//! Within a level, a typed libgit2 error found anywhere in the source chain is
//! checked before the case-sensitive substring match on the error text.

use std::error::Error as StdError;

use git2::{ErrorClass, ErrorCode};

use crate::common::error::{BoxedCause, ErrorCategory, GitError};

pub const AUTH_HINT: &str =
    "For private repositories, use a GitHub Personal Access Token (ghp_...)";
pub const NETWORK_HINT: &str = "Check your internet connection and try again";
pub const NOT_FOUND_HINT: &str =
    "Verify the repository URL is correct and you have access permissions";
pub const NOT_FOUND_MESSAGE: &str = "Git operation failed: Repository not found (404)";

const AUTH_MARKERS: &[&str] = &["authentication", "401", "403", "unauthorized", "forbidden"];
const NETWORK_MARKERS: &[&str] = &["timeout", "connection", "network", "dial", "DNS"];
const NOT_FOUND_MARKERS: &[&str] = &["404", "not found"];

/// Categorize an optional failure; `None` stays `None`
pub fn categorize_error<E>(error: Option<E>) -> Option<GitError>
where
    E: Into<BoxedCause>,
{
    error.map(categorize)
}

/// Categorize a failure, keeping it as the cause of the result
pub fn categorize<E>(error: E) -> GitError
where
    E: Into<BoxedCause>,
{
    let cause: BoxedCause = error.into();
    // libgit2's Display appends class and code; only the message is shown
    let text = match cause.downcast_ref::<git2::Error>() {
        Some(e) => e.message().to_string(),
        None => cause.to_string(),
    };
    let engine_error = find_engine_error(cause.as_ref());

    let (category, message, hint) = if is_auth_failure(engine_error, &text) {
        (
            ErrorCategory::Authentication,
            format!("Authentication failed: {}", text),
            AUTH_HINT,
        )
    } else if is_network_failure(engine_error, &text) {
        (
            ErrorCategory::Network,
            format!("Network error: {}", text),
            NETWORK_HINT,
        )
    } else if contains_any(&text, NOT_FOUND_MARKERS) {
        (
            ErrorCategory::GitOperation,
            NOT_FOUND_MESSAGE.to_string(),
            NOT_FOUND_HINT,
        )
    } else {
        (
            ErrorCategory::GitOperation,
            format!("Git operation failed: {}", text),
            "",
        )
    };

    tracing::debug!(category = %category, error = %text, "categorized failure");
    GitError::new(category, message, hint, cause)
}

fn is_auth_failure(engine_error: Option<&git2::Error>, text: &str) -> bool {
    engine_error.is_some_and(|e| e.code() == ErrorCode::Auth) || contains_any(text, AUTH_MARKERS)
}

fn is_network_failure(engine_error: Option<&git2::Error>, text: &str) -> bool {
    engine_error.is_some_and(|e| e.class() == ErrorClass::Net)
        || contains_any(text, NETWORK_MARKERS)
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

/// First libgit2 error in the source chain, starting with `error` itself
fn find_engine_error<'a>(error: &'a (dyn StdError + 'static)) -> Option<&'a git2::Error> {
    let mut current = Some(error);
    while let Some(e) = current {
        if let Some(engine_error) = e.downcast_ref::<git2::Error>() {
            return Some(engine_error);
        }
        current = e.source();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::git::repository::GitRepositoryError;
    use std::error::Error as _;
    use std::io;

    fn plain(msg: &str) -> io::Error {
        io::Error::new(io::ErrorKind::Other, msg.to_string())
    }

    #[test]
    fn test_none_stays_none() {
        assert!(categorize_error(None::<io::Error>).is_none());
    }

    #[test]
    fn test_authentication_from_status_code() {
        let err =
            categorize_error(Some(plain("remote: Invalid username or password. 401"))).unwrap();
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(
            err.message(),
            "Authentication failed: remote: Invalid username or password. 401"
        );
        assert!(err.hint().contains("ghp_"));
    }

    #[test]
    fn test_network_from_dial_error() {
        let err = categorize(plain("dial tcp: i/o timeout"));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.message(), "Network error: dial tcp: i/o timeout");
        assert_eq!(err.hint(), NETWORK_HINT);
    }

    #[test]
    fn test_not_found_uses_fixed_message() {
        let err = categorize(plain("repository not found"));
        assert_eq!(err.category(), ErrorCategory::GitOperation);
        assert_eq!(err.message(), NOT_FOUND_MESSAGE);
        assert_eq!(err.hint(), NOT_FOUND_HINT);

        let err = categorize(plain("server answered 404"));
        assert_eq!(err.message(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_generic_failure_has_no_hint() {
        let err = categorize(plain("object file is corrupt"));
        assert_eq!(err.category(), ErrorCategory::GitOperation);
        assert_eq!(err.message(), "Git operation failed: object file is corrupt");
        assert_eq!(err.hint(), "");
        assert_eq!(
            err.to_string(),
            "Git operation failed: object file is corrupt"
        );
    }

    #[test]
    fn test_precedence_auth_over_network_over_not_found() {
        let err = categorize(plain("authentication timeout: 404"));
        assert_eq!(err.category(), ErrorCategory::Authentication);

        let err = categorize(plain("connection reset, remote not found"));
        assert_eq!(err.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            categorize(plain("Authentication required")).category(),
            ErrorCategory::GitOperation
        );
        assert_eq!(
            categorize(plain("dns lookup failed")).category(),
            ErrorCategory::GitOperation
        );
        assert_eq!(
            categorize(plain("DNS lookup failed")).category(),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_typed_engine_errors() {
        let auth = git2::Error::new(ErrorCode::Auth, ErrorClass::Http, "request rejected");
        let err = categorize(auth);
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.message(), "Authentication failed: request rejected");

        let net = git2::Error::new(
            ErrorCode::GenericError,
            ErrorClass::Net,
            "failed to resolve address",
        );
        assert_eq!(categorize(net).category(), ErrorCategory::Network);
    }

    #[test]
    fn test_typed_error_found_through_wrapper() {
        let wrapped = GitRepositoryError::from(git2::Error::new(
            ErrorCode::GenericError,
            ErrorClass::Net,
            "failed to resolve address",
        ));
        let err = categorize(wrapped);
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.message(), "Network error: failed to resolve address");
    }

    #[test]
    fn test_typed_network_outranks_not_found_text() {
        let net = git2::Error::new(ErrorCode::GenericError, ErrorClass::Net, "unexpected 404");
        assert_eq!(categorize(net).category(), ErrorCategory::Network);
    }

    #[test]
    fn test_cause_is_preserved() {
        let err = categorize(plain("dial tcp: i/o timeout"));
        assert_eq!(
            err.source().map(|e| e.to_string()),
            Some("dial tcp: i/o timeout".to_string())
        );
    }

    #[test]
    fn test_display_appends_hint() {
        let err = categorize(plain("repository not found"));
        assert_eq!(
            err.to_string(),
            format!("{}\nHint: {}", NOT_FOUND_MESSAGE, NOT_FOUND_HINT)
        );
    }
}
