use colored::Colorize;
use serde::Serialize;
use thiserror::Error;

use crate::common::error::WorkflowError;
use crate::domain::entities::operation::{OperationResult, RepositoryInfo};
use crate::domain::entities::status_report::StatusReport;

/// Marker for an operation whose failure has already been printed
#[derive(Debug, Error)]
#[error("{operation} failed")]
pub struct OperationFailed {
    pub operation: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hint: String,
}

impl From<&WorkflowError> for ErrorReport {
    fn from(error: &WorkflowError) -> Self {
        let message = match error {
            WorkflowError::Git(git_error) => git_error.message().to_string(),
            other => other.to_string(),
        };
        Self {
            category: error.category().map(|c| c.to_string()),
            message,
            hint: error.hint().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OperationReport<'a> {
    pub operation: &'a str,
    pub success: bool,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Detection result without the stored secret
#[derive(Debug, Serialize)]
pub struct DetectReport<'a> {
    pub is_repo: bool,
    pub remote_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_username: Option<&'a str>,
}

/// Renders command results as colored text or JSON on stdout
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print the result; a failure is returned as [`OperationFailed`]
    pub fn operation(&self, operation: &str, result: &OperationResult) -> anyhow::Result<()> {
        if self.json {
            let report = OperationReport {
                operation,
                success: result.is_success(),
                message: result.message(),
                error: result.error().map(ErrorReport::from),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if let Some(error) = result.error() {
            self.print_failure(error);
        } else {
            println!("{} {}", "✓".green().bold(), result.message());
        }

        if result.is_success() {
            Ok(())
        } else {
            Err(OperationFailed {
                operation: operation.to_string(),
            }
            .into())
        }
    }

    pub fn status(&self, report: &StatusReport) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        let sections = [
            ("Modified", &report.modified, "M"),
            ("Staged", &report.staged, "S"),
            ("Untracked", &report.untracked, "?"),
        ];
        println!("{}", "Repository Status:".bold());
        for (title, files, marker) in sections {
            println!();
            println!("{} ({}):", title, files.len());
            if files.is_empty() {
                println!("  {}", "(none)".dimmed());
            }
            for file in files.iter() {
                let marker = match marker {
                    "M" => marker.yellow(),
                    "S" => marker.green(),
                    _ => marker.red(),
                };
                println!("  {} {}", marker, file);
            }
        }
        Ok(())
    }

    pub fn repository_info(&self, info: &RepositoryInfo) -> anyhow::Result<()> {
        if self.json {
            let report = DetectReport {
                is_repo: info.is_repo,
                remote_url: &info.remote_url,
                credentials_url: info.credentials.as_ref().map(|c| c.url.as_str()),
                credentials_username: info.credentials.as_ref().map(|c| c.username.as_str()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if !info.is_repo {
            println!("{} Not a git repository", "✗".red().bold());
            return Ok(());
        }

        println!("{} Git repository", "✓".green().bold());
        let remote = if info.remote_url.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            info.remote_url.clone()
        };
        println!("  Remote: {}", remote);
        match &info.credentials {
            Some(creds) => println!("  Credentials: {} for {}", creds.username.bold(), creds.url),
            None => println!("  Credentials: {}", "(none)".dimmed()),
        }
        Ok(())
    }

    fn print_failure(&self, error: &WorkflowError) {
        let report = ErrorReport::from(error);
        match &report.category {
            Some(category) => eprintln!(
                "{} {} {}",
                "✗".red().bold(),
                format!("[{}]", category).red(),
                report.message
            ),
            None => eprintln!("{} {}", "✗".red().bold(), report.message),
        }
        if !report.hint.is_empty() {
            eprintln!("  {} {}", "Hint:".yellow().bold(), report.hint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::error_categorizer::categorize;

    #[test]
    fn test_error_report_splits_hint() {
        let error: WorkflowError = categorize(std::io::Error::new(
            std::io::ErrorKind::Other,
            "dial tcp: i/o timeout",
        ))
        .into();
        let report = ErrorReport::from(&error);
        assert_eq!(report.category.as_deref(), Some("Network"));
        assert_eq!(report.message, "Network error: dial tcp: i/o timeout");
        assert_eq!(report.hint, "Check your internet connection and try again");
    }

    #[test]
    fn test_validation_report_has_no_category() {
        let error = WorkflowError::validation_error("staging", "no changes staged for commit");
        let json = serde_json::to_value(ErrorReport::from(&error)).unwrap();
        assert_eq!(json["message"], "no changes staged for commit");
        assert!(json.get("category").is_none());
        assert!(json.get("hint").is_none());
    }

    #[test]
    fn test_failed_operation_returns_marker() {
        let result = OperationResult::failure(WorkflowError::Cancelled);
        let err = Printer::new(true).operation("pull", &result).unwrap_err();
        assert!(err.is::<OperationFailed>());
    }
}
