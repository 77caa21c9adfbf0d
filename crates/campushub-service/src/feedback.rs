//! User-facing messages for operation results.

use serde::{Deserialize, Serialize};

use campushub_core::error::{AppError, ErrorKind};
use campushub_core::result::AppResult;

use crate::repository::UpsertOutcome;

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// The action succeeded.
    Success,
    /// Neutral information or a hint.
    Info,
    /// The action failed.
    Error,
}

/// A message to show after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Tone.
    pub level: NoticeLevel,
    /// Text.
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Notice for a failed operation.
    pub fn from_error(err: &AppError) -> Self {
        let message = match err.kind {
            ErrorKind::Internal | ErrorKind::Store | ErrorKind::Serialization => {
                "Something went wrong. Please try again.".to_string()
            }
            _ => err.message.clone(),
        };
        Self::error(message)
    }

    /// Notice for any result, with the text to show on success.
    pub fn from_result<T>(result: &AppResult<T>, success: &str) -> Self {
        match result {
            Ok(_) => Self::success(success),
            Err(e) => Self::from_error(e),
        }
    }

    /// Notice for an upsert.
    pub fn from_upsert(result: &AppResult<UpsertOutcome>, label: &str) -> Self {
        match result {
            Ok(UpsertOutcome::Created(_)) => Self::success(format!("{label} created.")),
            Ok(UpsertOutcome::Updated(_)) => Self::success(format!("{label} updated.")),
            Ok(UpsertOutcome::Rejected { missing }) => {
                Self::info(format!("Please fill in: {}.", missing.join(", ")))
            }
            Err(e) => Self::from_error(e),
        }
    }

    /// Whether this reports a failure.
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campushub_core::types::DocumentId;

    #[test]
    fn test_upsert_notices() {
        let created: AppResult<UpsertOutcome> = Ok(UpsertOutcome::Created(DocumentId::new("c1")));
        assert_eq!(Notice::from_upsert(&created, "Course"), Notice::success("Course created."));

        let rejected: AppResult<UpsertOutcome> = Ok(UpsertOutcome::Rejected {
            missing: vec!["title", "branch"],
        });
        assert_eq!(
            Notice::from_upsert(&rejected, "Course").message,
            "Please fill in: title, branch."
        );
    }

    #[test]
    fn test_store_errors_are_generic() {
        let failed: AppResult<()> = Err(AppError::store("disk full"));
        let notice = Notice::from_result(&failed, "Saved.");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Something went wrong. Please try again.");

        let denied: AppResult<()> = Err(AppError::authentication("Invalid email or password"));
        assert_eq!(Notice::from_result(&denied, "x").message, "Invalid email or password");
    }
}
