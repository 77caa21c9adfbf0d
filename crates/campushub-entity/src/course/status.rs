//! Course publication status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a course is visible to students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// Work in progress.
    Draft,
    /// Visible in listings.
    #[default]
    Published,
}

impl CourseStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = campushub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(campushub_core::AppError::validation(format!(
                "Invalid course status: '{s}'. Expected one of: draft, published"
            ))),
        }
    }
}
