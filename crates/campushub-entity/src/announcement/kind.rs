//! Announcement type tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use campushub_core::AppError;

/// Visual type of an announcement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    /// General information.
    Info,
    /// A content update.
    #[default]
    Update,
    /// Something that needs attention.
    Alert,
}

impl AnnouncementKind {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Update => "update",
            Self::Alert => "alert",
        }
    }
}

impl fmt::Display for AnnouncementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnouncementKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "update" => Ok(Self::Update),
            "alert" => Ok(Self::Alert),
            other => Err(AppError::validation(format!(
                "Unknown announcement type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("ALERT".parse::<AnnouncementKind>().unwrap(), AnnouncementKind::Alert);
        assert!("urgent".parse::<AnnouncementKind>().is_err());
        assert_eq!(AnnouncementKind::default(), AnnouncementKind::Update);
    }
}
