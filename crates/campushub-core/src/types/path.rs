//! Collection paths, including sub-collections scoped under a parent document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::id::DocumentId;

/// Path of a collection: `courses`, or `courses/{courseId}/lessons`.
///
/// Always an odd number of non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// A sub-collection under `parent` in this collection.
    ///
    /// Fails when the parent id or the name is blank or contains `/`,
    /// since such a path could not be parsed back.
    pub fn child(&self, parent: &DocumentId, name: impl Into<String>) -> Result<Self, AppError> {
        let name = name.into();
        check_segment(parent.as_str(), "document id")?;
        check_segment(&name, "collection name")?;
        let mut segments = self.segments.clone();
        segments.push(parent.as_str().to_string());
        segments.push(name);
        Ok(Self { segments })
    }

    /// Parse a slash-separated path.
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let segments: Vec<String> = path.split('/').map(str::to_string).collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "Invalid collection path '{path}': empty segment"
            )));
        }
        if segments.len() % 2 == 0 {
            return Err(AppError::validation(format!(
                "Invalid collection path '{path}': points at a document, not a collection"
            )));
        }
        Ok(Self { segments })
    }

    /// The collection's own name (last segment).
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The parent collection and document id, for sub-collections.
    pub fn parent(&self) -> Option<(CollectionPath, DocumentId)> {
        if self.segments.len() < 3 {
            return None;
        }
        let n = self.segments.len();
        let parent = Self {
            segments: self.segments[..n - 2].to_vec(),
        };
        Some((parent, DocumentId::new(self.segments[n - 2].clone())))
    }

    /// Whether this path is nested under the given document.
    pub fn is_under(&self, collection: &CollectionPath, id: &DocumentId) -> bool {
        let prefix_len = collection.segments.len();
        self.segments.len() > prefix_len + 1
            && self.segments[..prefix_len] == collection.segments[..]
            && self.segments[prefix_len] == id.as_str()
    }

    /// Slash-joined representation.
    pub fn as_string(&self) -> String {
        self.segments.join("/")
    }
}

fn check_segment(segment: &str, what: &str) -> Result<(), AppError> {
    if segment.trim().is_empty() {
        return Err(AppError::validation(format!("A {what} is required")));
    }
    if segment.contains('/') {
        return Err(AppError::validation(format!(
            "Invalid {what} '{segment}': must not contain '/'"
        )));
    }
    Ok(())
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl TryFrom<String> for CollectionPath {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CollectionPath> for String {
    fn from(path: CollectionPath) -> Self {
        path.as_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_path() {
        let courses = CollectionPath::root("courses");
        let lessons = courses.child(&DocumentId::new("c1"), "lessons").unwrap();
        assert_eq!(lessons.to_string(), "courses/c1/lessons");
        assert_eq!(lessons.name(), "lessons");
        let (parent, id) = lessons.parent().unwrap();
        assert_eq!(parent, courses);
        assert_eq!(id.as_str(), "c1");
        assert!(lessons.is_under(&courses, &DocumentId::new("c1")));
        assert!(!lessons.is_under(&courses, &DocumentId::new("c2")));
    }

    #[test]
    fn test_parse_rejects_document_paths() {
        assert!(CollectionPath::parse("courses/c1").is_err());
        assert!(CollectionPath::parse("courses//lessons").is_err());
        assert!(CollectionPath::parse("courses/c1/lessons").is_ok());
    }

    #[test]
    fn test_child_rejects_unparseable_ids() {
        let courses = CollectionPath::root("courses");
        for id in ["", "  ", "a/b"] {
            let err = courses.child(&DocumentId::new(id), "lessons").unwrap_err();
            assert_eq!(err.kind, crate::error::ErrorKind::Validation, "{id:?}");
        }
        assert!(courses.child(&DocumentId::new("c1"), "").is_err());
        let ok = courses.child(&DocumentId::new("c1"), "lessons").unwrap();
        assert_eq!(CollectionPath::parse(&ok.to_string()).unwrap(), ok);
    }
}
