//! Result of an upsert.

use campushub_core::types::DocumentId;

/// What an upsert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new document was created.
    Created(DocumentId),
    /// An existing document was overwritten.
    Updated(DocumentId),
    /// Required fields were blank; nothing was written.
    Rejected {
        /// Names of the blank required fields.
        missing: Vec<&'static str>,
    },
}

impl UpsertOutcome {
    /// Whether a document was written.
    pub fn is_written(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }

    /// Id of the written document.
    pub fn id(&self) -> Option<&DocumentId> {
        match self {
            Self::Created(id) | Self::Updated(id) => Some(id),
            Self::Rejected { .. } => None,
        }
    }
}
