//! Page-level view states.

use campushub_realtime::DocState;

/// What a page bound to one record shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Waiting for the first answer.
    Loading,
    /// The record.
    Ready(T),
    /// No record ("no data yet").
    NotFound,
}

impl<T> ViewState<T> {
    /// Build from a lookup result.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Ready(v),
            None => Self::NotFound,
        }
    }

    /// The record, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the page is still loading.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> From<DocState<T>> for ViewState<T> {
    fn from(state: DocState<T>) -> Self {
        match state {
            DocState::Loading => Self::Loading,
            DocState::Found(v) => Self::Ready(v),
            DocState::Missing => Self::NotFound,
        }
    }
}
