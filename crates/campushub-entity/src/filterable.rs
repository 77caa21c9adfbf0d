//! Accessors the client-side filter reads from a record.

/// Text and tag fields a list can be filtered on.
pub trait Filterable {
    /// Title, matched by the free-text query.
    fn title(&self) -> &str;

    /// Description, matched by the free-text query. `None` counts as empty.
    fn description(&self) -> Option<&str>;

    /// Branch or tag value.
    fn branch(&self) -> Option<&str> {
        None
    }

    /// Category value.
    fn category(&self) -> Option<&str> {
        None
    }
}
