// ============================================================
// DATASET SESSION
// ============================================================
// Single-slot store for the currently loaded dataset

use crate::domain::dataset::Dataset;
use crate::domain::error::{AppError, Result};

/// Holds at most one loaded dataset.
///
/// Importing replaces the previous dataset unconditionally; every read
/// operation degrades to a typed "no dataset loaded" error instead of
/// panicking. The session is owned by the application state and injected
/// where needed, never reached through a global.
#[derive(Debug, Default)]
pub struct DatasetSession {
    current: Option<Dataset>,
}

impl DatasetSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded dataset, returning the new dataset id
    pub fn replace(&mut self, dataset: Dataset) -> String {
        let id = dataset.id.clone();
        if let Some(previous) = &self.current {
            tracing::info!(
                replaced = %previous.id,
                loaded = %id,
                "Replacing loaded dataset"
            );
        }
        self.current = Some(dataset);
        id
    }

    pub fn current(&self) -> Option<&Dataset> {
        self.current.as_ref()
    }

    /// Current dataset or the precondition error every analysis shares
    pub fn require_current(&self) -> Result<&Dataset> {
        self.current.as_ref().ok_or_else(|| {
            AppError::NotFound("No dataset loaded. Import a dataset first.".to_string())
        })
    }

    /// Clear the slot; returns whether a dataset was held
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dataset(name: &str) -> Dataset {
        Dataset::new(name.to_string(), Vec::new(), Vec::new(), HashMap::new())
    }

    #[test]
    fn test_starts_empty() {
        let session = DatasetSession::new();
        assert!(session.current().is_none());
        assert!(session.require_current().is_err());
    }

    #[test]
    fn test_replace_is_unconditional() {
        let mut session = DatasetSession::new();
        let first = session.replace(dataset("first.csv"));
        let second = session.replace(dataset("second.csv"));

        assert_ne!(first, second);
        assert_eq!(
            session.current().map(|d| d.source_name.as_str()),
            Some("second.csv")
        );
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let mut session = DatasetSession::new();
        session.replace(dataset("data.csv"));

        assert!(session.clear());
        assert!(!session.clear());
        assert!(session.current().is_none());
    }
}
