//! Result set model
//!
//! A [`ResultSet`] maps generated identifiers to [`ErrorRecord`]s for one
//! (project, file) pair. Insertion order is the display order, so it is kept
//! through serialization: the JSON form is an object whose keys appear in
//! that order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ErrorRecord;

/// Ordered mapping from identifier to error record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: IndexMap<String, ErrorRecord>,
}

impl ResultSet {
    /// Create an empty result set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record already stored under `id`
    ///
    /// A replaced record keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, record: ErrorRecord) {
        self.entries.insert(id.into(), record);
    }

    /// Look up a record by identifier
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ErrorRecord> {
        self.entries.get(id)
    }

    /// Whether an identifier is present
    #[must_use]
    pub fn contains_key(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Remove one record by identifier
    pub fn remove(&mut self, id: &str) -> Option<ErrorRecord> {
        self.entries.shift_remove(id)
    }

    /// Remove every record of an error type, returning how many were removed
    pub fn remove_by_type(&mut self, error_type: &str) -> usize {
        self.remove_where(|r| r.error_type == error_type)
    }

    /// Remove every record matching an error type and token
    pub fn remove_by_type_and_token(&mut self, error_type: &str, token: &str) -> usize {
        self.remove_where(|r| r.error_type == error_type && r.error_token == token)
    }

    /// Remove every record matching an error category and token
    pub fn remove_by_category_and_token(&mut self, category: &str, token: &str) -> usize {
        self.remove_where(|r| r.error_category == category && r.error_token == token)
    }

    fn remove_where(&mut self, predicate: impl Fn(&ErrorRecord) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, record| !predicate(record));
        before - self.entries.len()
    }

    /// Iterate over `(id, record)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorRecord)> {
        self.entries.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Iterate over identifiers in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ErrorRecord)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (String, ErrorRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
