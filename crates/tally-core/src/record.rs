//! # Record
//!
//! One row of a table: an ordered mapping from column name to value.
//!
//! Column order matters. It is the order headers are written to a sheet
//! and the order keys appear in JSON, so a `HashMap` would not do.
//! Lookups are linear; rows here have a handful of columns.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An ordered column → value mapping.
///
/// ## Missing Columns
/// [`Record::get`] returns `""` for a column the record does not carry.
/// That mirrors how a blank spreadsheet cell reads back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record { cells: Vec::new() }
    }

    /// Creates a record with every column set to `""`.
    ///
    /// Used as the "empty record shape" when seeding a table.
    pub fn blank(columns: &[&str]) -> Self {
        columns.iter().map(|c| (*c, "")).collect()
    }

    /// Sets `column` to `value`, keeping the column's position if it exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();

        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Returns the value for `column`, or `""` if absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Returns true if the record carries `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.iter().any(|(c, _)| c == column)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    /// `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if every value is empty (or there are no columns).
    ///
    /// Blank rows are never returned from a table read.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// Serializes as a JSON object whose keys follow column order.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_empty() {
        let record = Record::new().with("email", "a@x.com");
        assert_eq!(record.get("email"), "a@x.com");
        assert_eq!(record.get("phone"), "");
        assert!(!record.contains("phone"));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut record = Record::new().with("name", "Ann").with("email", "a@x.com");
        record.insert("name", "Anna");

        let columns: Vec<_> = record.columns().collect();
        assert_eq!(columns, vec!["name", "email"]);
        assert_eq!(record.get("name"), "Anna");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_blank_shape() {
        let record = Record::blank(&["username", "email", "password"]);
        assert_eq!(record.len(), 3);
        assert!(record.is_blank());
        assert!(!record.with("email", "x").is_blank());
    }

    #[test]
    fn test_serializes_in_column_order() {
        let record = Record::new()
            .with("zeta", "1")
            .with("alpha", "2")
            .with("mid", "");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2","mid":""}"#);
    }
}
