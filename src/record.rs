//! Parsed spreadsheet rows and the column-resolution rules.
//!
//! A [`Record`] is one row keyed by the sheet's header row, with column
//! order preserved as discovered — the fallback rules below depend on that
//! order, so a plain `HashMap` would not do. All cell values are coerced to
//! text at ingest time; barcodes and labels only ever see strings.

use indexmap::IndexMap;
use serde::Serialize;

/// The column name preferred by the default-column rule and used as the
/// initial selector before any sheet is loaded.
pub const DEFAULT_COLUMN: &str = "code";

/// One parsed row: an ordered mapping from column name to cell text.
///
/// Insertion order is the header-row order of the source sheet. Cells that
/// were empty (or error-valued) in the sheet are absent keys, not empty
/// strings — the distinction matters for [`Record::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record(IndexMap<String, String>);

impl Record {
    /// Build a record from `(column, value)` pairs, preserving their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Value of the named column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Value at the first column position, if the record has any columns.
    pub fn first_value(&self) -> Option<&str> {
        self.0.values().next().map(String::as_str)
    }

    /// Column names in discovery order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the value to encode for this record.
    ///
    /// Three explicit branches, in order:
    /// 1. the named column, if this record has it;
    /// 2. otherwise the value at the record's first column position;
    /// 3. otherwise (record has no columns at all) the empty string.
    pub fn resolve(&self, column: &str) -> &str {
        self.get(column).or_else(|| self.first_value()).unwrap_or("")
    }
}

/// The full ordered collection of records from one ingested sheet.
///
/// Replaced wholesale on every successful ingest; never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// The auto-selected barcode column for this record set.
    ///
    /// Inspects only the first record: a column literally named
    /// [`DEFAULT_COLUMN`] wins; otherwise the first column in discovery
    /// order. An empty set yields `None` so callers leave their current
    /// selector untouched.
    pub fn default_column(&self) -> Option<String> {
        let first = self.records.first()?;
        if first.contains_column(DEFAULT_COLUMN) {
            return Some(DEFAULT_COLUMN.to_string());
        }
        first.columns().next().map(str::to_string)
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
