//! The operator event boundary: upload, edit, export.
//!
//! A [`Session`] owns the three pieces of mutable state the interactive
//! surface exposes — the current record set, the barcode column name, and
//! the sticker dimensions — and is the only place in the crate where they
//! are mutated. The pipeline stages themselves stay pure functions of the
//! state passed in.
//!
//! State rules:
//! * a successful load replaces the record set wholesale and reruns the
//!   default-column rule; a failed load changes nothing;
//! * the column name is free text, never validated against the records —
//!   unknown names fall back at render time;
//! * exports read the state at call time; nothing mutates during an export.

use crate::config::{StickerConfig, DEFAULT_HEIGHT_MM, DEFAULT_WIDTH_MM};
use crate::error::StickerError;
use crate::pipeline::{compose, ingest};
use crate::record::{RecordSet, DEFAULT_COLUMN};
use std::path::Path;
use tracing::{debug, info};

/// Interactive state for repeated load/edit/export cycles.
#[derive(Debug, Clone)]
pub struct Session {
    records: RecordSet,
    column: String,
    width_mm: f32,
    height_mm: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session: no records, default column and dimensions.
    pub fn new() -> Self {
        Self {
            records: RecordSet::default(),
            column: DEFAULT_COLUMN.to_string(),
            width_mm: DEFAULT_WIDTH_MM,
            height_mm: DEFAULT_HEIGHT_MM,
        }
    }

    /// Load a spreadsheet file, replacing any previously loaded records.
    ///
    /// Returns the number of records ingested. On error the session keeps
    /// its previous records and column selection untouched.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize, StickerError> {
        let sheet = ingest::ingest_path(path)?;
        Ok(self.install(sheet.records))
    }

    /// Load a spreadsheet held in memory. See [`Session::load_path`].
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, StickerError> {
        let sheet = ingest::ingest_bytes(bytes)?;
        Ok(self.install(sheet.records))
    }

    fn install(&mut self, records: RecordSet) -> usize {
        if let Some(column) = records.default_column() {
            debug!("auto-selected column '{}'", column);
            self.column = column;
        }
        self.records = records;
        self.records.len()
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// The current barcode column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Set the barcode column. Accepts any text; resolution against the
    /// records happens per sticker at export time.
    pub fn set_column(&mut self, column: impl Into<String>) {
        self.column = column.into();
    }

    pub fn dimensions_mm(&self) -> (f32, f32) {
        (self.width_mm, self.height_mm)
    }

    pub fn set_dimensions_mm(&mut self, width_mm: f32, height_mm: f32) {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
    }

    /// Export the current records as a sticker PDF.
    ///
    /// `Ok(None)` when no records are loaded. Dimension validation happens
    /// here, at the export boundary, since the setters are unvalidated
    /// free-form fields just like the column name.
    pub fn export(&self) -> Result<Option<Vec<u8>>, StickerError> {
        let config = StickerConfig::builder()
            .width_mm(self.width_mm)
            .height_mm(self.height_mm)
            .build()?;

        let Some(document) = compose::compose_document(&self.records, &self.column, &config)?
        else {
            return Ok(None);
        };

        let bytes = compose::document_bytes(document);
        info!(
            "exported {} stickers ({} bytes) against column '{}'",
            self.records.len(),
            bytes.len(),
            self.column
        );
        Ok(Some(bytes))
    }
}
