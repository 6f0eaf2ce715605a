//! Pipeline stages for spreadsheet-to-sticker conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and keeps all state
//! explicit: every stage is a pure function of its inputs.
//!
//! ## Data Flow
//!
//! ```text
//! ingest ──▶ resolve ──▶ barcode ──▶ compose
//! (calamine)  (record)   (Code128)   (printpdf)
//! ```
//!
//! 1. [`ingest`]  — read the workbook's first sheet into an ordered record set
//! 2. [`barcode`] — encode one resolved value as a Code128 glyph raster
//! 3. [`compose`] — lay out one fixed-size page per record and assemble the PDF
//!
//! Value resolution (named column → first column → empty) lives on
//! [`crate::record::Record::resolve`], between stages 1 and 2.

pub mod barcode;
pub mod compose;
pub mod ingest;
