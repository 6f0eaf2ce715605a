//! Error types for the xlsx2stickers library.
//!
//! Every error here is fatal to the action that triggered it: a failed
//! ingest leaves the previous record set in place, and a failed export
//! produces no document at all. There is no per-sticker error isolation —
//! one unencodable cell aborts the whole export, so the operator never
//! receives a document with silently missing pages.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the xlsx2stickers library.
#[derive(Debug, Error)]
pub enum StickerError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Spreadsheet not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The bytes could not be parsed as a spreadsheet, or the workbook has
    /// no sheet to read. The previously ingested record set is untouched.
    #[error("Failed to read spreadsheet: {detail}\nSupported formats: .xlsx, .xls, .ods")]
    SheetParse { detail: String },

    // ── Encoding errors ───────────────────────────────────────────────────
    /// A resolved cell value cannot be represented as a Code128 symbol.
    /// No sanitisation or substitution is attempted; the export is aborted.
    #[error("Value '{value}' cannot be encoded as Code128: {detail}")]
    Unencodable { value: String, detail: String },

    // ── Compose errors ────────────────────────────────────────────────────
    /// Sticker dimensions are zero, negative, or non-finite.
    #[error(
        "Invalid sticker dimensions {width_mm}×{height_mm} mm\n\
         Width and height must both be positive, finite millimetre values."
    )]
    InvalidDimensions { width_mm: f32, height_mm: f32 },

    /// A rendered glyph PNG could not be embedded as a PDF image XObject.
    #[error("Failed to embed barcode glyph into the PDF: {detail}")]
    GlyphEmbed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
