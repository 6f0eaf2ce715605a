//! # xlsx2stickers
//!
//! Generate printable barcode-sticker PDFs from spreadsheet data.
//!
//! ## Why this crate?
//!
//! Warehouse and inventory teams keep their codes in spreadsheets and print
//! them on fixed-size sticker rolls. This crate turns the first sheet of a
//! workbook into a PDF with exactly one page per row, each page sized to the
//! physical sticker and carrying a scannable Code128 glyph plus a
//! human-readable label — ready to feed a label printer.
//!
//! ## Pipeline Overview
//!
//! ```text
//! spreadsheet (.xlsx / .xls / .ods)
//!  │
//!  ├─ 1. Ingest   first sheet → ordered records keyed by the header row
//!  ├─ 2. Resolve  per record: selected column, else first column, else ""
//!  ├─ 3. Barcode  Code128 module pattern → 40 px glyph raster
//!  └─ 4. Compose  one w×h mm page per record → stickers.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xlsx2stickers::{convert_to_file, StickerConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 45 × 80 mm stickers, barcode column auto-selected
//!     // ("code" if present, else the first column).
//!     let config = StickerConfig::default();
//!     let stats = convert_to_file("inventory.xlsx", "stickers.pdf", &config)?;
//!     println!("{} stickers written", stats.pages);
//!     Ok(())
//! }
//! ```
//!
//! Interactive callers that load once and export repeatedly with edited
//! settings use [`Session`] instead of the one-shot [`convert`] functions.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `xlsx2stickers` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! xlsx2stickers = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{StickerConfig, StickerConfigBuilder, DEFAULT_HEIGHT_MM, DEFAULT_WIDTH_MM};
pub use convert::{convert, convert_bytes, convert_to_file, inspect};
pub use error::StickerError;
pub use output::{ExportOutput, ExportStats, WorkbookSummary};
pub use record::{Record, RecordSet, DEFAULT_COLUMN};
pub use session::Session;
