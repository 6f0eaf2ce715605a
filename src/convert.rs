//! Whole-file conversion entry points.
//!
//! These wrap the pipeline stages into the three operations the CLI (and
//! most library callers) need: convert to bytes, convert to a file, and
//! inspect a workbook without composing anything. Callers that need to hold
//! state across several exports — edit the column, re-export, change the
//! dimensions — use [`crate::session::Session`] instead.

use crate::config::StickerConfig;
use crate::error::StickerError;
use crate::output::{ExportOutput, ExportStats, WorkbookSummary};
use crate::pipeline::{compose, ingest};
use crate::record::{RecordSet, DEFAULT_COLUMN};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert a spreadsheet file to a sticker PDF, one page per record.
///
/// # Returns
/// `Ok(None)` when the sheet parses but holds zero data rows; an empty
/// record set never produces a document.
///
/// # Errors
/// Any failure is fatal to the whole export: unreadable input, unparseable
/// workbook, or a value the Code128 symbology cannot encode. No partial
/// document is ever returned.
pub fn convert(
    input: impl AsRef<Path>,
    config: &StickerConfig,
) -> Result<Option<ExportOutput>, StickerError> {
    let start = Instant::now();
    let input = input.as_ref();
    info!("converting {}", input.display());

    let sheet = ingest::ingest_path(input)?;
    export_records(&sheet.records, config, start)
}

/// Convert a spreadsheet held in memory. See [`convert`].
pub fn convert_bytes(
    bytes: &[u8],
    config: &StickerConfig,
) -> Result<Option<ExportOutput>, StickerError> {
    let start = Instant::now();
    let sheet = ingest::ingest_bytes(bytes)?;
    export_records(&sheet.records, config, start)
}

/// Convert a spreadsheet and write the PDF directly to `output_path`.
///
/// Uses an atomic write (temp file + rename) so a failed run never leaves a
/// truncated PDF behind. A zero-row sheet writes nothing and reports zero
/// pages.
pub fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &StickerConfig,
) -> Result<ExportStats, StickerError> {
    let path = output_path.as_ref();

    let Some(output) = convert(input, config)? else {
        warn!("no records ingested; {} not written", path.display());
        return Ok(ExportStats::default());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StickerError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let tmp_path = path.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, &output.pdf).map_err(|e| StickerError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| StickerError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(
        "wrote {} pages ({} bytes) to {}",
        output.stats.pages,
        output.stats.pdf_bytes,
        path.display()
    );
    Ok(output.stats)
}

/// Summarise a workbook's first sheet without composing anything.
pub fn inspect(input: impl AsRef<Path>) -> Result<WorkbookSummary, StickerError> {
    let sheet = ingest::ingest_path(input)?;
    let columns = sheet
        .records
        .first()
        .map(|record| record.columns().map(str::to_string).collect())
        .unwrap_or_default();

    Ok(WorkbookSummary {
        sheet: sheet.name,
        rows: sheet.records.len(),
        columns,
        default_column: sheet.records.default_column(),
    })
}

/// Pick the column to encode: explicit config override, else the record
/// set's default-column rule, else the literal default selector.
fn resolve_column(config: &StickerConfig, records: &RecordSet) -> String {
    config
        .column
        .clone()
        .or_else(|| records.default_column())
        .unwrap_or_else(|| DEFAULT_COLUMN.to_string())
}

fn export_records(
    records: &RecordSet,
    config: &StickerConfig,
    start: Instant,
) -> Result<Option<ExportOutput>, StickerError> {
    let column = resolve_column(config, records);

    let Some(document) = compose::compose_document(records, &column, config)? else {
        return Ok(None);
    };

    let pages = document.pages.len();
    let pdf = compose::document_bytes(document);
    let stats = ExportStats {
        pages,
        pdf_bytes: pdf.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "composed {} stickers against column '{}' in {}ms",
        pages, column, stats.duration_ms
    );

    Ok(Some(ExportOutput { pdf, column, stats }))
}
