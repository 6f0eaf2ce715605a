//! Ingestion: spreadsheet bytes → ordered [`RecordSet`].
//!
//! All structural parsing is delegated to calamine; this stage only maps its
//! "first sheet, rows under a header row" shape onto records. Cells are
//! coerced to text here, once, so everything downstream deals in strings:
//! a numeric cell `5` becomes `"5"`, a boolean `true` becomes `"true"`.
//! Empty and error-valued cells become absent columns rather than empty
//! strings, and rows with no populated cells at all are skipped — both
//! mirror how row objects come out of the original sheet-to-JSON mapping.

use crate::error::StickerError;
use crate::record::{Record, RecordSet};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// The first sheet of one ingested workbook.
#[derive(Debug, Clone)]
pub struct IngestedSheet {
    /// Sheet name, as reported by the workbook.
    pub name: String,
    /// All data rows, in source order.
    pub records: RecordSet,
}

/// Read a spreadsheet file from disk and ingest its first sheet.
pub fn ingest_path(path: impl AsRef<Path>) -> Result<IngestedSheet, StickerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StickerError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => StickerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => StickerError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    debug!("read {} bytes from {}", bytes.len(), path.display());
    ingest_bytes(&bytes)
}

/// Ingest the first sheet of a workbook held in memory.
///
/// Format detection (xlsx/xls/ods) is calamine's; any parse failure is a
/// hard [`StickerError::SheetParse`] with no partial result.
pub fn ingest_bytes(bytes: &[u8]) -> Result<IngestedSheet, StickerError> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| StickerError::SheetParse {
            detail: e.to_string(),
        })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| StickerError::SheetParse {
            detail: "workbook contains no sheets".to_string(),
        })?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| StickerError::SheetParse {
            detail: e.to_string(),
        })?;

    let records = records_from_range(&range);
    info!("ingested {} records from sheet '{}'", records.len(), name);

    Ok(IngestedSheet { name, records })
}

/// Convert a cell range into records: first row is the header, every later
/// row becomes one record keyed by it.
fn records_from_range(range: &Range<Data>) -> RecordSet {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return RecordSet::default();
    };
    let headers: Vec<Option<String>> = header_row.iter().map(cell_text).collect();

    let mut records = Vec::new();
    for row in rows {
        let mut record = Record::default();
        for (i, cell) in row.iter().enumerate() {
            // Columns with an empty header cell carry no usable name.
            let Some(Some(header)) = headers.get(i) else {
                continue;
            };
            if let Some(value) = cell_text(cell) {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    RecordSet::new(records)
}

/// Text coercion for one cell. `None` for cells that carry no value.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a calamine range from rows of cells, (0,0)-anchored.
    fn range_of(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height.saturating_sub(1), width.saturating_sub(1)));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn rows_become_records_keyed_by_header() {
        let range = range_of(vec![
            vec![s("sku"), s("code"), s("qty")],
            vec![s("S-1"), s("A1"), Data::Float(5.0)],
            vec![s("S-2"), s("A2"), Data::Int(12)],
        ]);

        let records = records_from_range(&range);
        assert_eq!(records.len(), 2);

        let first = records.first().expect("one record");
        assert_eq!(first.get("code"), Some("A1"));
        assert_eq!(first.get("qty"), Some("5"), "floats print without .0");
        assert_eq!(records.default_column().as_deref(), Some("code"));
    }

    #[test]
    fn column_order_follows_the_header_row() {
        let range = range_of(vec![
            vec![s("id"), s("name")],
            vec![s("7"), s("bolt")],
        ]);

        let records = records_from_range(&range);
        let columns: Vec<&str> = records.first().expect("record").columns().collect();
        assert_eq!(columns, vec!["id", "name"]);
        assert_eq!(records.default_column().as_deref(), Some("id"));
    }

    #[test]
    fn empty_cells_are_absent_columns() {
        let range = range_of(vec![
            vec![s("sku"), s("code")],
            vec![Data::Empty, s("A1")],
        ]);

        let record_set = records_from_range(&range);
        let record = record_set.first().expect("record");
        assert_eq!(record.get("sku"), None);
        assert_eq!(record.resolve("sku"), "A1", "fallback hits the first present column");
    }

    #[test]
    fn fully_empty_rows_are_skipped() {
        let range = range_of(vec![
            vec![s("code")],
            vec![s("A1")],
            vec![Data::Empty],
            vec![s("A2")],
        ]);

        let records = records_from_range(&range);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn header_only_sheet_yields_empty_set() {
        let range = range_of(vec![vec![s("code"), s("qty")]]);
        let records = records_from_range(&range);
        assert!(records.is_empty());
        assert_eq!(records.default_column(), None);
    }

    #[test]
    fn unnamed_columns_are_dropped() {
        let range = range_of(vec![
            vec![s("code"), Data::Empty],
            vec![s("A1"), s("stray")],
        ]);

        let record_set = records_from_range(&range);
        let record = record_set.first().expect("record");
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("code"), Some("A1"));
    }

    #[test]
    fn garbage_bytes_fail_hard() {
        let err = ingest_bytes(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, StickerError::SheetParse { .. }), "got: {err}");
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let err = ingest_path("/definitely/not/a/real/file.xlsx").unwrap_err();
        assert!(matches!(err, StickerError::FileNotFound { .. }), "got: {err}");
    }
}
