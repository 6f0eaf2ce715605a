//! Result types returned by the conversion entry points.

use serde::Serialize;

/// A finished export: the serialized PDF plus run statistics.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// The assembled PDF document.
    pub pdf: Vec<u8>,
    /// Column name the barcodes were resolved against.
    pub column: String,
    /// Run statistics.
    pub stats: ExportStats,
}

/// Statistics for one export run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportStats {
    /// Sticker pages in the output document (one per record).
    pub pages: usize,
    /// Size of the serialized PDF in bytes. Zero when no document was produced.
    pub pdf_bytes: usize,
    /// Wall-clock duration of ingest + compose + serialize.
    pub duration_ms: u64,
}

/// First-sheet metadata, extracted without any PDF work.
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookSummary {
    /// Name of the first sheet in the workbook.
    pub sheet: String,
    /// Number of data rows (records) below the header row.
    pub rows: usize,
    /// Column names of the first record, in discovery order.
    pub columns: Vec<String>,
    /// Column the default-column rule would select, if any.
    pub default_column: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workbook_summary_serialises_to_json() {
        let summary = WorkbookSummary {
            sheet: "Sheet1".into(),
            rows: 3,
            columns: vec!["sku".into(), "code".into()],
            default_column: Some("code".into()),
        };
        let json = serde_json::to_string(&summary).expect("must serialise");
        assert!(json.contains("\"sheet\":\"Sheet1\""));
        assert!(json.contains("\"default_column\":\"code\""));
    }
}
