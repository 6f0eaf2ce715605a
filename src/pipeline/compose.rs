//! Document composition: record set → one fixed-size PDF page per record.
//!
//! Page geometry is specified in top-left millimetre coordinates and
//! converted to PDF's bottom-left point space here, in one place. Each page
//! carries three elements:
//!
//! ```text
//! ┌──────────────────────┐  border, 2 mm inset on every edge
//! │  ▐█▌▐▌█▐██▌▐▌█▌      │  glyph at (5, 10), (w-10) × 30 mm
//! │                      │  (stretched to fit; aspect distortion accepted)
//! │         A1           │  label, Helvetica 10 pt, centred at x = w/2,
//! └──────────────────────┘  baseline at y = h-10
//! ```
//!
//! There is no per-page error isolation: the first record that fails to
//! encode aborts the export and already-composed pages are discarded.

use crate::config::StickerConfig;
use crate::error::StickerError;
use crate::pipeline::barcode;
use crate::record::RecordSet;
use printpdf::graphics::{Line, LinePoint, Point};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, XObjectId};
use tracing::debug;

/// Border inset from every page edge, in millimetres.
const BORDER_INSET_MM: f32 = 2.0;
/// Border stroke width.
const BORDER_WIDTH_MM: f32 = 0.2;
/// Glyph offset from the page's left edge.
const GLYPH_X_MM: f32 = 5.0;
/// Glyph offset from the page's top edge.
const GLYPH_Y_MM: f32 = 10.0;
/// Height the glyph is stretched to on the page.
const GLYPH_HEIGHT_MM: f32 = 30.0;
/// Label font size.
const LABEL_SIZE_PT: f32 = 10.0;
/// Label baseline distance from the page's bottom edge (y = h-10 top-down).
const LABEL_BASELINE_MM: f32 = 10.0;

/// Compose one sticker page per record.
///
/// Returns `Ok(None)` for an empty record set — export is a no-op, no
/// document is produced. Pages are emitted strictly in record order and all
/// share the dimensions read from `config` at entry.
pub fn compose_document(
    records: &RecordSet,
    column: &str,
    config: &StickerConfig,
) -> Result<Option<PdfDocument>, StickerError> {
    config.validate()?;

    if records.is_empty() {
        debug!("record set is empty; composing nothing");
        return Ok(None);
    }

    let (w, h) = (config.width_mm, config.height_mm);
    let mut document = PdfDocument::new("stickers");

    for (i, record) in records.iter().enumerate() {
        let text = record.resolve(column);
        let glyph = barcode::render_glyph(text)?;
        let png = barcode::glyph_png(&glyph)?;

        let mut warnings = Vec::new();
        let raw = RawImage::decode_from_bytes(&png, &mut warnings).map_err(|e| {
            StickerError::GlyphEmbed {
                detail: e.to_string(),
            }
        })?;
        let glyph_px = (raw.width as f32, raw.height as f32);

        let glyph_id = XObjectId::new();
        document
            .resources
            .xobjects
            .map
            .insert(glyph_id.clone(), XObject::Image(raw));

        let ops = sticker_ops(glyph_id, glyph_px, text, w, h);
        document.pages.push(PdfPage::new(Mm(w), Mm(h), ops));
        debug!("composed sticker {}/{} ('{}')", i + 1, records.len(), text);
    }

    Ok(Some(document))
}

/// Serialize a composed document.
pub fn document_bytes(mut document: PdfDocument) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut warnings = Vec::new();
    document.save_writer(&mut bytes, &PdfSaveOptions::default(), &mut warnings);
    bytes
}

/// Draw operations for one sticker page of `w × h` millimetres.
fn sticker_ops(glyph_id: XObjectId, glyph_px: (f32, f32), text: &str, w: f32, h: f32) -> Vec<Op> {
    let mut ops = Vec::with_capacity(8);

    // Border rectangle. The inset is symmetric, so the top-left-space rect
    // [2,2]-[w-2,h-2] has the same corners in bottom-left space.
    let (x0, y0) = (Mm(BORDER_INSET_MM).into_pt(), Mm(BORDER_INSET_MM).into_pt());
    let (x1, y1) = (
        Mm(w - BORDER_INSET_MM).into_pt(),
        Mm(h - BORDER_INSET_MM).into_pt(),
    );
    ops.push(Op::SetOutlineThickness {
        pt: Mm(BORDER_WIDTH_MM).into_pt(),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                corner(x0, y0),
                corner(x1, y0),
                corner(x1, y1),
                corner(x0, y1),
            ],
            is_closed: true,
        },
    });

    // Glyph, stretched to (w-10) × 30 mm at (5, 10) from the top-left.
    let target_w_pt = Mm(w - 2.0 * GLYPH_X_MM).into_pt().0;
    let target_h_pt = Mm(GLYPH_HEIGHT_MM).into_pt().0;
    ops.push(Op::UseXobject {
        id: glyph_id,
        transform: XObjectTransform {
            translate_x: Some(Mm(GLYPH_X_MM).into_pt()),
            translate_y: Some(Mm(h - GLYPH_Y_MM - GLYPH_HEIGHT_MM).into_pt()),
            scale_x: Some(target_w_pt / glyph_px.0),
            scale_y: Some(target_h_pt / glyph_px.1),
            rotate: None,
            dpi: Some(72.0),
        },
    });

    // Label, centred on the page midline.
    let x = Mm(w / 2.0).into_pt().0 - label_width_pt(text) / 2.0;
    ops.push(Op::StartTextSection);
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(LABEL_SIZE_PT),
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::SetTextMatrix {
        matrix: TextMatrix::Translate(Pt(x), Mm(LABEL_BASELINE_MM).into_pt()),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);

    ops
}

fn corner(x: Pt, y: Pt) -> LinePoint {
    LinePoint {
        p: Point { x, y },
        bezier: false,
    }
}

/// Approximate label width. Builtin PDF fonts ship no glyph metrics through
/// printpdf, so centring uses the average Helvetica advance — accurate to
/// about half a character for the short alphanumeric codes stickers carry.
fn label_width_pt(text: &str) -> f32 {
    const AVG_ADVANCE_EM: f32 = 0.55;
    text.chars().count() as f32 * LABEL_SIZE_PT * AVG_ADVANCE_EM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn records(values: &[&str]) -> RecordSet {
        RecordSet::new(
            values
                .iter()
                .map(|v| Record::from_pairs([("code", *v)]))
                .collect(),
        )
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    /// Extract the label texts written on each page, in page order.
    fn page_labels(document: &PdfDocument) -> Vec<String> {
        document
            .pages
            .iter()
            .flat_map(|page| &page.ops)
            .filter_map(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => match items.first() {
                    Some(TextItem::Text(s)) => Some(s.clone()),
                    _ => None,
                },
                _ => None,
            })
            .collect()
    }

    #[test]
    fn page_count_equals_record_count() {
        let set = records(&["A1", "A2", "A3"]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("non-empty set produces a document");
        assert_eq!(document.pages.len(), 3);
    }

    #[test]
    fn empty_record_set_is_a_noop() {
        let result = compose_document(&RecordSet::default(), "code", &StickerConfig::default())
            .expect("compose succeeds");
        assert!(result.is_none(), "no document for an empty record set");
    }

    #[test]
    fn pages_carry_the_resolved_texts_in_order() {
        let set = records(&["A1", "A2", "A3"]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("document");
        assert_eq!(page_labels(&document), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn missing_column_falls_back_to_first_value() {
        let set = RecordSet::new(vec![Record::from_pairs([("sku", "X1"), ("qty", "5")])]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("document");
        assert_eq!(page_labels(&document), vec!["X1"]);
    }

    #[test]
    fn glyph_is_placed_at_5_10_and_sized_to_35_by_30_on_default_pages() {
        let set = records(&["A1"]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("document");

        let page = &document.pages[0];
        let transform = page
            .ops
            .iter()
            .find_map(|op| match op {
                Op::UseXobject { transform, .. } => Some(transform),
                _ => None,
            })
            .expect("page must place one glyph");

        let tx = transform.translate_x.expect("x offset").0;
        let ty = transform.translate_y.expect("y offset").0;
        assert!(approx(tx, Mm(5.0).into_pt().0), "x = 5mm, got {tx}pt");
        // 10mm from the top of an 80mm page, 30mm tall → 40mm from the bottom.
        assert!(approx(ty, Mm(40.0).into_pt().0), "y = 40mm, got {ty}pt");

        // Scale factors recover the 35 × 30 mm target from the glyph raster.
        let glyph = barcode::render_glyph("A1").expect("encodes");
        let sx = transform.scale_x.expect("x scale");
        let sy = transform.scale_y.expect("y scale");
        assert!(approx(sx * glyph.width() as f32, Mm(35.0).into_pt().0));
        assert!(approx(sy * glyph.height() as f32, Mm(30.0).into_pt().0));
    }

    #[test]
    fn border_is_inset_2mm_from_every_edge() {
        let set = records(&["A1"]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("document");

        let line = document.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                Op::DrawLine { line } => Some(line),
                _ => None,
            })
            .expect("page must draw a border");

        assert!(line.is_closed);
        assert_eq!(line.points.len(), 4);
        let xs: Vec<f32> = line.points.iter().map(|p| p.p.x.0).collect();
        let ys: Vec<f32> = line.points.iter().map(|p| p.p.y.0).collect();
        // Default page is 45 × 80 mm → border corners [2,2]-[43,78].
        assert!(approx(xs.iter().cloned().fold(f32::MAX, f32::min), Mm(2.0).into_pt().0));
        assert!(approx(xs.iter().cloned().fold(f32::MIN, f32::max), Mm(43.0).into_pt().0));
        assert!(approx(ys.iter().cloned().fold(f32::MAX, f32::min), Mm(2.0).into_pt().0));
        assert!(approx(ys.iter().cloned().fold(f32::MIN, f32::max), Mm(78.0).into_pt().0));
    }

    #[test]
    fn unencodable_record_aborts_the_whole_export() {
        let set = records(&["A1", "bäd", "A3"]);
        let err = compose_document(&set, "code", &StickerConfig::default()).unwrap_err();
        assert!(matches!(err, StickerError::Unencodable { .. }), "got: {err}");
    }

    #[test]
    fn degenerate_dimensions_are_rejected_at_export() {
        // Fields are public; a caller may have bypassed the builder.
        let config = StickerConfig {
            width_mm: 0.0,
            height_mm: 80.0,
            column: None,
        };
        let err = compose_document(&records(&["A1"]), "code", &config).unwrap_err();
        assert!(matches!(err, StickerError::InvalidDimensions { .. }));
    }

    #[test]
    fn recompose_is_observably_identical() {
        let set = records(&["A1", "A2"]);
        let config = StickerConfig::default();
        let first = compose_document(&set, "code", &config)
            .expect("compose succeeds")
            .expect("document");
        let second = compose_document(&set, "code", &config)
            .expect("compose succeeds")
            .expect("document");
        assert_eq!(first.pages.len(), second.pages.len());
        assert_eq!(page_labels(&first), page_labels(&second));
    }

    #[test]
    fn serialized_document_is_a_pdf() {
        let set = records(&["A1"]);
        let document = compose_document(&set, "code", &StickerConfig::default())
            .expect("compose succeeds")
            .expect("document");
        let bytes = document_bytes(document);
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF stream");
    }
}
