//! Barcode rendering: resolved text → Code128 glyph raster.
//!
//! Symbol encoding (start/stop patterns, checksum, bar widths) is delegated
//! to barcoders; this stage rasterises the returned module pattern into a
//! grayscale image and PNG-encodes it for embedding. The glyph carries no
//! printed text — the human-readable label is drawn separately by the
//! composer.

use crate::error::StickerError;
use barcoders::sym::code128::Code128;
use image::{DynamicImage, GrayImage, Luma};
use std::io::Cursor;
use tracing::debug;

/// Fixed glyph height in device pixels.
pub const GLYPH_HEIGHT_PX: u32 = 40;

/// Horizontal pixels per barcode module; glyph width scales with the
/// symbol count of the encoded value.
pub const MODULE_WIDTH_PX: u32 = 2;

/// Code128 character-set selector prepended to every value. Character set B
/// covers the full printable-ASCII range, which is what spreadsheet codes
/// are in practice; anything outside it fails encoding.
const CHARSET_B: char = '\u{0181}';

/// Encode `value` as a Code128 glyph.
///
/// Unencodable values (non-ASCII, control characters) are a hard
/// [`StickerError::Unencodable`]; no sanitisation is attempted.
pub fn render_glyph(value: &str) -> Result<GrayImage, StickerError> {
    let symbol =
        Code128::new(format!("{CHARSET_B}{value}")).map_err(|e| StickerError::Unencodable {
            value: value.to_string(),
            detail: e.to_string(),
        })?;

    let pattern = symbol.encode();
    debug!("encoded '{}' as {} modules", value, pattern.len());
    Ok(rasterize(&pattern))
}

/// PNG-encode a glyph for embedding as a PDF image XObject.
pub fn glyph_png(glyph: &GrayImage) -> Result<Vec<u8>, StickerError> {
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(glyph.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| StickerError::GlyphEmbed {
            detail: e.to_string(),
        })?;
    Ok(buf)
}

/// Paint a module pattern (1 = bar, 0 = space) onto a white canvas.
fn rasterize(pattern: &[u8]) -> GrayImage {
    let width = (pattern.len() as u32).max(1) * MODULE_WIDTH_PX;
    let mut img = GrayImage::from_pixel(width, GLYPH_HEIGHT_PX, Luma([255u8]));

    for (i, module) in pattern.iter().enumerate() {
        if *module != 1 {
            continue;
        }
        for dx in 0..MODULE_WIDTH_PX {
            let x = i as u32 * MODULE_WIDTH_PX + dx;
            for y in 0..GLYPH_HEIGHT_PX {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    img
}
