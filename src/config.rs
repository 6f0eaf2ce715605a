//! Configuration for a sticker export.
//!
//! One knob set shared by the library entry points, the [`crate::session`]
//! event boundary, and the CLI. Built via [`StickerConfig::builder()`] or
//! [`StickerConfig::default()`].
//!
//! Dimensions must be positive and finite; the builder and the export path
//! both enforce this. Degenerate-but-positive sizes (a 1×1 mm sticker) are
//! permitted — clipping is the printer's concern, not an input error.

use crate::error::StickerError;
use serde::Serialize;

/// Default sticker width in millimetres.
pub const DEFAULT_WIDTH_MM: f32 = 45.0;

/// Default sticker height in millimetres.
pub const DEFAULT_HEIGHT_MM: f32 = 80.0;

/// Configuration for one export run.
#[derive(Debug, Clone, Serialize)]
pub struct StickerConfig {
    /// Sticker (= page) width in millimetres. Default: 45.
    pub width_mm: f32,

    /// Sticker (= page) height in millimetres. Default: 80.
    pub height_mm: f32,

    /// Barcode column override. `None` means auto-select: the ingested
    /// sheet's default column, falling back to [`crate::record::DEFAULT_COLUMN`].
    pub column: Option<String>,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            height_mm: DEFAULT_HEIGHT_MM,
            column: None,
        }
    }
}

impl StickerConfig {
    /// Create a new builder for `StickerConfig`.
    pub fn builder() -> StickerConfigBuilder {
        StickerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the dimension invariant.
    ///
    /// Called by the builder and again when an export begins, because the
    /// fields are public and a caller may have mutated them in between.
    pub fn validate(&self) -> Result<(), StickerError> {
        let ok = self.width_mm.is_finite()
            && self.height_mm.is_finite()
            && self.width_mm > 0.0
            && self.height_mm > 0.0;
        if ok {
            Ok(())
        } else {
            Err(StickerError::InvalidDimensions {
                width_mm: self.width_mm,
                height_mm: self.height_mm,
            })
        }
    }
}

/// Builder for [`StickerConfig`].
#[derive(Debug)]
pub struct StickerConfigBuilder {
    config: StickerConfig,
}

impl StickerConfigBuilder {
    pub fn width_mm(mut self, mm: f32) -> Self {
        self.config.width_mm = mm;
        self
    }

    pub fn height_mm(mut self, mm: f32) -> Self {
        self.config.height_mm = mm;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.config.column = Some(column.into());
        self
    }

    /// Build the configuration, validating the dimension invariant.
    pub fn build(self) -> Result<StickerConfig, StickerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions_are_45_by_80() {
        let config = StickerConfig::default();
        assert_eq!(config.width_mm, 45.0);
        assert_eq!(config.height_mm, 80.0);
        assert!(config.column.is_none());
        config.validate().expect("defaults must be valid");
    }

    #[test]
    fn builder_sets_all_fields() {
        let config = StickerConfig::builder()
            .width_mm(30.0)
            .height_mm(50.0)
            .column("sku")
            .build()
            .expect("valid config");
        assert_eq!(config.width_mm, 30.0);
        assert_eq!(config.height_mm, 50.0);
        assert_eq!(config.column.as_deref(), Some("sku"));
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = StickerConfig::builder().width_mm(0.0).build().unwrap_err();
        assert!(matches!(err, StickerError::InvalidDimensions { .. }));
    }

    #[test]
    fn negative_height_is_rejected() {
        let err = StickerConfig::builder()
            .height_mm(-80.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, StickerError::InvalidDimensions { .. }));
    }

    #[test]
    fn non_finite_dimensions_are_rejected() {
        let err = StickerConfig::builder()
            .width_mm(f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, StickerError::InvalidDimensions { .. }));
    }

    #[test]
    fn tiny_positive_dimensions_remain_permitted() {
        StickerConfig::builder()
            .width_mm(1.0)
            .height_mm(1.0)
            .build()
            .expect("degenerate-but-positive sizes are accepted");
    }
}
