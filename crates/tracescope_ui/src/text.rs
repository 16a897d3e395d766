//! Text measurement.
//!
//! Shaping and rasterization belong to the host toolkit. Composers only need
//! line metrics, which they get through the [`Shaper`] trait. [`MonoShaper`]
//! is a fixed-advance implementation good enough for headless rendering and
//! tests.

use std::fmt::Debug;

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Font {
    /// Weight of the face.
    pub weight: Weight,
}

impl Font {
    /// The bold variant of the default face.
    pub const BOLD: Self = Self {
        weight: Weight::Bold,
    };
}

/// Measured extent of a single line of text, in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// Advance width of the line.
    pub width: i32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: i32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: i32,
}

impl LineMetrics {
    /// Height of the line box.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// Measures text for layout.
///
/// Implementations must be deterministic: the same inputs always yield the
/// same metrics, because composers measure during layout and rely on the
/// host painting the same extent later.
pub trait Shaper: Debug + Send + Sync {
    /// Measures one line of text at `size_px` device pixels.
    fn shape_line(&self, font: Font, size_px: f32, text: &str) -> LineMetrics;
}

/// A fixed-advance shaper.
///
/// Every character advances by `advance × size`; bold faces are slightly
/// wider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoShaper {
    /// Advance per character, as a fraction of the font size.
    pub advance: f32,
    /// Extra advance for bold faces, as a fraction of the font size.
    pub bold_extra: f32,
    /// Ascent, as a fraction of the font size.
    pub ascent: f32,
    /// Descent, as a fraction of the font size.
    pub descent: f32,
}

impl Default for MonoShaper {
    fn default() -> Self {
        Self {
            advance: 0.6,
            bold_extra: 0.05,
            ascent: 0.8,
            descent: 0.25,
        }
    }
}

impl Shaper for MonoShaper {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn shape_line(&self, font: Font, size_px: f32, text: &str) -> LineMetrics {
        let advance = match font.weight {
            Weight::Normal => self.advance,
            Weight::Bold => self.advance + self.bold_extra,
        };
        let chars = text.chars().count() as f32;
        // Round up to whole pixels, ignoring float noise just above an integer.
        let px = |v: f32| ((v - 1e-3).ceil() as i32).max(0);
        LineMetrics {
            width: px(chars * advance * size_px),
            ascent: px(self.ascent * size_px),
            descent: px(self.descent * size_px),
        }
    }
}
