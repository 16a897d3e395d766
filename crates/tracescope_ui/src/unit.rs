//! Device-independent units and their conversion to device pixels.

use serde::{Deserialize, Serialize};

/// Device-independent pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dp(pub f32);

/// Scale-independent pixels, used for text.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sp(pub f32);

/// Converts device-independent units into device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    /// Device pixels per [`Dp`].
    pub px_per_dp: f32,
    /// Device pixels per [`Sp`].
    pub px_per_sp: f32,
}

impl Default for Metric {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Metric {
    /// Creates a metric with the same scale for dp and sp.
    #[must_use]
    pub const fn new(scale: f32) -> Self {
        Self {
            px_per_dp: scale,
            px_per_sp: scale,
        }
    }

    /// Converts dp to whole device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dp(&self, v: Dp) -> i32 {
        (v.0 * self.px_per_dp).round() as i32
    }

    /// Converts sp to whole device pixels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn sp(&self, v: Sp) -> i32 {
        (v.0 * self.px_per_sp).round() as i32
    }

    /// Converts sp to fractional device pixels, as text shaping wants them.
    #[must_use]
    pub fn sp_px(&self, v: Sp) -> f32 {
        v.0 * self.px_per_sp
    }

    /// Converts sp to the dp value that covers the same number of pixels.
    #[must_use]
    pub fn sp_to_dp(&self, v: Sp) -> Dp {
        Dp(v.0 * self.px_per_sp / self.px_per_dp)
    }
}
