//! Horizontal progress bars.

use crate::color::Color;
use crate::geometry::{FRect, PointF, Rect};
use crate::layout::{Context, Dimensions};
use crate::theme::Theme;
use crate::unit::Dp;
use crate::widget::Border;

/// Limits `v` to `[0, 1]`. NaN maps to 0.
#[must_use]
pub fn clamp1(v: f32) -> f32 {
    if v >= 1.0 {
        1.0
    } else if v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A progress bar filling the minimum constraint box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBarStyle {
    /// Bar and outline color.
    pub foreground_color: Color,
    /// Color behind the bar.
    pub background_color: Color,
    /// Outline width.
    pub border_width: Dp,
    /// Filled fraction. Not clamped; see [`clamp1`].
    pub progress: f32,
}

impl ProgressBarStyle {
    /// Bar color.
    pub const FOREGROUND: Color = Color::rgb(0x47, 0x88, 0x47);

    /// Creates a bar showing `progress`.
    #[must_use]
    pub fn new(_theme: &Theme, progress: f32) -> Self {
        Self {
            foreground_color: Self::FOREGROUND,
            background_color: Color::TRANSPARENT,
            border_width: Dp(1.0),
            progress,
        }
    }

    /// Paints the bar. The reported size is the minimum constraint.
    pub fn layout(self, gtx: Context<'_>) -> Dimensions {
        let _span = tracing::trace_span!("ProgressBarStyle::layout").entered();

        let border = Border {
            color: self.foreground_color,
            width: self.border_width,
        };
        border.layout(gtx, |gtx: Context<'_>| {
            let size = gtx.constraints.min;
            gtx.ops.fill_rect(Rect::from_size(size), self.background_color);

            #[allow(clippy::cast_precision_loss)]
            let (w, h) = (size.x as f32 * self.progress, size.y as f32);
            let fg = FRect::new(PointF::new(0.0, 0.0), PointF::new(w, h));
            gtx.ops.fill_path(fg.path(), self.foreground_color);

            Dimensions::from_size(size)
        })
    }
}
