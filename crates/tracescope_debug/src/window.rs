//! # Debug Window
//!
//! The fixed set of channels the renderer reports into, and the window that
//! plots them.

use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;
use tracescope_ui::layout::rigid;
use tracescope_ui::widget::{clamp1, Label};
use tracescope_ui::{Color, Context, Dimensions, Flex, Font, Point, ProgressBarStyle, Theme};

use crate::error::{DebugError, DebugResult};
use crate::graph::{DebugGraph, DebugGraphConfig};

static GLOBAL: OnceLock<DebugWindow> = OnceLock::new();

/// Rendering telemetry channels.
#[derive(Debug)]
pub struct DebugWindow {
    /// Timestamp at the left edge of the canvas.
    pub canvas_start: DebugGraph,
    /// Timestamp at the right edge of the canvas.
    pub canvas_end: DebugGraph,
    /// Vertical scroll offset of the canvas.
    pub canvas_y: DebugGraph,
    /// Zoom level, in pixels per nanosecond.
    pub px_per_ns: DebugGraph,
    /// Progress of the running canvas animation, 0 to 1.
    pub animation_progress: DebugGraph,
    /// Eased position of the running canvas animation.
    pub animation_ratio: DebugGraph,
    /// Time spent per frame, in milliseconds.
    pub frame_time: DebugGraph,
}

impl Default for DebugWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugWindow {
    /// Window title.
    pub const TITLE: &'static str = "Debug";

    /// Creates the window with the default channel set.
    #[must_use]
    pub fn new() -> Self {
        let canvas = Duration::from_secs(10);
        let animation = Duration::from_secs(1);
        Self {
            canvas_start: DebugGraph::new("Canvas start", canvas).with_sticky_last_value(true),
            canvas_end: DebugGraph::new("Canvas end", canvas).with_sticky_last_value(true),
            canvas_y: DebugGraph::new("Canvas Y", canvas)
                .with_fixed_zero(true)
                .with_sticky_last_value(true),
            px_per_ns: DebugGraph::new("Pixels per ns", canvas).with_sticky_last_value(true),
            animation_progress: DebugGraph::new("Animation progress", animation)
                .with_background(Color::rgb(0xEE, 0xF6, 0xEE))
                .with_fixed_zero(true),
            animation_ratio: DebugGraph::new("Animation ratio", animation)
                .with_background(Color::rgb(0xEE, 0xF6, 0xEE))
                .with_fixed_zero(true),
            frame_time: DebugGraph::new("Frame time (ms)", Duration::from_secs(5))
                .with_background(Color::rgb(0xF6, 0xEE, 0xEE))
                .with_fixed_zero(true),
        }
    }

    /// Creates the window, replacing the channels named in `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid channel definition.
    pub fn from_config(config: &DebugWindowConfig) -> DebugResult<Self> {
        let mut window = Self::new();
        let slots = [
            (&mut window.canvas_start, &config.canvas_start),
            (&mut window.canvas_end, &config.canvas_end),
            (&mut window.canvas_y, &config.canvas_y),
            (&mut window.px_per_ns, &config.px_per_ns),
            (&mut window.animation_progress, &config.animation_progress),
            (&mut window.animation_ratio, &config.animation_ratio),
            (&mut window.frame_time, &config.frame_time),
        ];
        for (slot, channel) in slots {
            if let Some(channel) = channel {
                *slot = DebugGraph::from_config(channel)?;
            }
        }
        tracing::debug!("debug window channels loaded from config");
        Ok(window)
    }

    /// The process-wide window, created on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// All channels, in display order.
    #[must_use]
    pub fn graphs(&self) -> [&DebugGraph; 7] {
        [
            &self.canvas_start,
            &self.canvas_end,
            &self.canvas_y,
            &self.px_per_ns,
            &self.animation_progress,
            &self.animation_ratio,
            &self.frame_time,
        ]
    }

    /// Lays out a title row, the animation progress bar and one plot per
    /// channel, top to bottom.
    #[allow(clippy::cast_possible_truncation)]
    pub fn layout(&self, gtx: Context<'_>, theme: &Theme) -> Dimensions {
        let _span = tracing::trace_span!("DebugWindow::layout").entered();

        let progress = self
            .animation_progress
            .latest()
            .map_or(0.0, |s| clamp1(s.value as f32));

        let mut children = vec![
            rigid(move |mut gtx: Context<'_>| {
                gtx.constraints.min.y = 0;
                Label::SINGLE_LINE.layout(
                    gtx,
                    theme.shaper.as_ref(),
                    Font::BOLD,
                    theme.text_size_large,
                    Self::TITLE,
                    theme.palette.foreground,
                )
            }),
            rigid(move |mut gtx: Context<'_>| {
                let height = gtx.sp(theme.text_size);
                let wanted = Point::new(gtx.constraints.max.x, height);
                gtx.constraints.min = gtx.constraints.constrain(wanted);
                ProgressBarStyle::new(theme, progress).layout(gtx)
            }),
        ];
        for graph in self.graphs() {
            children.push(rigid(move |gtx: Context<'_>| graph.layout(gtx, theme)));
        }
        Flex::vertical().layout(gtx, children)
    }
}

/// Channel overrides, as read from TOML. Unnamed channels keep their
/// defaults.
///
/// ```toml
/// [frame_time]
/// title = "Frame time (ms)"
/// width_ms = 10000
/// fixed_zero = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugWindowConfig {
    /// Canvas start channel.
    pub canvas_start: Option<DebugGraphConfig>,
    /// Canvas end channel.
    pub canvas_end: Option<DebugGraphConfig>,
    /// Canvas Y channel.
    pub canvas_y: Option<DebugGraphConfig>,
    /// Zoom channel.
    pub px_per_ns: Option<DebugGraphConfig>,
    /// Animation progress channel.
    pub animation_progress: Option<DebugGraphConfig>,
    /// Animation ratio channel.
    pub animation_ratio: Option<DebugGraphConfig>,
    /// Frame time channel.
    pub frame_time: Option<DebugGraphConfig>,
}

impl DebugWindowConfig {
    /// Parses channel overrides from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::InvalidConfig`] if the text does not match the
    /// schema.
    pub fn from_toml_str(text: &str) -> DebugResult<Self> {
        toml::from_str(text).map_err(|e| {
            tracing::warn!(error = %e, "rejecting debug window config");
            DebugError::InvalidConfig(e.to_string())
        })
    }
}
