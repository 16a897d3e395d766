//! # Telemetry Graphs
//!
//! A [`DebugGraph`] is one named channel of timestamped samples.
//!
//! ## Thread Safety
//!
//! Any thread may append at any time. Each channel has its own lock, held
//! only for the push or the copy-out; plotting works on a snapshot, so a
//! slow frame never stalls a producer.
//!
//! ## Bounds
//!
//! Samples older than the channel width, measured back from the newest
//! sample, are evicted on every append. Plotting and
//! [`DebugGraph::prune_at`] also evict against the current time, so a
//! channel that stopped receiving samples drains too.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;
use tracescope_ui::widget::Label;
use tracescope_ui::{
    Color, Constraints, Context, Dimensions, Dp, Font, Path, PathBuilder, Point, PointF, Rect,
    Theme,
};

use crate::error::{DebugError, DebugResult};

/// One observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// When the value was observed.
    pub when: Instant,
    /// Observed value.
    pub value: f64,
}

/// A bounded, thread-safe time series with a plot.
#[derive(Debug)]
pub struct DebugGraph {
    title: String,
    width: Duration,
    background: Color,
    fixed_zero: bool,
    sticky_last_value: bool,
    samples: Mutex<VecDeque<Sample>>,
}

impl DebugGraph {
    /// Default plot background.
    pub const BACKGROUND: Color = Color::rgb(0xF2, 0xF2, 0xF2);
    /// Plot height.
    pub const HEIGHT: Dp = Dp(80.0);

    /// Creates an empty channel keeping `width` worth of history.
    #[must_use]
    pub fn new(title: impl Into<String>, width: Duration) -> Self {
        Self {
            title: title.into(),
            width,
            background: Self::BACKGROUND,
            fixed_zero: false,
            sticky_last_value: false,
            samples: Mutex::new(VecDeque::new()),
        }
    }

    /// Sets the plot background.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Keeps zero inside the plotted range and draws a zero line.
    #[must_use]
    pub fn with_fixed_zero(mut self, fixed_zero: bool) -> Self {
        self.fixed_zero = fixed_zero;
        self
    }

    /// Extends the last sample flat to the present.
    #[must_use]
    pub fn with_sticky_last_value(mut self, sticky: bool) -> Self {
        self.sticky_last_value = sticky;
        self
    }

    /// Creates a channel from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DebugError::InvalidConfig`] for a zero width.
    pub fn from_config(config: &DebugGraphConfig) -> DebugResult<Self> {
        if config.width_ms == 0 {
            tracing::warn!(title = %config.title, "rejecting channel with zero width");
            return Err(DebugError::InvalidConfig(format!(
                "channel {:?} must have a non-zero width",
                config.title
            )));
        }
        Ok(Self::new(config.title.clone(), Duration::from_millis(config.width_ms))
            .with_background(config.background.unwrap_or(Self::BACKGROUND))
            .with_fixed_zero(config.fixed_zero)
            .with_sticky_last_value(config.sticky_last_value))
    }

    /// Channel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Retained history.
    #[must_use]
    pub fn width(&self) -> Duration {
        self.width
    }

    /// Plot background.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Whether zero is always plotted.
    #[must_use]
    pub fn fixed_zero(&self) -> bool {
        self.fixed_zero
    }

    /// Whether the last value extends to the present.
    #[must_use]
    pub fn sticky_last_value(&self) -> bool {
        self.sticky_last_value
    }

    /// Records `value` as observed now.
    pub fn append(&self, value: f64) {
        let mut samples = self.samples.lock();
        // Read the clock under the lock so concurrent appends stay ordered.
        let when = Instant::now();
        push_ordered(&mut samples, Sample { when, value }, self.width);
    }

    /// Records `value` as observed at `when`.
    ///
    /// A timestamp older than the newest sample is raised to it.
    pub fn append_at(&self, when: Instant, value: f64) {
        push_ordered(&mut self.samples.lock(), Sample { when, value }, self.width);
    }

    /// Copies the samples from the last `window`, oldest first.
    #[must_use]
    pub fn snapshot(&self, window: Duration) -> Vec<Sample> {
        self.snapshot_at(Instant::now(), window)
    }

    /// Copies the samples with `when >= now - window`, oldest first.
    ///
    /// A window reaching back before the clock's origin returns everything.
    #[must_use]
    pub fn snapshot_at(&self, now: Instant, window: Duration) -> Vec<Sample> {
        let samples = self.samples.lock();
        let start = match now.checked_sub(window) {
            Some(cutoff) => samples.partition_point(|s| s.when < cutoff),
            None => 0,
        };
        samples.range(start..).copied().collect()
    }

    /// Drops samples older than the channel width. Returns how many went.
    pub fn prune_at(&self, now: Instant) -> usize {
        prune(&mut self.samples.lock(), now, self.width)
    }

    /// Newest sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.samples.lock().back().copied()
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.lock().len()
    }

    /// True if nothing is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.lock().is_empty()
    }

    /// Plots the channel across the available width, ending at the frame
    /// timestamp.
    pub fn layout(&self, mut gtx: Context<'_>, theme: &Theme) -> Dimensions {
        let _span = tracing::trace_span!("DebugGraph::layout", title = %self.title).entered();

        let now = gtx.now;
        let samples: Vec<Sample> = {
            let mut guard = self.samples.lock();
            prune(&mut guard, now, self.width);
            guard.iter().copied().collect()
        };

        let height = gtx.dp(Self::HEIGHT);
        let size = gtx
            .constraints
            .constrain(Point::new(gtx.constraints.max.x, height));
        let clip = gtx.ops.push_clip(Rect::from_size(size));
        gtx.ops.fill_rect(Rect::from_size(size), self.background);

        if let Some(plot) = self.plot(&samples, now, size) {
            gtx.ops.fill_path(plot.area, theme.palette.foreground.with_alpha(0x80));
            if let Some(y) = plot.zero_y {
                #[allow(clippy::cast_possible_truncation)]
                let y = y.round() as i32;
                let line = Rect::new(Point::new(0, y), Point::new(size.x, y + 1));
                gtx.ops.fill_rect(line, theme.palette.foreground);
            }
        }

        Label::SINGLE_LINE.layout(
            gtx.with_constraints(Constraints::loose(size)),
            theme.shaper.as_ref(),
            Font::default(),
            theme.text_size,
            &self.title,
            theme.palette.foreground,
        );
        clip.pop(gtx.ops);

        Dimensions::from_size(size)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn plot(&self, samples: &[Sample], now: Instant, size: Point) -> Option<Plot> {
        let (first, last) = (samples.first()?, samples.last()?);

        let mut lo = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
        let mut hi = samples.iter().map(|s| s.value).fold(f64::NEG_INFINITY, f64::max);
        if self.fixed_zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if hi - lo <= f64::EPSILON {
            lo -= 1.0;
            hi += 1.0;
        }

        let (w, h) = (f64::from(size.x), f64::from(size.y));
        let span = self.width.as_secs_f64().max(f64::MIN_POSITIVE);
        let x = |t: Instant| w * (1.0 - now.saturating_duration_since(t).as_secs_f64() / span);
        let y = |v: f64| h - (v - lo) / (hi - lo) * h;
        let pt = |x: f64, y: f64| PointF::new(x as f32, y as f32);

        let base = if self.fixed_zero { 0.0 } else { lo };
        let base_y = y(base);

        let mut path = PathBuilder::new();
        path.move_to(pt(x(first.when), base_y));
        for s in samples {
            path.line_to(pt(x(s.when), y(s.value)));
        }
        let end_x = if self.sticky_last_value {
            path.line_to(pt(w, y(last.value)));
            w
        } else {
            x(last.when)
        };
        path.line_to(pt(end_x, base_y));

        Some(Plot {
            area: path.build(),
            zero_y: self.fixed_zero.then_some(base_y as f32),
        })
    }
}

struct Plot {
    area: Path,
    zero_y: Option<f32>,
}

/// Appends `sample` and evicts whatever fell out of the window behind it.
fn push_ordered(samples: &mut VecDeque<Sample>, mut sample: Sample, width: Duration) {
    if let Some(tail) = samples.back() {
        sample.when = sample.when.max(tail.when);
    }
    samples.push_back(sample);
    prune(samples, sample.when, width);
}

fn prune(samples: &mut VecDeque<Sample>, now: Instant, width: Duration) -> usize {
    let Some(cutoff) = now.checked_sub(width) else {
        return 0;
    };
    let stale = samples.partition_point(|s| s.when < cutoff);
    samples.drain(..stale);
    stale
}

/// Channel definition, as read from TOML.
///
/// ```toml
/// title = "frame time"
/// width_ms = 5000
/// fixed_zero = true
/// background = [240, 240, 255, 255]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugGraphConfig {
    /// Channel title.
    pub title: String,
    /// Retained history in milliseconds.
    pub width_ms: u64,
    /// Plot background.
    #[serde(default)]
    pub background: Option<Color>,
    /// Keep zero in range.
    #[serde(default)]
    pub fixed_zero: bool,
    /// Extend the last value to the present.
    #[serde(default)]
    pub sticky_last_value: bool,
}
