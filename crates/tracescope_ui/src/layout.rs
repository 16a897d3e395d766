//! Layout context, constraints and the generic composers.
//!
//! Layout is a single top-down pass. Every composer receives a [`Context`]
//! carrying its constraints, paints into the context's [`Ops`] in local
//! coordinates and returns the [`Dimensions`] it consumed. Parents place
//! children by pushing offsets; children never know where they end up.

use std::time::Instant;

use crate::geometry::{Point, Rect};
use crate::input::{HitMap, InputState};
use crate::render::{CallOp, Ops};
use crate::unit::{Dp, Metric, Sp};

/// Size bounds for a composer, in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Smallest acceptable size.
    pub min: Point,
    /// Largest acceptable size.
    pub max: Point,
}

impl Constraints {
    /// Creates tight constraints (exact size).
    #[must_use]
    pub const fn exact(size: Point) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// Creates loose constraints (up to `max`).
    #[must_use]
    pub const fn loose(max: Point) -> Self {
        Self {
            min: Point::ZERO,
            max,
        }
    }

    /// Clamps a size to these constraints. `max` wins over `min`.
    #[must_use]
    pub fn constrain(&self, size: Point) -> Point {
        let clamp = |v: i32, lo: i32, hi: i32| v.max(lo).min(hi);
        Point::new(
            clamp(size.x, self.min.x, self.max.x),
            clamp(size.y, self.min.y, self.max.y),
        )
    }

    /// Shrinks `max` by `delta`, never below zero, pulling `min` down with it.
    #[must_use]
    pub fn sub_max(self, delta: Point) -> Self {
        let max = Point::new((self.max.x - delta.x).max(0), (self.max.y - delta.y).max(0));
        let min = Point::new(self.min.x.min(max.x), self.min.y.min(max.y));
        Self { min, max }
    }
}

/// The space a composer consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    /// Consumed size.
    pub size: Point,
    /// Distance from the bottom edge to the text baseline, zero if none.
    pub baseline: i32,
}

impl Dimensions {
    /// Dimensions without a baseline.
    #[must_use]
    pub const fn from_size(size: Point) -> Self {
        Self { size, baseline: 0 }
    }
}

/// Everything a composer needs for one layout call.
#[derive(Debug)]
pub struct Context<'a> {
    /// Size bounds for this composer.
    pub constraints: Constraints,
    /// Unit converter.
    pub metric: Metric,
    /// Drawing sink.
    pub ops: &'a mut Ops,
    /// Pointer state for this frame.
    pub input: &'a InputState,
    /// Pointer areas registered in the previous frame.
    pub hits: &'a HitMap,
    /// Frame timestamp.
    pub now: Instant,
}

impl<'a> Context<'a> {
    /// Creates a root context with loose constraints up to `size`.
    #[must_use]
    pub fn new(
        ops: &'a mut Ops,
        input: &'a InputState,
        hits: &'a HitMap,
        metric: Metric,
        size: Point,
    ) -> Self {
        Self {
            constraints: Constraints::loose(size),
            metric,
            ops,
            input,
            hits,
            now: Instant::now(),
        }
    }

    /// Borrows the context for a child call.
    pub fn reborrow(&mut self) -> Context<'_> {
        Context {
            constraints: self.constraints,
            metric: self.metric,
            ops: &mut *self.ops,
            input: self.input,
            hits: self.hits,
            now: self.now,
        }
    }

    /// Borrows the context with different constraints.
    pub fn with_constraints(&mut self, constraints: Constraints) -> Context<'_> {
        let mut gtx = self.reborrow();
        gtx.constraints = constraints;
        gtx
    }

    /// Converts dp to device pixels.
    #[must_use]
    pub fn dp(&self, v: Dp) -> i32 {
        self.metric.dp(v)
    }

    /// Converts sp to device pixels.
    #[must_use]
    pub fn sp(&self, v: Sp) -> i32 {
        self.metric.sp(v)
    }
}

/// A boxed child composer.
pub type Child<'a> = Box<dyn FnOnce(Context<'_>) -> Dimensions + 'a>;

/// Boxes a composer as a rigid [`Flex`] child.
pub fn rigid<'a>(w: impl FnOnce(Context<'_>) -> Dimensions + 'a) -> Child<'a> {
    Box::new(w)
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (left to right).
    #[default]
    Horizontal,
    /// Vertical (top to bottom).
    Vertical,
}

impl Direction {
    fn main(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }

    fn cross(self, p: Point) -> i32 {
        match self {
            Self::Horizontal => p.y,
            Self::Vertical => p.x,
        }
    }

    fn point(self, main: i32, cross: i32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }
}

/// Layout alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
}

impl Alignment {
    fn offset(self, space: i32, size: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (space - size) / 2,
            Self::End => space - size,
        }
    }
}

/// Lays children out one after another along an axis.
///
/// Each child is measured inside a recording, then replayed at its final
/// position once the cross-axis size of the whole row is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flex {
    /// Main axis.
    pub axis: Direction,
    /// Cross-axis alignment of children.
    pub alignment: Alignment,
}

impl Flex {
    /// Creates a horizontal flex.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            axis: Direction::Horizontal,
            ..Self::default()
        }
    }

    /// Creates a vertical flex.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            axis: Direction::Vertical,
            ..Self::default()
        }
    }

    /// Sets cross-axis alignment.
    #[must_use]
    pub const fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Lays out the children in order.
    pub fn layout(self, mut gtx: Context<'_>, children: Vec<Child<'_>>) -> Dimensions {
        let cs = gtx.constraints;
        let axis = self.axis;
        let cross_max = axis.cross(cs.max);
        let mut remaining = axis.main(cs.max);
        let mut measured: Vec<(CallOp, Dimensions)> = Vec::with_capacity(children.len());

        for child in children {
            let cgtx_cs = Constraints {
                min: Point::ZERO,
                max: axis.point(remaining.max(0), cross_max),
            };
            let rec = gtx.ops.record();
            let dims = child(gtx.with_constraints(cgtx_cs));
            let call = rec.stop(gtx.ops);
            remaining -= axis.main(dims.size);
            measured.push((call, dims));
        }

        let main_size: i32 = measured.iter().map(|(_, d)| axis.main(d.size)).sum();
        let cross_size = measured
            .iter()
            .map(|(_, d)| axis.cross(d.size))
            .max()
            .unwrap_or(0)
            .max(axis.cross(cs.min));

        let mut ascent: Option<i32> = None;
        let mut main_off = 0;
        for (call, dims) in &measured {
            let cross_off = self.alignment.offset(cross_size, axis.cross(dims.size));
            let off = gtx.ops.push_offset(axis.point(main_off, cross_off));
            call.add(gtx.ops);
            off.pop(gtx.ops);

            if dims.baseline != 0 {
                let top_to_baseline = match axis {
                    Direction::Horizontal => cross_off + dims.size.y - dims.baseline,
                    Direction::Vertical => main_off + dims.size.y - dims.baseline,
                };
                ascent = match (axis, ascent) {
                    (Direction::Vertical, Some(first)) => Some(first),
                    (_, current) => Some(current.map_or(top_to_baseline, |a| a.max(top_to_baseline))),
                };
            }
            main_off += axis.main(dims.size);
        }

        let size = cs.constrain(axis.point(main_size, cross_size));
        Dimensions {
            size,
            baseline: ascent.map_or(0, |a| (size.y - a).max(0)),
        }
    }
}

/// A child of a [`Stack`].
pub enum StackChild<'a> {
    /// Sized by its own content; determines the stack size.
    Stacked(Child<'a>),
    /// Forced to at least the size of the stacked children.
    Expanded(Child<'a>),
}

impl<'a> StackChild<'a> {
    /// Wraps a size-determining child.
    pub fn stacked(w: impl FnOnce(Context<'_>) -> Dimensions + 'a) -> Self {
        Self::Stacked(Box::new(w))
    }

    /// Wraps a child that fills the stack.
    pub fn expanded(w: impl FnOnce(Context<'_>) -> Dimensions + 'a) -> Self {
        Self::Expanded(Box::new(w))
    }
}

/// Lays children on top of each other.
///
/// Stacked children are laid out first; expanded children then get the
/// resulting size as their minimum. Children are painted in declaration
/// order, so an expanded background declared first ends up beneath content
/// that was measured before it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stack {
    /// Placement of children smaller than the stack, on both axes.
    pub alignment: Alignment,
}

impl Stack {
    /// Lays out the children.
    pub fn layout(self, mut gtx: Context<'_>, children: Vec<StackChild<'_>>) -> Dimensions {
        let cs = gtx.constraints;
        let mut results: Vec<Option<(CallOp, Dimensions)>> = Vec::with_capacity(children.len());
        let mut pending = Vec::new();
        let mut max_size = Point::ZERO;

        for (i, child) in children.into_iter().enumerate() {
            match child {
                StackChild::Stacked(w) => {
                    let rec = gtx.ops.record();
                    let dims = w(gtx.with_constraints(Constraints::loose(cs.max)));
                    let call = rec.stop(gtx.ops);
                    max_size = Point::new(max_size.x.max(dims.size.x), max_size.y.max(dims.size.y));
                    results.push(Some((call, dims)));
                }
                StackChild::Expanded(w) => {
                    pending.push((i, w));
                    results.push(None);
                }
            }
        }

        max_size = cs.constrain(max_size);
        for (i, w) in pending {
            let rec = gtx.ops.record();
            let dims = w(gtx.with_constraints(Constraints {
                min: max_size,
                max: cs.max,
            }));
            let call = rec.stop(gtx.ops);
            max_size = Point::new(max_size.x.max(dims.size.x), max_size.y.max(dims.size.y));
            results[i] = Some((call, dims));
        }
        max_size = cs.constrain(max_size);

        let mut baseline = 0;
        for (call, dims) in results.iter().flatten() {
            let p = Point::new(
                self.alignment.offset(max_size.x, dims.size.x),
                self.alignment.offset(max_size.y, dims.size.y),
            );
            let off = gtx.ops.push_offset(p);
            call.add(gtx.ops);
            off.pop(gtx.ops);
            if baseline == 0 && dims.baseline != 0 {
                baseline = dims.baseline + max_size.y - dims.size.y - p.y;
            }
        }

        Dimensions {
            size: max_size,
            baseline,
        }
    }
}

/// Empty space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spacer {
    /// Width of the gap.
    pub width: Dp,
    /// Height of the gap.
    pub height: Dp,
}

impl Spacer {
    /// Consumes the configured space, constrained.
    #[must_use]
    pub fn layout(self, gtx: Context<'_>) -> Dimensions {
        let size = Point::new(gtx.dp(self.width), gtx.dp(self.height));
        Dimensions::from_size(gtx.constraints.constrain(size))
    }
}

/// Lays out `w` with its output clipped to `rect`.
pub fn clipped(
    mut gtx: Context<'_>,
    rect: Rect,
    w: impl FnOnce(Context<'_>) -> Dimensions,
) -> Dimensions {
    let clip = gtx.ops.push_clip(rect);
    let dims = w(gtx.reborrow());
    clip.pop(gtx.ops);
    dims
}
