//! Draw-op recording.
//!
//! Composers append [`DrawOp`]s to an [`Ops`] list. Nothing is painted while
//! layout runs; the host turns the finished list into absolute primitives
//! with [`Ops::flatten`] and hands those to its rasterizer.
//!
//! ## Record / replay
//!
//! A composer whose background depends on the size of its content cannot
//! paint the background first, because the content has not been measured
//! yet. It records the content instead:
//!
//! ```text
//!   let rec = ops.record();        // 1. open capture
//!   let dims = content(gtx);       // 2. measure + record
//!   let call = rec.stop(ops);      // 3. detach the recorded ops
//!   ops.fill_rect(bg, color);      // 4. paint background from dims
//!   call.add(ops);                 // 5. replay content on top
//! ```
//!
//! Recordings nest. A [`CallOp`] carries no offset or clip of its own; it is
//! placed by whatever state is current where it is added, and may be added
//! any number of times.

use std::sync::Arc;

use crate::color::Color;
use crate::geometry::{Path, Point, Rect};
use crate::text::Font;
use crate::widget::WidgetId;

/// Geometry that can be filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Pixel-aligned rectangle.
    Rect(Rect),
    /// Arbitrary closed path.
    Path(Path),
}

impl Shape {
    /// Returns the shape moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        match self {
            Self::Rect(r) => Self::Rect(r.translate(delta)),
            Self::Path(p) => Self::Path(p.translate(delta.to_f32())),
        }
    }
}

/// A single line of text to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Top-left corner of the line box.
    pub origin: Point,
    /// Text content.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size in device pixels.
    pub size_px: f32,
    /// Font selection.
    pub font: Font,
}

/// A recorded drawing operation.
#[derive(Debug, Clone)]
pub enum DrawOp {
    /// Fill a shape with a solid color.
    Fill {
        /// Shape to fill.
        shape: Shape,
        /// Fill color.
        color: Color,
    },
    /// Paint a line of text.
    Text(TextRun),
    /// Register the pointer area of an input handler.
    HitArea {
        /// Handler identity.
        id: WidgetId,
        /// Area in local coordinates.
        rect: Rect,
    },
    /// Intersect the clip region with a rectangle.
    PushClip(Rect),
    /// Restore the clip region.
    PopClip,
    /// Translate subsequent ops.
    PushOffset(Point),
    /// Restore the previous translation.
    PopOffset,
    /// Replay a recorded sequence.
    Call(CallOp),
}

/// A detached, replayable sequence of ops.
#[derive(Debug, Clone)]
pub struct CallOp {
    ops: Arc<[DrawOp]>,
}

impl CallOp {
    /// Replays the sequence into `ops` under the current offset and clip.
    pub fn add(&self, ops: &mut Ops) {
        ops.ops.push(DrawOp::Call(self.clone()));
    }

    /// Returns the recorded ops.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackKind {
    Clip,
    Offset,
}

/// An open capture started by [`Ops::record`].
#[must_use = "a recording must be stopped"]
#[derive(Debug)]
pub struct Recording {
    depth: usize,
    stack_depth: usize,
}

impl Recording {
    /// Closes the capture and returns everything recorded since it opened.
    ///
    /// # Panics
    ///
    /// Panics if recordings are stopped out of order or if a clip or offset
    /// pushed during the recording is still open.
    pub fn stop(self, ops: &mut Ops) -> CallOp {
        assert_eq!(
            ops.recordings.len(),
            self.depth + 1,
            "recordings must be stopped in reverse order of creation"
        );
        assert_eq!(
            ops.stack.len(),
            self.stack_depth,
            "unbalanced clip/offset stack inside recording"
        );
        let start = ops.recordings.pop().unwrap_or(0);
        let recorded = ops.ops.split_off(start);
        CallOp {
            ops: recorded.into(),
        }
    }
}

/// Token for a pushed clip or offset; pass it back to pop.
#[must_use = "a pushed clip or offset must be popped"]
#[derive(Debug)]
pub struct StackToken {
    kind: StackKind,
    depth: usize,
}

impl StackToken {
    /// Pops the clip or offset this token was created for.
    ///
    /// # Panics
    ///
    /// Panics if an inner push has not been popped first.
    pub fn pop(self, ops: &mut Ops) {
        assert_eq!(ops.stack.len(), self.depth + 1, "clip/offset popped out of order");
        assert_eq!(ops.stack.last(), Some(&self.kind), "clip/offset kind mismatch");
        ops.stack.pop();
        ops.ops.push(match self.kind {
            StackKind::Clip => DrawOp::PopClip,
            StackKind::Offset => DrawOp::PopOffset,
        });
    }
}

/// The drawing-operations sink for one frame.
#[derive(Debug, Default)]
pub struct Ops {
    ops: Vec<DrawOp>,
    recordings: Vec<usize>,
    stack: Vec<StackKind>,
}

impl Ops {
    /// Creates an empty op list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ops: Vec::with_capacity(256),
            recordings: Vec::new(),
            stack: Vec::with_capacity(16),
        }
    }

    /// Clears the list for a new frame.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.recordings.clear();
        self.stack.clear();
    }

    /// Returns the recorded ops.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Returns the number of top-level ops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Fills a pixel-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill {
            shape: Shape::Rect(rect),
            color,
        });
    }

    /// Fills a closed path.
    pub fn fill_path(&mut self, path: Path, color: Color) {
        self.ops.push(DrawOp::Fill {
            shape: Shape::Path(path),
            color,
        });
    }

    /// Paints a line of text.
    pub fn text(&mut self, run: TextRun) {
        self.ops.push(DrawOp::Text(run));
    }

    /// Registers the pointer area of an input handler.
    pub fn hit_area(&mut self, id: WidgetId, rect: Rect) {
        self.ops.push(DrawOp::HitArea { id, rect });
    }

    /// Intersects the clip region with `rect` until the token is popped.
    pub fn push_clip(&mut self, rect: Rect) -> StackToken {
        self.push_stack(StackKind::Clip, DrawOp::PushClip(rect))
    }

    /// Translates subsequent ops by `offset` until the token is popped.
    pub fn push_offset(&mut self, offset: Point) -> StackToken {
        self.push_stack(StackKind::Offset, DrawOp::PushOffset(offset))
    }

    fn push_stack(&mut self, kind: StackKind, op: DrawOp) -> StackToken {
        let depth = self.stack.len();
        self.stack.push(kind);
        self.ops.push(op);
        StackToken { kind, depth }
    }

    /// Opens a capture. Ops added until [`Recording::stop`] are detached
    /// from this list.
    pub fn record(&mut self) -> Recording {
        let depth = self.recordings.len();
        self.recordings.push(self.ops.len());
        Recording {
            depth,
            stack_depth: self.stack.len(),
        }
    }

    /// Resolves calls, offsets and clips into absolute primitives.
    #[must_use]
    pub fn flatten(&self) -> DisplayList {
        let mut state = FlattenState {
            offsets: vec![Point::ZERO],
            clips: Vec::new(),
            out: Vec::with_capacity(self.ops.len()),
        };
        state.walk(&self.ops);
        DisplayList {
            primitives: state.out,
        }
    }
}

struct FlattenState {
    offsets: Vec<Point>,
    clips: Vec<Rect>,
    out: Vec<Primitive>,
}

impl FlattenState {
    fn offset(&self) -> Point {
        self.offsets.last().copied().unwrap_or(Point::ZERO)
    }

    fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    fn walk(&mut self, ops: &[DrawOp]) {
        for op in ops {
            match op {
                DrawOp::Fill { shape, color } => {
                    self.out.push(Primitive::Fill {
                        shape: shape.translate(self.offset()),
                        color: *color,
                        clip: self.clip(),
                    });
                }
                DrawOp::Text(run) => {
                    let mut run = run.clone();
                    run.origin = run.origin + self.offset();
                    self.out.push(Primitive::Text {
                        run,
                        clip: self.clip(),
                    });
                }
                DrawOp::HitArea { id, rect } => {
                    let mut rect = rect.translate(self.offset());
                    if let Some(clip) = self.clip() {
                        rect = rect.intersect(&clip);
                    }
                    self.out.push(Primitive::HitArea { id: *id, rect });
                }
                DrawOp::PushClip(rect) => {
                    let rect = rect.translate(self.offset());
                    let clip = match self.clip() {
                        Some(current) => current.intersect(&rect),
                        None => rect,
                    };
                    self.clips.push(clip);
                }
                DrawOp::PopClip => {
                    self.clips.pop();
                }
                DrawOp::PushOffset(delta) => {
                    let next = self.offset() + *delta;
                    self.offsets.push(next);
                }
                DrawOp::PopOffset => {
                    if self.offsets.len() > 1 {
                        self.offsets.pop();
                    }
                }
                DrawOp::Call(call) => self.walk(call.ops()),
            }
        }
    }
}

/// An absolute, fully resolved drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled shape.
    Fill {
        /// Shape in absolute coordinates.
        shape: Shape,
        /// Fill color.
        color: Color,
        /// Active clip, if any.
        clip: Option<Rect>,
    },
    /// Line of text.
    Text {
        /// Text in absolute coordinates.
        run: TextRun,
        /// Active clip, if any.
        clip: Option<Rect>,
    },
    /// Pointer area of an input handler, already clipped.
    HitArea {
        /// Handler identity.
        id: WidgetId,
        /// Area in absolute coordinates.
        rect: Rect,
    },
}

/// The flattened output of a frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    primitives: Vec<Primitive>,
}

impl DisplayList {
    /// Returns the primitives in paint order.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Iterates over filled shapes and their colors in paint order.
    pub fn fills(&self) -> impl Iterator<Item = (&Shape, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Fill { shape, color, .. } => Some((shape, *color)),
            _ => None,
        })
    }

    /// Iterates over text runs in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { run, .. } => Some(run),
            _ => None,
        })
    }

    /// Iterates over registered pointer areas.
    pub fn hit_areas(&self) -> impl Iterator<Item = (WidgetId, Rect)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::HitArea { id, rect } => Some((*id, *rect)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_recording_is_detached_until_added() {
        let mut ops = Ops::new();
        ops.fill_rect(rect(0, 0, 1, 1), Color::BLACK);

        let rec = ops.record();
        ops.fill_rect(rect(0, 0, 5, 5), Color::WHITE);
        let call = rec.stop(&mut ops);

        assert_eq!(ops.len(), 1);
        assert_eq!(call.ops().len(), 1);

        let off = ops.push_offset(Point::new(10, 20));
        call.add(&mut ops);
        off.pop(&mut ops);

        let list = ops.flatten();
        let fills: Vec<_> = list.fills().collect();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[1], (&Shape::Rect(rect(10, 20, 15, 25)), Color::WHITE));
    }

    #[test]
    fn test_nested_recordings() {
        let mut ops = Ops::new();
        let outer = ops.record();
        ops.fill_rect(rect(0, 0, 1, 1), Color::BLACK);
        let inner = ops.record();
        ops.fill_rect(rect(0, 0, 2, 2), Color::WHITE);
        let inner_call = inner.stop(&mut ops);
        inner_call.add(&mut ops);
        let outer_call = outer.stop(&mut ops);

        assert!(ops.is_empty());
        outer_call.add(&mut ops);
        outer_call.add(&mut ops);
        assert_eq!(ops.flatten().fills().count(), 4);
    }

    #[test]
    #[should_panic(expected = "reverse order")]
    fn test_out_of_order_stop_panics() {
        let mut ops = Ops::new();
        let outer = ops.record();
        let _inner = ops.record();
        let _ = outer.stop(&mut ops);
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut ops = Ops::new();
        let a = ops.push_clip(rect(0, 0, 100, 100));
        let off = ops.push_offset(Point::new(50, 50));
        let b = ops.push_clip(rect(0, 0, 100, 100));
        ops.fill_rect(rect(0, 0, 10, 10), Color::BLACK);
        b.pop(&mut ops);
        off.pop(&mut ops);
        a.pop(&mut ops);

        let list = ops.flatten();
        match &list.primitives()[0] {
            Primitive::Fill { clip, .. } => assert_eq!(*clip, Some(rect(50, 50, 100, 100))),
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn test_offsets_accumulate_and_restore() {
        let mut ops = Ops::new();
        let a = ops.push_offset(Point::new(5, 0));
        let b = ops.push_offset(Point::new(0, 7));
        ops.fill_rect(rect(0, 0, 1, 1), Color::BLACK);
        b.pop(&mut ops);
        ops.fill_rect(rect(0, 0, 1, 1), Color::WHITE);
        a.pop(&mut ops);

        let list = ops.flatten();
        let fills: Vec<_> = list.fills().map(|(s, _)| s.clone()).collect();
        assert_eq!(fills[0], Shape::Rect(rect(5, 7, 6, 8)));
        assert_eq!(fills[1], Shape::Rect(rect(5, 0, 6, 1)));
    }
}
