//! Rectangular outlines around other composers.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::layout::{Constraints, Context, Dimensions};
use crate::render::Ops;
use crate::unit::Dp;

/// Paints an outline of `width` pixels just inside `rect`.
///
/// An outline wider than half the rectangle covers it completely.
pub fn paint_outline(ops: &mut Ops, rect: Rect, width: i32, color: Color) {
    if width <= 0 || rect.is_empty() {
        return;
    }
    let size = rect.size();
    if 2 * width >= size.x || 2 * width >= size.y {
        ops.fill_rect(rect, color);
        return;
    }

    let (min, max) = (rect.min, rect.max);
    ops.fill_rect(Rect::new(min, Point::new(max.x, min.y + width)), color);
    ops.fill_rect(Rect::new(Point::new(min.x, max.y - width), max), color);
    ops.fill_rect(
        Rect::new(Point::new(min.x, min.y + width), Point::new(min.x + width, max.y - width)),
        color,
    );
    ops.fill_rect(
        Rect::new(Point::new(max.x - width, min.y + width), Point::new(max.x, max.y - width)),
        color,
    );
}

/// Draws an outline over the edges of its child without changing its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Outline color.
    pub color: Color,
    /// Outline width.
    pub width: Dp,
}

impl Border {
    /// Lays out `w` with the incoming constraints, then outlines it.
    pub fn layout(
        self,
        mut gtx: Context<'_>,
        w: impl FnOnce(Context<'_>) -> Dimensions,
    ) -> Dimensions {
        let dims = w(gtx.reborrow());
        let width = gtx.dp(self.width);
        paint_outline(gtx.ops, Rect::from_size(dims.size), width, self.color);
        dims
    }
}

/// Surrounds its child with an outline, growing it by the outline width on
/// every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bordered {
    /// Outline color.
    pub color: Color,
    /// Outline width.
    pub width: Dp,
}

impl Bordered {
    /// Lays out `w` inside the outline.
    pub fn layout(
        self,
        mut gtx: Context<'_>,
        w: impl FnOnce(Context<'_>) -> Dimensions,
    ) -> Dimensions {
        let width = gtx.dp(self.width).max(0);
        let outer = gtx.constraints;
        let max = Point::new((outer.max.x - 2 * width).max(0), (outer.max.y - 2 * width).max(0));
        let min = Point::new(
            (outer.min.x - 2 * width).max(0).min(max.x),
            (outer.min.y - 2 * width).max(0).min(max.y),
        );
        let inner = Constraints { min, max };

        let off = gtx.ops.push_offset(Point::new(width, width));
        let dims = w(gtx.with_constraints(inner));
        off.pop(gtx.ops);

        let size = outer.constrain(dims.size + Point::new(2 * width, 2 * width));
        paint_outline(gtx.ops, Rect::from_size(size), width, self.color);
        Dimensions {
            size,
            baseline: dims.baseline + width,
        }
    }
}
