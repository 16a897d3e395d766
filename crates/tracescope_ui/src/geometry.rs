//! Points, rectangles and closed polygonal paths.
//!
//! Integer types (`Point`, `Rect`) address device pixels and are what layout
//! deals in. Float types (`PointF`, `FRect`, `Path`) describe painted
//! geometry that does not have to land on pixel boundaries, such as a
//! fractional progress fill.

use std::ops::{Add, Sub};

/// A point or size in whole device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to float coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32(self) -> PointF {
        PointF::new(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A point in float coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointF {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl PointF {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for PointF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// An axis-aligned rectangle in device pixels, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle anchored at the origin with the given size.
    #[must_use]
    pub const fn from_size(size: Point) -> Self {
        Self {
            min: Point::ZERO,
            max: size,
        }
    }

    /// Returns the width and height.
    #[must_use]
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    /// Returns true if the rectangle covers no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Returns the rectangle moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Point) -> Self {
        Self::new(self.min + delta, self.max + delta)
    }

    /// Returns the intersection of two rectangles.
    ///
    /// Disjoint rectangles produce an empty rectangle rather than `None`, so
    /// nested clips can be intersected without special cases.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x >= max.x || min.y >= max.y {
            Self::new(min, min)
        } else {
            Self::new(min, max)
        }
    }

    /// Converts to float coordinates.
    #[must_use]
    pub fn to_f32(&self) -> FRect {
        FRect::new(self.min.to_f32(), self.max.to_f32())
    }
}

/// An axis-aligned rectangle in float coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FRect {
    /// First corner.
    pub min: PointF,
    /// Opposite corner.
    pub max: PointF,
}

impl FRect {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min: PointF, max: PointF) -> Self {
        Self { min, max }
    }

    /// Builds the closed outline of the rectangle.
    #[must_use]
    pub fn path(&self) -> Path {
        let mut builder = PathBuilder::new();
        self.append_to(&mut builder);
        builder.build()
    }

    /// Appends the outline to an existing builder as a new closed contour.
    ///
    /// Corners are visited min, top-right, max, bottom-left, then back to min.
    pub fn append_to(&self, builder: &mut PathBuilder) {
        builder.move_to(self.min);
        builder.line_to(PointF::new(self.max.x, self.min.y));
        builder.line_to(self.max);
        builder.line_to(PointF::new(self.min.x, self.max.y));
        builder.line_to(self.min);
    }
}

/// A set of closed polygonal contours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    contours: Vec<Vec<PointF>>,
}

impl Path {
    /// Returns the contours. Every contour ends where it starts.
    #[must_use]
    pub fn contours(&self) -> &[Vec<PointF>] {
        &self.contours
    }

    /// Returns true if every contour is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.contours
            .iter()
            .all(|c| c.len() >= 2 && c.first() == c.last())
    }

    /// Returns the unsigned area enclosed by all contours (shoelace formula).
    #[must_use]
    pub fn area(&self) -> f32 {
        self.contours
            .iter()
            .map(|c| {
                c.windows(2)
                    .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
                    .sum::<f32>()
                    .abs()
                    * 0.5
            })
            .sum()
    }

    /// Returns the bounding box, or `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<FRect> {
        let mut points = self.contours.iter().flatten();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                PointF::new(min.x.min(p.x), min.y.min(p.y)),
                PointF::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(FRect::new(min, max))
    }

    /// Returns the path moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: PointF) -> Self {
        Self {
            contours: self
                .contours
                .iter()
                .map(|c| c.iter().map(|&p| p + delta).collect())
                .collect(),
        }
    }
}

/// Incrementally builds a [`Path`].
///
/// Open contours are closed when the next contour starts or when the path
/// is built, so callers never observe a partial outline.
#[derive(Debug, Default)]
pub struct PathBuilder {
    contours: Vec<Vec<PointF>>,
    current: Vec<PointF>,
}

impl PathBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new contour at `p`.
    pub fn move_to(&mut self, p: PointF) {
        self.close();
        self.current.push(p);
    }

    /// Extends the current contour to `p`.
    pub fn line_to(&mut self, p: PointF) {
        if self.current.is_empty() {
            self.current.push(PointF::default());
        }
        self.current.push(p);
    }

    /// Closes the current contour back to its starting point.
    pub fn close(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let start = self.current[0];
        if self.current.last() != Some(&start) || self.current.len() == 1 {
            self.current.push(start);
        }
        self.contours.push(std::mem::take(&mut self.current));
    }

    /// Finishes the path.
    #[must_use]
    pub fn build(mut self) -> Path {
        self.close();
        Path {
            contours: self.contours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frect_winding_order() {
        let r = FRect::new(PointF::new(1.0, 2.0), PointF::new(5.0, 7.0));
        let path = r.path();

        assert_eq!(path.contours().len(), 1);
        assert_eq!(
            path.contours()[0],
            vec![
                PointF::new(1.0, 2.0),
                PointF::new(5.0, 2.0),
                PointF::new(5.0, 7.0),
                PointF::new(1.0, 7.0),
                PointF::new(1.0, 2.0),
            ]
        );
        assert!(path.is_closed());
        assert!((path.area() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_rect_is_closed_with_zero_area() {
        let flat = FRect::new(PointF::new(3.0, 3.0), PointF::new(9.0, 3.0)).path();
        assert!(flat.is_closed());
        assert_eq!(flat.area(), 0.0);

        let point = FRect::new(PointF::new(4.0, 4.0), PointF::new(4.0, 4.0)).path();
        assert!(point.is_closed());
        assert_eq!(point.area(), 0.0);
    }

    #[test]
    fn test_builder_closes_open_contours() {
        let mut b = PathBuilder::new();
        b.move_to(PointF::new(0.0, 0.0));
        b.line_to(PointF::new(4.0, 0.0));
        b.line_to(PointF::new(4.0, 4.0));
        b.move_to(PointF::new(10.0, 10.0));
        b.line_to(PointF::new(12.0, 10.0));
        let path = b.build();

        assert_eq!(path.contours().len(), 2);
        assert!(path.is_closed());
        assert!((path.area() - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rect_intersect_disjoint_is_empty() {
        let a = Rect::new(Point::new(0, 0), Point::new(10, 10));
        let b = Rect::new(Point::new(20, 20), Point::new(30, 30));
        assert!(a.intersect(&b).is_empty());

        let c = Rect::new(Point::new(5, 5), Point::new(15, 15));
        assert_eq!(a.intersect(&c), Rect::new(Point::new(5, 5), Point::new(10, 10)));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(Point::new(10, 20), Point::new(110, 70));

        assert!(rect.contains(Point::new(50, 30)));
        assert!(!rect.contains(Point::new(5, 30)));
        assert!(!rect.contains(Point::new(110, 30)));
    }
}
