#![forbid(unsafe_code)]

//! Screen-space geometry primitives.
//!
//! Coordinates are `f32` pixels in canvas space with the origin at the
//! top-left, `x` growing rightward and `y` growing downward. Containment
//! is half-open: a point on the left or top edge of a [`Bounds`] is
//! inside, a point on the right or bottom edge is outside. This keeps
//! adjacent siblings from both claiming the shared edge.

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment test: left/top edges are inside,
    /// right/bottom edges are outside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Area in square pixels. Empty rectangles report zero.
    #[must_use]
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- containment ---

    #[test]
    fn contains_is_half_open() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(Point::new(10.0, 20.0)));
        assert!(b.contains(Point::new(109.9, 69.9)));
        assert!(!b.contains(Point::new(110.0, 20.0)));
        assert!(!b.contains(Point::new(10.0, 70.0)));
        assert!(!b.contains(Point::new(9.9, 20.0)));
    }

    #[test]
    fn empty_bounds_contain_nothing() {
        let b = Bounds::new(5.0, 5.0, 0.0, 40.0);
        assert!(b.is_empty());
        assert!(!b.contains(Point::new(5.0, 5.0)));
        assert_eq!(b.area(), 0.0);
    }

    #[test]
    fn edges_and_area() {
        let b = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(b.right(), 4.0);
        assert_eq!(b.bottom(), 6.0);
        assert_eq!(b.area(), 12.0);
    }
}
