//! Plain geometry value types shared by collision, movement and painting.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum; used to turn a local offset into an absolute position.
    #[must_use]
    pub fn offset(self, by: Point) -> Self {
        Self { x: self.x + by.x, y: self.y + by.y }
    }
}

/// Width and height of a surface or box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxRegion {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Circle anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRegion {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl CircleRegion {
    #[must_use]
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self { cx, cy, radius }
    }
}

/// A shaped region tested by the collision predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    Box(BoxRegion),
    Circle(CircleRegion),
}

impl Region {
    /// Smallest axis-aligned box containing the region.
    #[must_use]
    pub fn bounds(&self) -> BoxRegion {
        match *self {
            Self::Box(b) => b,
            Self::Circle(c) => BoxRegion::new(c.cx - c.radius, c.cy - c.radius, c.radius * 2.0, c.radius * 2.0),
        }
    }

    /// Whether the region lies entirely within `0..=width` × `0..=height`.
    #[must_use]
    pub fn within(&self, viewport: Size) -> bool {
        let b = self.bounds();
        b.x >= 0.0 && b.y >= 0.0 && b.right() <= viewport.width && b.bottom() <= viewport.height
    }
}
