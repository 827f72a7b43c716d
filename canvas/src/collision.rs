//! Overlap predicates between shaped regions.
//!
//! Every predicate is total: degenerate input (NaN coordinates, negative
//! sizes) falls out of the comparisons as "no overlap" rather than failing.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::geometry::{BoxRegion, CircleRegion, Region};

/// Something that occupies a region this frame.
pub trait Hittable {
    fn region(&self) -> Region;
}

impl Hittable for Region {
    fn region(&self) -> Region {
        *self
    }
}

/// Test two regions for overlap, dispatching on the shape pair.
#[must_use]
pub fn overlaps(a: &Region, b: &Region) -> bool {
    match (a, b) {
        (Region::Box(a), Region::Box(b)) => box_overlap(a, b),
        (Region::Circle(a), Region::Circle(b)) => circle_overlap(a, b),
        (Region::Circle(c), Region::Box(b)) | (Region::Box(b), Region::Circle(c)) => circle_box_overlap(c, b),
    }
}

/// Test two hittable things for overlap.
#[must_use]
pub fn colliding(a: &impl Hittable, b: &impl Hittable) -> bool {
    overlaps(&a.region(), &b.region())
}

/// AABB test with inclusive edges: boxes that merely touch overlap.
#[must_use]
pub fn box_overlap(a: &BoxRegion, b: &BoxRegion) -> bool {
    a.right() >= b.x && a.x <= b.right() && a.bottom() >= b.y && a.y <= b.bottom()
}

/// Circles overlap when their centers are closer than the sum of their radii.
#[must_use]
pub fn circle_overlap(a: &CircleRegion, b: &CircleRegion) -> bool {
    let dx = b.cx - a.cx;
    let dy = b.cy - a.cy;
    dx.hypot(dy) < a.radius + b.radius
}

/// Clamped-distance test: the point of the box nearest the circle center
/// must lie within `radius` of it.
#[must_use]
pub fn circle_box_overlap(circle: &CircleRegion, b: &BoxRegion) -> bool {
    if ![b.x, b.y, b.width, b.height].iter().all(|v| v.is_finite()) {
        return false;
    }
    // f64::clamp asserts min <= max, so clamp by hand.
    let nearest_x = circle.cx.max(b.x.min(b.right())).min(b.x.max(b.right()));
    let nearest_y = circle.cy.max(b.y.min(b.bottom())).min(b.y.max(b.bottom()));
    let dx = circle.cx - nearest_x;
    let dy = circle.cy - nearest_y;
    dx.mul_add(dx, dy * dy) <= circle.radius * circle.radius
}
