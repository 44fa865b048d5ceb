//! Overlap tests for axis-aligned shapes
//!
//! Two checks cover every interaction in the game: rectangle-vs-rectangle
//! for bullets hitting enemies, and circle-vs-rectangle for the round
//! player ship brushing an enemy. Both are exclusive at the boundary:
//! shapes that merely touch do not collide.

use glam::Vec2;

/// Axis-aligned rectangle, min corner + extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// A circle, center + radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Axis-aligned rectangle intersection, strict on all four sides
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Clamped-distance circle-vs-rectangle test
///
/// Per-axis distance from the circle center to the rect center decides
/// the cheap cases; only when the center sits diagonally off a corner
/// does the squared corner distance get compared against the radius.
pub fn circle_rect_overlap(c: &Circle, r: &Rect) -> bool {
    let half = r.size * 0.5;
    let dist = (c.center - r.center()).abs();

    if dist.x > half.x + c.radius || dist.y > half.y + c.radius {
        return false;
    }
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }

    let corner = dist - half;
    corner.length_squared() <= c.radius * c.radius
}
