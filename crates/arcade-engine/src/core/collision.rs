use glam::Vec2;
use std::f32::consts::TAU;

/// Axis-aligned rectangle in screen space (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Length of the overlap of two 1D spans `[a, a + aw)` and `[b, b + bw)`.
/// Negative when the spans are apart.
pub fn span_overlap(a: i32, aw: i32, b: i32, bw: i32) -> i32 {
    (a + aw).min(b + bw) - a.max(b)
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Plain angular proximity. Does not wrap across the 0/2π seam, so two
/// angles on either side of it are never considered close.
pub fn angles_within(a: f32, b: f32, threshold: f32) -> bool {
    (a - b).abs() < threshold
}
