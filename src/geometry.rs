//! Axis-aligned boxes and direction vectors.
//!
//! Coordinates follow screen convention: x grows rightward, y grows downward,
//! and a `Rect` is anchored at its top-left corner.

use crate::constants::{HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 {
            None
        } else {
            Some(Vec2::new(self.x / len, self.y / len))
        }
    }

    pub fn scale(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// The whole play area.
    pub fn screen() -> Self {
        Self::new(0.0, 0.0, WIDTH, HEIGHT)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translate(&mut self, d: Vec2) {
        self.x += d.x;
        self.y += d.y;
    }

    /// Strict overlap: boxes that merely share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether a circle overlaps this box (closest-point test).
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let nx = center.x.clamp(self.left(), self.right());
        let ny = center.y.clamp(self.top(), self.bottom());
        let dx = center.x - nx;
        let dy = center.y - ny;
        dx * dx + dy * dy < radius * radius
    }
}

/// Per-axis containment of `rect` in the play area: `(horizontal, vertical)`,
/// `true` meaning fully inside on that axis.
pub fn check_bound(rect: &Rect) -> (bool, bool) {
    let horizontal = !(rect.left() < 0.0 || WIDTH < rect.right());
    let vertical = !(rect.top() < 0.0 || HEIGHT < rect.bottom());
    (horizontal, vertical)
}

pub fn in_bounds(rect: &Rect) -> bool {
    check_bound(rect) == (true, true)
}

/// Unit vector pointing from the centre of `org` to the centre of `dst`.
/// Coincident centres yield straight down.
pub fn calc_orientation(org: &Rect, dst: &Rect) -> Vec2 {
    let from = org.center();
    let to = dst.center();
    Vec2::new(to.x - from.x, to.y - from.y)
        .normalized()
        .unwrap_or(Vec2::new(0.0, 1.0))
}
