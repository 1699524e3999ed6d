//! Integer geometry for the play field.
//!
//! World coordinates have `(0, 0)` at the top-left of the viewport and `y`
//! growing downward.  Everything here is plain data with no side effects.

use std::ops::{Add, Mul, Neg};

use serde::{Deserialize, Serialize};

// ── Vector ────────────────────────────────────────────────────────────────────

/// Integer displacement or velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    pub const ZERO: Vector2i = Vector2i { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Add for Vector2i {
    type Output = Vector2i;

    fn add(self, rhs: Vector2i) -> Vector2i {
        Vector2i::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Vector2i {
    type Output = Vector2i;

    fn neg(self) -> Vector2i {
        Vector2i::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Vector2i {
    type Output = Vector2i;

    fn mul(self, k: i32) -> Vector2i {
        Vector2i::new(self.x * k, self.y * k)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.  Width and height are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Panics if `width` or `height` is not positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "rect size must be positive, got {width}x{height}"
        );
        Self { x, y, width, height }
    }

    /// Build a rect whose `center()` is exactly `center`.
    pub fn from_center(center: Vector2i, width: i32, height: i32) -> Self {
        Self::new(center.x - width / 2, center.y - height / 2, width, height)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2i {
        Vector2i::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn translate(&mut self, by: Vector2i) {
        self.x += by.x;
        self.y += by.y;
    }

    pub fn translated(&self, by: Vector2i) -> Rect {
        let mut moved = *self;
        moved.translate(by);
        moved
    }

    /// Strict overlap: rects that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The visible play area, anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        classify_bounds(rect, self) == (true, true)
    }
}

/// Per-axis containment of `rect` in `viewport`: `(inside_x, inside_y)`.
///
/// Touching an edge exactly (left = 0, right = width, …) counts as inside.
pub fn classify_bounds(rect: &Rect, viewport: &Viewport) -> (bool, bool) {
    let inside_x = !(rect.left() < 0 || rect.right() > viewport.width);
    let inside_y = !(rect.top() < 0 || rect.bottom() > viewport.height);
    (inside_x, inside_y)
}
