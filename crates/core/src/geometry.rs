//! Axis-aligned rectangle math shared by placement, doors, and corridors.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

/// An integer tile rectangle. `x`/`y` is the top-left cell and the extent
/// includes the one-tile wall perimeter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn is_perimeter(self, pos: Pos) -> bool {
        self.contains(pos)
            && (pos.x == self.x || pos.x == self.right() || pos.y == self.y || pos.y == self.bottom())
    }

    pub fn overlaps(self, other: Rect) -> bool {
        rects_overlap(self, other)
    }

    /// Whether the rectangle keeps at least `margin` tiles clear of every map edge.
    pub fn within_margin(self, map_width: i32, map_height: i32, margin: i32) -> bool {
        self.x >= margin
            && self.y >= margin
            && self.x + self.width <= map_width - margin
            && self.y + self.height <= map_height - margin
    }

    /// Row-major iteration over every cell.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Pos { y, x }))
    }
}

/// Strict AABB test. Rectangles that only touch along an edge do not overlap.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// The 3x3 box around a door that stands in for the corridor it will grow.
///
/// This is a coarse occupancy proxy: it ignores corridor cells past the first
/// tile and reserves space on the room side of the door as well.
pub fn door_footprint(pos: Pos) -> Rect {
    Rect { x: pos.x - 1, y: pos.y - 1, width: 3, height: 3 }
}

pub fn in_bounds(width: i32, height: i32, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height
}

pub fn chebyshev(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x).max(a.y.abs_diff(b.y))
}
