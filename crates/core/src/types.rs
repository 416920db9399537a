use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::GenerationStop;
use crate::geometry::Rect;

new_key_type! {
    pub struct RoomId;
    pub struct DoorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    /// Moves `distance` tiles in `direction`.
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy * distance, x: self.x + dx * distance }
    }

    /// Canonical `"x,y"` key used to deduplicate doors.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Door,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Door)
    }
}

/// The cardinal direction a door faces, pointing away from its room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// The two perpendicular neighbours of `pos`, used for corridor flank walls.
    pub fn flanks(self, pos: Pos) -> [Pos; 2] {
        if self.is_horizontal() {
            [Pos { y: pos.y - 1, x: pos.x }, Pos { y: pos.y + 1, x: pos.x }]
        } else {
            [Pos { y: pos.y, x: pos.x - 1 }, Pos { y: pos.y, x: pos.x + 1 }]
        }
    }
}

/// A door as seen by callers: where it is, which room owns it, and whether
/// its corridor has been grown yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    pub pos: Pos,
    pub room: RoomId,
    pub used: bool,
}

impl Door {
    pub fn key(&self) -> String {
        self.pos.key()
    }
}

/// Structured record of what the generator committed, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationEvent {
    RoomCommitted { room: RoomId, bounds: Rect },
    DoorPlaced { door: DoorId, pos: Pos, used: bool },
    CorridorCarved { from: Pos, direction: Direction, length: i32 },
    ExpansionStopped { door: DoorId, reason: GenerationStop },
}
