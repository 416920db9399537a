//! Error types for configuration and for branches of the dungeon that stop growing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Rect;
use crate::types::{DoorId, Pos};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("room_min_size must be at least 3 so doors have an interior cell, got {0}")]
    RoomTooSmall(i32),
    #[error("room_min_size {min} is larger than room_max_size {max}")]
    InvertedRoomSize { min: i32, max: i32 },
    #[error("map {width}x{height} cannot fit a {room_max_size}-tile room inside its 2-tile margin")]
    MapTooSmall { width: i32, height: i32, room_max_size: i32 },
    #[error("passage_length must be 1 or 3, got {0}")]
    InvalidPassageLength(i32),
    #[error("max_rooms range {min}..={max} is inverted")]
    InvertedRoomCap { min: u32, max: u32 },
    #[error("trigger_radius must be a finite non-negative number, got {0}")]
    InvalidTriggerRadius(f32),
}

/// Why one step of generation did not produce a room.
///
/// None of these are fatal: each one means a single branch of the dungeon did
/// not grow, and the generator stays usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationStop {
    #[error("room cap of {max_rooms} reached")]
    RoomCapReached { max_rooms: u32 },
    #[error("candidate room {0:?} overlaps existing rooms or corridors")]
    PlacementRejected(Rect),
    #[error("door {0:?} is not registered")]
    UnknownDoor(DoorId),
    #[error("door at {0} has already been expanded")]
    DoorAlreadyUsed(Pos),
    #[error("door at {0} does not lie on an edge of its room")]
    InvalidDoorEdge(Pos),
    #[error("no room fits beyond door at {pos} after {attempts} attempts")]
    ExpansionExhausted { pos: Pos, attempts: u32 },
}
