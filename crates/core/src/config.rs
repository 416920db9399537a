//! Generator configuration: map bounds, room sizing, and growth limits.
//! Configs are plain serde structs so they can be built in code or loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::RandomSource;

/// Rooms never come closer than this to any map edge.
pub const MAP_MARGIN: i32 = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub room_min_size: i32,
    pub room_max_size: i32,
    pub max_rooms: RoomCap,
    /// Corridor tiles carved outward from a door before the next room.
    pub passage_length: i32,
    /// Extra one-tile slides tried after the first adjacent placement fails.
    pub expansion_attempts: u32,
    /// Whether rooms grown from a corridor get additional side-wall doors.
    pub extra_doors: bool,
    /// Distance in tiles at which an agent activates an unused door.
    pub trigger_radius: f32,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            map_width: 40,
            map_height: 40,
            room_min_size: 4,
            room_max_size: 8,
            max_rooms: RoomCap::Between { min: 10, max: 50 },
            passage_length: 1,
            expansion_attempts: 30,
            extra_doors: true,
            trigger_radius: 0.5,
            seed: None,
        }
    }
}

/// The room budget: a fixed number, or a range drawn once per generator.
///
/// In TOML this is either `max_rooms = 12` or `max_rooms = { min = 10, max = 50 }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomCap {
    Fixed(u32),
    Between { min: u32, max: u32 },
}

impl RoomCap {
    pub fn draw(self, rng: &mut impl RandomSource) -> u32 {
        match self {
            Self::Fixed(cap) => cap,
            Self::Between { min, max } => {
                let lo = i32::try_from(min).unwrap_or(i32::MAX);
                let hi = i32::try_from(max).unwrap_or(i32::MAX);
                rng.between(lo, hi).unsigned_abs()
            }
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_min_size < 3 {
            return Err(ConfigError::RoomTooSmall(self.room_min_size));
        }
        if self.room_min_size > self.room_max_size {
            return Err(ConfigError::InvertedRoomSize {
                min: self.room_min_size,
                max: self.room_max_size,
            });
        }
        let required = self.room_max_size + 2 * MAP_MARGIN;
        if self.map_width < required || self.map_height < required {
            return Err(ConfigError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
                room_max_size: self.room_max_size,
            });
        }
        if self.passage_length != 1 && self.passage_length != 3 {
            return Err(ConfigError::InvalidPassageLength(self.passage_length));
        }
        if let RoomCap::Between { min, max } = self.max_rooms
            && min > max
        {
            return Err(ConfigError::InvertedRoomCap { min, max });
        }
        if !self.trigger_radius.is_finite() || self.trigger_radius < 0.0 {
            return Err(ConfigError::InvalidTriggerRadius(self.trigger_radius));
        }
        Ok(())
    }
}
