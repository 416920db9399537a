//! Shared fixtures for the generator test suites.
//! This module exists so tests can script exact random draws and inspect layouts.
//! It does not own production generation logic.

use std::collections::{BTreeSet, VecDeque};

use super::*;
use crate::config::RoomCap;
use crate::types::TileKind;

/// Replays scripted draws in order, then falls back to a seeded stream.
/// Scripted values are clamped into the requested range.
pub(super) struct ScriptedSource {
    script: VecDeque<i32>,
    fallback: ChaChaSource,
}

impl ScriptedSource {
    pub(super) fn new(script: &[i32]) -> Self {
        Self { script: script.iter().copied().collect(), fallback: ChaChaSource::from_seed(0) }
    }

    pub(super) fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        match self.script.pop_front() {
            Some(value) => value.clamp(lo, hi.max(lo)),
            None => self.fallback.between(lo, hi),
        }
    }
}

/// 40x40 map, rooms 4..=8, a fixed cap, single-tile corridors, no extra doors.
pub(super) fn fixed_config(max_rooms: u32) -> GeneratorConfig {
    GeneratorConfig {
        max_rooms: RoomCap::Fixed(max_rooms),
        extra_doors: false,
        ..GeneratorConfig::default()
    }
}

pub(super) fn scripted(config: GeneratorConfig, script: &[i32]) -> DungeonGenerator<ScriptedSource> {
    DungeonGenerator::with_source(config, ScriptedSource::new(script))
        .expect("test config should be valid")
}

/// Draws for a 6x6 room at (10, 10) with a single door on its right wall at (15, 13).
pub(super) const RIGHT_DOOR_ROOM: [i32; 10] = [6, 6, 10, 10, 12, 13, 12, 13, 1, 1];

pub(super) fn assert_layout_invariants<R: RandomSource>(generator: &DungeonGenerator<R>) {
    let rooms = generator.list_rooms();
    for (index, left) in rooms.iter().enumerate() {
        for right in &rooms[index + 1..] {
            assert!(!left.overlaps(*right), "rooms overlap: {left:?} vs {right:?}");
        }
    }

    let mut keys = BTreeSet::new();
    for (_, door) in generator.doors().iter() {
        assert!(keys.insert(door.key()), "duplicate door at {}", door.key());
        let room = generator.rooms().get(door.room).expect("door owner should be registered");
        assert!(on_room_edge(room, door.pos), "door {} is not on an edge of {room:?}", door.pos);
        assert_eq!(generator.tiles().tile_at(door.pos), Some(TileKind::Door));
    }

    assert!(generator.room_count() <= generator.max_rooms());
    assert_eq!(generator.room_count() as usize, rooms.len());
}

pub(super) fn on_room_edge(room: Room, pos: Pos) -> bool {
    let on_vertical = (pos.x == room.x || pos.x == room.right())
        && pos.y > room.y
        && pos.y < room.bottom();
    let on_horizontal = (pos.y == room.y || pos.y == room.bottom())
        && pos.x > room.x
        && pos.x < room.right();
    on_vertical != on_horizontal
}
