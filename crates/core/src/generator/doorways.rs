//! Door placement on room walls: the initial per-side doors, the extra side
//! doors for grown rooms, and the door that links a grown room back to its corridor.

use super::*;
use crate::config::MAP_MARGIN;
use crate::rng::take_random;
use crate::types::{Direction, TileKind};

/// Doors closer than this (Chebyshev) to an existing door are skipped by the extra-door pass.
const EXTRA_DOOR_SPACING: u32 = 2;
const MAX_EXTRA_DOORS: i32 = 3;

impl<R: RandomSource> DungeonGenerator<R> {
    /// Whether a corridor leaving `room` through `side` has space before the map edge.
    fn side_has_clearance(&self, room: Room, side: Direction) -> bool {
        match side {
            Direction::Left => room.x > MAP_MARGIN,
            Direction::Right => room.x + room.width < self.config.map_width - MAP_MARGIN,
            Direction::Up => room.y > MAP_MARGIN,
            Direction::Down => room.y + room.height < self.config.map_height - MAP_MARGIN,
        }
    }

    /// One candidate per clear side, at a random interior offset along that side.
    fn door_candidates(&mut self, room: Room) -> Vec<Pos> {
        let mut candidates = Vec::with_capacity(4);
        for side in Direction::ALL {
            if !self.side_has_clearance(room, side) {
                continue;
            }
            let pos = match side {
                Direction::Left => Pos { y: self.rng.between(room.y + 1, room.bottom() - 1), x: room.x },
                Direction::Right => {
                    Pos { y: self.rng.between(room.y + 1, room.bottom() - 1), x: room.right() }
                }
                Direction::Up => Pos { y: room.y, x: self.rng.between(room.x + 1, room.right() - 1) },
                Direction::Down => {
                    Pos { y: room.bottom(), x: self.rng.between(room.x + 1, room.right() - 1) }
                }
            };
            candidates.push(pos);
        }
        candidates
    }

    /// Opens between one and four doors in a freshly placed room.
    pub(super) fn generate_doors(&mut self, room_id: RoomId, room: Room) -> Vec<DoorId> {
        let mut candidates = self.door_candidates(room);
        if candidates.is_empty() {
            debug!("Room at ({}, {}) has no wall with clearance for a door", room.x, room.y);
            return Vec::new();
        }

        let limit = candidates.len().min(4) as i32;
        let count = self.rng.between(1, limit);
        let mut created = Vec::new();
        for _ in 0..count {
            let Some(pos) = take_random(&mut self.rng, &mut candidates) else {
                break;
            };
            if let Some(door) = self.place_door(pos, room_id, false) {
                created.push(door);
            }
        }
        created
    }

    /// Adds up to three unused doors along the left and right walls of a grown room,
    /// keeping clear of the corners and of every existing door.
    pub(super) fn add_extra_doors(&mut self, room_id: RoomId, room: Room) -> Vec<DoorId> {
        let rows = (room.y + 2)..=(room.bottom() - 2);
        let mut candidates = Vec::new();
        for (side, x) in [(Direction::Left, room.x), (Direction::Right, room.right())] {
            if self.side_has_clearance(room, side) {
                candidates.extend(rows.clone().map(|y| Pos { y, x }));
            }
        }

        let count = self.rng.between(0, MAX_EXTRA_DOORS);
        let mut created = Vec::new();
        for _ in 0..count {
            let Some(pos) = take_random(&mut self.rng, &mut candidates) else {
                break;
            };
            if self.doors.any_within(pos, EXTRA_DOOR_SPACING) {
                debug!("Skipped extra door at {pos}: too close to another door");
                continue;
            }
            if let Some(door) = self.place_door(pos, room_id, false) {
                created.push(door);
            }
        }
        created
    }

    /// The pre-used door on the grown room's wall facing back toward `origin`.
    pub(super) fn place_return_door(
        &mut self,
        room_id: RoomId,
        room: Room,
        origin: Pos,
        direction: Direction,
    ) -> Option<DoorId> {
        let pos = match direction.reversed() {
            Direction::Left => Pos { y: origin.y, x: room.x },
            Direction::Right => Pos { y: origin.y, x: room.right() },
            Direction::Up => Pos { y: room.y, x: origin.x },
            Direction::Down => Pos { y: room.bottom(), x: origin.x },
        };
        self.place_door(pos, room_id, true)
    }

    /// Replaces the wall at `pos` with a door; refuses cells that already hold one.
    pub(super) fn place_door(&mut self, pos: Pos, room_id: RoomId, used: bool) -> Option<DoorId> {
        let Some(door) = self.doors.insert(pos, room_id, used) else {
            debug!("Door at {pos} already exists");
            return None;
        };
        self.canvas.paint(pos, TileKind::Door);
        self.events.push(GenerationEvent::DoorPlaced { door, pos, used });
        info!("Door placed at {pos}{}", if used { " (connected)" } else { "" });
        Some(door)
    }
}
