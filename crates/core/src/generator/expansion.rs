//! Corridor carving and room growth out of a single door.
//! This module exists to keep the sliding-placement search apart from door bookkeeping.
//! It does not decide which doors get activated; the public trigger methods do.

use super::*;
use crate::config::MAP_MARGIN;
use crate::geometry::{Rect, in_bounds};
use crate::types::{Direction, TileKind};

/// Which way a door faces, read off the edge of `room` it sits on.
pub(super) fn door_direction(room: Room, pos: Pos) -> Option<Direction> {
    if !room.contains(pos) {
        return None;
    }
    if pos.x == room.x {
        Some(Direction::Left)
    } else if pos.x == room.right() {
        Some(Direction::Right)
    } else if pos.y == room.y {
        Some(Direction::Up)
    } else if pos.y == room.bottom() {
        Some(Direction::Down)
    } else {
        None
    }
}

/// A `width`x`height` room whose near wall sits `reach` tiles out from `origin`,
/// centred on the origin's cross axis.
fn adjacent_room(origin: Pos, direction: Direction, reach: i32, width: i32, height: i32) -> Rect {
    match direction {
        Direction::Left => Rect::new(origin.x - reach - (width - 1), origin.y - height / 2, width, height),
        Direction::Right => Rect::new(origin.x + reach, origin.y - height / 2, width, height),
        Direction::Up => Rect::new(origin.x - width / 2, origin.y - reach - (height - 1), width, height),
        Direction::Down => Rect::new(origin.x - width / 2, origin.y + reach, width, height),
    }
}

impl<R: RandomSource> DungeonGenerator<R> {
    pub(super) fn expand_door(&mut self, id: DoorId) -> Result<Expansion, GenerationStop> {
        let door = *self.doors.get(id).ok_or(GenerationStop::UnknownDoor(id))?;
        if door.used {
            return Err(GenerationStop::DoorAlreadyUsed(door.pos));
        }
        self.ensure_room_budget()?;
        let door = self.doors.claim(id).ok_or(GenerationStop::DoorAlreadyUsed(door.pos))?;

        let direction = self
            .rooms
            .get(door.room)
            .and_then(|room| door_direction(room, door.pos))
            .ok_or(GenerationStop::InvalidDoorEdge(door.pos))?;

        let passage = self.config.passage_length;
        self.carve_corridor(door.pos, direction, 1, passage);

        let (width, height) = self.random_room_size();
        let (room, slide) = self.fit_adjacent_room(door.pos, direction, width, height)?;
        let room_id = self.commit_room(room);
        if slide > 0 {
            self.carve_corridor(door.pos, direction, passage + 1, passage + slide);
        }

        let mut new_doors = Vec::new();
        new_doors.extend(self.place_return_door(room_id, room, door.pos, direction));
        if self.config.extra_doors {
            new_doors.extend(self.add_extra_doors(room_id, room));
        }

        Ok(Expansion { door: id, new_room: Some((room_id, room)), new_doors, stop: None })
    }

    /// Carves floor from step `first` to step `last` outward from `origin`,
    /// walling both flanks. Stops at the map edge or at any committed room.
    /// Returns the number of floor cells carved.
    pub(super) fn carve_corridor(
        &mut self,
        origin: Pos,
        direction: Direction,
        first: i32,
        last: i32,
    ) -> i32 {
        let width = self.config.map_width;
        let height = self.config.map_height;
        let mut carved = 0;
        for step in first..=last {
            let cell = origin.step(direction, step);
            if !in_bounds(width, height, cell) || self.rooms.room_containing(cell).is_some() {
                break;
            }
            self.canvas.paint(cell, TileKind::Floor);
            for flank in direction.flanks(cell) {
                let occupied = self.rooms.room_containing(flank).is_some()
                    || self.canvas.grid().is_walkable(flank);
                if !occupied {
                    self.canvas.paint(flank, TileKind::Wall);
                }
            }
            carved += 1;
        }

        let from = origin.step(direction, first);
        self.events.push(GenerationEvent::CorridorCarved { from, direction, length: carved });
        debug!("Corridor from {from} heading {direction:?}: {carved} of {} tiles", last - first + 1);
        carved
    }

    /// Whether steps `1..=last` outward from `origin` avoid every committed room.
    fn corridor_is_clear(&self, origin: Pos, direction: Direction, last: i32) -> bool {
        (1..=last).all(|step| self.rooms.room_containing(origin.step(direction, step)).is_none())
    }

    /// Slides a candidate room outward one tile at a time until it fits.
    /// Returns the room and how many tiles it slid past the corridor's end.
    /// Candidates the corridor could only reach by crossing another room are refused.
    fn fit_adjacent_room(
        &mut self,
        origin: Pos,
        direction: Direction,
        width: i32,
        height: i32,
    ) -> Result<(Room, i32), GenerationStop> {
        let reach = self.config.passage_length + 1;
        let mut attempts = 0;
        for slide in 0..=self.config.expansion_attempts as i32 {
            attempts += 1;
            let candidate = adjacent_room(origin, direction, reach + slide, width, height);
            // Sliding only moves further from the map interior once a margin is crossed.
            if !candidate.within_margin(self.config.map_width, self.config.map_height, MAP_MARGIN) {
                break;
            }
            // The corridor only gets longer with each slide, so a crossed room stays crossed.
            if !self.corridor_is_clear(origin, direction, reach + slide - 1) {
                debug!("Corridor from {origin} heading {direction:?} runs into a room");
                break;
            }
            if !self.rooms.is_blocked(candidate, &self.doors) {
                return Ok((candidate, slide));
            }
        }
        Err(GenerationStop::ExpansionExhausted { pos: origin, attempts })
    }
}
