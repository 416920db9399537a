//! Random room placement and committing room geometry to the tile layer.

use super::*;
use crate::config::MAP_MARGIN;
use crate::geometry::Rect;
use crate::types::TileKind;

impl<R: RandomSource> DungeonGenerator<R> {
    pub(super) fn ensure_room_budget(&self) -> Result<(), GenerationStop> {
        if self.room_count >= self.max_rooms {
            return Err(GenerationStop::RoomCapReached { max_rooms: self.max_rooms });
        }
        Ok(())
    }

    pub(super) fn random_room_size(&mut self) -> (i32, i32) {
        let width = self.rng.between(self.config.room_min_size, self.config.room_max_size);
        let height = self.rng.between(self.config.room_min_size, self.config.room_max_size);
        (width, height)
    }

    pub(super) fn place_random_room(&mut self) -> Result<(RoomId, Room), GenerationStop> {
        if let Err(stop) = self.ensure_room_budget() {
            info!("Room cap reached, not placing another room");
            return Err(stop);
        }

        let (width, height) = self.random_room_size();
        let x = self.rng.between(MAP_MARGIN, self.config.map_width - width - MAP_MARGIN);
        let y = self.rng.between(MAP_MARGIN, self.config.map_height - height - MAP_MARGIN);
        let candidate = Rect { x, y, width, height };

        if self.rooms.is_blocked(candidate, &self.doors) {
            debug!("Rejected room candidate {candidate:?}");
            return Err(GenerationStop::PlacementRejected(candidate));
        }
        Ok((self.commit_room(candidate), candidate))
    }

    /// Paints walls and floor, registers the room, and counts it against the cap.
    pub(super) fn commit_room(&mut self, room: Room) -> RoomId {
        for cell in room.cells() {
            let tile = if room.is_perimeter(cell) { TileKind::Wall } else { TileKind::Floor };
            self.canvas.paint(cell, tile);
        }
        let id = self.rooms.insert(room);
        self.room_count += 1;
        self.events.push(GenerationEvent::RoomCommitted { room: id, bounds: room });
        info!(
            "Room {} placed at ({}, {}) size {}x{}",
            self.room_count, room.x, room.y, room.width, room.height
        );
        id
    }
}
