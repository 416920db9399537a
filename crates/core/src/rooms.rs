//! Ordered registry of committed rooms and the overlap queries placement relies on.

use slotmap::SlotMap;

use crate::doors::DoorRegistry;
use crate::geometry::{Rect, rects_overlap};
use crate::types::{Pos, RoomId};

/// A committed room is its bounding rectangle, walls included.
pub type Room = Rect;

#[derive(Clone, Debug, Default)]
pub struct RoomRegistry {
    rooms: SlotMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, room: Room) -> RoomId {
        self.rooms.insert(room)
    }

    pub fn get(&self, id: RoomId) -> Option<Room> {
        self.rooms.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in commit order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, Room)> + '_ {
        self.rooms.iter().map(|(id, room)| (id, *room))
    }

    pub fn overlaps_any(&self, candidate: Rect) -> bool {
        self.rooms.values().any(|room| rects_overlap(*room, candidate))
    }

    /// Whether `candidate` collides with a room or with any door's corridor footprint.
    pub fn is_blocked(&self, candidate: Rect, doors: &DoorRegistry) -> bool {
        self.overlaps_any(candidate)
            || doors.footprints().any(|footprint| rects_overlap(footprint, candidate))
    }

    /// The first committed room whose rectangle contains `pos`.
    pub fn room_containing(&self, pos: Pos) -> Option<(RoomId, Room)> {
        self.iter().find(|(_, room)| room.contains(pos))
    }
}
