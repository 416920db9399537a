//! Door registry: stable ids, one door per cell, and the used/unused transition.

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::geometry::{Rect, chebyshev, door_footprint};
use crate::types::{Door, DoorId, Pos, RoomId};

#[derive(Clone, Debug, Default)]
pub struct DoorRegistry {
    doors: SlotMap<DoorId, Door>,
    occupied: HashSet<Pos>,
}

impl DoorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a door unless one already sits on `pos`.
    pub(crate) fn insert(&mut self, pos: Pos, room: RoomId, used: bool) -> Option<DoorId> {
        if !self.occupied.insert(pos) {
            return None;
        }
        Some(self.doors.insert(Door { pos, room, used }))
    }

    pub fn get(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id)
    }

    pub fn contains_pos(&self, pos: Pos) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    /// Doors in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (DoorId, &Door)> + '_ {
        self.doors.iter()
    }

    pub fn unused(&self) -> impl Iterator<Item = DoorId> + '_ {
        self.doors.iter().filter(|(_, door)| !door.used).map(|(id, _)| id)
    }

    /// Flips an unused door to used and hands back its prior state.
    /// Returns `None` for unknown or already used doors, so a door can only be claimed once.
    pub(crate) fn claim(&mut self, id: DoorId) -> Option<Door> {
        let door = self.doors.get_mut(id)?;
        if door.used {
            return None;
        }
        let claimed = *door;
        door.used = true;
        Some(claimed)
    }

    pub fn footprints(&self) -> impl Iterator<Item = Rect> + '_ {
        self.doors.values().map(|door| door_footprint(door.pos))
    }

    /// Whether any door lies within Chebyshev distance `< distance` of `pos`.
    pub fn any_within(&self, pos: Pos, distance: u32) -> bool {
        self.doors.values().any(|door| chebyshev(door.pos, pos) < distance)
    }

    /// Unused doors whose centre is closer than `radius` tiles to `(x, y)`.
    pub fn unused_near(&self, x: f32, y: f32, radius: f32) -> Vec<DoorId> {
        self.doors
            .iter()
            .filter(|(_, door)| !door.used)
            .filter(|(_, door)| {
                let dx = door.pos.x as f32 - x;
                let dy = door.pos.y as f32 - y;
                (dx * dx + dy * dy).sqrt() < radius
            })
            .map(|(id, _)| id)
            .collect()
    }
}
