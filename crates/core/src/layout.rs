//! Renderer-facing snapshot of a generated dungeon.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::generator::DungeonGenerator;
use crate::geometry::Rect;
use crate::rng::RandomSource;
use crate::types::{Pos, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LayoutDoor {
    pub x: i32,
    pub y: i32,
    pub used: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DungeonLayout {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub max_rooms: u32,
    pub rooms: Vec<Rect>,
    pub doors: Vec<LayoutDoor>,
    #[serde(skip)]
    pub tiles: Vec<Option<TileKind>>,
}

impl DungeonLayout {
    pub(crate) fn capture<R: RandomSource>(generator: &DungeonGenerator<R>) -> Self {
        let grid = generator.tiles();
        Self {
            width: grid.width(),
            height: grid.height(),
            seed: generator.seed(),
            max_rooms: generator.max_rooms(),
            rooms: generator.list_rooms(),
            doors: generator
                .list_doors()
                .into_iter()
                .map(|door| LayoutDoor { x: door.pos.x, y: door.pos.y, used: door.used })
                .collect(),
            tiles: grid.cells().to_vec(),
        }
    }

    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles[y * self.width + x]
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                None => 0,
                Some(TileKind::Wall) => 1,
                Some(TileKind::Floor) => 2,
                Some(TileKind::Door) => 3,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.x.to_le_bytes());
            bytes.extend(room.y.to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
        }

        bytes.extend((self.doors.len() as u32).to_le_bytes());
        for door in &self.doors {
            bytes.extend(door.x.to_le_bytes());
            bytes.extend(door.y.to_le_bytes());
            bytes.push(u8::from(door.used));
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    /// Text map: `#` wall, `.` floor, `+` unused door, `'` connected door, blank for void.
    pub fn render_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .tiles
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        None => ' ',
                        Some(TileKind::Wall) => '#',
                        Some(TileKind::Floor) => '.',
                        Some(TileKind::Door) => '+',
                    })
                    .collect()
            })
            .collect();
        for door in self.doors.iter().filter(|door| door.used) {
            if let Some(cell) =
                rows.get_mut(door.y as usize).and_then(|row| row.get_mut(door.x as usize))
            {
                *cell = '\'';
            }
        }

        let mut out = String::with_capacity(self.tiles.len() + self.height);
        for row in rows {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_layout() -> DungeonLayout {
        let mut tiles = vec![None; 5 * 3];
        for x in 0..5 {
            tiles[x] = Some(TileKind::Wall);
            tiles[2 * 5 + x] = Some(TileKind::Wall);
        }
        tiles[5] = Some(TileKind::Wall);
        tiles[5 + 1] = Some(TileKind::Floor);
        tiles[5 + 2] = Some(TileKind::Door);
        tiles[5 + 3] = Some(TileKind::Door);
        DungeonLayout {
            width: 5,
            height: 3,
            seed: Some(1),
            max_rooms: 1,
            rooms: vec![Rect::new(0, 0, 3, 3)],
            doors: vec![LayoutDoor { x: 2, y: 1, used: false }, LayoutDoor { x: 3, y: 1, used: true }],
            tiles,
        }
    }

    #[test]
    fn ascii_marks_connected_doors_and_trims_void() {
        let rendered = tiny_layout().render_ascii();
        assert_eq!(rendered, "#####\n#.+'\n#####\n");
    }

    #[test]
    fn fingerprint_tracks_door_state() {
        let layout = tiny_layout();
        let mut toggled = layout.clone();
        toggled.doors[0].used = true;
        assert_eq!(layout.fingerprint(), tiny_layout().fingerprint());
        assert_ne!(layout.fingerprint(), toggled.fingerprint());
    }

    #[test]
    fn tile_lookup_outside_the_map_is_void() {
        let layout = tiny_layout();
        assert_eq!(layout.tile_at(Pos::new(1, 1)), Some(TileKind::Floor));
        assert_eq!(layout.tile_at(Pos::new(5, 1)), None);
        assert_eq!(layout.tile_at(Pos::new(-1, 1)), None);
    }
}
