//! The committed tile layer and the paint-callback seam used by renderers.

use std::fmt;

use crate::geometry::in_bounds;
use crate::types::{Pos, TileKind};

/// Receives every tile the generator commits, once per paint.
pub trait TilePainter {
    fn paint_wall(&mut self, pos: Pos);
    fn paint_floor(&mut self, pos: Pos);
    fn paint_door(&mut self, pos: Pos);
}

/// Row-major grid of committed tiles. Cells nothing has painted are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Option<TileKind>>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![None; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        self.index(pos).and_then(|index| self.tiles[index])
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_some_and(TileKind::is_walkable)
    }

    /// Writes a tile; returns `false` when `pos` is off the map.
    pub fn set(&mut self, pos: Pos, tile: TileKind) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.tiles[index] = Some(tile);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|cell| **cell == Some(tile)).count()
    }

    pub fn cells(&self) -> &[Option<TileKind>] {
        &self.tiles
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        in_bounds(self.width as i32, self.height as i32, pos)
            .then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }
}

impl TilePainter for TileGrid {
    fn paint_wall(&mut self, pos: Pos) {
        self.set(pos, TileKind::Wall);
    }

    fn paint_floor(&mut self, pos: Pos) {
        self.set(pos, TileKind::Floor);
    }

    fn paint_door(&mut self, pos: Pos) {
        self.set(pos, TileKind::Door);
    }
}

/// The generator's own grid plus an optional external painter that mirrors it.
pub(crate) struct Canvas {
    grid: TileGrid,
    painter: Option<Box<dyn TilePainter>>,
}

impl Canvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { grid: TileGrid::new(width, height), painter: None }
    }

    pub(crate) fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub(crate) fn set_painter(&mut self, painter: Box<dyn TilePainter>) {
        self.painter = Some(painter);
    }

    pub(crate) fn paint(&mut self, pos: Pos, tile: TileKind) {
        if !self.grid.set(pos, tile) {
            return;
        }
        let Some(painter) = self.painter.as_mut() else {
            return;
        };
        match tile {
            TileKind::Wall => painter.paint_wall(pos),
            TileKind::Floor => painter.paint_floor(pos),
            TileKind::Door => painter.paint_door(pos),
        }
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("grid", &self.grid)
            .field("painter", &self.painter.is_some())
            .finish()
    }
}
