//! Incremental dungeon growth: rooms, doors, and corridors grown one door at a time.
//! The generator owns both registries, the tile layer, and the random source,
//! so callers drive growth through explicit calls rather than shared scene state.

use log::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::doors::DoorRegistry;
use crate::error::{ConfigError, GenerationStop};
use crate::layout::DungeonLayout;
use crate::rng::{ChaChaSource, RandomSource, SeedChoice};
use crate::rooms::{Room, RoomRegistry};
use crate::tiles::{Canvas, TileGrid, TilePainter};
use crate::types::{Door, DoorId, GenerationEvent, Pos, RoomId};

mod doorways;
mod expansion;
mod placement;

#[cfg(test)]
mod test_support;

pub struct DungeonGenerator<R: RandomSource = ChaChaSource> {
    config: GeneratorConfig,
    seed: Option<SeedChoice>,
    rng: R,
    rooms: RoomRegistry,
    doors: DoorRegistry,
    canvas: Canvas,
    room_count: u32,
    max_rooms: u32,
    events: Vec<GenerationEvent>,
}

/// What one door activation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    pub door: DoorId,
    pub new_room: Option<(RoomId, Room)>,
    pub new_doors: Vec<DoorId>,
    pub stop: Option<GenerationStop>,
}

impl Expansion {
    fn stopped(door: DoorId, stop: GenerationStop) -> Self {
        Self { door, new_room: None, new_doors: Vec::new(), stop: Some(stop) }
    }

    pub fn grew(&self) -> bool {
        self.new_room.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    pub expansions: usize,
    pub rooms_added: usize,
    pub stops: Vec<GenerationStop>,
}

impl GrowthReport {
    fn record(&mut self, expansion: &Expansion) {
        self.expansions += 1;
        if expansion.grew() {
            self.rooms_added += 1;
        }
        if let Some(stop) = expansion.stop {
            self.stops.push(stop);
        }
    }
}

impl DungeonGenerator<ChaChaSource> {
    /// Builds a generator seeded from `config.seed`, or from runtime entropy when unset.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        let seed = SeedChoice::resolve(config.seed);
        let mut generator = Self::with_source(config, ChaChaSource::from_seed(seed.value()))?;
        info!("Dungeon seed: {seed}");
        generator.seed = Some(seed);
        Ok(generator)
    }
}

impl<R: RandomSource> DungeonGenerator<R> {
    pub fn with_source(config: GeneratorConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let max_rooms = config.max_rooms.draw(&mut rng);
        let canvas = Canvas::new(config.map_width as usize, config.map_height as usize);
        info!(
            "Initializing dungeon: {}x{} map, rooms {}..={} tiles, cap {} rooms",
            config.map_width, config.map_height, config.room_min_size, config.room_max_size, max_rooms
        );
        Ok(Self {
            config,
            seed: None,
            rng,
            rooms: RoomRegistry::new(),
            doors: DoorRegistry::new(),
            canvas,
            room_count: 0,
            max_rooms,
            events: Vec::new(),
        })
    }

    /// Mirrors every committed tile into `painter` from now on.
    pub fn with_painter(mut self, painter: impl TilePainter + 'static) -> Self {
        self.canvas.set_painter(Box::new(painter));
        self
    }

    /// One-shot random placement of a room with its doors. A rejected candidate
    /// is not retried; call again to try another spot.
    pub fn generate_initial_room(&mut self) -> Result<Room, GenerationStop> {
        let (room_id, room) = self.place_random_room()?;
        self.generate_doors(room_id, room);
        Ok(room)
    }

    /// Grows a corridor and a new room out of an unused door.
    ///
    /// Every failure leaves the generator usable and only means this branch
    /// did not grow. A door whose expansion was attempted stays used; a door
    /// skipped because the room cap was reached stays unused.
    pub fn trigger_expansion(&mut self, door: DoorId) -> Expansion {
        match self.expand_door(door) {
            Ok(expansion) => expansion,
            Err(stop) => {
                match stop {
                    GenerationStop::InvalidDoorEdge(_) | GenerationStop::ExpansionExhausted { .. } => {
                        warn!("Expansion from door {door:?} stopped: {stop}");
                    }
                    _ => debug!("Expansion from door {door:?} skipped: {stop}"),
                }
                self.events.push(GenerationEvent::ExpansionStopped { door, reason: stop });
                Expansion::stopped(door, stop)
            }
        }
    }

    /// Activates every unused door closer than `trigger_radius` to an agent at `(x, y)`.
    /// Meant to be called from the host loop once per tick.
    pub fn activate_near(&mut self, x: f32, y: f32) -> Vec<Expansion> {
        let nearby = self.doors.unused_near(x, y, self.config.trigger_radius);
        nearby.into_iter().map(|door| self.trigger_expansion(door)).collect()
    }

    /// Expands unused doors in creation order until none are left or the room cap is hit.
    pub fn grow(&mut self) -> GrowthReport {
        let mut report = GrowthReport::default();
        while self.room_count < self.max_rooms {
            let Some(door) = self.doors.unused().next() else {
                break;
            };
            let expansion = self.trigger_expansion(door);
            report.record(&expansion);
        }
        info!(
            "Growth finished: {} rooms, {} doors, {} expansions",
            self.room_count,
            self.doors.len(),
            report.expansions
        );
        report
    }

    /// Initial room followed by [`Self::grow`], the non-interactive pipeline.
    pub fn build(&mut self) -> Result<GrowthReport, GenerationStop> {
        self.generate_initial_room()?;
        Ok(self.grow())
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The stream seed, when the generator owns a seeded ChaCha source.
    pub fn seed(&self) -> Option<u64> {
        self.seed.map(SeedChoice::value)
    }

    pub fn seed_choice(&self) -> Option<SeedChoice> {
        self.seed
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn doors(&self) -> &DoorRegistry {
        &self.doors
    }

    pub fn list_rooms(&self) -> Vec<Room> {
        self.rooms.iter().map(|(_, room)| room).collect()
    }

    pub fn list_doors(&self) -> Vec<Door> {
        self.doors.iter().map(|(_, door)| *door).collect()
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id)
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.canvas.grid().is_walkable(Pos { y, x })
    }

    pub fn tiles(&self) -> &TileGrid {
        self.canvas.grid()
    }

    pub fn room_count(&self) -> u32 {
        self.room_count
    }

    pub fn max_rooms(&self) -> u32 {
        self.max_rooms
    }

    pub fn events(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn layout(&self) -> DungeonLayout {
        DungeonLayout::capture(self)
    }
}
