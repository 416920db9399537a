use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use burrow::{
    ChaChaSource, DungeonGenerator, GenerationStop, GeneratorConfig, Pos, RandomSource, Rect,
    RoomCap, TileKind, TilePainter, rects_overlap,
};

/// Plays back fixed draws, then defers to a seeded stream.
struct Scripted {
    draws: VecDeque<i32>,
    fallback: ChaChaSource,
}

impl Scripted {
    fn new(draws: &[i32]) -> Self {
        Self { draws: draws.iter().copied().collect(), fallback: ChaChaSource::from_seed(5) }
    }
}

impl RandomSource for Scripted {
    fn between(&mut self, lo: i32, hi: i32) -> i32 {
        self.draws.pop_front().map_or_else(|| self.fallback.between(lo, hi), |v| v.clamp(lo, hi))
    }
}

#[derive(Clone, Default)]
struct CountingPainter(Rc<RefCell<[usize; 3]>>);

impl TilePainter for CountingPainter {
    fn paint_wall(&mut self, _pos: Pos) {
        self.0.borrow_mut()[0] += 1;
    }

    fn paint_floor(&mut self, _pos: Pos) {
        self.0.borrow_mut()[1] += 1;
    }

    fn paint_door(&mut self, _pos: Pos) {
        self.0.borrow_mut()[2] += 1;
    }
}

fn on_room_edge(room: Rect, pos: Pos) -> bool {
    let vertical =
        (pos.x == room.x || pos.x == room.right()) && pos.y > room.y && pos.y < room.bottom();
    let horizontal =
        (pos.y == room.y || pos.y == room.bottom()) && pos.x > room.x && pos.x < room.right();
    vertical || horizontal
}

#[test]
fn test_smoke_forty_by_forty_single_room() {
    let config = GeneratorConfig {
        map_width: 40,
        map_height: 40,
        room_min_size: 4,
        room_max_size: 8,
        max_rooms: RoomCap::Fixed(1),
        seed: Some(2_024),
        ..GeneratorConfig::default()
    };
    let mut generator = DungeonGenerator::new(config).expect("valid config");

    let room = generator.generate_initial_room().expect("first room fits an empty map");

    assert_eq!(generator.room_count(), 1);
    assert!((4..=8).contains(&room.width) && (4..=8).contains(&room.height));
    let doors = generator.list_doors();
    assert!((1..=4).contains(&doors.len()));
    assert!(doors.iter().all(|door| !door.used && on_room_edge(room, door.pos)));
}

#[test]
fn test_smoke_zero_cap_leaves_registry_empty() {
    let config = GeneratorConfig { max_rooms: RoomCap::Fixed(0), ..GeneratorConfig::default() };
    let mut generator = DungeonGenerator::new(config).expect("valid config");

    assert_eq!(
        generator.generate_initial_room(),
        Err(GenerationStop::RoomCapReached { max_rooms: 0 })
    );
    assert!(generator.list_rooms().is_empty());
}

#[test]
fn test_smoke_corridor_off_the_map_edge_aborts() {
    // 6x6 room at (3, 10); only the left door is opened, at (3, 12).
    let draws = [6, 6, 3, 10, 12, 13, 5, 5, 1, 0, 5, 5];
    let config = GeneratorConfig {
        passage_length: 3,
        max_rooms: RoomCap::Fixed(10),
        ..GeneratorConfig::default()
    };
    let mut generator =
        DungeonGenerator::with_source(config, Scripted::new(&draws)).expect("valid config");
    generator.generate_initial_room().expect("initial room");
    let door = generator.doors().unused().next().expect("left door");
    assert_eq!(generator.door(door).map(|door| door.pos), Some(Pos::new(3, 12)));

    let expansion = generator.trigger_expansion(door);

    assert!(!expansion.grew());
    assert!(matches!(expansion.stop, Some(GenerationStop::ExpansionExhausted { .. })));
    assert_eq!(generator.room_count(), 1);
    for x in 0..=2 {
        assert!(generator.is_walkable(x, 12), "corridor stub should be carved at x={x}");
    }
}

#[test]
fn test_smoke_full_growth_keeps_invariants_and_mirrors_paints() {
    for seed in [1_u64, 7, 31, 500, 65_535] {
        let painter = CountingPainter::default();
        let config = GeneratorConfig {
            seed: Some(seed),
            passage_length: 3,
            ..GeneratorConfig::default()
        };
        let mut generator =
            DungeonGenerator::new(config).expect("valid config").with_painter(painter.clone());
        generator.build().expect("initial room");

        let rooms = generator.list_rooms();
        for (index, a) in rooms.iter().enumerate() {
            for b in &rooms[index + 1..] {
                assert!(!rects_overlap(*a, *b), "seed={seed}: {a:?} overlaps {b:?}");
            }
        }

        let mut keys = BTreeSet::new();
        for door in generator.list_doors() {
            assert!(keys.insert(door.key()), "seed={seed}: duplicate door {}", door.key());
            let owner = generator.rooms().get(door.room).expect("owner room");
            assert!(on_room_edge(owner, door.pos), "seed={seed}: door {} off edge", door.pos);
            assert!(generator.is_walkable(door.pos.x, door.pos.y));
        }
        assert!(generator.room_count() <= generator.max_rooms());

        let counts = *painter.0.borrow();
        assert!(counts[0] > 0 && counts[1] > 0);
        assert!(counts[2] >= generator.list_doors().len());
        assert_eq!(generator.tiles().count(TileKind::Door), generator.list_doors().len());
    }
}

#[test]
fn test_smoke_ascii_render_has_one_row_per_map_row() {
    let config = GeneratorConfig { seed: Some(9), ..GeneratorConfig::default() };
    let mut generator = DungeonGenerator::new(config).expect("valid config");
    generator.build().expect("initial room");

    let layout = generator.layout();
    let rendered = layout.render_ascii();
    assert_eq!(rendered.lines().count(), 40);
    assert!(rendered.contains('#'));
    assert!(rendered.contains('.'));

    let json = serde_json::to_value(&layout).expect("layout serializes");
    assert_eq!(json["rooms"].as_array().map(Vec::len), Some(layout.rooms.len()));
    assert_eq!(json["width"], 40);
}
