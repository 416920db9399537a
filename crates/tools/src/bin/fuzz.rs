use std::collections::HashSet;

use anyhow::{Result, ensure};
use burrow::{DungeonGenerator, GeneratorConfig, RoomCap, TileKind, rects_overlap};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of dungeons to grow
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_config(rng: &mut ChaCha8Rng) -> GeneratorConfig {
    let min_size = choose(rng, &[3, 4, 5]);
    let max_size = min_size + choose(rng, &[0, 2, 4]);
    let side = choose(rng, &[24, 40, 64]);
    GeneratorConfig {
        map_width: side,
        map_height: side,
        room_min_size: min_size,
        room_max_size: max_size,
        max_rooms: choose(rng, &[RoomCap::Fixed(1), RoomCap::Fixed(25), RoomCap::Between { min: 10, max: 50 }]),
        passage_length: choose(rng, &[1, 3]),
        extra_doors: choose(rng, &[true, false]),
        seed: Some(rng.next_u64()),
        ..GeneratorConfig::default()
    }
}

fn check_invariants(generator: &DungeonGenerator) -> Result<()> {
    let rooms = generator.list_rooms();
    for (index, a) in rooms.iter().enumerate() {
        for b in &rooms[index + 1..] {
            ensure!(!rects_overlap(*a, *b), "Invariant failed: {a:?} overlaps {b:?}");
        }
    }

    let mut seen = HashSet::new();
    for door in generator.list_doors() {
        ensure!(seen.insert(door.pos), "Invariant failed: two doors at {}", door.pos);
        ensure!(
            generator.tiles().tile_at(door.pos) == Some(TileKind::Door),
            "Invariant failed: door {} not painted",
            door.pos
        );
        let owner = generator.rooms().get(door.room);
        ensure!(
            owner.is_some_and(|room| room.is_perimeter(door.pos)),
            "Invariant failed: door {} is off its room's wall",
            door.pos
        );
    }

    ensure!(
        generator.room_count() <= generator.max_rooms(),
        "Invariant failed: {} rooms exceed cap {}",
        generator.room_count(),
        generator.max_rooms()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_rooms = 0_u64;
    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let seed = config.seed;
        let mut generator = DungeonGenerator::new(config)?;
        if generator.build().is_err() {
            continue;
        }
        check_invariants(&generator)
            .map_err(|e| e.context(format!("run {run} (generator seed {seed:?})")))?;
        total_rooms += u64::from(generator.room_count());
    }

    println!("Fuzzing completed successfully: {} rooms grown.", total_rooms);
    Ok(())
}
