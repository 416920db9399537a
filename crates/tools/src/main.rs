use std::path::PathBuf;

use anyhow::{Context, Result};
use burrow::{DungeonGenerator, GeneratorConfig, RoomCap};
use clap::{Parser, ValueEnum};

mod logger;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about = "Grow a room-and-corridor dungeon and print it", long_about = None)]
struct Args {
    /// TOML generator config; defaults apply to anything it leaves out
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
    /// Fixed room cap, overriding the configured range
    #[arg(long)]
    max_rooms: Option<u32>,
    /// Corridor length between rooms (1 or 3)
    #[arg(long)]
    passage_length: Option<i32>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.map_width = width;
        }
        if let Some(height) = self.height {
            config.map_height = height;
        }
        if let Some(max_rooms) = self.max_rooms {
            config.max_rooms = RoomCap::Fixed(max_rooms);
        }
        if let Some(passage_length) = self.passage_length {
            config.passage_length = passage_length;
        }

        config.validate().context("Invalid generator configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let config = args.resolve_config()?;
    let mut generator = DungeonGenerator::new(config)?;
    let report = match generator.build() {
        Ok(report) => report,
        Err(stop) => anyhow::bail!("Initial room could not be placed: {stop}"),
    };
    let layout = generator.layout();

    match args.format {
        OutputFormat::Ascii => {
            print!("{}", layout.render_ascii());
            println!();
            if let Some(seed) = generator.seed_choice() {
                println!("Seed: {seed}");
            }
            println!("Rooms: {} (cap {})", layout.rooms.len(), layout.max_rooms);
            println!("Doors: {}", layout.doors.len());
            println!("Expansions: {} ({} stopped early)", report.expansions, report.stops.len());
            println!("Fingerprint: {:016x}", layout.fingerprint());
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
            println!("{json}");
        }
    }

    Ok(())
}
