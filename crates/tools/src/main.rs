use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon::{DungeonConfig, generate_dungeon};
use tools::config_file::load_config;
use tools::logging::setup_logging;
use tools::render::{render_ascii, render_atlas, summary};
use tools::seed::SeedChoice;
use tracing::info;

/// Room count the generator was tuned for.
const DEFAULT_ROOM_COUNT: usize = 103;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Ascii,
    /// Tileset sprite indices per cell
    Atlas,
    Json,
    Summary,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of rooms to drop before separation
    #[arg(short, long, default_value_t = DEFAULT_ROOM_COUNT)]
    rooms: usize,
    /// Path to a `.toml` or `.json` dungeon config
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Log filter, overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.log);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DungeonConfig::default(),
    };
    let seed = SeedChoice::resolve(args.seed);
    info!(seed = seed.value(), ?seed, rooms = args.rooms, "generating dungeon");

    let dungeon = generate_dungeon(seed.value(), args.rooms, &config)
        .with_context(|| format!("Failed to generate dungeon for seed {}", seed.value()))?;

    match args.format {
        OutputFormat::Ascii => print!("{}", render_ascii(dungeon.tiles())),
        OutputFormat::Atlas => print!("{}", render_atlas(dungeon.tiles(), config.tileset_width)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&dungeon)
                .with_context(|| "Failed to serialize dungeon JSON")?;
            println!("{json}");
        }
        OutputFormat::Summary => print!("{}", summary(&dungeon, &config)),
    }

    Ok(())
}
