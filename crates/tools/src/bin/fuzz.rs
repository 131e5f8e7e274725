use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use dungeon::{DungeonConfig, check_layout, generate_dungeon};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::config_file::load_config;
use tools::logging::setup_logging;
use tools::seed::seed_sweep;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First seed of the sweep
    #[arg(long, default_value_t = 0)]
    start: u64,
    /// Number of consecutive seeds to check
    #[arg(long, default_value_t = 200)]
    seeds: u64,
    /// Largest room count to request; each seed draws its own count up to this
    #[arg(long, default_value_t = 103)]
    max_rooms: usize,
    /// Path to a `.toml` or `.json` dungeon config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(None);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DungeonConfig::default(),
    };

    info!(
        start = args.start,
        seeds = args.seeds,
        max_rooms = args.max_rooms,
        "starting layout fuzz"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.start);
    let mut largest_pass_count = 0;

    for seed in seed_sweep(args.start, args.seeds) {
        let room_count = (rng.next_u64() % (args.max_rooms as u64 + 1)) as usize;
        let dungeon = match generate_dungeon(seed, room_count, &config) {
            Ok(dungeon) => dungeon,
            Err(err) => {
                error!(seed, room_count, %err, "generation failed");
                bail!("Generation failed on seed {seed} with {room_count} rooms: {err}");
            }
        };

        if let Err(violation) = check_layout(&dungeon, &config) {
            error!(seed, room_count, %violation, "invariant violated");
            bail!("Invariant failed on seed {seed} with {room_count} rooms: {violation}");
        }

        largest_pass_count = largest_pass_count.max(dungeon.separation_iterations);
        debug!(
            seed,
            room_count,
            rooms = dungeon.rooms().len(),
            corridors = dungeon.corridors().len(),
            "seed ok"
        );
    }

    info!(largest_pass_count, "fuzzing completed successfully");
    println!("Fuzzing completed successfully: {} seeds from {}.", args.seeds, args.start);
    Ok(())
}
