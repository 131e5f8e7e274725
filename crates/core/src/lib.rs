//! Procedural dungeon layouts: rooms dropped near the origin, pushed apart until none
//! overlap, linked by corridors along a minimum spanning tree of the large rooms, and
//! rasterized into wall and floor tiles.

pub mod config;
pub mod dungeon;
pub mod generator;
pub mod geometry;
pub mod invariants;
pub mod tiles;

pub use config::{ConfigError, DungeonConfig};
pub use dungeon::{Corridor, Dungeon, GenerationError, Link, Orientation, Stage};
pub use generator::{DungeonGenerator, GeneratedDungeon};
pub use geometry::{Bounds, Rect, Vector};
pub use invariants::{LayoutViolation, check_layout};
pub use tiles::{Border, TileCode, TileGrid};

pub fn generate_dungeon(
    seed: u64,
    room_count: usize,
    config: &DungeonConfig,
) -> Result<GeneratedDungeon, GenerationError> {
    DungeonGenerator::new(seed, config.clone()).generate(room_count)
}
