//! End-to-end generation: runs every dungeon stage and snapshots the result.

use std::collections::BTreeSet;

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::DungeonConfig;
use crate::dungeon::{Corridor, Dungeon, GenerationError, Link, Orientation};
use crate::geometry::{Bounds, Rect};
use crate::tiles::{TileCode, TileGrid};

pub struct DungeonGenerator {
    seed: u64,
    config: DungeonConfig,
}

impl DungeonGenerator {
    pub fn new(seed: u64, config: DungeonConfig) -> Self {
        Self { seed, config }
    }

    pub fn generate(&self, room_count: usize) -> Result<GeneratedDungeon, GenerationError> {
        let mut dungeon = Dungeon::new(self.seed, self.config.clone())?;
        dungeon.generate(room_count)?;
        dungeon.stabilize()?;
        dungeon.build_corridors()?;
        let tiles = dungeon.rasterize()?;

        Ok(GeneratedDungeon {
            seed: self.seed,
            separation_iterations: dungeon.separation_iterations(),
            bounds: dungeon.bounds(),
            rooms: dungeon.rooms().clone(),
            corridors: dungeon.corridors().to_vec(),
            links: dungeon.links().to_vec(),
            tiles,
        })
    }
}

/// Immutable result of a full generation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedDungeon {
    pub seed: u64,
    pub separation_iterations: u32,
    bounds: Bounds,
    rooms: BTreeSet<Rect>,
    corridors: Vec<Corridor>,
    links: Vec<Link>,
    tiles: TileGrid,
}

impl GeneratedDungeon {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rooms(&self) -> &BTreeSet<Rect> {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Spanning-tree links between large-room centroids, one per corridor pair.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Grid coordinates; anything outside the grid reads as background.
    pub fn tile_at(&self, x: usize, y: usize) -> TileCode {
        self.tiles.get(x, y).unwrap_or(TileCode::Background)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        push_bounds(&mut bytes, self.bounds);

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            push_rect(&mut bytes, room);
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for corridor in &self.corridors {
            push_rect(&mut bytes, &corridor.rect);
            bytes.push(match corridor.orientation {
                Orientation::Horizontal => 0,
                Orientation::Vertical => 1,
            });
        }

        bytes.extend((self.tiles.width() as u32).to_le_bytes());
        bytes.extend((self.tiles.height() as u32).to_le_bytes());
        bytes.extend(self.tiles.tiles().iter().map(|tile| tile.byte()));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_rect(bytes: &mut Vec<u8>, rect: &Rect) {
    bytes.extend(rect.left.to_le_bytes());
    bytes.extend(rect.top.to_le_bytes());
    bytes.extend(rect.width.to_le_bytes());
    bytes.extend(rect.height.to_le_bytes());
}

fn push_bounds(bytes: &mut Vec<u8>, bounds: Bounds) {
    bytes.extend(bounds.top.to_le_bytes());
    bytes.extend(bounds.bottom.to_le_bytes());
    bytes.extend(bounds.left.to_le_bytes());
    bytes.extend(bounds.right.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn snapshots_can_be_shared_across_threads() {
        assert_send_sync::<GeneratedDungeon>();
    }

    #[test]
    fn tile_at_reads_background_outside_the_grid() {
        let dungeon = DungeonGenerator::new(4, DungeonConfig::default()).generate(30).unwrap();
        let grid = dungeon.tiles();
        assert_eq!(dungeon.tile_at(grid.width(), 0), TileCode::Background);
        assert_eq!(dungeon.tile_at(0, grid.height()), TileCode::Background);
        assert_eq!(dungeon.tile_at(usize::MAX, usize::MAX), TileCode::Background);
    }

    #[test]
    fn grid_matches_layout_bounds() {
        let dungeon = DungeonGenerator::new(17, DungeonConfig::default()).generate(40).unwrap();
        let bounds = dungeon.bounds();
        assert_eq!(dungeon.tiles().width(), bounds.width());
        assert_eq!(dungeon.tiles().height(), bounds.height());
        for room in dungeon.rooms() {
            assert_eq!(bounds.including(*room), bounds);
        }
    }

    #[test]
    fn zero_rooms_give_an_empty_layout() {
        let dungeon = DungeonGenerator::new(9, DungeonConfig::default()).generate(0).unwrap();
        assert!(dungeon.rooms().is_empty());
        assert!(dungeon.corridors().is_empty());
        assert_eq!(dungeon.bounds(), Bounds::default());
        assert!(dungeon.tiles().tiles().is_empty());
    }

    #[test]
    fn fingerprint_tracks_canonical_bytes() {
        let generator = DungeonGenerator::new(2024, DungeonConfig::default());
        let first = generator.generate(50).unwrap();
        let second = generator.generate(50).unwrap();
        assert_eq!(first.canonical_bytes(), second.canonical_bytes());
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(first.fingerprint(), xxh3_64(&first.canonical_bytes()));
    }

    #[test]
    fn serializes_to_json() {
        let dungeon = DungeonGenerator::new(5, DungeonConfig::default()).generate(20).unwrap();
        let json = serde_json::to_value(&dungeon).unwrap();
        assert_eq!(json["seed"], 5);
        assert_eq!(
            json["rooms"].as_array().map(Vec::len),
            Some(dungeon.rooms().len())
        );
        assert_eq!(json["tiles"]["width"], dungeon.tiles().width());
    }
}
