//! Generation constants passed explicitly to every stage instead of living as globals.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// `τ = die_faces / LARGE_ROOM_DIVISOR × dice_count`, kept as the exact ratio 9/5.
const LARGE_ROOM_DIVISOR_NUMERATOR: i64 = 9;
const LARGE_ROOM_DIVISOR_DENOMINATOR: i64 = 5;

/// Smallest room that still has a floor cell inside its one-tile wall border.
const MIN_ROOM_DIMENSION: u32 = 3;
/// The tileset atlas uses five columns.
const MIN_TILESET_WIDTH: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Dice summed for each room dimension.
    pub dice_count: u32,
    pub die_faces: u32,
    /// Distance from the origin at which every room is first dropped.
    pub spawn_radius: i32,
    /// Corridor thickness in tiles, walls included. Must be odd.
    pub corridor_width: u32,
    /// Pixel size of one tile; consumed by renderers only.
    pub tile_size: u32,
    /// Tiles per row in the tileset atlas.
    pub tileset_width: u32,
    /// `None` lets separation run until it converges, however long that takes.
    pub max_separation_iterations: Option<u32>,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            dice_count: 3,
            die_faces: 3,
            spawn_radius: 5,
            corridor_width: 3,
            tile_size: 16,
            tileset_width: 16,
            max_separation_iterations: Some(100_000),
        }
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 {
            return Err(ConfigError::ZeroDice);
        }
        if self.die_faces == 0 {
            return Err(ConfigError::ZeroDieFaces);
        }
        if self.dice_count < MIN_ROOM_DIMENSION {
            return Err(ConfigError::RoomsTooSmall { min_dimension: self.dice_count });
        }
        if self.corridor_width < 3 || self.corridor_width % 2 == 0 {
            return Err(ConfigError::CorridorWidth { width: self.corridor_width });
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.tileset_width < MIN_TILESET_WIDTH {
            return Err(ConfigError::TilesetTooNarrow { width: self.tileset_width });
        }
        Ok(())
    }

    /// Both sides exceed `τ`, compared in integers so fractional thresholds stay exact.
    pub fn is_large(&self, room: &Rect) -> bool {
        let limit = i64::from(self.die_faces)
            * i64::from(self.dice_count)
            * LARGE_ROOM_DIVISOR_DENOMINATOR;
        i64::from(room.width) * LARGE_ROOM_DIVISOR_NUMERATOR > limit
            && i64::from(room.height) * LARGE_ROOM_DIVISOR_NUMERATOR > limit
    }

    /// Tiles on each side of a corridor's centre line.
    pub fn corridor_half_width(&self) -> i32 {
        (self.corridor_width / 2) as i32
    }

    pub fn room_dimension_range(&self) -> (u32, u32) {
        (self.dice_count, self.dice_count * self.die_faces)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroDice,
    ZeroDieFaces,
    /// Rooms could be rolled narrower than a wall, floor, and wall.
    RoomsTooSmall { min_dimension: u32 },
    CorridorWidth { width: u32 },
    ZeroTileSize,
    TilesetTooNarrow { width: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDice => write!(f, "dice_count must be at least 1"),
            Self::ZeroDieFaces => write!(f, "die_faces must be at least 1"),
            Self::RoomsTooSmall { min_dimension } => write!(
                f,
                "smallest possible room is {min_dimension} tiles, need at least {MIN_ROOM_DIMENSION}"
            ),
            Self::CorridorWidth { width } => {
                write!(f, "corridor_width must be odd and at least 3, got {width}")
            }
            Self::ZeroTileSize => write!(f, "tile_size must be at least 1"),
            Self::TilesetTooNarrow { width } => write!(
                f,
                "tileset_width must be at least {MIN_TILESET_WIDTH} tiles, got {width}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DungeonConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_threshold_makes_six_the_smallest_large_dimension() {
        let config = DungeonConfig::default();
        assert!(!config.is_large(&Rect::new(0, 0, 5, 9)));
        assert!(!config.is_large(&Rect::new(0, 0, 9, 5)));
        assert!(config.is_large(&Rect::new(0, 0, 6, 6)));
    }

    #[test]
    fn fractional_threshold_is_compared_exactly() {
        // 4 dice of 6 faces: τ = 24 × 5 / 9 ≈ 13.3.
        let config = DungeonConfig { dice_count: 4, die_faces: 6, ..DungeonConfig::default() };
        assert!(!config.is_large(&Rect::new(0, 0, 13, 20)));
        assert!(config.is_large(&Rect::new(0, 0, 14, 14)));
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            (DungeonConfig { dice_count: 0, ..DungeonConfig::default() }, ConfigError::ZeroDice),
            (
                DungeonConfig { die_faces: 0, ..DungeonConfig::default() },
                ConfigError::ZeroDieFaces,
            ),
            (
                DungeonConfig { dice_count: 2, die_faces: 6, ..DungeonConfig::default() },
                ConfigError::RoomsTooSmall { min_dimension: 2 },
            ),
            (
                DungeonConfig { corridor_width: 4, ..DungeonConfig::default() },
                ConfigError::CorridorWidth { width: 4 },
            ),
            (
                DungeonConfig { corridor_width: 1, ..DungeonConfig::default() },
                ConfigError::CorridorWidth { width: 1 },
            ),
            (DungeonConfig { tile_size: 0, ..DungeonConfig::default() }, ConfigError::ZeroTileSize),
            (
                DungeonConfig { tileset_width: 4, ..DungeonConfig::default() },
                ConfigError::TilesetTooNarrow { width: 4 },
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: DungeonConfig =
            serde_json::from_str(r#"{ "corridor_width": 5, "max_separation_iterations": null }"#)
                .unwrap();
        assert_eq!(config.corridor_width, 5);
        assert_eq!(config.corridor_half_width(), 2);
        assert_eq!(config.max_separation_iterations, None);
        assert_eq!(config.dice_count, 3);
    }
}
