//! The dungeon aggregate and its forward-only generation stages.
//!
//! A [`Dungeon`] owns its configuration, its random source, and the layout as it moves
//! through the pipeline:
//!
//! `Empty → Generated → Stabilized → Graphed → Rasterized`
//!
//! Each stage method checks that the previous stage has completed and refuses to run
//! otherwise, leaving the dungeon as it was.

pub mod corridors;
pub mod field;
pub mod rng;
pub mod separation;

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use tracing::debug;

use crate::config::{ConfigError, DungeonConfig};
use crate::geometry::{Bounds, Rect};
use crate::tiles::{self, TileGrid};

pub use corridors::{Corridor, CorridorGraph, Link, Orientation, build_corridor_graph};
pub use field::generate_room_field;
pub use rng::RoomRng;
pub use separation::{Separation, any_overlap, drift_vector, overlapping_pairs, stabilize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Empty,
    Generated,
    Stabilized,
    Graphed,
    Rasterized,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    Config(ConfigError),
    StageOutOfOrder { expected: Stage, found: Stage },
    SeparationDidNotConverge { iterations: u32, overlapping_pairs: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(error) => write!(f, "invalid dungeon config: {error}"),
            Self::StageOutOfOrder { expected, found } => {
                write!(f, "dungeon must be at stage {expected:?} for this step, but is at {found:?}")
            }
            Self::SeparationDidNotConverge { iterations, overlapping_pairs } => write!(
                f,
                "rooms still overlap after {iterations} separation passes ({overlapping_pairs} overlapping pairs)"
            ),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenerationError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

pub struct Dungeon {
    config: DungeonConfig,
    rng: RoomRng,
    stage: Stage,
    rooms: BTreeSet<Rect>,
    corridors: Vec<Corridor>,
    links: Vec<Link>,
    swept_bounds: Option<Bounds>,
    bounds: Bounds,
    separation_iterations: u32,
}

impl Dungeon {
    pub fn new(seed: u64, config: DungeonConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: RoomRng::new(seed),
            stage: Stage::Empty,
            rooms: BTreeSet::new(),
            corridors: Vec::new(),
            links: Vec::new(),
            swept_bounds: None,
            bounds: Bounds::default(),
            separation_iterations: 0,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn rooms(&self) -> &BTreeSet<Rect> {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Bounding box of the layout at the current stage. After [`Dungeon::build_corridors`]
    /// it covers exactly the surviving rooms and the corridors.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Every position any room held while being separated.
    pub fn swept_bounds(&self) -> Option<Bounds> {
        self.swept_bounds
    }

    pub fn separation_iterations(&self) -> u32 {
        self.separation_iterations
    }

    pub fn generate(&mut self, room_count: usize) -> Result<(), GenerationError> {
        self.expect_stage(Stage::Empty)?;
        self.rooms = generate_room_field(room_count, &self.config, &mut self.rng);
        self.bounds = Bounds::from_rects(self.rooms.iter().copied()).unwrap_or_default();
        self.advance(Stage::Generated);
        Ok(())
    }

    pub fn stabilize(&mut self) -> Result<(), GenerationError> {
        self.expect_stage(Stage::Generated)?;
        let separation = stabilize(self.rooms.clone(), self.config.max_separation_iterations)?;
        self.rooms = separation.rooms;
        self.separation_iterations = separation.iterations;
        self.swept_bounds = separation.swept_bounds;
        self.bounds = Bounds::from_rects(self.rooms.iter().copied()).unwrap_or_default();
        self.advance(Stage::Stabilized);
        Ok(())
    }

    pub fn build_corridors(&mut self) -> Result<(), GenerationError> {
        self.expect_stage(Stage::Stabilized)?;
        let graph = build_corridor_graph(&self.rooms, &self.config);
        self.rooms = graph.rooms;
        self.corridors = graph.corridors;
        self.links = graph.links;
        let footprint = self.rooms.iter().copied().chain(self.corridors.iter().map(|c| c.rect));
        self.bounds = Bounds::from_rects(footprint).unwrap_or_default();
        self.advance(Stage::Graphed);
        Ok(())
    }

    pub fn rasterize(&mut self) -> Result<TileGrid, GenerationError> {
        self.expect_stage(Stage::Graphed)?;
        let grid = tiles::rasterize(&self.rooms, &self.corridors, self.bounds);
        self.advance(Stage::Rasterized);
        Ok(grid)
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), GenerationError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GenerationError::StageOutOfOrder { expected, found: self.stage })
        }
    }

    fn advance(&mut self, next: Stage) {
        debug!(from = ?self.stage, to = ?next, rooms = self.rooms.len(), "dungeon stage complete");
        self.stage = next;
    }
}
