//! Structural checks every generated dungeon must pass. Shared by the test suite and the
//! seed-sweeping fuzz binary.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::config::DungeonConfig;
use crate::generator::GeneratedDungeon;
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutViolation {
    Overlap { first: Rect, second: Rect },
    UnreachedRoom { room: Rect },
    CorridorCount { corridors: usize, links: usize },
    SpanningTree { links: usize, large_rooms: usize },
    GridSize { width: usize, height: usize },
    /// A room or corridor interior cell cut off from the rest of the floor.
    Disconnected { x: usize, y: usize },
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap { first, second } => write!(f, "rooms {first:?} and {second:?} overlap"),
            Self::UnreachedRoom { room } => {
                write!(f, "room {room:?} is neither large nor reached by a corridor")
            }
            Self::CorridorCount { corridors, links } => {
                write!(f, "{corridors} corridors for {links} spanning-tree links")
            }
            Self::SpanningTree { links, large_rooms } => {
                write!(f, "{links} spanning-tree links for {large_rooms} distinct large-room centroids")
            }
            Self::GridSize { width, height } => {
                write!(f, "tile grid is {width}x{height}, which does not match the layout bounds")
            }
            Self::Disconnected { x, y } => write!(f, "floor cell ({x}, {y}) is unreachable"),
        }
    }
}

pub fn check_layout(
    dungeon: &GeneratedDungeon,
    config: &DungeonConfig,
) -> Result<(), LayoutViolation> {
    check_no_overlap(dungeon)?;
    check_rooms_reached(dungeon, config)?;
    check_corridor_graph(dungeon, config)?;
    check_grid_size(dungeon)?;
    check_floor_connected(dungeon)
}

fn check_no_overlap(dungeon: &GeneratedDungeon) -> Result<(), LayoutViolation> {
    let rooms: Vec<Rect> = dungeon.rooms().iter().copied().collect();
    for (index, first) in rooms.iter().enumerate() {
        if let Some(second) = rooms[index + 1..].iter().find(|other| first.intersects(other)) {
            return Err(LayoutViolation::Overlap { first: *first, second: *second });
        }
    }
    Ok(())
}

fn check_rooms_reached(
    dungeon: &GeneratedDungeon,
    config: &DungeonConfig,
) -> Result<(), LayoutViolation> {
    let half_width = config.corridor_half_width();
    match dungeon.rooms().iter().find(|room| {
        !config.is_large(room) && !dungeon.links().iter().any(|link| link.reaches(room, half_width))
    }) {
        Some(room) => Err(LayoutViolation::UnreachedRoom { room: *room }),
        None => Ok(()),
    }
}

fn check_corridor_graph(
    dungeon: &GeneratedDungeon,
    config: &DungeonConfig,
) -> Result<(), LayoutViolation> {
    let corridors = dungeon.corridors().len();
    let links = dungeon.links().len();
    if corridors != 2 * links {
        return Err(LayoutViolation::CorridorCount { corridors, links });
    }

    let large_rooms = dungeon
        .rooms()
        .iter()
        .filter(|room| config.is_large(room))
        .map(|room| room.centroid())
        .collect::<BTreeSet<_>>()
        .len();
    if links != large_rooms.saturating_sub(1) {
        return Err(LayoutViolation::SpanningTree { links, large_rooms });
    }
    Ok(())
}

fn check_grid_size(dungeon: &GeneratedDungeon) -> Result<(), LayoutViolation> {
    let (width, height) = (dungeon.tiles().width(), dungeon.tiles().height());
    if width != dungeon.bounds().width() || height != dungeon.bounds().height() {
        return Err(LayoutViolation::GridSize { width, height });
    }
    Ok(())
}

/// Every room and corridor interior cell must sit in one 4-connected floor region.
fn check_floor_connected(dungeon: &GeneratedDungeon) -> Result<(), LayoutViolation> {
    let grid = dungeon.tiles();
    let bounds = dungeon.bounds();
    let to_grid = |x: i32, y: i32| -> Option<(usize, usize)> {
        let gx = usize::try_from(x - bounds.left).ok()?;
        let gy = usize::try_from(y - bounds.top).ok()?;
        (gx < grid.width() && gy < grid.height()).then_some((gx, gy))
    };

    let room_interiors = dungeon
        .rooms()
        .iter()
        .map(|room| Rect::new(room.left + 1, room.top + 1, room.width - 2, room.height - 2));
    let corridor_interiors = dungeon.corridors().iter().map(|corridor| corridor.interior());
    let mut required = Vec::new();
    for area in room_interiors.chain(corridor_interiors) {
        for y in area.top..area.bottom() {
            for x in area.left..area.right() {
                if let Some(cell) = to_grid(x, y) {
                    required.push(cell);
                }
            }
        }
    }

    let Some(&start) = required.first() else {
        return Ok(());
    };

    let mut reached = vec![false; grid.width() * grid.height()];
    let mut queue = VecDeque::from([start]);
    reached[start.1 * grid.width() + start.0] = true;
    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            x.checked_sub(1).map(|nx| (nx, y)),
            Some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            Some((x, y + 1)),
        ];
        for (nx, ny) in neighbours.into_iter().flatten() {
            if grid.get(nx, ny).is_some_and(|tile| tile.is_floor())
                && !reached[ny * grid.width() + nx]
            {
                reached[ny * grid.width() + nx] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    match required.into_iter().find(|&(x, y)| !reached[y * grid.width() + x]) {
        Some((x, y)) => Err(LayoutViolation::Disconnected { x, y }),
        None => Ok(()),
    }
}
