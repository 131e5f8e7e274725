//! Corridor skeleton: a minimum spanning tree over large-room centroids, drawn as
//! L-shaped elbows, followed by pruning every room the skeleton does not reach.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use triangulation::{Point, triangulate};

use crate::config::DungeonConfig;
use crate::geometry::{Rect, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub rect: Rect,
    pub orientation: Orientation,
}

impl Corridor {
    pub fn horizontal(rect: Rect) -> Self {
        Self { rect, orientation: Orientation::Horizontal }
    }

    pub fn vertical(rect: Rect) -> Self {
        Self { rect, orientation: Orientation::Vertical }
    }

    /// Cells that must end up as floor: the rectangle minus its two long walls.
    pub fn interior(&self) -> Rect {
        let rect = self.rect;
        match self.orientation {
            Orientation::Horizontal => Rect::new(rect.left, rect.top + 1, rect.width, rect.height - 2),
            Orientation::Vertical => Rect::new(rect.left + 1, rect.top, rect.width - 2, rect.height),
        }
    }
}

/// One spanning-tree link between two large-room centroids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub origin: Vector,
    pub destination: Vector,
}

impl Link {
    /// A room is reached when it crosses one of the elbow's bands and sits strictly
    /// between that leg's ends.
    pub fn reaches(&self, room: &Rect, half_width: i32) -> bool {
        let Self { origin, destination } = *self;
        let left = origin.x.min(destination.x);
        let right = origin.x.max(destination.x);
        let top = origin.y.min(destination.y);
        let bottom = origin.y.max(destination.y);

        let row = origin.y;
        let crosses_row = room.top < row + half_width + 1
            && room.bottom() > row - half_width
            && room.left > left
            && room.right() < right;

        let column = destination.x;
        let crosses_column = room.left < column + half_width + 1
            && room.right() > column - half_width
            && room.top > top
            && room.bottom() < bottom;

        crosses_row || crosses_column
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorridorGraph {
    /// Two corridors per link, horizontal first.
    pub corridors: Vec<Corridor>,
    pub rooms: BTreeSet<Rect>,
    pub links: Vec<Link>,
}

pub fn build_corridor_graph(rooms: &BTreeSet<Rect>, config: &DungeonConfig) -> CorridorGraph {
    let centroids: BTreeSet<Point> = rooms
        .iter()
        .filter(|room| config.is_large(room))
        .map(|room| {
            let centre = room.centroid();
            Point::new(centre.x, centre.y)
        })
        .collect();
    let points: Vec<Point> = centroids.into_iter().collect();

    let links: Vec<Link> = triangulate(&points)
        .minimum_spanning_tree()
        .into_iter()
        .map(|edge| Link {
            origin: Vector::new(edge.origin().x, edge.origin().y),
            destination: Vector::new(edge.destination().x, edge.destination().y),
        })
        .collect();

    let half_width = config.corridor_half_width();
    let width = config.corridor_width as i32;
    let mut corridors = Vec::with_capacity(links.len() * 2);
    for link in &links {
        let (horizontal, vertical) = elbow(link, width, half_width);
        corridors.push(horizontal);
        corridors.push(vertical);
    }

    let survivors: BTreeSet<Rect> = rooms
        .iter()
        .filter(|room| {
            config.is_large(room) || links.iter().any(|link| link.reaches(room, half_width))
        })
        .copied()
        .collect();

    debug!(
        large_rooms = points.len(),
        links = links.len(),
        corridors = corridors.len(),
        kept = survivors.len(),
        pruned = rooms.len() - survivors.len(),
        "corridor graph built"
    );

    CorridorGraph { corridors, rooms: survivors, links }
}

/// Horizontal leg along the origin's row, vertical leg along the destination's column.
fn elbow(link: &Link, width: i32, half_width: i32) -> (Corridor, Corridor) {
    let Link { origin, destination } = *link;
    let left = origin.x.min(destination.x);
    let right = origin.x.max(destination.x);
    let top = origin.y.min(destination.y);
    let bottom = origin.y.max(destination.y);

    (
        Corridor::horizontal(Rect::new(left, origin.y - half_width, right - left + 1, width)),
        Corridor::vertical(Rect::new(destination.x - half_width, top, width, bottom - top + 1)),
    )
}
