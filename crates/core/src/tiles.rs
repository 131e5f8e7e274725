//! Tile synthesis: rooms and corridors stamped onto a dense grid of wall and floor codes.

mod rewrite;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dungeon::{Corridor, Orientation};
use crate::geometry::{Bounds, Rect};

pub use rewrite::{Border, rewrite};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCode {
    Floor,
    /// Solid rock that nothing was drawn over.
    Background,
    WallTop,
    WallBottom,
    WallLeft,
    WallRight,
    CornerTopLeft,
    CornerTopRight,
    CornerBottomLeft,
    CornerBottomRight,
    /// Concave corner where a wall turns back into the open, named after the side it faces.
    InnerTopLeft,
    InnerTopRight,
    InnerBottomLeft,
    InnerBottomRight,
    /// Two corners touching at a single point.
    BowtieTopRightBottomLeft,
    BowtieTopLeftBottomRight,
}

impl TileCode {
    pub const ALL: [Self; 16] = [
        Self::Floor,
        Self::Background,
        Self::WallTop,
        Self::WallBottom,
        Self::WallLeft,
        Self::WallRight,
        Self::CornerTopLeft,
        Self::CornerTopRight,
        Self::CornerBottomLeft,
        Self::CornerBottomRight,
        Self::InnerTopLeft,
        Self::InnerTopRight,
        Self::InnerBottomLeft,
        Self::InnerBottomRight,
        Self::BowtieTopRightBottomLeft,
        Self::BowtieTopLeftBottomRight,
    ];

    pub fn is_floor(self) -> bool {
        self == Self::Floor
    }

    /// Sprite index in a tileset atlas `tileset_width` tiles wide.
    pub fn atlas_index(self, tileset_width: u32) -> u32 {
        let (column, row) = match self {
            Self::CornerTopLeft => (0, 0),
            Self::WallTop => (1, 0),
            Self::CornerTopRight => (2, 0),
            Self::InnerBottomRight => (3, 0),
            Self::InnerBottomLeft => (4, 0),
            Self::Background => (5, 0),
            Self::WallLeft => (0, 1),
            Self::Floor => (1, 1),
            Self::WallRight => (2, 1),
            Self::InnerTopRight => (3, 1),
            Self::InnerTopLeft => (4, 1),
            Self::CornerBottomLeft => (0, 2),
            Self::WallBottom => (1, 2),
            Self::CornerBottomRight => (2, 2),
            Self::BowtieTopRightBottomLeft => (3, 2),
            Self::BowtieTopLeftBottomRight => (4, 2),
        };
        row * tileset_width + column
    }

    pub(crate) fn byte(self) -> u8 {
        match self {
            Self::Floor => 0,
            Self::Background => 1,
            Self::WallTop => 2,
            Self::WallBottom => 3,
            Self::WallLeft => 4,
            Self::WallRight => 5,
            Self::CornerTopLeft => 6,
            Self::CornerTopRight => 7,
            Self::CornerBottomLeft => 8,
            Self::CornerBottomRight => 9,
            Self::InnerTopLeft => 10,
            Self::InnerTopRight => 11,
            Self::InnerBottomLeft => 12,
            Self::InnerBottomRight => 13,
            Self::BowtieTopRightBottomLeft => 14,
            Self::BowtieTopLeftBottomRight => 15,
        }
    }
}

/// Row-major grid. Cell `(0, 0)` is the top-left corner of the layout bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileCode>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, code: TileCode) -> Self {
        Self { width, height, tiles: vec![code; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileCode] {
        &self.tiles
    }

    pub fn get(&self, x: usize, y: usize) -> Option<TileCode> {
        (x < self.width && y < self.height).then(|| self.tiles[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> {
        // `chunks` rejects a zero size; an empty grid has no rows either way.
        self.tiles.chunks(self.width.max(1))
    }

    pub fn count(&self, code: TileCode) -> usize {
        self.tiles.iter().filter(|&&tile| tile == code).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

/// Writes in layout coordinates. Cells outside the grid are ignored.
struct Canvas<'a> {
    grid: &'a mut TileGrid,
    left: i32,
    top: i32,
}

impl Canvas<'_> {
    fn put(&mut self, x: i32, y: i32, code: TileCode) {
        if let Some(index) = self.grid.index(x - self.left, y - self.top) {
            self.grid.tiles[index] = code;
        }
    }

    fn merge(&mut self, x: i32, y: i32, border: Border) {
        if let Some(index) = self.grid.index(x - self.left, y - self.top) {
            self.grid.tiles[index] = rewrite(border, self.grid.tiles[index]);
        }
    }

    fn fill(&mut self, area: Rect, code: TileCode) {
        for y in area.top..area.bottom() {
            for x in area.left..area.right() {
                self.put(x, y, code);
            }
        }
    }

    fn stamp_room(&mut self, room: &Rect) {
        let (left, top) = (room.left, room.top);
        let (right, bottom) = (room.right() - 1, room.bottom() - 1);

        self.fill(Rect::new(left + 1, top + 1, room.width - 2, room.height - 2), TileCode::Floor);
        for x in left + 1..right {
            self.put(x, top, TileCode::WallTop);
            self.put(x, bottom, TileCode::WallBottom);
        }
        for y in top + 1..bottom {
            self.put(left, y, TileCode::WallLeft);
            self.put(right, y, TileCode::WallRight);
        }
        self.put(left, top, TileCode::CornerTopLeft);
        self.put(right, top, TileCode::CornerTopRight);
        self.put(left, bottom, TileCode::CornerBottomLeft);
        self.put(right, bottom, TileCode::CornerBottomRight);
    }

    fn stamp_corridor(&mut self, corridor: &Corridor) {
        let rect = corridor.rect;
        let (left, top) = (rect.left, rect.top);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        match corridor.orientation {
            Orientation::Horizontal => {
                let (cap_left, cap_right) = (left - 1, right + 1);
                self.merge(cap_left, top, Border::TopLeft);
                self.merge(cap_right, top, Border::TopRight);
                for y in top + 1..bottom {
                    self.merge(cap_left, y, Border::Left);
                    self.merge(cap_right, y, Border::Right);
                }
                self.merge(cap_left, bottom, Border::BottomLeft);
                self.merge(cap_right, bottom, Border::BottomRight);
                for x in left..=right {
                    self.merge(x, top, Border::Top);
                    self.merge(x, bottom, Border::Bottom);
                }
            }
            Orientation::Vertical => {
                let (cap_top, cap_bottom) = (top - 1, bottom + 1);
                self.merge(left, cap_top, Border::TopLeft);
                self.merge(left, cap_bottom, Border::BottomLeft);
                for x in left + 1..right {
                    self.merge(x, cap_top, Border::Top);
                    self.merge(x, cap_bottom, Border::Bottom);
                }
                self.merge(right, cap_top, Border::TopRight);
                self.merge(right, cap_bottom, Border::BottomRight);
                for y in top..=bottom {
                    self.merge(left, y, Border::Left);
                    self.merge(right, y, Border::Right);
                }
            }
        }
        self.fill(corridor.interior(), TileCode::Floor);
    }
}

/// Stamps `rooms` then `corridors` onto a grid covering `bounds`.
pub fn rasterize(rooms: &BTreeSet<Rect>, corridors: &[Corridor], bounds: Bounds) -> TileGrid {
    let mut grid = TileGrid::filled(bounds.width(), bounds.height(), TileCode::Background);
    let mut canvas = Canvas { grid: &mut grid, left: bounds.left, top: bounds.top };

    for room in rooms {
        canvas.stamp_room(room);
    }
    for corridor in corridors {
        canvas.stamp_corridor(corridor);
    }
    // Seam pass over every corridor interior.
    for corridor in corridors {
        canvas.fill(corridor.interior(), TileCode::Floor);
    }

    debug!(
        width = grid.width,
        height = grid.height,
        floor = grid.count(TileCode::Floor),
        "rasterized"
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::TileCode::*;
    use super::*;

    fn render(grid: &TileGrid) -> Vec<String> {
        grid.rows()
            .map(|row| {
                row.iter()
                    .map(|tile| match tile {
                        Floor => '.',
                        Background => ' ',
                        WallTop | WallBottom => '-',
                        WallLeft | WallRight => '|',
                        _ => '+',
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn atlas_follows_the_tileset_layout() {
        assert_eq!(CornerTopLeft.atlas_index(16), 0);
        assert_eq!(Background.atlas_index(16), 5);
        assert_eq!(Floor.atlas_index(16), 17);
        assert_eq!(InnerTopLeft.atlas_index(16), 20);
        assert_eq!(CornerBottomRight.atlas_index(16), 34);
        assert_eq!(BowtieTopLeftBottomRight.atlas_index(8), 20);
    }

    #[test]
    fn codes_have_distinct_bytes() {
        let bytes: BTreeSet<u8> = TileCode::ALL.iter().map(|code| code.byte()).collect();
        assert_eq!(bytes.len(), TileCode::ALL.len());
    }

    #[test]
    fn single_room_is_closed() {
        let room = Rect::new(4, -2, 5, 4);
        let rooms: BTreeSet<Rect> = [room].into_iter().collect();
        let grid = rasterize(&rooms, &[], Bounds::of(room));
        assert_eq!(render(&grid), vec!["+---+", "|...|", "|...|", "+---+"]);
        assert_eq!(grid.get(0, 0), Some(CornerTopLeft));
        assert_eq!(grid.get(4, 3), Some(CornerBottomRight));
        assert_eq!(grid.get(5, 0), None);
    }

    #[test]
    fn lone_corridor_is_walled_on_every_side() {
        let corridor = Corridor::horizontal(Rect::new(1, 0, 4, 3));
        let bounds = Bounds { top: 0, bottom: 3, left: 0, right: 6 };
        let grid = rasterize(&BTreeSet::new(), &[corridor], bounds);
        assert_eq!(render(&grid), vec!["+----+", "|....|", "+----+"]);
    }

    #[test]
    fn vertical_corridor_caps_its_ends() {
        let corridor = Corridor::vertical(Rect::new(0, 1, 3, 2));
        let bounds = Bounds { top: 0, bottom: 4, left: 0, right: 3 };
        let grid = rasterize(&BTreeSet::new(), &[corridor], bounds);
        assert_eq!(render(&grid), vec!["+-+", "|.|", "|.|", "+-+"]);
    }

    #[test]
    fn corridor_opens_a_room_wall() {
        let room = Rect::new(0, 0, 5, 5);
        let corridor = Corridor::horizontal(Rect::new(2, 1, 6, 3));
        let rooms: BTreeSet<Rect> = [room].into_iter().collect();
        let bounds = Bounds::of(room).including(Rect::new(1, 1, 8, 3));
        let grid = rasterize(&rooms, &[corridor], bounds);
        assert_eq!(
            render(&grid),
            vec!["+---+    ", "|...+---+", "|.......|", "|...+---+", "+---+    "]
        );
        assert_eq!(grid.get(4, 1), Some(InnerTopRight));
        assert_eq!(grid.get(4, 3), Some(InnerBottomRight));
    }

    #[test]
    fn writes_outside_the_grid_are_dropped() {
        let corridor = Corridor::horizontal(Rect::new(-3, -1, 10, 3));
        let bounds = Bounds { top: 0, bottom: 2, left: 0, right: 2 };
        let grid = rasterize(&BTreeSet::new(), &[corridor], bounds);
        assert_eq!(grid.tiles(), &[Floor, Floor, WallBottom, WallBottom]);
    }

    #[test]
    fn empty_bounds_give_an_empty_grid() {
        let grid = rasterize(&BTreeSet::new(), &[], Bounds::default());
        assert_eq!((grid.width(), grid.height()), (0, 0));
        assert!(grid.tiles().is_empty());
        assert_eq!(grid.rows().count(), 0);
    }
}
