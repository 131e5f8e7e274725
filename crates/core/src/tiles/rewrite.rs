//! Merge rules for corridor borders drawn over tiles that are already on the grid.
//!
//! Each border role has its own table. A table looks at the tile already present and
//! returns what should replace it, so a corridor wall crossing a room wall turns into the
//! matching inner corner and a wall landing on the far side of an opening becomes floor.
//! Floor is never turned back into wall, and applying the same border twice changes nothing.

use super::TileCode::{self, *};

/// Role of a corridor border cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Border {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Border {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

pub fn rewrite(border: Border, existing: TileCode) -> TileCode {
    match border {
        Border::Top => top(existing),
        Border::Bottom => bottom(existing),
        Border::Left => left(existing),
        Border::Right => right(existing),
        Border::TopLeft => top_left(existing),
        Border::TopRight => top_right(existing),
        Border::BottomLeft => bottom_left(existing),
        Border::BottomRight => bottom_right(existing),
    }
}

fn top(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerBottomLeft | InnerBottomRight | WallBottom => Floor,
        WallLeft | CornerBottomLeft | InnerTopLeft => InnerTopLeft,
        WallRight | CornerBottomRight | InnerTopRight => InnerTopRight,
        _ => WallTop,
    }
}

fn bottom(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerTopLeft | InnerTopRight | WallTop => Floor,
        WallLeft | CornerTopLeft | InnerBottomLeft => InnerBottomLeft,
        WallRight | CornerTopRight | InnerBottomRight => InnerBottomRight,
        _ => WallBottom,
    }
}

fn left(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerTopRight | InnerBottomRight | WallRight => Floor,
        WallTop | CornerTopRight | InnerTopLeft => InnerTopLeft,
        WallBottom | CornerBottomRight | InnerBottomLeft => InnerBottomLeft,
        _ => WallLeft,
    }
}

fn right(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerTopLeft | InnerBottomLeft | WallLeft => Floor,
        WallTop | CornerTopLeft | InnerTopRight => InnerTopRight,
        WallBottom | CornerBottomLeft | InnerBottomRight => InnerBottomRight,
        _ => WallRight,
    }
}

fn top_left(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerBottomRight => Floor,
        WallTop | WallLeft | InnerTopLeft | InnerTopRight | InnerBottomLeft => existing,
        WallRight => InnerTopRight,
        WallBottom => InnerBottomLeft,
        CornerBottomRight | BowtieTopRightBottomLeft => BowtieTopRightBottomLeft,
        CornerBottomLeft | BowtieTopLeftBottomRight => BowtieTopLeftBottomRight,
        _ => CornerTopLeft,
    }
}

fn top_right(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerBottomLeft => Floor,
        WallTop | WallRight | InnerTopLeft | InnerTopRight | InnerBottomRight => existing,
        WallLeft => InnerTopLeft,
        WallBottom => InnerBottomRight,
        CornerBottomRight | BowtieTopRightBottomLeft => BowtieTopRightBottomLeft,
        CornerBottomLeft | BowtieTopLeftBottomRight => BowtieTopLeftBottomRight,
        _ => CornerTopRight,
    }
}

fn bottom_left(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerTopRight => Floor,
        WallBottom | WallLeft | InnerTopLeft | InnerBottomLeft | InnerBottomRight => existing,
        CornerTopLeft => WallLeft,
        WallTop => InnerTopLeft,
        WallRight => InnerBottomRight,
        CornerTopRight | BowtieTopRightBottomLeft => BowtieTopRightBottomLeft,
        BowtieTopLeftBottomRight => BowtieTopLeftBottomRight,
        _ => CornerBottomLeft,
    }
}

fn bottom_right(existing: TileCode) -> TileCode {
    match existing {
        Floor | InnerTopLeft => Floor,
        WallBottom | WallRight | InnerTopRight | InnerBottomLeft | InnerBottomRight => existing,
        CornerTopRight => WallRight,
        WallTop => InnerTopRight,
        WallLeft => InnerBottomLeft,
        CornerTopLeft | BowtieTopLeftBottomRight => BowtieTopLeftBottomRight,
        BowtieTopRightBottomLeft => BowtieTopRightBottomLeft,
        _ => CornerBottomRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_edge_over_left_wall_is_an_inner_top_left_corner() {
        assert_eq!(rewrite(Border::Top, WallLeft), InnerTopLeft);
    }

    #[test]
    fn every_rewrite_is_idempotent() {
        for border in Border::ALL {
            for code in TileCode::ALL {
                let once = rewrite(border, code);
                assert_eq!(rewrite(border, once), once, "{border:?} over {code:?}");
            }
        }
    }

    #[test]
    fn floor_always_wins() {
        for border in Border::ALL {
            assert_eq!(rewrite(border, Floor), Floor, "{border:?}");
        }
    }

    #[test]
    fn background_takes_the_border_shape() {
        let expected = [
            (Border::Top, WallTop),
            (Border::Bottom, WallBottom),
            (Border::Left, WallLeft),
            (Border::Right, WallRight),
            (Border::TopLeft, CornerTopLeft),
            (Border::TopRight, CornerTopRight),
            (Border::BottomLeft, CornerBottomLeft),
            (Border::BottomRight, CornerBottomRight),
        ];
        for (border, tile) in expected {
            assert_eq!(rewrite(border, Background), tile);
        }
    }

    #[test]
    fn opposite_walls_open_into_floor() {
        assert_eq!(rewrite(Border::Top, WallBottom), Floor);
        assert_eq!(rewrite(Border::Bottom, WallTop), Floor);
        assert_eq!(rewrite(Border::Left, WallRight), Floor);
        assert_eq!(rewrite(Border::Right, WallLeft), Floor);
        assert_eq!(rewrite(Border::Top, InnerBottomRight), Floor);
        assert_eq!(rewrite(Border::Left, InnerTopRight), Floor);
    }

    #[test]
    fn matching_inner_corners_are_kept() {
        assert_eq!(rewrite(Border::Top, InnerTopLeft), InnerTopLeft);
        assert_eq!(rewrite(Border::Bottom, InnerBottomRight), InnerBottomRight);
        assert_eq!(rewrite(Border::Right, InnerTopRight), InnerTopRight);
    }

    #[test]
    fn corners_keep_their_own_edges_and_bend_the_others() {
        assert_eq!(rewrite(Border::TopLeft, WallTop), WallTop);
        assert_eq!(rewrite(Border::TopLeft, WallLeft), WallLeft);
        assert_eq!(rewrite(Border::TopLeft, WallRight), InnerTopRight);
        assert_eq!(rewrite(Border::TopLeft, WallBottom), InnerBottomLeft);
        assert_eq!(rewrite(Border::BottomRight, WallTop), InnerTopRight);
        assert_eq!(rewrite(Border::BottomRight, CornerTopRight), WallRight);
    }

    #[test]
    fn crossed_corners_become_bowties() {
        assert_eq!(rewrite(Border::TopLeft, CornerBottomRight), BowtieTopRightBottomLeft);
        assert_eq!(rewrite(Border::TopRight, CornerBottomLeft), BowtieTopLeftBottomRight);
        assert_eq!(rewrite(Border::BottomLeft, CornerTopRight), BowtieTopRightBottomLeft);
        assert_eq!(rewrite(Border::BottomRight, CornerTopLeft), BowtieTopLeftBottomRight);
    }
}
