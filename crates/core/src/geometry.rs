//! Integer rectangles, vectors, and layout bounds shared by every generation stage.

use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Per-axis sign, so a summed push moves at most one tile per axis.
    pub fn signum(self) -> Self {
        Self { x: self.x.signum(), y: self.y.signum() }
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl Sum for Vector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Axis-aligned rectangle on the tile grid.
///
/// Two rectangles are the same room exactly when all four fields match; a room that is
/// drawn or pushed onto another of identical shape collapses into it inside a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.left + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.top + self.height
    }

    pub fn centroid(self) -> Vector {
        Vector { x: self.left + self.width / 2, y: self.top + self.height / 2 }
    }

    /// Overlap with positive area. Rectangles that only share an edge do not intersect.
    pub fn intersects(self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    pub fn intersection(self, other: &Self) -> Option<Self> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Self::new(left, top, right - left, bottom - top))
    }

    pub fn translated(self, offset: Vector) -> Self {
        Self { left: self.left + offset.x, top: self.top + offset.y, ..self }
    }

    fn order_key(self) -> (i32, i32, i32, i32) {
        (self.top, self.left, self.bottom(), self.right())
    }
}

impl Ord for Rect {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for Rect {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounding box of a layout. `bottom` and `right` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Bounds {
    pub fn of(rect: Rect) -> Self {
        Self { top: rect.top, bottom: rect.bottom(), left: rect.left, right: rect.right() }
    }

    pub fn from_rects<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Self> {
        let mut rects = rects.into_iter();
        let first = Self::of(rects.next()?);
        Some(rects.fold(first, |bounds, rect| bounds.including(rect)))
    }

    pub fn including(self, rect: Rect) -> Self {
        Self {
            top: self.top.min(rect.top),
            bottom: self.bottom.max(rect.bottom()),
            left: self.left.min(rect.left),
            right: self.right.max(rect.right()),
        }
    }

    pub fn width(self) -> usize {
        (self.right - self.left).max(0) as usize
    }

    pub fn height(self) -> usize {
        (self.bottom - self.top).max(0) as usize
    }
}
