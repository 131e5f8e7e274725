//! Pairwise separation: overlapping rooms are nudged apart one tile per axis per pass
//! until no two rooms intersect.

use std::collections::BTreeSet;

use tracing::{trace, warn};

use crate::geometry::{Bounds, Rect, Vector};

use super::GenerationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn is_opposite(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Left, Self::Right)
                | (Self::Right, Self::Left)
                | (Self::Up, Self::Down)
                | (Self::Down, Self::Up)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Separation {
    pub rooms: BTreeSet<Rect>,
    /// Passes that moved at least one room.
    pub iterations: u32,
    /// Every rectangle any room occupied during separation, final positions included.
    pub swept_bounds: Option<Bounds>,
}

/// Push that moves `escapee` out of `collider`. Rooms that do not intersect get no push.
///
/// Not antisymmetric: `drift_vector(a, b)` and `drift_vector(b, a)` can point along
/// different axes, so a pass applies both.
pub fn drift_vector(escapee: &Rect, collider: &Rect) -> Vector {
    let Some(overlap) = escapee.intersection(collider) else {
        return Vector::ZERO;
    };

    let left = escapee.left - collider.left;
    let right = collider.right() - escapee.right();
    let up = escapee.top - collider.top;
    let down = collider.bottom() - escapee.bottom();

    let escapee_centre = escapee.centroid();
    let collider_centre = collider.centroid();

    let (direction, opposite) = if collider_centre.x > escapee_centre.x {
        if collider_centre.y > escapee_centre.y {
            (
                if left < up { Direction::Left } else { Direction::Up },
                if right > down { Direction::Right } else { Direction::Down },
            )
        } else {
            (
                if left < down { Direction::Left } else { Direction::Down },
                if right > down { Direction::Right } else { Direction::Up },
            )
        }
    } else if collider_centre.y > escapee_centre.y {
        (
            if right < up { Direction::Right } else { Direction::Up },
            if right > down { Direction::Left } else { Direction::Down },
        )
    } else {
        (
            if right < down { Direction::Right } else { Direction::Down },
            if right > down { Direction::Left } else { Direction::Up },
        )
    };

    // Squeezed from both sides along one axis: only cover half the overlap.
    let halve = direction.is_opposite(opposite);
    let horizontal = if halve { half_up(overlap.width) } else { overlap.width };
    let vertical = if halve { half_up(overlap.height) } else { overlap.height };

    match direction {
        Direction::Left => Vector::new(-horizontal, 0),
        Direction::Right => Vector::new(horizontal, 0),
        Direction::Up => Vector::new(0, -vertical),
        Direction::Down => Vector::new(0, vertical),
    }
}

fn half_up(value: i32) -> i32 {
    (value + 1) / 2
}

/// Every intersecting pair, earlier room first, in set order.
pub fn overlapping_pairs(rooms: &BTreeSet<Rect>) -> Vec<(Rect, Rect)> {
    let ordered: Vec<Rect> = rooms.iter().copied().collect();
    colliding_indices(&ordered)
        .into_iter()
        .map(|(escapee, collider)| (ordered[escapee], ordered[collider]))
        .collect()
}

pub fn any_overlap(rooms: &BTreeSet<Rect>) -> bool {
    let ordered: Vec<Rect> = rooms.iter().copied().collect();
    ordered
        .iter()
        .enumerate()
        .any(|(index, room)| ordered[index + 1..].iter().any(|other| room.intersects(other)))
}

fn colliding_indices(rooms: &[Rect]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (escapee, room) in rooms.iter().enumerate() {
        for (offset, other) in rooms[escapee + 1..].iter().enumerate() {
            if room.intersects(other) {
                pairs.push((escapee, escapee + 1 + offset));
            }
        }
    }
    pairs
}

/// One tile step per room for a single pass: the per-axis sign of every push the room
/// takes. Each colliding pair contributes both rooms' drift vectors, each applied to its
/// own room and negated onto the partner.
pub(crate) fn pass_steps(rooms: &[Rect], pairs: &[(usize, usize)]) -> Vec<Vector> {
    let mut pushes = vec![Vector::ZERO; rooms.len()];
    for &(first, second) in pairs {
        let first_away = drift_vector(&rooms[first], &rooms[second]);
        pushes[first] += first_away;
        pushes[second] += -first_away;

        let second_away = drift_vector(&rooms[second], &rooms[first]);
        pushes[second] += second_away;
        pushes[first] += -second_away;
    }
    pushes.into_iter().map(Vector::signum).collect()
}

/// Runs separation passes until the set is overlap-free. `max_iterations` bounds the number
/// of moving passes; `None` never gives up.
pub fn stabilize(
    rooms: BTreeSet<Rect>,
    max_iterations: Option<u32>,
) -> Result<Separation, GenerationError> {
    let mut rooms = rooms;
    let mut iterations = 0_u32;
    let mut swept_bounds: Option<Bounds> = None;

    loop {
        let ordered: Vec<Rect> = rooms.iter().copied().collect();
        swept_bounds = ordered.iter().fold(swept_bounds, |bounds, &room| match bounds {
            Some(bounds) => Some(bounds.including(room)),
            None => Some(Bounds::of(room)),
        });

        let pairs = colliding_indices(&ordered);
        if pairs.is_empty() {
            break;
        }
        if max_iterations.is_some_and(|limit| iterations >= limit) {
            warn!(iterations, overlapping_pairs = pairs.len(), "separation hit its iteration cap");
            return Err(GenerationError::SeparationDidNotConverge {
                iterations,
                overlapping_pairs: pairs.len(),
            });
        }

        rooms = ordered
            .iter()
            .zip(pass_steps(&ordered, &pairs))
            .map(|(room, step)| room.translated(step))
            .collect();
        iterations += 1;
        trace!(
            iteration = iterations,
            overlapping_pairs = pairs.len(),
            rooms = rooms.len(),
            "separation pass"
        );
    }

    debug_assert!(!any_overlap(&rooms));
    Ok(Separation { rooms, iterations, swept_bounds })
}
