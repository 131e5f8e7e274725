//! Initial room placement: every room is dropped on a small circle around the origin.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::DungeonConfig;
use crate::geometry::Rect;

use super::rng::RoomRng;

/// Draws `count` rooms. Rooms that land on an identical rectangle collapse, so the
/// returned set may be smaller than `count`.
pub fn generate_room_field(count: usize, config: &DungeonConfig, rng: &mut RoomRng) -> BTreeSet<Rect> {
    let rooms: BTreeSet<Rect> = (0..count).map(|_| spawn_room(config, rng)).collect();
    if rooms.len() < count {
        debug!(requested = count, distinct = rooms.len(), "duplicate rooms collapsed");
    }
    rooms
}

fn spawn_room(config: &DungeonConfig, rng: &mut RoomRng) -> Rect {
    let angle = rng.angle();
    let radius = f64::from(config.spawn_radius);
    // `as` truncates toward zero.
    let left = (radius * angle.cos()) as i32;
    let top = (radius * angle.sin()) as i32;
    let width = rng.room_dimension(config) as i32;
    let height = rng.room_dimension(config) as i32;
    Rect::new(left, top, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooms_start_near_the_origin_with_dice_sized_sides() {
        let config = DungeonConfig::default();
        let mut rng = RoomRng::new(11);
        let rooms = generate_room_field(200, &config, &mut rng);
        assert!(!rooms.is_empty());
        assert!(rooms.len() <= 200);
        for room in &rooms {
            assert!(room.left.abs() <= config.spawn_radius);
            assert!(room.top.abs() <= config.spawn_radius);
            let squared = room.left * room.left + room.top * room.top;
            assert!(squared <= config.spawn_radius * config.spawn_radius);
            assert!((3..=9).contains(&room.width));
            assert!((3..=9).contains(&room.height));
        }
    }

    #[test]
    fn zero_rooms_is_an_empty_field() {
        let mut rng = RoomRng::new(0);
        assert!(generate_room_field(0, &DungeonConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn duplicates_collapse_with_a_single_possible_room() {
        let config = DungeonConfig {
            dice_count: 3,
            die_faces: 1,
            spawn_radius: 0,
            ..DungeonConfig::default()
        };
        let mut rng = RoomRng::new(5);
        let rooms = generate_room_field(25, &config, &mut rng);
        assert_eq!(rooms.into_iter().collect::<Vec<_>>(), vec![Rect::new(0, 0, 3, 3)]);
    }
}
