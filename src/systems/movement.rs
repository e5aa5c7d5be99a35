//! Movement - one step of gravity with wind for a single grain
//!
//! Decisions are read from a frozen map (the frame-start state), never from
//! the map being built this tick. Given the same RNG state and the same map,
//! the result is always the same.
//!
//! Order of attempts:
//! 1. wind offset: 0 most of the time, otherwise ±1 by coin flip
//! 2. wind diagonal (only when the offset is non-zero, side cell must be clear)
//! 3. straight down
//! 4. spill diagonally, random side first, side cell must be clear

use rand::Rng;

use crate::spatial::CollisionMap;

/// Lateral nudge in {-1, 0, +1}
#[inline]
pub fn wind_offset<R: Rng + ?Sized>(rng: &mut R, wind_chance: f32) -> i32 {
    if !rng.gen_bool(wind_chance as f64) {
        return 0;
    }
    if rng.gen::<bool>() { 1 } else { -1 }
}

/// Diagonal step is allowed only if both the side cell and the target are
/// clear, so grains cannot squeeze between two diagonal neighbours.
#[inline]
fn can_slide(map: &CollisionMap, x: i32, y: i32, dx: i32) -> bool {
    map.is_empty(x + dx, y) && map.is_empty(x + dx, y + 1)
}

/// New position for the grain at (x, y), or `None` if it cannot move.
///
/// Always in bounds: the map reports every off-grid cell as occupied.
pub fn apply_gravity<R: Rng + ?Sized>(
    x: u32,
    y: u32,
    map: &CollisionMap,
    rng: &mut R,
    wind_chance: f32,
) -> Option<(u32, u32)> {
    let xi = x as i32;
    let yi = y as i32;

    let wind = wind_offset(rng, wind_chance);
    if wind != 0 && can_slide(map, xi, yi, wind) {
        return Some(((xi + wind) as u32, y + 1));
    }

    if map.is_empty(xi, yi + 1) {
        return Some((x, y + 1));
    }

    // Blocked below: spill sideways, random side first to avoid drift
    let (first, second) = if rng.gen::<bool>() { (-1, 1) } else { (1, -1) };
    for dx in [first, second] {
        if can_slide(map, xi, yi, dx) {
            return Some(((xi + dx) as u32, y + 1));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::seeded;

    fn map_with(width: u32, height: u32, occupied: &[(i32, i32)]) -> CollisionMap {
        let mut map = CollisionMap::new(width, height);
        for (i, &(x, y)) in occupied.iter().enumerate() {
            map.set(x, y, Some(i as u32));
        }
        map
    }

    #[test]
    fn falls_straight_without_wind() {
        let map = map_with(10, 10, &[(5, 0)]);
        let mut rng = seeded(1);
        assert_eq!(apply_gravity(5, 0, &map, &mut rng, 0.0), Some((5, 1)));
    }

    #[test]
    fn rests_on_the_floor() {
        let map = map_with(10, 10, &[(5, 9)]);
        let mut rng = seeded(1);
        for _ in 0..32 {
            assert_eq!(apply_gravity(5, 9, &map, &mut rng, 0.1), None);
        }
    }

    #[test]
    fn spills_both_ways_over_many_draws() {
        // grain on top of a single blocker, both diagonals open
        let map = map_with(5, 3, &[(2, 0), (2, 1)]);
        let mut rng = seeded(7);
        let mut left = 0;
        let mut right = 0;
        for _ in 0..200 {
            match apply_gravity(2, 0, &map, &mut rng, 0.0) {
                Some((1, 1)) => left += 1,
                Some((3, 1)) => right += 1,
                other => panic!("unexpected move {:?}", other),
            }
        }
        assert!(left > 50 && right > 50, "left={} right={}", left, right);
    }

    #[test]
    fn spill_needs_the_side_cell_clear() {
        // left side cell occupied, left target free: must go right
        let map = map_with(5, 3, &[(2, 0), (2, 1), (1, 0)]);
        let mut rng = seeded(3);
        for _ in 0..50 {
            assert_eq!(apply_gravity(2, 0, &map, &mut rng, 0.0), Some((3, 1)));
        }
    }

    #[test]
    fn boxed_in_grain_stays() {
        let map = map_with(3, 2, &[(1, 0), (1, 1), (0, 0), (2, 0)]);
        let mut rng = seeded(3);
        for _ in 0..50 {
            assert_eq!(apply_gravity(1, 0, &map, &mut rng, 0.5), None);
        }
    }

    #[test]
    fn full_wind_always_moves_diagonally_in_open_space() {
        let map = map_with(9, 9, &[(4, 4)]);
        let mut rng = seeded(11);
        for _ in 0..100 {
            let (nx, ny) = apply_gravity(4, 4, &map, &mut rng, 1.0).unwrap();
            assert_eq!(ny, 5);
            assert!(nx == 3 || nx == 5);
        }
    }

    #[test]
    fn blocked_wind_falls_back_to_straight_down() {
        // both side cells occupied, below is free
        let map = map_with(5, 5, &[(2, 2), (1, 2), (3, 2)]);
        let mut rng = seeded(5);
        for _ in 0..50 {
            assert_eq!(apply_gravity(2, 2, &map, &mut rng, 1.0), Some((2, 3)));
        }
    }

    #[test]
    fn wind_offset_distribution() {
        let mut rng = seeded(99);
        assert!((0..100).all(|_| wind_offset(&mut rng, 0.0) == 0));
        let draws: Vec<i32> = (0..100).map(|_| wind_offset(&mut rng, 1.0)).collect();
        assert!(draws.iter().all(|&w| w == 1 || w == -1));
        assert!(draws.contains(&1) && draws.contains(&-1));
    }

    #[test]
    fn same_seed_same_decisions() {
        let map = map_with(8, 8, &[(3, 3), (3, 4), (2, 5)]);
        let mut a = seeded(2024);
        let mut b = seeded(2024);
        for _ in 0..100 {
            assert_eq!(
                apply_gravity(3, 3, &map, &mut a, 0.3),
                apply_gravity(3, 3, &map, &mut b, 0.3)
            );
        }
    }

    #[test]
    fn never_leaves_the_grid() {
        let (w, h) = (6u32, 5u32);
        let mut rng = seeded(17);
        for _ in 0..300 {
            let mut map = CollisionMap::new(w, h);
            for idx in 0..(w * h) as usize {
                if rng.gen_bool(0.3) {
                    let (x, y) = map.coords(idx);
                    map.set(x as i32, y as i32, Some(idx as u32));
                }
            }
            let x = rng.gen_range(0..w);
            let y = rng.gen_range(0..h);
            if let Some((nx, ny)) = apply_gravity(x, y, &map, &mut rng, 0.5) {
                assert!(nx < w && ny < h, "({}, {}) -> ({}, {})", x, y, nx, ny);
                assert!(map.is_empty(nx as i32, ny as i32));
            }
        }
    }
}
