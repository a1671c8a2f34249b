//! Obstacle course generation
//!
//! The board is split into NUM_SECTIONS horizontal bands. Every internal band
//! boundary gets one tilted platform, and a coin flip decides whether an
//! upright post is added in the band above it.

use glam::Vec2;
use rand::Rng;

use super::state::Obstacle;
use crate::centered;
use crate::consts::*;

/// Left edge range for platforms and posts: [100, 700)
const OBSTACLE_MIN_X: f32 = 100.0;
const OBSTACLE_X_SPAN: f32 = 600.0;
/// Platform width range: [200, 400)
const PLATFORM_MIN_WIDTH: f32 = 200.0;
const PLATFORM_WIDTH_SPAN: f32 = 200.0;

/// Generate the static board for a game area of the given height
pub fn generate_obstacles<R: Rng + ?Sized>(rng: &mut R, game_height: f32) -> Vec<Obstacle> {
    let section_height = game_height / NUM_SECTIONS as f32;
    let mut obstacles = Vec::with_capacity(2 * (NUM_SECTIONS as usize - 1));

    for i in 1..NUM_SECTIONS {
        let boundary = i as f32 * section_height;

        obstacles.push(Obstacle {
            pos: Vec2::new(
                OBSTACLE_MIN_X + rng.random::<f32>() * OBSTACLE_X_SPAN,
                boundary,
            ),
            width: PLATFORM_MIN_WIDTH + rng.random::<f32>() * PLATFORM_WIDTH_SPAN,
            height: PLATFORM_HEIGHT,
            angle: centered(rng, 2.0 * MAX_TILT_DEG),
        });

        if rng.random::<f32>() > 0.5 {
            obstacles.push(Obstacle {
                pos: Vec2::new(
                    OBSTACLE_MIN_X + rng.random::<f32>() * OBSTACLE_X_SPAN,
                    boundary - section_height / 2.0,
                ),
                width: POST_WIDTH,
                height: POST_HEIGHT,
                angle: 90.0 + centered(rng, 2.0 * MAX_TILT_DEG),
            });
        }
    }

    log::debug!("Generated {} obstacles over {} sections", obstacles.len(), NUM_SECTIONS);
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn is_platform(o: &Obstacle) -> bool {
        o.height == PLATFORM_HEIGHT
    }

    #[test]
    fn test_one_platform_per_boundary() {
        let mut rng = Pcg32::seed_from_u64(42);
        let obstacles = generate_obstacles(&mut rng, 800.0);

        let platforms: Vec<_> = obstacles.iter().filter(|o| is_platform(o)).collect();
        assert_eq!(platforms.len(), NUM_SECTIONS as usize - 1);
        for (i, p) in platforms.iter().enumerate() {
            assert!((p.pos.y - (i + 1) as f32 * 100.0).abs() < 1e-3);
        }

        let posts = obstacles.len() - platforms.len();
        assert!(posts <= NUM_SECTIONS as usize - 1);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = generate_obstacles(&mut Pcg32::seed_from_u64(9), 640.0);
        let b = generate_obstacles(&mut Pcg32::seed_from_u64(9), 640.0);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_obstacles_within_board(seed in any::<u64>(), height in 200.0f32..2000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for o in generate_obstacles(&mut rng, height) {
                prop_assert!(o.pos.y >= 0.0 && o.pos.y <= height);
                prop_assert!(o.pos.x >= OBSTACLE_MIN_X && o.pos.x <= OBSTACLE_MIN_X + OBSTACLE_X_SPAN);
                if is_platform(&o) {
                    prop_assert!(o.angle >= -MAX_TILT_DEG && o.angle <= MAX_TILT_DEG);
                    prop_assert!(o.width >= PLATFORM_MIN_WIDTH && o.width <= PLATFORM_MIN_WIDTH + PLATFORM_WIDTH_SPAN);
                } else {
                    prop_assert_eq!(o.width, POST_WIDTH);
                    prop_assert!(o.angle >= 90.0 - MAX_TILT_DEG && o.angle <= 90.0 + MAX_TILT_DEG);
                }
            }
        }
    }
}
