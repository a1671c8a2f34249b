//! Collision detection and response against obstacles
//!
//! Participants are points with a BALL_TOLERANCE halo above and below. Obstacles
//! are treated as their unrotated box; tilt is visual only.

use glam::Vec2;

use super::state::Obstacle;
use crate::consts::BALL_TOLERANCE;

/// Which face of an obstacle a participant hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Near the top or bottom edge. `snap_y` is just outside the nearer edge.
    Vertical { snap_y: f32 },
    /// Inside the box away from both edges
    Horizontal,
}

/// Check a participant position against one obstacle
///
/// Returns `None` when the point is outside the obstacle's box expanded
/// vertically by BALL_TOLERANCE.
pub fn obstacle_contact(pos: Vec2, obstacle: &Obstacle) -> Option<Contact> {
    let top = obstacle.top();
    let bottom = obstacle.bottom();

    let inside = pos.x >= obstacle.left()
        && pos.x <= obstacle.right()
        && pos.y >= top - BALL_TOLERANCE
        && pos.y <= bottom + BALL_TOLERANCE;
    if !inside {
        return None;
    }

    let from_top = (pos.y - top).abs();
    let from_bottom = (pos.y - bottom).abs();

    if from_top < BALL_TOLERANCE || from_bottom < BALL_TOLERANCE {
        let snap_y = if from_top < from_bottom {
            top - BALL_TOLERANCE
        } else {
            bottom + BALL_TOLERANCE
        };
        Some(Contact::Vertical { snap_y })
    } else {
        Some(Contact::Horizontal)
    }
}

/// Invert and scale a velocity component
#[inline]
pub fn bounce(component: f32, restitution: f32) -> f32 {
    -component * restitution
}
