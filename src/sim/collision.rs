//! Collision geometry for the runner field
//!
//! Hitboxes are derived analytically from simulation state (ground line plus
//! size constants), never from rendered layout, so collision is a pure function
//! of [`GameState`](super::GameState) and testable without a renderer.

use glam::Vec2;

use crate::consts::*;
use crate::sim::state::{Avatar, Obstacle};

/// Axis-aligned rectangle in world space (y grows upward from the ground line)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }
}

/// The avatar's hitbox: fixed horizontal band, bottom edge riding the jump arc
pub fn avatar_rect(avatar: &Avatar) -> Rect {
    Rect::new(
        Vec2::new(AVATAR_LEFT, avatar.height),
        Vec2::new(AVATAR_LEFT + AVATAR_WIDTH, avatar.height + AVATAR_HEIGHT),
    )
}

/// An obstacle's hitbox: grounded box whose right edge sits at `obstacle.x`
pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect::new(
        Vec2::new(obstacle.x - OBSTACLE_WIDTH, 0.0),
        Vec2::new(obstacle.x, OBSTACLE_HEIGHT),
    )
}

/// Avatar-vs-obstacle overlap test.
///
/// Exactly three conditions: horizontal overlap both ways, plus the avatar's
/// bottom edge below the obstacle's top edge. There is no avatar-top vs
/// obstacle-bottom check; obstacles are grounded, so a jump clears purely by
/// height. Any weakening of the strict inequalities changes game feel.
#[inline]
pub fn hit_test(avatar: &Rect, obstacle: &Rect) -> bool {
    avatar.min.x < obstacle.max.x && avatar.max.x > obstacle.min.x && avatar.min.y < obstacle.max.y
}
