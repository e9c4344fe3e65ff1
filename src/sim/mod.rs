//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-based stepping only (the host schedules `tick` once per display refresh)
//! - Seeded RNG only
//! - Stable iteration order (obstacles kept in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, avatar_rect, hit_test, obstacle_rect};
pub use state::{Avatar, GameEvent, GameState, Obstacle, RockShape, RockStyle, RunPhase};
pub use tick::{TickInput, tick};
