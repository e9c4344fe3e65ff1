//! Moon Dash - a side-scrolling lunar runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, obstacle field, collisions)
//! - `scores`: Local leaderboard with player records and best-score persistence
//!
//! The simulation is a pure state machine: the host calls [`sim::tick`] once per
//! rendered frame and drains [`sim::GameEvent`]s to drive rendering, audio, and
//! the score handoff. Nothing in `sim` touches a display or storage API.

pub mod scores;
pub mod sim;

pub use scores::ScoreBoard;
pub use sim::{GameEvent, GameState, RunPhase, TickInput, tick};

/// Game tuning constants
pub mod consts {
    /// Peak of a jump, in world pixels above the ground line
    pub const JUMP_MAX: f32 = 150.0;
    /// Rise per frame while ascending (linear, capped at [`JUMP_MAX`])
    pub const JUMP_RISE: f32 = 10.0;
    /// Fall per frame while descending (linear, clamped at the ground)
    pub const FALL_GRAVITY: f32 = 4.0;

    /// Scroll speed at the start of a run, pixels per frame
    pub const START_SPEED: f32 = 7.0;
    /// Speed gained at each score threshold
    pub const SPEED_STEP: f32 = 0.5;
    /// Score points between speed increases
    pub const SPEED_STEP_SCORE: u32 = 5;

    /// Base spawn interval in frames
    pub const SPAWN_BASE: u32 = 60;
    /// Jitter range added to the very first spawn roll
    pub const SPAWN_FIRST_JITTER: u32 = 60;
    /// Minimum spawn interval the difficulty curve can reach
    pub const SPAWN_FLOOR: u32 = 35;
    /// Jitter range added to every subsequent spawn roll
    pub const SPAWN_JITTER: u32 = 40;
    /// Score points per one-frame reduction of the spawn interval lower bound
    pub const SPAWN_SCORE_DIV: u32 = 3;
    /// Extra random horizontal offset applied to a fresh spawn
    pub const SPAWN_X_JITTER: f32 = 100.0;

    /// Obstacles scrolled past this x are permanently offscreen and culled
    pub const DESPAWN_X: f32 = -120.0;
    /// Field width used before the host reports a real viewport size
    pub const DEFAULT_FIELD_WIDTH: f32 = 960.0;

    /// Avatar hitbox: left edge, width, height (bottom edge rides the jump arc)
    pub const AVATAR_LEFT: f32 = 40.0;
    pub const AVATAR_WIDTH: f32 = 60.0;
    pub const AVATAR_HEIGHT: f32 = 60.0;

    /// Obstacle hitbox: width and height, grounded at y = 0
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
}
