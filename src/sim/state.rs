//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`]; the host owns the instance and
//! hands it to [`crate::sim::tick`] once per frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No run in progress (before the first `start`)
    Idle,
    /// Active gameplay
    Running,
    /// Run ended on a collision; only `start` leaves this phase
    GameOver,
}

/// Rock color variant (render hint, no behavioral effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockStyle {
    Plain,
    Dark,
    Light,
}

impl RockStyle {
    fn roll(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..3) {
            0 => RockStyle::Plain,
            1 => RockStyle::Dark,
            _ => RockStyle::Light,
        }
    }
}

/// Rock silhouette variant (render hint, no behavioral effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockShape {
    Standard,
    Wide,
    Tall,
    Round,
}

impl RockShape {
    fn roll(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..4) {
            0 => RockShape::Wide,
            1 => RockShape::Tall,
            2 => RockShape::Round,
            _ => RockShape::Standard,
        }
    }
}

/// A scrolling hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Render handle; the host maps this to whatever it draws with
    pub id: u32,
    /// World-space x of the obstacle's right edge (scrolls leftward)
    pub x: f32,
    pub style: RockStyle,
    pub shape: RockShape,
    /// Decorative terrain-bump offset in pixels (render hint only)
    pub lift: f32,
    /// Set once the obstacle has scrolled fully behind the avatar
    pub passed: bool,
}

/// The player avatar's vertical state
#[derive(Debug, Clone, Copy, Default)]
pub struct Avatar {
    /// Height above the ground line, always in `[0, JUMP_MAX]`
    pub height: f32,
    /// True during the linear rise portion of a jump
    pub ascending: bool,
}

impl Avatar {
    /// One frame of jump physics.
    ///
    /// The model is deliberately asymmetric: a linear rise of `JUMP_RISE` per
    /// frame capped at `JUMP_MAX`, then a linear fall of `FALL_GRAVITY` per
    /// frame clamped at the ground. Gameplay feel depends on exactly this.
    pub fn step(&mut self) {
        if self.ascending {
            if self.height < JUMP_MAX {
                self.height += JUMP_RISE;
            } else {
                self.ascending = false;
            }
        } else if self.height > 0.0 {
            self.height -= FALL_GRAVITY;
            if self.height < 0.0 {
                self.height = 0.0;
            }
        }
    }

    pub fn grounded(&self) -> bool {
        self.height == 0.0
    }
}

/// Per-frame events for the host (rendering, audio, score handoff).
///
/// Drained via [`GameState::take_events`]; the simulation never waits on the
/// host's handling of any of these.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstacleDespawned { id: u32 },
    ScorePoint { score: u32 },
    SpeedUp { speed: f32 },
    /// Terminal transition; carries the final score for the score-store handoff
    RunEnded { score: u32 },
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving spawn timing, placement, and variants
    pub rng: Pcg32,
    pub phase: RunPhase,
    /// Obstacles passed this run; monotone within a run
    pub score: u32,
    /// Scroll speed in pixels per frame; monotone within a run
    pub speed: f32,
    /// Frames since the last spawn
    pub spawn_timer: u32,
    /// Spawn threshold for the current interval
    pub next_spawn_in: u32,
    /// Visible field width; spawns appear just past its right edge
    pub field_width: f32,
    /// Simulation frame counter
    pub time_ticks: u64,
    pub avatar: Avatar,
    /// Live obstacles in insertion order
    pub obstacles: Vec<Obstacle>,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state in the [`RunPhase::Idle`] phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Idle,
            score: 0,
            speed: START_SPEED,
            spawn_timer: 0,
            next_spawn_in: 0,
            field_width: DEFAULT_FIELD_WIDTH,
            time_ticks: 0,
            avatar: Avatar::default(),
            obstacles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Begin (or restart) a run: full reset of all run state.
    ///
    /// Valid from any phase; a restart after game over never resumes partially.
    pub fn start(&mut self) {
        self.score = 0;
        self.speed = START_SPEED;
        self.avatar = Avatar::default();
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.next_spawn_in = self.roll_first_interval();
        self.time_ticks = 0;
        self.events.clear();
        self.phase = RunPhase::Running;
        log::info!("run started (seed {})", self.seed);
    }

    /// Viewport resize: clear the obstacle field and restart the spawn clock.
    ///
    /// Score, speed, and phase survive. This partial reset is a deliberate
    /// policy, not a shortcut.
    pub fn resize_field(&mut self, width: f32) {
        self.field_width = width;
        for ob in self.obstacles.drain(..) {
            self.events.push(GameEvent::ObstacleDespawned { id: ob.id });
        }
        self.spawn_timer = 0;
        self.next_spawn_in = self.roll_first_interval();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one obstacle just past the right edge of the field
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let x = self.field_width + self.rng.random_range(0.0..SPAWN_X_JITTER);
        let style = RockStyle::roll(&mut self.rng);
        let shape = RockShape::roll(&mut self.rng);
        // varied terrain bumps, kept on the ground
        let lift = self.rng.random_range(-12..16) as f32;
        self.obstacles.push(Obstacle {
            id,
            x,
            style,
            shape,
            lift,
            passed: false,
        });
        self.events.push(GameEvent::ObstacleSpawned { id });
    }

    /// Interval used at run start and after a resize
    fn roll_first_interval(&mut self) -> u32 {
        SPAWN_BASE + self.rng.random_range(0..SPAWN_FIRST_JITTER)
    }

    /// Interval used after each spawn; the lower bound shrinks with score
    /// (floored) so the field densifies as the run goes on.
    pub fn roll_spawn_interval(&mut self) -> u32 {
        let base = (SPAWN_BASE.saturating_sub(self.score / SPAWN_SCORE_DIV)).max(SPAWN_FLOOR);
        base + self.rng.random_range(0..SPAWN_JITTER)
    }

    /// Drain pending frame events for the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
