//! Per-frame simulation step
//!
//! The host schedules [`tick`] once per display refresh while a run is active.
//! The core never touches a refresh primitive itself, so tests can drive it
//! directly in a loop at any rate.

use super::collision::{avatar_rect, hit_test, obstacle_rect};
use super::state::{GameEvent, GameState, RunPhase};
use crate::consts::*;

/// Input intents for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump intent (idempotent; debounced by the grounded/ascending guard)
    pub jump: bool,
}

/// Advance the run by one frame.
///
/// A no-op unless the phase is [`RunPhase::Running`], which is how the loop
/// self-terminates after a collision. Step order is a contract:
/// physics, spawn, advance, collide, score, cull. Collision is tested against
/// post-advance positions; a colliding obstacle never scores on its terminal
/// frame, though other obstacles still may.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != RunPhase::Running {
        return;
    }
    state.time_ticks += 1;

    // Jump intent: only taken by a grounded, non-ascending avatar
    if input.jump && state.avatar.grounded() && !state.avatar.ascending {
        state.avatar.ascending = true;
    }

    // 1. Physics
    state.avatar.step();

    // 2. Spawn scheduling
    state.spawn_timer += 1;
    if state.spawn_timer >= state.next_spawn_in {
        state.spawn_obstacle();
        state.spawn_timer = 0;
        state.next_spawn_in = state.roll_spawn_interval();
    }

    // 3. Advance the field
    for ob in &mut state.obstacles {
        ob.x -= state.speed;
    }

    // 4. Collision, against post-advance positions
    let avatar = avatar_rect(&state.avatar);
    let collided = state
        .obstacles
        .iter()
        .any(|ob| hit_test(&avatar, &obstacle_rect(ob)));

    // 5. Pass/score
    for ob in &mut state.obstacles {
        if !ob.passed && ob.x < avatar.left() {
            ob.passed = true;
            state.score += 1;
            state.events.push(GameEvent::ScorePoint { score: state.score });
            if state.score % SPEED_STEP_SCORE == 0 {
                state.speed += SPEED_STEP;
                state.events.push(GameEvent::SpeedUp { speed: state.speed });
            }
        }
    }

    // 6. Cull fully-offscreen obstacles, releasing their render handles
    let events = &mut state.events;
    state.obstacles.retain(|ob| {
        let offscreen = ob.x < DESPAWN_X;
        if offscreen {
            events.push(GameEvent::ObstacleDespawned { id: ob.id });
        }
        !offscreen
    });

    if collided {
        state.phase = RunPhase::GameOver;
        state.events.push(GameEvent::RunEnded { score: state.score });
        log::info!("run ended at score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::sim::state::{RockShape, RockStyle};
    use proptest::prelude::*;

    /// Running state with the spawner pushed far into the future, so tests
    /// control the field manually.
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.next_spawn_in = 10_000;
        state
    }

    fn place_rock(state: &mut GameState, x: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x,
            style: RockStyle::Plain,
            shape: RockShape::Standard,
            lift: 0.0,
            passed: false,
        });
    }

    #[test]
    fn test_tick_noop_when_idle() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput { jump: true });
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.time_ticks, 0);
        assert!(!state.avatar.ascending);
    }

    #[test]
    fn test_sixty_quiet_frames_change_nothing() {
        let mut state = quiet_state(2);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert_eq!(state.avatar.height, 0.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_debounce_while_airborne() {
        let mut state = quiet_state(3);

        // First press takes
        tick(&mut state, &TickInput { jump: true });
        assert!(state.avatar.ascending);
        assert_eq!(state.avatar.height, JUMP_RISE);

        // Pressing again mid-rise has no extra effect
        tick(&mut state, &TickInput { jump: true });
        assert!(state.avatar.ascending);
        assert_eq!(state.avatar.height, 2.0 * JUMP_RISE);

        // Pressing during the fall does not restart the jump
        state.avatar.ascending = false;
        state.avatar.height = 100.0;
        tick(&mut state, &TickInput { jump: true });
        assert!(!state.avatar.ascending);
        assert_eq!(state.avatar.height, 100.0 - FALL_GRAVITY);
    }

    #[test]
    fn test_collision_on_exact_frame() {
        let mut state = quiet_state(4);
        // Speed 7: x goes 150 -> 143 (clear, left edge past the avatar band)
        // -> 136 (overlap). Termination must land on the second frame exactly.
        place_rock(&mut state, 150.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::Running);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::RunEnded { score: 0 })
        );
    }

    #[test]
    fn test_jump_over_rock_scores_once() {
        let mut state = quiet_state(5);
        place_rock(&mut state, 180.0);

        // Jump on the third frame; by the time the rock reaches the avatar
        // band the avatar's bottom edge is at or above the rock top.
        for frame in 1..=21u32 {
            let input = TickInput { jump: frame == 3 };
            tick(&mut state, &input);
            assert_eq!(state.phase, RunPhase::Running, "collided on frame {frame}");
        }
        assert_eq!(state.score, 1);
        assert_eq!(state.speed, START_SPEED);
        assert!(state.obstacles[0].passed);

        // Never scores a second time; culled once fully offscreen
        for _ in 22..=43 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 1);
        assert!(state.obstacles.is_empty());
        assert!(
            state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ObstacleDespawned { .. }))
        );
    }

    #[test]
    fn test_speed_steps_on_fifth_point() {
        let mut state = quiet_state(6);
        state.score = SPEED_STEP_SCORE - 1;
        // Rock already behind the collision band, one frame from passing
        place_rock(&mut state, AVATAR_LEFT + 5.0);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, SPEED_STEP_SCORE);
        assert_eq!(state.speed, START_SPEED + SPEED_STEP);

        // Threshold applies once, not per frame
        tick(&mut state, &TickInput::default());
        assert_eq!(state.speed, START_SPEED + SPEED_STEP);
    }

    #[test]
    fn test_terminal_frame_still_scores_other_obstacles() {
        let mut state = quiet_state(7);
        place_rock(&mut state, 141.0); // advances to 134: collides
        place_rock(&mut state, 45.0); // advances to 38: passes

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);
        assert_eq!(state.score, 1);
        // Final score handed off includes the same-frame pass
        assert!(
            state
                .take_events()
                .contains(&GameEvent::RunEnded { score: 1 })
        );
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = quiet_state(8);
        place_rock(&mut state, 100.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);

        let ticks = state.time_ticks;
        let positions: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        for _ in 0..10 {
            tick(&mut state, &TickInput { jump: true });
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert_eq!(
            state.obstacles.iter().map(|o| o.x).collect::<Vec<_>>(),
            positions
        );
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = quiet_state(9);
        place_rock(&mut state, 100.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, RunPhase::GameOver);

        state.start();
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, START_SPEED);
        assert!(state.obstacles.is_empty());

        // The loop runs again
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_spawner_fires_within_first_interval() {
        let mut state = GameState::new(10);
        state.start();
        let interval = state.next_spawn_in;
        assert!(interval < SPAWN_BASE + SPAWN_FIRST_JITTER);

        for _ in 0..interval {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles.len(), 1);
        // Spawned at the right edge, then advanced once this frame
        assert!(state.obstacles[0].x >= state.field_width - state.speed);
        assert!(
            state
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
        );
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        for frame in 0..500u32 {
            let input = TickInput {
                jump: frame % 37 == 0,
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.speed, state2.speed);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        for (a, b) in state1.obstacles.iter().zip(&state2.obstacles) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.id, b.id);
        }
    }

    proptest! {
        /// Invariants over arbitrary seeds and jump sequences: height stays in
        /// [0, JUMP_MAX], score is monotone, and speed tracks the score
        /// thresholds exactly.
        #[test]
        fn prop_run_invariants(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..400)) {
            let mut state = GameState::new(seed);
            state.start();
            let mut last_score = 0u32;

            for &jump in &jumps {
                tick(&mut state, &TickInput { jump });
                prop_assert!(state.avatar.height >= 0.0);
                prop_assert!(state.avatar.height <= JUMP_MAX);
                prop_assert!(state.score >= last_score);
                let thresholds = (state.score / SPEED_STEP_SCORE) as f32;
                prop_assert_eq!(state.speed, START_SPEED + SPEED_STEP * thresholds);
                last_score = state.score;
            }
        }
    }
}
