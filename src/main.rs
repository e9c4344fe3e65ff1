//! Moon Dash entry point
//!
//! The browser build drives the simulation from a requestAnimationFrame host;
//! this binary is the native stand-in: a headless host loop that schedules
//! `tick` once per "frame", auto-plays a run, and hands the final score to the
//! score board exactly the way a real host would.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moon_dash::consts::*;
    use moon_dash::scores::{DEFAULT_TOP_LIMIT, ScoreBoard};
    use moon_dash::sim::{GameEvent, GameState, RunPhase, TickInput, tick};

    env_logger::init();

    let seed: u64 = rand::random();
    log::info!("Moon Dash headless demo, seed {seed}");

    let mut board = ScoreBoard::load();
    board.create_player("demo", "autopilot");

    let mut state = GameState::new(seed);
    state.start();

    // Jump far enough ahead of the nearest rock to clear its top by the time
    // the hitboxes meet.
    let jump_line =
        AVATAR_LEFT + AVATAR_WIDTH + OBSTACLE_WIDTH + state.speed * (OBSTACLE_HEIGHT / JUMP_RISE);

    let mut final_score = 0;
    for _frame in 0..100_000u32 {
        let rock_near = state
            .obstacles
            .iter()
            .any(|ob| !ob.passed && ob.x > AVATAR_LEFT && ob.x < jump_line);
        tick(&mut state, &TickInput { jump: rock_near });

        for event in state.take_events() {
            match event {
                GameEvent::ScorePoint { score } => log::debug!("score {score}"),
                GameEvent::SpeedUp { speed } => log::info!("speed up: {speed}"),
                GameEvent::RunEnded { score } => {
                    // Fire-and-forget handoff: the sim is already terminal
                    board.save_score("demo", score);
                    board.save();
                    final_score = score;
                }
                _ => {}
            }
        }

        if state.phase != RunPhase::Running {
            break;
        }
    }

    println!("run over, final score: {final_score}");
    println!("leaderboard:");
    for (rank, entry) in board.top_scores(DEFAULT_TOP_LIMIT).iter().enumerate() {
        println!("  {}. {} - {}", rank + 1, entry.nickname, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host links against the library crate directly
}
