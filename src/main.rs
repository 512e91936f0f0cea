//! Harvest Rush entry point
//!
//! Runs a headless round: the simulation ticks on wall-clock time with the
//! built-in chase AI playing and the player idle, then logs the outcome.
//! Embedders wanting a rendered game drive [`harvest_rush::Game`] from their
//! own frame loop instead.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use harvest_rush::consts::MAX_FRAME_DT;
use harvest_rush::sim::GamePhase;
use harvest_rush::{FileScoreStore, Game, LevelSet};

fn main() {
    env_logger::init();
    log::info!("Harvest Rush starting...");

    let levels = LevelSet::load_or_builtin(Path::new("levels.json"));
    let store = FileScoreStore::new("highscore.json");
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = Game::new(levels, Box::new(store), seed);
    game.start();

    let mut last = Instant::now();
    while !game.round_over() {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        game.frame(dt);
        thread::sleep(Duration::from_secs_f32(MAX_FRAME_DT / 2.0));
    }

    let state = &game.state;
    match state.phase {
        GamePhase::Win => log::info!(
            "Player wins: {} vs {} (level {})",
            state.player_score,
            state.ai_score,
            state.level_index + 1
        ),
        GamePhase::GameOver => log::info!(
            "AI wins: {} vs {} (level {})",
            state.ai_score,
            state.player_score,
            state.level_index + 1
        ),
        _ => {}
    }
    log::info!("High score: {}", state.high_score);
}
