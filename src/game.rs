//! Game session: simulation plus input latching and score persistence
//!
//! [`Game`] owns one [`GameState`] and a [`ScoreStore`]. The embedding frame
//! loop sets inputs as key events arrive and calls [`Game::frame`] once per
//! frame with the raw wall-clock delta; everything else (dt capping, pause
//! one-shot clearing, high score writes) happens here.

use crate::consts::MAX_FRAME_DT;
use crate::highscores::ScoreStore;
use crate::levels::LevelSet;
use crate::sim::{GamePhase, GameState, TickInput, tick};

pub struct Game {
    pub state: GameState,
    pub input: TickInput,
    store: Box<dyn ScoreStore>,
    saved_high_score: u32,
}

impl Game {
    /// Build a session: the stored best score is read once here and seeds
    /// the round state.
    pub fn new(level_set: LevelSet, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let high_score = store.load();
        let mut state = GameState::new(level_set, seed);
        state.high_score = high_score;
        Self {
            state,
            input: TickInput::default(),
            store,
            saved_high_score: high_score,
        }
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    /// Advance one frame. `dt` is the raw wall-clock delta in seconds; it is
    /// capped so a stalled frame cannot tunnel actors through obstacles.
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        tick(&mut self.state, &self.input, dt);
        self.input.pause = false;

        if self.state.high_score > self.saved_high_score {
            self.saved_high_score = self.state.high_score;
            self.store.save(self.saved_high_score);
        }
    }

    /// Whether the round has reached a terminal phase
    pub fn round_over(&self) -> bool {
        matches!(self.state.phase, GamePhase::GameOver | GamePhase::Win)
    }
}
