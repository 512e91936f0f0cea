//! Round state and the game lifecycle
//!
//! All mutable round state lives here, owned exclusively by the simulation
//! core and mutated only inside the update pass. Renderers and UI read it
//! between frames as a stable snapshot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::levels::{LevelDef, LevelSet};
use super::actor::Actor;
use super::ai::ChasePolicy;
use super::crops::{Crop, CropValues, Spawner, random_grid_pos, random_kind};
use super::rect::Rect;

/// Top-level lifecycle state; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Initial state, waiting for an explicit start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay suspended by the pause toggle
    Paused,
    /// Transient suspension between levels; the one pending transition
    LevelUp,
    /// The AI won the round
    GameOver,
    /// The player cleared every level or won on points
    Win,
}

/// A scarecrow: static, immutable for the round, blocks actor movement
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        }
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,

    pub player: Actor,
    pub ai: Actor,
    pub ai_policy: ChasePolicy,
    pub crops: Vec<Crop>,
    pub obstacles: Vec<Obstacle>,

    /// Ordered difficulty tiers; index only ever advances within a round
    pub levels: Vec<LevelDef>,
    pub level_index: usize,
    pub goal: u32,
    pub crop_values: CropValues,

    pub time_left: f32,
    pub spawner: Spawner,
    pub growth_every: f32,
    pub growth_amount: f32,
    pub(super) growth_timer: f32,
    /// Countdown for the pending level-up transition (LevelUp phase only)
    pub(super) levelup_timer: f32,

    pub player_score: u32,
    pub ai_score: u32,
    /// Best player score seen; survives resets, persisted by the session
    pub high_score: u32,

    /// Round seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create a fresh round in the Menu state with level 0 applied. An
    /// empty level set is replaced by the built-in defaults; the rest of
    /// the state machine assumes at least one level exists.
    pub fn new(level_set: LevelSet, seed: u64) -> Self {
        let level_set = if level_set.levels.is_empty() {
            log::warn!("Empty level set; using built-in levels");
            LevelSet::builtin()
        } else {
            level_set
        };
        let LevelSet {
            levels,
            crop_values,
        } = level_set;
        let first = levels[0].clone();
        let mut state = Self {
            phase: GamePhase::Menu,
            player: Self::spawn_player(),
            ai: Self::spawn_ai(first.ai_speed),
            ai_policy: ChasePolicy::new(AI_REACTION_EVERY),
            crops: Vec::new(),
            obstacles: Vec::new(),
            levels,
            level_index: 0,
            goal: first.goal,
            crop_values,
            time_left: first.time,
            spawner: Spawner::new(first.spawn_every),
            growth_every: first.growth_every,
            growth_amount: first.growth_amount,
            growth_timer: 0.0,
            levelup_timer: 0.0,
            player_score: 0,
            ai_score: 0,
            high_score: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.apply_level(0);
        state
    }

    fn spawn_player() -> Actor {
        Actor::new(
            FIELD_WIDTH / 2.0 - ACTOR_SIZE / 2.0,
            FIELD_HEIGHT - 80.0,
            PLAYER_SPEED,
        )
    }

    fn spawn_ai(speed: f32) -> Actor {
        Actor::new(FIELD_WIDTH / 2.0 - ACTOR_SIZE / 2.0, 100.0, speed)
    }

    /// Apply a level definition: install its parameters, zero the timing
    /// accumulators, rebuild the obstacle layout, and reposition the AI.
    pub fn apply_level(&mut self, index: usize) {
        debug_assert!(index >= self.level_index || index == 0);
        self.level_index = index.min(self.levels.len() - 1);
        let level = self.levels[self.level_index].clone();

        self.goal = level.goal;
        self.time_left = level.time.clamp(0.0, MAX_TIME_LEFT);
        self.spawner.reset(level.spawn_every);
        self.growth_every = level.growth_every;
        self.growth_amount = level.growth_amount;
        self.growth_timer = 0.0;
        self.levelup_timer = 0.0;

        self.ai.set_speed(level.ai_speed);
        self.ai.rect.x = FIELD_WIDTH / 2.0 - self.ai.rect.w / 2.0;
        self.ai.rect.y = 80.0;

        self.regenerate_obstacles(level.obstacles);
        log::info!(
            "Level {} applied: goal={} time={} spawn_every={} obstacles={}",
            self.level_index + 1,
            self.goal,
            self.time_left,
            self.spawner.interval,
            self.obstacles.len()
        );
    }

    /// Scarecrows evenly spaced across the field width with an alternating
    /// vertical offset plus seeded jitter
    fn regenerate_obstacles(&mut self, count: u32) {
        self.obstacles.clear();
        let count = count.min(MAX_OBSTACLES);
        for i in 0..count {
            let spread = (FIELD_WIDTH - 240.0) / (count.saturating_sub(1)).max(1) as f32;
            let x = 120.0 + i as f32 * spread;
            let wobble = if i % 2 == 1 { 40.0 } else { -20.0 };
            let y = 120.0 + wobble + self.rng.random_range(0.0..40.0);
            self.obstacles.push(Obstacle::new(x, y));
        }
    }

    /// Spawn one crop at a random grid cell with a random kind
    pub(super) fn spawn_crop(&mut self) {
        let pos = random_grid_pos(&mut self.rng);
        let kind = random_kind(&mut self.rng);
        let sway = self.rng.random_range(0.0..std::f32::consts::TAU);
        self.crops.push(Crop::new(pos.x, pos.y, kind, sway));
    }

    /// Begin a round. Valid from Menu, GameOver and Win (resets the round
    /// first); a no-op from any other state.
    pub fn start(&mut self) {
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Win => {
                self.reset();
                self.phase = GamePhase::Playing;
                log::info!("Round started (seed {})", self.seed);
            }
            _ => {}
        }
    }

    /// Return to the Menu with a fresh round. Valid from any state; the
    /// high score survives.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Menu;
        self.player = Self::spawn_player();
        self.ai = Self::spawn_ai(self.levels[0].ai_speed);
        self.ai_policy.reset();
        self.crops.clear();
        self.player_score = 0;
        self.ai_score = 0;
        self.apply_level(0);
    }

    /// Flip between Playing and Paused; a no-op from any other state
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    /// The player met the goal: schedule the next level or win the round
    pub(super) fn advance_level(&mut self) {
        if self.level_index + 1 < self.levels.len() {
            self.phase = GamePhase::LevelUp;
            self.levelup_timer = LEVEL_UP_DELAY;
            log::info!("Level {} cleared", self.level_index + 1);
        } else {
            self.phase = GamePhase::Win;
            log::info!("All levels cleared");
        }
    }
}
