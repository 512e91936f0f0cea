//! Harvest Rush - a two-farmer crop-harvesting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, AI, crops, game state)
//! - `levels`: Data-driven level definitions loaded from JSON
//! - `highscores`: Persisted high score behind a swappable store
//! - `game`: Frame-driven session wrapper around the simulation

pub mod game;
pub mod highscores;
pub mod levels;
pub mod sim;

pub use game::Game;
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use levels::{LevelDef, LevelSet};

/// Game configuration constants
pub mod consts {
    /// Logical field dimensions (units, not pixels)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Grid tile edge length; crops spawn grid-aligned
    pub const TILE: f32 = 30.0;

    /// Maximum delta-time fed into one update pass. Larger wall-clock gaps
    /// (backgrounded process, debugger stop) are clamped so actors cannot
    /// tunnel through obstacles and crops cannot spawn in bursts.
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Ceiling for the round countdown clock
    pub const MAX_TIME_LEFT: f32 = 999.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 34.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const AI_SPEED_DEFAULT: f32 = 200.0;
    /// Growth never slows an actor below this speed
    pub const ACTOR_MIN_SPEED: f32 = 200.0;
    /// Speed lost per unit of growth scale above 1.0
    pub const GROWTH_SLOWDOWN: f32 = 80.0;
    /// Actors stop growing at this multiple of their base box
    pub const GROWTH_MAX_SCALE: f32 = 1.6;

    /// Crop hitbox
    pub const CROP_WIDTH: f32 = 20.0;
    pub const CROP_HEIGHT: f32 = 26.0;

    /// Scarecrow hitbox
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    /// Obstacle count per level is clamped to [0, MAX_OBSTACLES]
    pub const MAX_OBSTACLES: u32 = 8;

    /// Spawn interval shrinks by this much per elapsed second of level time
    pub const SPAWN_RAMP_PER_SEC: f32 = 0.03;
    /// Spawn interval never drops below this
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.35;

    /// AI chase policy defaults
    pub const AI_REACTION_EVERY: f32 = 0.25;
    /// Velocity magnitude below which the AI is not "trying" to move
    pub const AI_MOVE_EPSILON: f32 = 0.1;
    /// Per-frame displacement below which the AI counts as stuck
    pub const AI_STUCK_DISPLACEMENT: f32 = 0.5;
    /// Stuck time that triggers a sidestep
    pub const AI_STUCK_AFTER: f32 = 0.25;
    /// Sidestep duration once triggered
    pub const AI_SIDESTEP_FOR: f32 = 0.35;

    /// Gameplay suspension between clearing a level and starting the next
    pub const LEVEL_UP_DELAY: f32 = 0.9;
}
