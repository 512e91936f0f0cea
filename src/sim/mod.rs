//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the game state
//! - Delta-time capped by the caller before entry
//! - No rendering or platform dependencies
//!
//! Rendering, UI sync and input capture are read-only observers: they consume
//! the state snapshot after `tick` returns and feed the next frame's
//! [`TickInput`](tick::TickInput).

pub mod actor;
pub mod ai;
pub mod crops;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::{Actor, Facing};
pub use ai::ChasePolicy;
pub use crops::{Crop, CropKind, CropValues, Spawner};
pub use rect::Rect;
pub use state::{GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};
