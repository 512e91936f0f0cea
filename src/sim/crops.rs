//! Crops: kinds, point values, and the spawn timer
//!
//! Crops appear on a timer at grid-aligned random positions and disappear
//! the frame a farmer picks them up. The spawn accumulator subtracts the
//! interval instead of resetting to zero, so fractional overrun carries
//! across frames and the long-term spawn rate is frame-size independent.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use super::rect::Rect;

/// The harvestable crop types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropKind {
    Wheat,
    Pumpkin,
    GoldenApple,
}

impl CropKind {
    pub const ALL: [CropKind; 3] = [CropKind::Wheat, CropKind::Pumpkin, CropKind::GoldenApple];
}

/// Point values per crop kind, overridable from the level config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropValues {
    pub wheat: u32,
    pub pumpkin: u32,
    pub golden_apple: u32,
}

impl Default for CropValues {
    fn default() -> Self {
        Self {
            wheat: 1,
            pumpkin: 3,
            golden_apple: 5,
        }
    }
}

impl CropValues {
    pub fn points(&self, kind: CropKind) -> u32 {
        match kind {
            CropKind::Wheat => self.wheat,
            CropKind::Pumpkin => self.pumpkin,
            CropKind::GoldenApple => self.golden_apple,
        }
    }
}

/// A crop on the field
#[derive(Debug, Clone)]
pub struct Crop {
    pub rect: Rect,
    pub kind: CropKind,
    /// Sway animation phase (radians). Visual only, no gameplay effect.
    pub sway: f32,
    /// Marked the frame the crop is awarded; removed at end of the pass
    pub taken: bool,
}

impl Crop {
    pub fn new(x: f32, y: f32, kind: CropKind, sway: f32) -> Self {
        Self {
            rect: Rect::new(x, y, CROP_WIDTH, CROP_HEIGHT),
            kind,
            sway,
            taken: false,
        }
    }

    /// Advance the sway animation
    pub fn update(&mut self, dt: f32) {
        self.sway += dt * 2.0;
    }
}

/// A grid-aligned random position with a one-tile margin from every edge
pub fn random_grid_pos(rng: &mut Pcg32) -> Vec2 {
    let cols = ((FIELD_WIDTH - 2.0 * TILE) / TILE) as u32;
    let rows = ((FIELD_HEIGHT - 2.0 * TILE) / TILE) as u32;
    let gx = rng.random_range(0..cols) as f32 * TILE + TILE;
    let gy = rng.random_range(0..rows) as f32 * TILE + TILE;
    Vec2::new(gx, gy)
}

/// A crop kind drawn uniformly
pub fn random_kind(rng: &mut Pcg32) -> CropKind {
    CropKind::ALL[rng.random_range(0..CropKind::ALL.len())]
}

/// Spawn timing: accumulator plus the within-level difficulty ramp
#[derive(Debug, Clone)]
pub struct Spawner {
    /// Interval configured by the current level
    base_interval: f32,
    /// Effective interval after the ramp (shrinks as the level runs)
    pub interval: f32,
    accum: f32,
    elapsed: f32,
}

impl Spawner {
    pub fn new(base_interval: f32) -> Self {
        Self {
            base_interval,
            interval: base_interval,
            accum: 0.0,
            elapsed: 0.0,
        }
    }

    /// Re-arm for a new level: fresh interval, zeroed accumulators
    pub fn reset(&mut self, base_interval: f32) {
        self.base_interval = base_interval;
        self.interval = base_interval;
        self.accum = 0.0;
        self.elapsed = 0.0;
    }

    /// Advance elapsed level time and tighten the effective interval
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.interval =
            (self.base_interval - SPAWN_RAMP_PER_SEC * self.elapsed).max(SPAWN_INTERVAL_FLOOR);
    }

    /// Accumulate `dt` and return how many spawns are due. Subtracts the
    /// interval per spawn rather than resetting, preserving fractional
    /// overrun.
    pub fn take_due(&mut self, dt: f32) -> u32 {
        self.accum += dt;
        let mut due = 0;
        while self.accum >= self.interval {
            self.accum -= self.interval;
            due += 1;
        }
        due
    }
}
