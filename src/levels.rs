//! Level definitions and config loading
//!
//! Levels come from a `levels.json` file at the project root; a missing or
//! malformed file degrades to three built-in defaults with ascending
//! difficulty. The file may also override crop point values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::CropValues;

/// One difficulty tier, applied atomically when the level begins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDef {
    /// Score that ends the level in the player's favor
    pub goal: u32,
    /// Round time limit in seconds
    pub time: f32,
    /// Base crop spawn interval in seconds
    pub spawn_every: f32,
    /// Scarecrow count (clamped to [0, 8] when applied)
    pub obstacles: u32,
    /// AI farmer speed in units/sec
    pub ai_speed: f32,
    /// Seconds between growth pulses
    #[serde(default = "default_growth_every")]
    pub growth_every: f32,
    /// Units grown per pulse
    #[serde(default = "default_growth_amount")]
    pub growth_amount: f32,
}

fn default_growth_every() -> f32 {
    10.0
}

fn default_growth_amount() -> f32 {
    2.0
}

/// On-disk config shape: a level list plus optional crop point overrides
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    levels: Vec<LevelDef>,
    #[serde(default)]
    crops: Option<CropValues>,
}

/// An ordered, never-empty sequence of level definitions
#[derive(Debug, Clone)]
pub struct LevelSet {
    pub levels: Vec<LevelDef>,
    pub crop_values: CropValues,
}

impl LevelSet {
    /// The three built-in defaults used when no config is available
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelDef {
                    goal: 15,
                    time: 60.0,
                    spawn_every: 0.9,
                    obstacles: 2,
                    ai_speed: 200.0,
                    growth_every: 10.0,
                    growth_amount: 2.0,
                },
                LevelDef {
                    goal: 30,
                    time: 55.0,
                    spawn_every: 0.7,
                    obstacles: 3,
                    ai_speed: 210.0,
                    growth_every: 9.0,
                    growth_amount: 2.0,
                },
                LevelDef {
                    goal: 45,
                    time: 50.0,
                    spawn_every: 0.55,
                    obstacles: 4,
                    ai_speed: 220.0,
                    growth_every: 8.0,
                    growth_amount: 2.0,
                },
            ],
            crop_values: CropValues::default(),
        }
    }

    /// Parse a config document. An empty level list or a level with a
    /// non-positive timing parameter is an error so the caller can fall
    /// back; a zero interval would stall the update pass.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: ConfigFile = serde_json::from_str(json)?;
        if config.levels.is_empty() {
            return Err(serde::de::Error::custom("config contains no levels"));
        }
        for (i, level) in config.levels.iter().enumerate() {
            // negated comparisons also reject NaN
            if !(level.time > 0.0) || !(level.spawn_every > 0.0) || !(level.growth_every > 0.0) {
                return Err(serde::de::Error::custom(format!(
                    "level {} has a non-positive time, spawnEvery or growthEvery",
                    i + 1
                )));
            }
        }
        Ok(Self {
            levels: config.levels,
            crop_values: config.crops.unwrap_or_default(),
        })
    }

    /// Load a config file, degrading to the built-in defaults on any
    /// failure. Never returns an empty set.
    pub fn load_or_builtin(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(set) => {
                    log::info!("Loaded {} levels from {}", set.levels.len(), path.display());
                    set
                }
                Err(err) => {
                    log::warn!("{} invalid ({err}); using built-in levels", path.display());
                    Self::builtin()
                }
            },
            Err(err) => {
                log::warn!("{} not loaded ({err}); using built-in levels", path.display());
                Self::builtin()
            }
        }
    }
}
