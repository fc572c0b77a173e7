//! Tunable gameplay constants.
//!
//! Defaults reproduce the shipped difficulty. With the `serde` feature the
//! config can be deserialized (missing fields fall back to defaults), and with
//! `serde_json` it can be parsed straight from a JSON string handed over by JS.

use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// How the per-hole spawn chance is derived each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value"))]
pub enum SpawnRate {
    /// Fixed chance per hole per rendered frame. Effective difficulty scales
    /// with the display refresh rate.
    PerFrame(f64),
    /// Expected spawns per hole per second. The chance is derived from the
    /// elapsed frame delta so difficulty is frame-rate independent.
    PerSecond(f64),
}

impl SpawnRate {
    /// Chance that an eligible hole spawns during a frame lasting `dt_ms`.
    pub fn chance(&self, dt_ms: f64) -> f64 {
        match *self {
            SpawnRate::PerFrame(p) => p,
            SpawnRate::PerSecond(rate) => {
                let dt = dt_ms.max(0.0);
                (1.0 - (-rate * dt / 1000.0).exp()).clamp(0.0, 1.0)
            }
        }
    }
}

impl Default for SpawnRate {
    fn default() -> Self {
        SpawnRate::PerFrame(0.018)
    }
}

/// Image sources, loaded by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssetPaths {
    pub hole: String,
    pub target: String,
    pub bonus: String,
    pub hit: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            hole: "assets/hole.png".into(),
            target: "assets/target.png".into(),
            bonus: "assets/bonus.png".into(),
            hit: "assets/hit.png".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub round_ms: f64,
    pub spawn_rate: SpawnRate,
    /// Chance that a spawned target is a bonus target.
    pub bonus_chance: f64,
    pub basic_lifetime_ms: RangeInclusive<f64>,
    pub bonus_lifetime_ms: RangeInclusive<f64>,
    /// Re-eligibility delay after a spawn, independent of the lifetime.
    pub cooldown_ms: RangeInclusive<f64>,
    pub basic_points: u64,
    pub bonus_points: u64,
    pub bonus_multiplier: u32,
    pub bonus_multiplier_ms: f64,
    pub hit_flash_ms: f64,
    /// Hole diameter as a fraction of min(canvas width, canvas height).
    pub hole_scale: f64,
    /// Hit-circle radius as a fraction of the hole diameter.
    pub hit_radius_scale: f64,
    /// Upward shift of the hit-circle as a fraction of the hole diameter.
    pub pop_offset_scale: f64,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_ms: 30_000.0,
            spawn_rate: SpawnRate::default(),
            bonus_chance: 0.15,
            basic_lifetime_ms: 550.0..=900.0,
            bonus_lifetime_ms: 650.0..=950.0,
            cooldown_ms: 250.0..=520.0,
            basic_points: 30,
            bonus_points: 10,
            bonus_multiplier: 2,
            bonus_multiplier_ms: 6_000.0,
            hit_flash_ms: 160.0,
            hole_scale: 0.18,
            hit_radius_scale: 0.55,
            pop_offset_scale: 0.25,
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.round_ms.is_finite() && self.round_ms > 0.0) {
            return Err(ConfigError::RoundLength(self.round_ms));
        }
        match self.spawn_rate {
            SpawnRate::PerFrame(p) => probability("spawn_rate", p)?,
            SpawnRate::PerSecond(rate) => non_negative("spawn_rate", rate)?,
        }
        probability("bonus_chance", self.bonus_chance)?;
        range("basic_lifetime_ms", &self.basic_lifetime_ms)?;
        range("bonus_lifetime_ms", &self.bonus_lifetime_ms)?;
        range("cooldown_ms", &self.cooldown_ms)?;
        if self.bonus_multiplier == 0 {
            return Err(ConfigError::ZeroValue {
                field: "bonus_multiplier",
            });
        }
        non_negative("bonus_multiplier_ms", self.bonus_multiplier_ms)?;
        non_negative("hit_flash_ms", self.hit_flash_ms)?;
        non_negative("hole_scale", self.hole_scale)?;
        non_negative("hit_radius_scale", self.hit_radius_scale)?;
        non_negative("pop_offset_scale", self.pop_offset_scale)?;
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn range(field: &'static str, r: &RangeInclusive<f64>) -> Result<(), ConfigError> {
    non_negative(field, *r.start())?;
    non_negative(field, *r.end())?;
    if r.start() > r.end() {
        return Err(ConfigError::InvertedRange {
            field,
            min: *r.start(),
            max: *r.end(),
        });
    }
    Ok(())
}
