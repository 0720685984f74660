use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::presets::{self, DIFFUSION_A, DIFFUSION_B};
use crate::seed::SeedPolicy;

/// Smallest grid with a non-degenerate 3x3 neighborhood.
pub const MIN_DIM: usize = 3;

/// Gray-Scott rates for one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Replenishment of the substrate.
    pub feed: f32,
    /// Decay of the activator.
    pub kill: f32,
    pub da: f32,
    pub db: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self::from_preset(&presets::PRESETS[0])
    }
}

impl Params {
    pub fn from_preset(p: &presets::Preset) -> Self {
        Self {
            feed: p.feed,
            kill: p.kill,
            da: DIFFUSION_A,
            db: DIFFUSION_B,
        }
    }

    /// Rejects rates that would let NaN or negative growth into the grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("feed", self.feed),
            ("kill", self.kill),
            ("da", self.da),
            ("db", self.db),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        Ok(())
    }
}

/// Everything a driver supplies at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Preset name or table index; see [`presets::PRESETS`].
    pub preset: String,
    /// Overrides the preset's feed rate.
    pub feed: Option<f32>,
    /// Overrides the preset's kill rate.
    pub kill: Option<f32>,
    pub da: f32,
    pub db: f32,
    pub seed: SeedPolicy,
    /// Steps between saved frames in the drivers.
    pub snapshot_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 200,
            cols: 200,
            preset: presets::PRESETS[0].name.to_string(),
            feed: None,
            kill: None,
            da: DIFFUSION_A,
            db: DIFFUSION_B,
            seed: SeedPolicy::default(),
            snapshot_every: 500,
        }
    }
}

impl Config {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the preset and overrides into validated rates.
    pub fn params(&self) -> Result<Params, ConfigError> {
        let preset = presets::lookup(&self.preset)?;
        let params = Params {
            feed: self.feed.unwrap_or(preset.feed),
            kill: self.kill.unwrap_or(preset.kill),
            da: self.da,
            db: self.db,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_DIM || self.cols < MIN_DIM {
            return Err(ConfigError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.snapshot_every == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        self.seed.validate(self.rows, self.cols)?;
        self.params().map(|_| ())
    }
}
