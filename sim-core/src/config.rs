//! Startup configuration for a nodiverse.
//!
//! The configuration is read once, validated, and then treated as immutable
//! by the engine. It can be built in code (starting from [`Config::default`])
//! or loaded from YAML; every field is optional in YAML and falls back to the
//! default:
//!
//! ```yaml
//! width: 512.0
//! height: 512.0
//! gravity: 10.0
//! time_unit: 0.03          # seconds per physics tick
//! body_count: 15
//! body_radius: 26.0
//! density: 2.0
//! boost: 4.0
//! friction_coefficient: 1.5   # omit for no friction
//! diagnostics_interval: 20
//! history_len: 200
//! seed: 42                    # omit for an OS-seeded run
//! ```

use crate::{
    body::DEFAULT_DENSITY,
    diagnostics::DEFAULT_HISTORY_LEN,
    error::{NodiverseError, Result},
    force::DEFAULT_BOOST,
};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: f32,
    pub height: f32,
    /// Gravitational acceleration used by surface friction.
    pub gravity: f32,
    /// Physics tick period in seconds.
    pub time_unit: f32,
    pub body_count: usize,
    pub body_radius: f32,
    pub density: f32,
    /// Magnitude of the idle boost attached to every body.
    pub boost: f32,
    /// Kinetic friction coefficient; `None` disables friction.
    pub friction_coefficient: Option<f32>,
    /// Diagnostics are sampled on every tick that is a multiple of this.
    pub diagnostics_interval: u64,
    /// Samples kept per diagnostics stream.
    pub history_len: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 512.0,
            height: 512.0,
            gravity: 10.0,
            time_unit: 0.03,
            body_count: 15,
            body_radius: 26.0,
            density: DEFAULT_DENSITY,
            boost: DEFAULT_BOOST,
            friction_coefficient: None,
            diagnostics_interval: 20,
            history_len: DEFAULT_HISTORY_LEN,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Checks every field; the first violation is returned.
    pub fn validate(&self) -> Result<()> {
        let positive = |field: &'static str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(NodiverseError::config(field, format!("must be positive, got {v}")))
            }
        };

        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("time_unit", self.time_unit)?;
        positive("body_radius", self.body_radius)?;
        positive("density", self.density)?;

        if !self.gravity.is_finite() {
            return Err(NodiverseError::config("gravity", "must be finite"));
        }
        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(NodiverseError::config("boost", "must be non-negative"));
        }
        if let Some(fk) = self.friction_coefficient
            && !fk.is_finite()
        {
            return Err(NodiverseError::config(
                "friction_coefficient",
                "must be finite",
            ));
        }
        if self.body_count == 0 {
            return Err(NodiverseError::config("body_count", "need at least one body"));
        }
        let diameter = self.body_radius * 2.0;
        if diameter > self.width || diameter > self.height {
            return Err(NodiverseError::config(
                "body_radius",
                format!(
                    "a body of diameter {diameter} does not fit a {}x{} canvas",
                    self.width, self.height
                ),
            ));
        }
        if self.diagnostics_interval == 0 {
            return Err(NodiverseError::config("diagnostics_interval", "must be at least 1"));
        }
        if self.history_len == 0 {
            return Err(NodiverseError::config("history_len", "must be at least 1"));
        }
        Ok(())
    }
}
