//! Error type shared by the whole engine.

use crate::types::BodyId;
use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, NodiverseError>;

#[derive(Debug, Error)]
pub enum NodiverseError {
    /// A configuration value failed validation.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A body was built with a non-positive or non-finite radius/density.
    #[error("invalid body {id}: radius {radius}, density {density}")]
    InvalidBody {
        id: BodyId,
        radius: f32,
        density: f32,
    },

    /// Boundary resolution was requested for a body that is inside the canvas.
    #[error("boundary impulse applied to a body inside the canvas @({x}, {y})")]
    NotOutOfBounds { x: f32, y: f32 },

    /// A NaN or infinity reached the kinematic state of a body.
    #[error("non-finite kinematic state on body {id}")]
    NonFinite { id: BodyId },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NodiverseError {
    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
