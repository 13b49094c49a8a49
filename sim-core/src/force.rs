//! Force sources that can be attached to a [`Body`].
//!
//! The set of forces is closed, so it is modelled as an enum rather than a
//! trait object. Every variant answers one question: what acceleration does
//! it produce on a body this tick. Accelerations from several forces on the
//! same body are summed by the engine before integration.

use crate::{body::Body, vector};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

/// Default magnitude of the idle boost.
pub const DEFAULT_BOOST: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Force {
    Boost(BoostForce),
    SurfaceFriction(KineticSurfaceFriction),
}

impl Force {
    /// Acceleration this force produces on `body` for the current tick.
    ///
    /// Has no side effects apart from drawing from `rng`.
    pub fn produce_acceleration<R: Rng + ?Sized>(&self, body: &Body, rng: &mut R) -> Vec2 {
        match self {
            Force::Boost(f) => f.produce_acceleration(body.velocity, rng),
            Force::SurfaceFriction(f) => f.produce_acceleration(body.velocity),
        }
    }
}

/// Kicks a body that has come to rest in a random direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoostForce {
    pub boost: f32,
}

impl Default for BoostForce {
    fn default() -> Self {
        Self {
            boost: DEFAULT_BOOST,
        }
    }
}

impl BoostForce {
    pub fn new(boost: f32) -> Self {
        Self { boost }
    }

    /// Zero unless `velocity` is exactly zero on both axes; otherwise a vector
    /// of length `boost` in a uniformly random direction, floored per axis.
    pub fn produce_acceleration<R: Rng + ?Sized>(&self, velocity: Vec2, rng: &mut R) -> Vec2 {
        if velocity.x != 0.0 || velocity.y != 0.0 {
            return Vec2::ZERO;
        }

        let dir = rng.random_range(-PI..PI);
        Vec2::new(
            (dir.cos() * self.boost).floor(),
            (dir.sin() * self.boost).floor(),
        )
    }
}

/// Kinetic friction between the canvas surface and a moving body.
///
/// The deceleration magnitude is `fk * g * time_unit`, directed against the
/// current velocity and never large enough to reverse it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KineticSurfaceFriction {
    deceleration: f32,
}

impl KineticSurfaceFriction {
    pub fn new(coefficient: f32, gravity: f32, time_unit: f32) -> Self {
        Self {
            deceleration: (coefficient * gravity * time_unit).abs(),
        }
    }

    #[inline]
    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }

    pub fn produce_acceleration(&self, velocity: Vec2) -> Vec2 {
        if self.deceleration >= vector::magnitude(velocity) {
            // Stops the body exactly instead of overshooting.
            return -velocity;
        }

        let a = -self.deceleration;
        Vec2::new(
            if velocity.x != 0.0 {
                vector::cosine_theta(velocity) * a
            } else {
                0.0
            },
            if velocity.y != 0.0 {
                vector::sine_theta(velocity) * a
            } else {
                0.0
            },
        )
    }
}
