//! The phases of one physics tick.
//!
//! The typical update loop looks like:
//! 1. [`force_phase`]: every body sums the accelerations of its forces into
//!    its velocity, then slow axes are snapped to zero.
//! 2. [`translation_phase`]: every body moves by its velocity and bounces
//!    off the canvas walls.
//! 3. [`overlap_phase`]: every unordered pair of overlapping bodies is
//!    recorded in an [`OverlapBuffer`].
//! 4. [`impulse_phase`]: overlapping bodies exchange velocity using a 1-D
//!    elastic collision per partner, averaged over the overlap group.
//! 5. [`net_momentum`] / [`net_kinetic_energy`]: aggregate quantities the
//!    engine samples periodically.
//!
//! All phases walk bodies in ascending id order, so a run is deterministic
//! for a given random source.

use crate::{
    body::Body,
    boundary::{Canvas, apply_translation},
    error::{NodiverseError, Result},
    overlap_buffer::OverlapBuffer,
};
use glam::Vec2;
use log::trace;
use rand::Rng;

/// Speeds below this (per axis, per tick) are treated as rest.
pub const DEADBAND: f32 = 1.0;

/// Applies every attached force to every body.
///
/// For each body, the accelerations of all its forces are computed against
/// the body's state at the start of the phase, summed, and added directly to
/// the velocity (one tick worth of acceleration). Any velocity component with
/// magnitude below [`DEADBAND`] is then set to exactly zero.
///
/// ### Parameters
/// - `bodies` - Bodies to update, in id order.
/// - `rng` - Random source handed to the forces.
pub fn force_phase<R: Rng + ?Sized>(bodies: &mut [Body], rng: &mut R) {
    for body in bodies.iter_mut() {
        let net_acc = {
            let state: &Body = body;
            state
                .forces()
                .iter()
                .fold(Vec2::ZERO, |acc, f| acc + f.produce_acceleration(state, &mut *rng))
        };

        body.velocity += net_acc;

        if body.velocity.x.abs() < DEADBAND {
            body.velocity.x = 0.0;
        }
        if body.velocity.y.abs() < DEADBAND {
            body.velocity.y = 0.0;
        }
    }
}

/// Moves every body by its velocity and resolves wall collisions.
///
/// ### Errors
/// Propagates the first boundary-resolution failure, and reports
/// [`NodiverseError::NonFinite`] if a body's state is no longer finite.
pub fn translation_phase(bodies: &mut [Body], canvas: &Canvas) -> Result<()> {
    for body in bodies.iter_mut() {
        apply_translation(body, None, canvas)?;
        if !body.is_finite() {
            return Err(NodiverseError::NonFinite { id: body.id });
        }
    }
    Ok(())
}

/// Records every overlapping pair of bodies.
///
/// The buffer is resized (and cleared) to `bodies.len()` first. Pairs are
/// visited as `(i, j)` with `i < j`, so every overlap group ends up sorted
/// by partner id.
pub fn overlap_phase(bodies: &[Body], acc: &mut OverlapBuffer) {
    acc.ensure_len(bodies.len());

    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            let distance = a.center_distance(b);
            if distance < a.radius() + b.radius() {
                acc.add_pair(i, j, distance);
            }
        }
    }
}

/// Velocity of body 1 after a 1-D elastic collision with body 2, applied
/// independently on each axis.
///
/// `v1' = ((m1 - m2) u1 + 2 m2 u2) / (m1 + m2)`
#[inline]
pub fn elastic_collision(m1: f32, u1: Vec2, m2: f32, u2: Vec2) -> Vec2 {
    ((m1 - m2) * u1 + 2.0 * m2 * u2) / (m1 + m2)
}

/// Per-body inputs of [`impulse_phase`], kept between ticks so the phase
/// does not allocate.
#[derive(Clone, Debug, Default)]
pub struct ImpulseScratch {
    velocities: Vec<Vec2>,
    masses: Vec<f32>,
}

impl ImpulseScratch {
    fn load(&mut self, bodies: &[Body]) {
        self.velocities.clear();
        self.velocities.extend(bodies.iter().map(|b| b.velocity));
        self.masses.clear();
        self.masses.extend(bodies.iter().map(Body::mass));
    }
}

/// Exchanges velocity between overlapping bodies.
///
/// For each body with a non-empty overlap group in `current`:
///
/// 1. Every partner contributes the [`elastic_collision`] outcome computed
///    from both bodies' velocities as they were before this phase.
/// 2. A partner is skipped if the pair also overlapped in `previous` and
///    the center distance has grown since then; those two are already
///    separating.
/// 3. The new velocity is the average of the contributions weighted by
///    partner mass. If every partner was skipped the velocity is unchanged.
/// 4. Each velocity axis is capped from above at `2 * radius` per tick. The
///    cap does not bound negative components.
///
/// Returns the number of bodies whose velocity was recomputed.
pub fn impulse_phase(
    bodies: &mut [Body],
    current: &OverlapBuffer,
    previous: &OverlapBuffer,
    scratch: &mut ImpulseScratch,
) -> usize {
    scratch.load(bodies);
    let pre_collision = &scratch.velocities;
    let masses = &scratch.masses;
    let mut resolved = 0;

    for id in current.overlapping_indices() {
        let mut weighted = Vec2::ZERO;
        let mut total_mass = 0.0;

        for &(other, distance) in current.partners(id) {
            if let Some(last) = previous.distance(id, other)
                && distance > last
            {
                trace!("bodies {id} and {other} separating ({last:.2} -> {distance:.2}), skipped");
                continue;
            }

            let outcome = elastic_collision(
                masses[id],
                pre_collision[id],
                masses[other],
                pre_collision[other],
            );
            weighted += outcome * masses[other];
            total_mass += masses[other];
        }

        if total_mass == 0.0 {
            continue;
        }

        let body = &mut bodies[id];
        let cap = body.diameter();
        let v = weighted / total_mass;
        body.velocity = Vec2::new(v.x.min(cap), v.y.min(cap));
        resolved += 1;

        trace!(
            "body {id}: ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            pre_collision[id].x, pre_collision[id].y, body.velocity.x, body.velocity.y
        );
    }

    resolved
}

/// Magnitude of `Σ m·v` over all bodies.
pub fn net_momentum(bodies: &[Body]) -> f32 {
    bodies
        .iter()
        .fold(Vec2::ZERO, |acc, b| acc + b.momentum())
        .length()
}

/// `Σ ½·m·|v|²` over all bodies.
pub fn net_kinetic_energy(bodies: &[Body]) -> f32 {
    bodies.iter().map(Body::kinetic_energy).sum()
}
