use crate::{
    error::{NodiverseError, Result},
    force::Force,
    render::Renderer,
    types::{BodyId, DrawableId},
    vector,
};
use glam::Vec2;
use std::f32::consts::PI;

pub const DEFAULT_DENSITY: f32 = 2.0;

/// A circular body floating in the canvas.
///
/// `position` is the top-left corner of the body's bounding box, not its
/// center. Velocity is measured in distance per tick.
#[derive(Debug)]
pub struct Body {
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    radius: f32,
    density: f32,
    mass: f32,
    forces: Vec<Force>,
    render_proxy: DrawableId,
}

impl Clone for Body {
    fn clone(&self) -> Self {
        Self {
            forces: self.forces.clone(),
            ..*self
        }
    }

    /// Reuses the force list's allocation; the engine copies every body into
    /// its working set once per tick.
    fn clone_from(&mut self, source: &Self) {
        self.id = source.id;
        self.position = source.position;
        self.velocity = source.velocity;
        self.radius = source.radius;
        self.density = source.density;
        self.mass = source.mass;
        self.forces.clone_from(&source.forces);
        self.render_proxy = source.render_proxy;
    }
}

impl Body {
    /// Creates a body at rest with no forces attached.
    ///
    /// Fails if `radius` or `density` is not a positive finite number.
    pub fn new(
        id: BodyId,
        position: Vec2,
        radius: f32,
        density: f32,
        render_proxy: DrawableId,
    ) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(radius) || !valid(density) {
            return Err(NodiverseError::InvalidBody {
                id,
                radius,
                density,
            });
        }

        Ok(Self {
            id,
            position,
            velocity: Vec2::ZERO,
            radius,
            density,
            mass: PI * radius * radius * density,
            forces: Vec::with_capacity(2),
            render_proxy,
        })
    }

    /// Attaches a force. Forces can only be added while building the body.
    pub fn with_force(mut self, force: Force) -> Self {
        self.forces.push(force);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    #[inline]
    pub fn render_proxy(&self) -> DrawableId {
        self.render_proxy
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    /// Center of the body's disc.
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.radius)
    }

    /// Distance between the centers of `self` and `other`.
    #[inline]
    pub fn center_distance(&self, other: &Body) -> f32 {
        vector::euclidean_distance_between(self.center(), other.center())
    }

    /// `true` if the two discs overlap (touching does not count).
    pub fn is_overlapping(&self, other: &Body) -> bool {
        self.center_distance(other) < self.radius + other.radius
    }

    /// `m * v`
    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// `½ m |v|²`
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Copies the simulated position into the renderer's drawable.
    pub fn sync_render_proxy(&self, renderer: &mut dyn Renderer) {
        renderer.set_proxy_position(self.render_proxy, self.position.x, self.position.y);
    }
}
