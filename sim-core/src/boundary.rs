//! Canvas walls: bounds checks, clamping, and the elastic boundary impulse.
//!
//! A body is in bounds when its whole bounding box lies inside
//! `[0, width] x [0, height]`, i.e. `0 <= x <= width - 2r` and
//! `0 <= y <= height - 2r` for its top-left corner.

use crate::{
    body::Body,
    error::{NodiverseError, Result},
};
use glam::Vec2;
use log::debug;

/// The rectangle bodies live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

/// Wall a body hit, in the order walls are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Left,
    Top,
    Right,
    Bottom,
}

impl Boundary {
    fn is_vertical(self) -> bool {
        matches!(self, Boundary::Left | Boundary::Right)
    }
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` if any part of a body with top-left corner `(x, y)` is outside.
    pub fn is_out_of_bounds(&self, x: f32, y: f32, radius: f32) -> bool {
        let diameter = radius * 2.0;
        x < 0.0 || y < 0.0 || x > self.width - diameter || y > self.height - diameter
    }

    pub fn to_in_bounds_x(&self, x: f32, diameter: f32) -> f32 {
        if x < 0.0 {
            return 0.0;
        }
        x.min(self.width - diameter)
    }

    pub fn to_in_bounds_y(&self, y: f32, diameter: f32) -> f32 {
        if y < 0.0 {
            return 0.0;
        }
        y.min(self.height - diameter)
    }

    /// First violated wall in left, top, right, bottom order.
    pub fn violated_boundary(&self, x: f32, y: f32, radius: f32) -> Option<Boundary> {
        let diameter = radius * 2.0;
        if x < 0.0 {
            Some(Boundary::Left)
        } else if y < 0.0 {
            Some(Boundary::Top)
        } else if x > self.width - diameter {
            Some(Boundary::Right)
        } else if y > self.height - diameter {
            Some(Boundary::Bottom)
        } else {
            None
        }
    }
}

/// Zeroes values whose integer part is zero, so slow decay cannot keep a
/// body creeping forever.
#[inline]
pub fn rectify(mag: f32) -> f32 {
    if mag.abs().floor() <= 0.01 { 0.0 } else { mag }
}

/// Reflects `body` off the first wall it crossed.
///
/// The collision point is where the body's line of motion meets the wall.
/// The velocity component perpendicular to that wall is negated and the
/// parallel one is kept, so speed is preserved. The body is then clamped
/// into the canvas on both axes. If two walls are crossed in the same tick,
/// only the first in left, top, right, bottom order is reflected; the other
/// one is handled on a later tick.
///
/// A zero velocity component along the wall normal means the line of motion
/// has no defined slope; the collision point then keeps the current
/// coordinate along the wall.
///
/// ### Errors
/// [`NodiverseError::NotOutOfBounds`] if the body is inside the canvas.
pub fn apply_boundary_impulse(body: &mut Body, canvas: &Canvas) -> Result<Boundary> {
    let (x, y) = (body.x(), body.y());
    let diameter = body.diameter();
    let boundary = canvas
        .violated_boundary(x, y, body.radius())
        .ok_or(NodiverseError::NotOutOfBounds { x, y })?;

    let v = body.velocity;
    let collision = if boundary.is_vertical() {
        let bound_x = if boundary == Boundary::Left {
            0.0
        } else {
            canvas.width - diameter
        };
        let collision_y = if v.x != 0.0 {
            v.y / v.x * (bound_x - x) + y
        } else {
            y
        };
        body.velocity.x = -v.x;
        Vec2::new(bound_x, collision_y)
    } else {
        let bound_y = if boundary == Boundary::Top {
            0.0
        } else {
            canvas.height - diameter
        };
        let collision_x = if v.y != 0.0 {
            v.x / v.y * (bound_y - y) + x
        } else {
            x
        };
        body.velocity.y = -v.y;
        Vec2::new(collision_x, bound_y)
    };

    body.position = Vec2::new(
        canvas.to_in_bounds_x(collision.x, diameter),
        canvas.to_in_bounds_y(collision.y, diameter),
    );
    debug!(
        "body {} hit {:?} wall @({:.2}, {:.2}), velocity now ({:.2}, {:.2})",
        body.id, boundary, body.position.x, body.position.y, body.velocity.x, body.velocity.y
    );

    Ok(boundary)
}

/// Moves `body` by `delta`, or by its velocity when `delta` is `None`, and
/// bounces it off the canvas walls if the move leaves the canvas.
///
/// Components of the new position with a zero integer part are snapped to 0.
pub fn apply_translation(body: &mut Body, delta: Option<Vec2>, canvas: &Canvas) -> Result<()> {
    let delta = delta.unwrap_or(body.velocity);
    let new_x = rectify(body.x() + delta.x);
    let new_y = rectify(body.y() + delta.y);

    body.set_x(new_x);
    body.set_y(new_y);

    if canvas.is_out_of_bounds(new_x, new_y, body.radius()) {
        apply_boundary_impulse(body, canvas)?;
    }
    Ok(())
}
