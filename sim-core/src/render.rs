//! The rendering collaborator the engine draws through.
//!
//! The engine never touches pixels. It asks the renderer for one drawable
//! per body at startup, moves drawables once per render tick and then asks
//! for the frame to be presented.

use crate::types::DrawableId;

/// Fill colour of the air-node sprite, `0xRRGGBB`.
pub const AIR_NODE_FILL: u32 = 0x7fffd4;

/// Reference sprite dimensions the air-node texture is scaled from.
const REFERENCE_SIZE: f32 = 52.0;
const REFERENCE_CORE_RADIUS: f32 = 16.0;
const REFERENCE_RING_RADIUS: f32 = 20.0;
const REFERENCE_RING_WIDTH: f32 = 4.0;

pub trait Renderer {
    /// Creates a drawable for `texture` and returns a handle to it.
    fn create_drawable(&mut self, texture: &NodeTexture) -> DrawableId;

    /// Moves the drawable so its top-left corner is at `(x, y)`.
    fn set_proxy_position(&mut self, proxy: DrawableId, x: f32, y: f32);

    /// Presents everything moved since the last frame.
    fn present_frame(&mut self);
}

/// Description of the sprite used for a body: a filled core disc surrounded
/// by a thin ring, inside a square of side `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTexture {
    pub size: f32,
    pub core_radius: f32,
    pub ring_radius: f32,
    pub ring_width: f32,
    pub color: u32,
}

impl NodeTexture {
    /// Air-node texture for a body of the given radius.
    pub fn air_node(radius: f32) -> Self {
        let scale = radius * 2.0 / REFERENCE_SIZE;
        Self {
            size: radius * 2.0,
            core_radius: REFERENCE_CORE_RADIUS * scale,
            ring_radius: REFERENCE_RING_RADIUS * scale,
            ring_width: REFERENCE_RING_WIDTH * scale,
            color: AIR_NODE_FILL,
        }
    }

    /// Colour split into `[r, g, b]`.
    pub fn rgb(&self) -> [u8; 3] {
        [
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_radius_reproduces_reference_sprite() {
        let t = NodeTexture::air_node(26.0);
        assert_eq!(t.size, 52.0);
        assert_eq!(t.core_radius, 16.0);
        assert_eq!(t.ring_radius, 20.0);
        assert_eq!(t.ring_width, 4.0);
    }

    #[test]
    fn texture_scales_with_radius() {
        let t = NodeTexture::air_node(13.0);
        assert_eq!(t.size, 26.0);
        assert_eq!(t.core_radius, 8.0);
        assert_eq!(t.ring_radius, 10.0);
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(NodeTexture::air_node(1.0).rgb(), [0x7f, 0xff, 0xd4]);
    }
}
