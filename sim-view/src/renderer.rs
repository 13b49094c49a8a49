//! egui implementation of the engine's [`Renderer`].
//!
//! The engine moves drawables and then presents the frame. Moves go to a
//! back buffer; [`Renderer::present_frame`] copies it to the front buffer,
//! which is what [`EguiRenderer::paint`] draws. A frame that was never
//! presented is never painted.

use glam::Vec2;
use sim_core::{
    render::{NodeTexture, Renderer},
    types::DrawableId,
};

#[derive(Clone, Copy, Debug)]
struct Drawable {
    texture: NodeTexture,
    position: Vec2,
}

#[derive(Debug, Default)]
pub struct EguiRenderer {
    back: Vec<Drawable>,
    front: Vec<Drawable>,
    frames_presented: u64,
}

impl EguiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn drawable_count(&self) -> usize {
        self.back.len()
    }

    /// Position of `proxy` in the last presented frame.
    #[cfg(test)]
    pub fn presented_position(&self, proxy: DrawableId) -> Option<Vec2> {
        self.front.get(proxy.0).map(|d| d.position)
    }

    /// Paints the presented frame. `to_screen` maps canvas coordinates to
    /// screen coordinates and `scale` is canvas-to-screen length ratio.
    pub fn paint(
        &self,
        painter: &egui::Painter,
        to_screen: impl Fn(Vec2) -> egui::Pos2,
        scale: f32,
    ) {
        for d in &self.front {
            let t = &d.texture;
            let center = to_screen(d.position + Vec2::splat(t.size * 0.5));
            let [r, g, b] = t.rgb();
            let color = egui::Color32::from_rgb(r, g, b);

            painter.circle_filled(center, t.core_radius * scale, color);
            painter.circle_stroke(
                center,
                t.ring_radius * scale,
                egui::Stroke::new(t.ring_width * scale, color),
            );
        }
    }
}

impl Renderer for EguiRenderer {
    fn create_drawable(&mut self, texture: &NodeTexture) -> DrawableId {
        self.back.push(Drawable {
            texture: *texture,
            position: Vec2::ZERO,
        });
        DrawableId(self.back.len() - 1)
    }

    fn set_proxy_position(&mut self, proxy: DrawableId, x: f32, y: f32) {
        if let Some(d) = self.back.get_mut(proxy.0) {
            d.position = Vec2::new(x, y);
        }
    }

    fn present_frame(&mut self) {
        self.front.clone_from(&self.back);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_are_invisible_until_presented() {
        let mut r = EguiRenderer::new();
        let id = r.create_drawable(&NodeTexture::air_node(26.0));
        assert_eq!(id, DrawableId(0));
        assert_eq!(r.presented_position(id), None);

        r.set_proxy_position(id, 10.0, 20.0);
        assert_eq!(r.presented_position(id), None);

        r.present_frame();
        assert_eq!(r.presented_position(id), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(r.frames_presented(), 1);

        r.set_proxy_position(id, 30.0, 40.0);
        assert_eq!(r.presented_position(id), Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn unknown_proxy_is_ignored() {
        let mut r = EguiRenderer::new();
        r.set_proxy_position(DrawableId(5), 1.0, 1.0);
        r.present_frame();
        assert_eq!(r.drawable_count(), 0);
    }
}
