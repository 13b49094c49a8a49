//! Interactive nodiverse viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the engine, the egui renderer
//! and the diagnostics history, and implements [`eframe::App`] to drive and
//! display the simulation.

use crate::renderer::EguiRenderer;
use eframe::App;
use glam::Vec2;
use log::error;
use sim_core::{
    Nodiverse, Result,
    config::Config,
    diagnostics::{DiagnosticsHistory, SampleWindow, StreamId},
};

const PLOT_HEIGHT: f32 = 70.0;

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Nodiverse`] and its [`Config`].
/// - The two collaborators the engine talks to: [`EguiRenderer`] and
///   [`DiagnosticsHistory`].
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. If the engine is active, call [`Nodiverse::update`], which runs the
///    physics ticks that are due and then a render tick.
/// 3. Paint the last presented frame and the diagnostics plots.
///
/// ### Fields
/// - `nodiverse` - The running engine.
/// - `renderer` - Drawables the engine moves and presents.
/// - `history` - Bounded momentum / energy samples.
/// - `cfg` - Configuration edited in the side panel, applied on reset.
/// - `last_error` - Message of the tick failure that stopped the engine.
/// - `hover` - Canvas position under the pointer, for the status bar.
pub struct Viewer {
    nodiverse: Nodiverse,
    renderer: EguiRenderer,
    history: DiagnosticsHistory,
    cfg: Config,

    last_error: Option<String>,
    hover: Option<Vec2>,
}

impl Viewer {
    /// Creates a viewer around a fresh nodiverse built from `cfg`.
    ///
    /// ### Errors
    /// Fails if the engine rejects `cfg`.
    pub fn new(cfg: Config) -> Result<Self> {
        let mut renderer = EguiRenderer::new();
        let nodiverse = Nodiverse::new(cfg, &mut renderer)?;
        nodiverse.render(&mut renderer);

        Ok(Self {
            nodiverse,
            renderer,
            history: DiagnosticsHistory::with_capacity(cfg.history_len),
            cfg,
            last_error: None,
            hover: None,
        })
    }

    /// Rebuilds the nodiverse from the edited configuration.
    ///
    /// On failure the current engine is kept and the error is shown in the
    /// status bar. The new engine starts paused.
    fn reset(&mut self) {
        let mut renderer = EguiRenderer::new();
        match Nodiverse::new(self.cfg, &mut renderer) {
            Ok(nodiverse) => {
                nodiverse.render(&mut renderer);
                self.nodiverse = nodiverse;
                self.renderer = renderer;
                self.history = DiagnosticsHistory::with_capacity(self.cfg.history_len);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    /// Advances the simulation by a single tick and renders it.
    fn step_once(&mut self) {
        if let Err(e) = self.nodiverse.step(&mut self.history) {
            self.fail(e.to_string());
        }
        self.nodiverse.render(&mut self.renderer);
    }

    fn fail(&mut self, message: String) {
        error!("simulation stopped: {message}");
        self.nodiverse.stop();
        self.last_error = Some(message);
    }

    /// Canvas-to-screen scale that fits the whole canvas inside `rect`.
    fn scale(&self, rect: egui::Rect) -> f32 {
        let canvas = self.nodiverse.canvas();
        (rect.width() / canvas.width).min(rect.height() / canvas.height)
    }

    /// Screen position of the canvas origin when centered inside `rect`.
    fn origin(&self, rect: egui::Rect) -> egui::Pos2 {
        let canvas = self.nodiverse.canvas();
        let s = self.scale(rect);
        rect.center() - egui::vec2(canvas.width * s, canvas.height * s) * 0.5
    }

    /// Converts a canvas position (y down, origin top-left) to screen-space.
    fn canvas_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let s = self.scale(rect);
        self.origin(rect) + egui::vec2(p.x * s, p.y * s)
    }

    /// Inverse of [`Viewer::canvas_to_screen`].
    fn screen_to_canvas(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let s = self.scale(rect);
        let d = p - self.origin(rect);
        Vec2::new(d.x / s, d.y / s)
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (run controls, stepping, reset).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let active = self.nodiverse.is_active();
                if ui.button(if active { "⏸ Pause" } else { "▶ Run" }).clicked() {
                    if active {
                        self.nodiverse.stop();
                    } else {
                        self.last_error = None;
                        self.nodiverse.start(ctx.input(|i| i.time));
                    }
                }

                if ui.add_enabled(!active, egui::Button::new("Step")).clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }
            });
        });
    }

    /// Builds the bottom status bar (tick, bodies, diagnostics, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "dt target = {:.3} s",
                    self.nodiverse.looper().interval()
                ));
                ui.label(format!(
                    "dt last = {:.3} s",
                    self.nodiverse.looper().last_tick_dt()
                ));
                ui.separator();
                ui.label(format!("frames = {}", self.renderer.frames_presented()));
                ui.label(format!("tick = {}", self.nodiverse.tick()));
                ui.label(format!("bodies = {}", self.nodiverse.bodies().len()));
                ui.label(format!("p = {:.1}", self.nodiverse.net_momentum()));
                ui.label(format!("E = {:.1}", self.nodiverse.net_kinetic_energy()));
                if let Some(p) = self.hover {
                    ui.separator();
                    ui.label(format!("({:.0}, {:.0})", p.x, p.y));
                }
                if let Some(e) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, e);
                }
            });
        });
    }

    /// Builds the right-hand configuration panel. Changes apply on reset.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Bodies");
                Self::labeled_drag_usize(ui, "body_count:", &mut self.cfg.body_count, 1..=200, 1.0);
                Self::labeled_drag_f32(
                    ui,
                    "body_radius:",
                    &mut self.cfg.body_radius,
                    1.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(ui, "density:", &mut self.cfg.density, 0.1..=20.0, 0.1);

                ui.separator();
                ui.label("Forces");
                Self::labeled_drag_f32(ui, "boost:", &mut self.cfg.boost, 0.0..=20.0, 0.5);

                let mut friction = self.cfg.friction_coefficient.is_some();
                ui.checkbox(&mut friction, "surface friction");
                match (friction, self.cfg.friction_coefficient) {
                    (true, None) => self.cfg.friction_coefficient = Some(1.5),
                    (false, Some(_)) => self.cfg.friction_coefficient = None,
                    _ => {}
                }
                if let Some(fk) = self.cfg.friction_coefficient.as_mut() {
                    Self::labeled_drag_f32(ui, "coefficient:", fk, 0.0..=10.0, 0.05);
                }
                Self::labeled_drag_f32(ui, "gravity:", &mut self.cfg.gravity, 0.0..=100.0, 0.5);

                ui.separator();
                ui.label("Randomness");
                let mut seeded = self.cfg.seed.is_some();
                ui.checkbox(&mut seeded, "fixed seed");
                match (seeded, self.cfg.seed) {
                    (true, None) => self.cfg.seed = Some(rand::random()),
                    (false, Some(_)) => self.cfg.seed = None,
                    _ => {}
                }
                if let Some(seed) = self.cfg.seed.as_mut() {
                    ui.horizontal(|ui| {
                        ui.label("seed:");
                        ui.add(egui::DragValue::new(seed));
                    });
                }

                ui.separator();
                if ui.button("Apply & reset").clicked() {
                    self.reset();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the diagnostics panel with one plot per stream.
    fn ui_diagnostics_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("diagnostics_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.columns(2, |cols| {
                    for (ui, stream) in cols
                        .iter_mut()
                        .zip([StreamId::NetMomentum, StreamId::NetKineticEnergy])
                    {
                        ui.label(stream.label());
                        Self::plot(ui, self.history.stream(stream));
                    }
                });
            });
    }

    /// Draws a bounded sample window as a line plot.
    fn plot(ui: &mut egui::Ui, window: &SampleWindow) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), PLOT_HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));

        let Some((lo, hi)) = window.value_range() else {
            return;
        };
        let (Some((t0, _)), Some((t1, latest))) = (window.iter().next(), window.latest()) else {
            return;
        };

        let span_t = (t1 - t0).max(1) as f32;
        let span_v = if hi > lo { hi - lo } else { 1.0 };
        let points: Vec<egui::Pos2> = window
            .iter()
            .map(|(t, v)| {
                egui::pos2(
                    rect.left() + (t - t0) as f32 / span_t * rect.width(),
                    rect.bottom() - (v - lo) / span_v * rect.height(),
                )
            })
            .collect();

        painter.add(egui::Shape::line(
            points,
            egui::Stroke::new(1.5, egui::Color32::LIGHT_GREEN),
        ));
        painter.text(
            rect.right_top() + egui::vec2(-4.0, 2.0),
            egui::Align2::RIGHT_TOP,
            format!("{latest:.1}"),
            egui::FontId::monospace(11.0),
            egui::Color32::WHITE,
        );
    }

    /// Builds the central panel: drives the engine and paints the canvas.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            self.hover = response.hover_pos().map(|p| self.screen_to_canvas(p, rect));

            // Drive both clocks while active.
            if self.nodiverse.is_active() {
                let now = ctx.input(|i| i.time);
                match self
                    .nodiverse
                    .update(now, &mut self.renderer, &mut self.history)
                {
                    Ok(true) => ctx.request_repaint(),
                    Ok(false) => {}
                    Err(e) => self.fail(e.to_string()),
                }
            }

            // Canvas background.
            let canvas = *self.nodiverse.canvas();
            let s = self.scale(rect);
            let canvas_rect = egui::Rect::from_min_size(
                self.origin(rect),
                egui::vec2(canvas.width * s, canvas.height * s),
            );
            painter.rect_filled(canvas_rect, 0.0, egui::Color32::WHITE);

            self.renderer
                .paint(&painter, |p| self.canvas_to_screen(p, rect), s);
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_diagnostics_panel(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
