//! The nodiverse: a bounded canvas of circular bodies and its engine.
//!
//! A [`Nodiverse`] owns its bodies and two clocks. The physics clock
//! ([`Looper`]) advances the simulation by one tick per time unit; the render
//! clock is the host's frame signal, on which current positions are pushed to
//! a [`Renderer`]. Both are driven from the host thread through
//! [`Nodiverse::update`], so a tick always completes before the next render
//! reads the bodies.
//!
//! Ticks are atomic. [`Nodiverse::step`] works on a copy of the bodies and a
//! scratch [`OverlapBuffer`] and only commits them when every phase
//! succeeded; a failed tick leaves the previous state untouched. The copy,
//! the overlap buffers and the impulse inputs are kept between ticks and
//! reused, so a steady-state tick does not allocate.

use crate::{
    body::Body,
    boundary::Canvas,
    config::Config,
    diagnostics::{DiagnosticsSink, StreamId},
    error::{NodiverseError, Result},
    force::{BoostForce, Force, KineticSurfaceFriction},
    looper::Looper,
    overlap_buffer::OverlapBuffer,
    phases::{self, ImpulseScratch},
    render::{NodeTexture, Renderer},
    types::DrawableId,
};
use glam::Vec2;
use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[derive(Debug)]
pub struct Nodiverse {
    cfg: Config,
    canvas: Canvas,
    bodies: Vec<Body>,
    /// Overlap groups of the last committed tick.
    previous: OverlapBuffer,
    /// Scratch buffer for the tick being computed.
    scratch: OverlapBuffer,
    /// Working copy of the bodies for the tick being computed.
    working: Vec<Body>,
    impulse: ImpulseScratch,
    tick: u64,
    looper: Looper,
    rng: StdRng,
}

impl Nodiverse {
    /// Builds a nodiverse from `cfg`, creating one drawable per body.
    ///
    /// Bodies are spread along the canvas diagonal: body `i` is placed at
    /// `i * step + U[0, 1) * step` on both axes, with `step = width / n`,
    /// then clamped into the canvas. Each body gets a boost force, plus
    /// surface friction when a friction coefficient is configured.
    ///
    /// ### Errors
    /// Fails if `cfg` does not validate.
    pub fn new(cfg: Config, renderer: &mut dyn Renderer) -> Result<Self> {
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let canvas = Canvas::new(cfg.width, cfg.height);
        let texture = NodeTexture::air_node(cfg.body_radius);
        let diameter = cfg.body_radius * 2.0;
        let step = cfg.width / cfg.body_count as f32;

        let mut bodies = Vec::with_capacity(cfg.body_count);
        for id in 0..cfg.body_count {
            let pos = id as f32 * step + rng.random::<f32>() * step;
            let position = Vec2::new(
                canvas.to_in_bounds_x(pos, diameter),
                canvas.to_in_bounds_y(pos, diameter),
            );
            let proxy = renderer.create_drawable(&texture);

            let mut body = Body::new(id, position, cfg.body_radius, cfg.density, proxy)?
                .with_force(Force::Boost(BoostForce::new(cfg.boost)));
            if let Some(fk) = cfg.friction_coefficient {
                body = body.with_force(Force::SurfaceFriction(KineticSurfaceFriction::new(
                    fk,
                    cfg.gravity,
                    cfg.time_unit,
                )));
            }
            bodies.push(body);
        }

        info!(
            "nodiverse created: {} bodies on a {}x{} canvas",
            bodies.len(),
            cfg.width,
            cfg.height
        );
        Ok(Self::assemble(cfg, bodies, rng))
    }

    /// Builds a nodiverse around bodies that were created by the caller.
    ///
    /// Body ids must equal their index in `bodies`. Bodies keep whatever
    /// forces and velocities they were built with.
    ///
    /// ### Errors
    /// Fails if `cfg` does not validate, if ids are not `0..n` in order, or if
    /// a body does not fit on the canvas.
    pub fn from_bodies(cfg: Config, bodies: Vec<Body>) -> Result<Self> {
        cfg.validate()?;
        let canvas = Canvas::new(cfg.width, cfg.height);

        for (i, b) in bodies.iter().enumerate() {
            if b.id != i {
                return Err(NodiverseError::config(
                    "bodies",
                    format!("body at index {i} has id {}", b.id),
                ));
            }
            if canvas.is_out_of_bounds(b.x(), b.y(), b.radius()) {
                return Err(NodiverseError::config(
                    "bodies",
                    format!("body {} @({}, {}) is not inside the canvas", b.id, b.x(), b.y()),
                ));
            }
        }

        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::assemble(cfg, bodies, rng))
    }

    fn assemble(cfg: Config, bodies: Vec<Body>, rng: StdRng) -> Self {
        let n = bodies.len();
        Self {
            canvas: Canvas::new(cfg.width, cfg.height),
            looper: Looper::new(f64::from(cfg.time_unit)),
            cfg,
            bodies,
            previous: OverlapBuffer::with_len(n),
            scratch: OverlapBuffer::with_len(n),
            working: Vec::with_capacity(n),
            impulse: ImpulseScratch::default(),
            tick: 0,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of committed physics ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Overlap groups recorded by the last committed tick.
    pub fn overlaps(&self) -> &OverlapBuffer {
        &self.previous
    }

    pub fn looper(&self) -> &Looper {
        &self.looper
    }

    /// Advances the simulation by one physics tick.
    ///
    /// 1. [`phases::force_phase`] on every body.
    /// 2. [`phases::translation_phase`], including wall bounces.
    /// 3. [`phases::overlap_phase`] into the scratch buffer.
    /// 4. [`phases::impulse_phase`] against last tick's overlaps.
    /// 5. Commit bodies, and keep this tick's overlaps as "previous".
    /// 6. On every `diagnostics_interval`-th tick, emit net momentum and net
    ///    kinetic energy to `sink`.
    ///
    /// ### Errors
    /// Any phase error aborts the tick; nothing is committed and the tick
    /// counter does not advance.
    pub fn step(&mut self, sink: &mut dyn DiagnosticsSink) -> Result<()> {
        self.working.clone_from(&self.bodies);
        let next = &mut self.working;

        phases::force_phase(next, &mut self.rng);
        if let Err(e) = phases::translation_phase(next, &self.canvas) {
            warn!("tick {} rejected: {e}", self.tick + 1);
            return Err(e);
        }
        phases::overlap_phase(next, &mut self.scratch);
        phases::impulse_phase(next, &self.scratch, &self.previous, &mut self.impulse);

        if let Some(b) = next.iter().find(|b| !b.is_finite()) {
            let e = NodiverseError::NonFinite { id: b.id };
            warn!("tick {} rejected: {e}", self.tick + 1);
            return Err(e);
        }

        std::mem::swap(&mut self.bodies, &mut self.working);
        std::mem::swap(&mut self.previous, &mut self.scratch);
        self.tick += 1;

        if self.tick % self.cfg.diagnostics_interval == 0 {
            sink.append_sample(StreamId::NetMomentum, self.tick, self.net_momentum());
            sink.append_sample(StreamId::NetKineticEnergy, self.tick, self.net_kinetic_energy());
        }
        Ok(())
    }

    /// One render tick: copies every body's position into its drawable and
    /// presents the frame. Does not touch simulation state.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for body in &self.bodies {
            body.sync_render_proxy(renderer);
        }
        renderer.present_frame();
    }

    /// Starts both clocks at host time `now` (seconds).
    pub fn start(&mut self, now: f64) {
        info!("nodiverse started at tick {}", self.tick);
        self.looper.start(now);
    }

    /// Stops the physics clock and the render loop. A tick in progress is
    /// never interrupted; later calls to [`Nodiverse::update`] do nothing
    /// until the next [`Nodiverse::start`].
    pub fn stop(&mut self) {
        info!("nodiverse stopped at tick {}", self.tick);
        self.looper.stop();
    }

    pub fn is_active(&self) -> bool {
        self.looper.is_active()
    }

    /// Handles one host frame at time `now`.
    ///
    /// While the engine is active, runs every physics tick the [`Looper`]
    /// reports as due, then one render tick. An inactive engine neither ticks
    /// nor renders. Returns whether the host should schedule another frame,
    /// i.e. whether the engine is still active.
    ///
    /// ### Errors
    /// A failed physics tick stops the engine and is returned; the remaining
    /// due ticks are dropped and the frame is still rendered from the last
    /// committed state.
    pub fn update(
        &mut self,
        now: f64,
        renderer: &mut dyn Renderer,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<bool> {
        if !self.is_active() {
            return Ok(false);
        }

        let due = self.looper.poll(now);
        let stepped = (0..due).try_for_each(|_| self.step(sink));
        if stepped.is_err() {
            self.stop();
        }
        self.render(renderer);
        stepped.map(|()| self.is_active())
    }

    /// Magnitude of the total momentum of all bodies.
    pub fn net_momentum(&self) -> f32 {
        phases::net_momentum(&self.bodies)
    }

    /// Total kinetic energy of all bodies.
    pub fn net_kinetic_energy(&self) -> f32 {
        phases::net_kinetic_energy(&self.bodies)
    }

    /// Drawable handles in body order.
    pub fn drawables(&self) -> impl Iterator<Item = DrawableId> + '_ {
        self.bodies.iter().map(Body::render_proxy)
    }
}
