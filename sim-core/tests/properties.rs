use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sim_core::{
    Nodiverse, NodiverseError,
    body::Body,
    boundary::{Canvas, apply_boundary_impulse},
    config::Config,
    diagnostics::{DiagnosticsSink, NullSink, StreamId},
    phases,
    render::{NodeTexture, Renderer},
    types::DrawableId,
};
use std::f32::consts::PI;

/// Renderer that stores the last position of every drawable.
#[derive(Default)]
struct Recorder {
    positions: Vec<(f32, f32)>,
    frames: u32,
}

impl Renderer for Recorder {
    fn create_drawable(&mut self, _texture: &NodeTexture) -> DrawableId {
        self.positions.push((0.0, 0.0));
        DrawableId(self.positions.len() - 1)
    }

    fn set_proxy_position(&mut self, proxy: DrawableId, x: f32, y: f32) {
        self.positions[proxy.0] = (x, y);
    }

    fn present_frame(&mut self) {
        self.frames += 1;
    }
}

/// Sink that remembers every sample it was given.
#[derive(Default)]
struct Samples(Vec<(StreamId, u64, f32)>);

impl DiagnosticsSink for Samples {
    fn append_sample(&mut self, stream: StreamId, tick: u64, value: f32) {
        self.0.push((stream, tick, value));
    }
}

fn seeded(seed: u64) -> Config {
    Config {
        seed: Some(seed),
        ..Config::default()
    }
}

/// A force-free body whose mass is exactly `mass` (up to rounding).
fn body_with_mass(id: usize, pos: Vec2, radius: f32, mass: f32, v: Vec2) -> Body {
    let density = mass / (PI * radius * radius);
    Body::new(id, pos, radius, density, DrawableId(id))
        .unwrap()
        .with_velocity(v)
}

fn assert_in_bounds(nv: &Nodiverse) {
    let cfg = nv.config();
    for b in nv.bodies() {
        assert!(
            b.x() >= 0.0 && b.x() <= cfg.width - b.diameter(),
            "body {} x = {} out of bounds at tick {}",
            b.id,
            b.x(),
            nv.tick()
        );
        assert!(
            b.y() >= 0.0 && b.y() <= cfg.height - b.diameter(),
            "body {} y = {} out of bounds at tick {}",
            b.id,
            b.y(),
            nv.tick()
        );
    }
}

#[test]
fn overlap_predicate_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(99);
    let bodies: Vec<Body> = (0..40)
        .map(|id| {
            let pos = Vec2::new(rng.random_range(0.0..200.0), rng.random_range(0.0..200.0));
            let radius = rng.random_range(1.0..30.0);
            Body::new(id, pos, radius, 2.0, DrawableId(id)).unwrap()
        })
        .collect();

    for a in &bodies {
        for b in &bodies {
            assert_eq!(a.is_overlapping(b), b.is_overlapping(a));
        }
    }
}

#[test]
fn wall_bounce_preserves_speed() {
    let cfg = Config {
        width: 200.0,
        height: 200.0,
        ..seeded(0)
    };
    let b = body_with_mass(0, Vec2::new(100.0, 100.0), 10.0, 10.0, Vec2::new(7.0, -3.0));
    let speed = b.velocity.length();
    let mut nv = Nodiverse::from_bodies(cfg, vec![b]).unwrap();

    let mut bounces = 0;
    for _ in 0..200 {
        let before = nv.bodies()[0].velocity;
        nv.step(&mut NullSink).unwrap();
        let after = nv.bodies()[0].velocity;

        if before != after {
            bounces += 1;
        }
        assert!((after.length() - speed).abs() < 1e-5);
        assert!(after.x.abs() == 7.0 && after.y.abs() == 3.0);
    }
    assert!(bounces > 0, "the body never reached a wall");
}

#[test]
fn diagnostics_are_sampled_every_twentieth_tick() {
    let mut r = Recorder::default();
    let mut samples = Samples::default();
    let mut nv = Nodiverse::new(seeded(8), &mut r).unwrap();

    for _ in 0..101 {
        nv.step(&mut samples).unwrap();
    }

    let momentum_ticks: Vec<u64> = samples
        .0
        .iter()
        .filter(|(s, _, _)| *s == StreamId::NetMomentum)
        .map(|&(_, t, _)| t)
        .collect();
    let energy_ticks: Vec<u64> = samples
        .0
        .iter()
        .filter(|(s, _, _)| *s == StreamId::NetKineticEnergy)
        .map(|&(_, t, _)| t)
        .collect();

    assert_eq!(momentum_ticks, vec![20, 40, 60, 80, 100]);
    assert_eq!(energy_ticks, momentum_ticks);
    assert!(samples.0.iter().all(|&(_, _, v)| v >= 0.0));
}

#[test]
fn velocity_axes_below_one_are_exactly_zero_after_forces() {
    let mut r = Recorder::default();
    let mut nv = Nodiverse::new(seeded(21), &mut r).unwrap();
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..50 {
        let mut bodies = nv.bodies().to_vec();
        phases::force_phase(&mut bodies, &mut rng);
        for b in &bodies {
            for c in [b.velocity.x, b.velocity.y] {
                assert!(c == 0.0 || c.abs() >= 1.0, "creeping component {c}");
            }
        }
        nv.step(&mut NullSink).unwrap();
    }
}

#[test]
fn bodies_never_leave_the_canvas() {
    let mut r = Recorder::default();
    let cfg = Config {
        body_count: 25,
        body_radius: 12.0,
        ..seeded(1234)
    };
    let mut nv = Nodiverse::new(cfg, &mut r).unwrap();
    assert_in_bounds(&nv);

    for _ in 0..1000 {
        nv.step(&mut NullSink).unwrap();
        assert_in_bounds(&nv);
    }
}

#[test]
fn friction_runs_stay_in_bounds() {
    let mut r = Recorder::default();
    let cfg = Config {
        friction_coefficient: Some(1.5),
        ..seeded(77)
    };
    let mut nv = Nodiverse::new(cfg, &mut r).unwrap();
    for _ in 0..500 {
        nv.step(&mut NullSink).unwrap();
        assert_in_bounds(&nv);
    }
}

#[test]
fn equal_masses_head_on_swap_velocities() {
    let a = body_with_mass(0, Vec2::new(100.0, 100.0), 10.0, 10.0, Vec2::new(5.0, 0.0));
    let b = body_with_mass(1, Vec2::new(121.0, 100.0), 10.0, 10.0, Vec2::new(-5.0, 0.0));
    assert!(!a.is_overlapping(&b));

    let mut nv = Nodiverse::from_bodies(seeded(0), vec![a, b]).unwrap();
    nv.step(&mut NullSink).unwrap();

    // They overlap after this tick's move and exchange velocities.
    assert!(nv.bodies()[0].is_overlapping(&nv.bodies()[1]));
    let va = nv.bodies()[0].velocity;
    let vb = nv.bodies()[1].velocity;
    assert!((va - Vec2::new(-5.0, 0.0)).length() < 1e-4, "A ended with {va:?}");
    assert!((vb - Vec2::new(5.0, 0.0)).length() < 1e-4, "B ended with {vb:?}");
}

#[test]
fn separating_pair_is_not_impulsed_again() {
    let a = body_with_mass(0, Vec2::new(100.0, 100.0), 10.0, 10.0, Vec2::new(5.0, 0.0));
    let b = body_with_mass(1, Vec2::new(115.0, 100.0), 10.0, 10.0, Vec2::new(-5.0, 0.0));
    let mut nv = Nodiverse::from_bodies(seeded(0), vec![a, b]).unwrap();

    // Tick 1: centers 5 apart, swap. Tick 2: 15 apart, still overlapping but
    // separating, so the swap is not undone.
    nv.step(&mut NullSink).unwrap();
    nv.step(&mut NullSink).unwrap();

    assert!(nv.bodies()[0].is_overlapping(&nv.bodies()[1]));
    assert!(nv.bodies()[0].velocity.x < 0.0);
    assert!(nv.bodies()[1].velocity.x > 0.0);
}

#[test]
fn body_at_left_edge_bounces_back() {
    let canvas = Canvas::new(512.0, 512.0);
    let mut b = Body::new(0, Vec2::new(-1.0, 200.0), 18.0, 2.0, DrawableId(0))
        .unwrap()
        .with_velocity(Vec2::new(-3.0, 2.0));

    apply_boundary_impulse(&mut b, &canvas).unwrap();

    assert_eq!(b.x(), 0.0);
    assert_eq!(b.velocity.x, 3.0);
    assert_eq!(b.velocity.y, 2.0);
}

#[test]
fn forceless_resting_body_never_moves() {
    let b = Body::new(0, Vec2::new(100.0, 200.0), 10.0, 2.0, DrawableId(0)).unwrap();
    let mut nv = Nodiverse::from_bodies(seeded(0), vec![b]).unwrap();

    for _ in 0..500 {
        nv.step(&mut NullSink).unwrap();
    }

    assert_eq!(nv.tick(), 500);
    assert_eq!(nv.bodies()[0].position, Vec2::new(100.0, 200.0));
    assert_eq!(nv.bodies()[0].velocity, Vec2::ZERO);
}

#[test]
fn render_sync_is_idempotent() {
    let mut r = Recorder::default();
    let mut nv = Nodiverse::new(seeded(6), &mut r).unwrap();
    for _ in 0..10 {
        nv.step(&mut NullSink).unwrap();
    }

    nv.render(&mut r);
    let positions = nv.bodies().iter().map(|b| b.position).collect::<Vec<_>>();
    let proxies = r.positions.clone();

    nv.render(&mut r);

    assert_eq!(r.positions, proxies);
    assert_eq!(
        nv.bodies().iter().map(|b| b.position).collect::<Vec<_>>(),
        positions
    );
    assert_eq!(r.frames, 2);
}

#[test]
fn failed_tick_commits_nothing() {
    let good = Body::new(0, Vec2::new(100.0, 100.0), 10.0, 2.0, DrawableId(0))
        .unwrap()
        .with_velocity(Vec2::new(3.0, 3.0));
    let broken = Body::new(1, Vec2::new(300.0, 300.0), 10.0, 2.0, DrawableId(1))
        .unwrap()
        .with_velocity(Vec2::new(f32::NAN, 0.0));
    let mut nv = Nodiverse::from_bodies(seeded(0), vec![good, broken]).unwrap();
    let mut samples = Samples::default();

    let err = nv.step(&mut samples).unwrap_err();

    assert!(matches!(err, NodiverseError::NonFinite { id: 1 }));
    assert_eq!(nv.tick(), 0);
    assert_eq!(nv.bodies()[0].position, Vec2::new(100.0, 100.0));
    assert_eq!(nv.bodies()[1].position, Vec2::new(300.0, 300.0));
    assert!(samples.0.is_empty());
}

#[test]
fn engine_stops_after_failed_update() {
    let broken = Body::new(0, Vec2::new(300.0, 300.0), 10.0, 2.0, DrawableId(0))
        .unwrap()
        .with_velocity(Vec2::new(f32::NAN, 0.0));
    let mut nv = Nodiverse::from_bodies(seeded(0), vec![broken]).unwrap();
    let mut r = Recorder::default();
    r.create_drawable(&NodeTexture::air_node(10.0));

    nv.start(0.0);
    assert!(nv.update(1.0, &mut r, &mut NullSink).is_err());
    assert!(!nv.is_active());
    assert_eq!(r.frames, 1);
}
