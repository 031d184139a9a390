// Host-side tests for particle motion, recycling and pointer repulsion.

use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use verdant_core::constants::*;
use verdant_core::*;

const VP: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

// x = 100, size = 30, speedY = 0.2, speedX = 0, opacity = 0.7, rotation = 0,
// rotationSpeed = 0, kind = leaf, initial y = 300
fn scripted() -> ScriptedRandom {
    ScriptedRandom::new(vec![0.125, 0.2, 1.0 / 6.0, 0.5, 0.5, 0.0, 0.5, 0.0, 0.5])
}

fn still_particle(x: f64, y: f64) -> Particle {
    Particle {
        position: DVec2::new(x, y),
        size: 30.0,
        velocity: DVec2::ZERO,
        opacity: 0.7,
        rotation: 0.0,
        rotation_speed: 0.0,
        kind: ParticleKind::Sun,
    }
}

fn pointer_at(x: f64, y: f64) -> PointerState {
    PointerState {
        position: Some(DVec2::new(x, y)),
        ..Default::default()
    }
}

#[test]
fn scripted_spawn_yields_requested_attributes() {
    let field = ParticleField::new(ParticleConfig::default().with_count(1), VP, scripted());
    let p = &field.particles()[0];
    assert_eq!(p.position.x, 100.0);
    assert_eq!(p.position.y, 300.0);
    assert!((p.size - 30.0).abs() < 1e-12);
    assert!((p.velocity.y - 0.2).abs() < 1e-12);
    assert_eq!(p.velocity.x, 0.0);
    assert_eq!(p.kind, ParticleKind::Leaf);
}

#[test]
fn one_tick_applies_gravity_and_sway_from_pre_update_y() {
    let mut field = ParticleField::new(ParticleConfig::default().with_count(1), VP, scripted());
    let before = field.particles()[0].clone();
    field.step();
    let after = &field.particles()[0];

    assert_eq!(after.position.y, before.position.y + before.velocity.y);
    let sway = (before.position.y * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;
    assert_eq!(after.position.x, before.position.x + (before.velocity.x + sway));

    let post_sway = (after.position.y * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;
    assert_ne!(after.position.x, before.position.x + post_sway);
}

#[test]
fn population_is_constant_and_vertically_bounded() {
    let config = ParticleConfig::default().with_count(50);
    let vp = Viewport::new(400.0, 300.0);
    let mut field = ParticleField::new(config, vp, StdRng::seed_from_u64(9));
    for _ in 0..5_000 {
        field.step();
        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!(p.position.y <= vp.height + BOTTOM_MARGIN);
            assert!(p.position.y >= SPAWN_Y);
        }
    }
}

#[test]
fn particle_below_viewport_is_recycled_above_top() {
    let mut rng = StdRng::seed_from_u64(3);
    let palette = Theme::Environmental.palette();
    let mut p = Particle::spawn(&mut rng, palette, VP);
    p.position.y = VP.height + BOTTOM_MARGIN;

    let outcome = p.step(VP, None, &mut rng, palette);
    assert_eq!(outcome, StepOutcome::Recycled);
    assert_eq!(p.position.y, SPAWN_Y);
    assert!(p.position.x >= 0.0 && p.position.x < VP.width);
    assert!(p.size >= SIZE_BASE && p.size < SIZE_BASE + SIZE_SPAN);
    assert!(p.opacity >= OPACITY_BASE && p.opacity < OPACITY_BASE + OPACITY_SPAN);
}

#[test]
fn side_exit_relocates_x_only() {
    let mut rng = StdRng::seed_from_u64(5);
    let palette = Theme::Environmental.palette();
    let mut p = Particle::spawn(&mut rng, palette, VP);
    p.position = DVec2::new(-40.0, 200.0);
    let before = p.clone();

    let outcome = p.step(VP, None, &mut rng, palette);
    assert_eq!(outcome, StepOutcome::Relocated);
    assert!(p.position.x >= 0.0 && p.position.x < VP.width);
    assert_eq!(p.position.y, before.position.y + before.velocity.y);
    assert_eq!(p.size, before.size);
    assert_eq!(p.kind, before.kind);
}

#[test]
fn fixed_seed_runs_are_identical() {
    let run = |seed| {
        let mut field = ParticleField::new(
            ParticleConfig::default().with_count(40).interactive(true),
            VP,
            StdRng::seed_from_u64(seed),
        );
        field.pointer(Some(DVec2::new(400.0, 300.0)));
        for _ in 0..500 {
            field.step();
        }
        field.particles().to_vec()
    };
    let a = run(42);
    let b = run(42);
    assert_eq!(a.len(), b.len());
    for (pa, pb) in a.iter().zip(&b) {
        assert_eq!(pa.position.x.to_bits(), pb.position.x.to_bits());
        assert_eq!(pa.position.y.to_bits(), pb.position.y.to_bits());
        assert_eq!(pa.size.to_bits(), pb.size.to_bits());
        assert_eq!(pa.opacity.to_bits(), pb.opacity.to_bits());
        assert_eq!(pa.kind, pb.kind);
    }
    assert_ne!(a, run(43));
}

#[test]
fn repulsion_never_pulls_a_particle_closer() {
    let mut rng = StdRng::seed_from_u64(11);
    let palette = Theme::Environmental.palette();
    let pointer = pointer_at(400.0, 300.0);
    let pointer_pos = pointer.position.unwrap();

    for _ in 0..200 {
        let mut p = Particle::spawn(&mut rng, palette, VP);
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let distance = rng.gen::<f64>() * 149.0;
        p.position = pointer_pos + DVec2::new(angle.cos(), angle.sin()) * distance;

        let mut free = p.clone();
        free.step(VP, None, &mut ScriptedRandom::new(vec![0.5]), palette);
        p.step(VP, Some(&pointer), &mut ScriptedRandom::new(vec![0.5]), palette);

        assert!(p.position.distance(pointer_pos) >= free.position.distance(pointer_pos));
    }
}

#[test]
fn still_particle_moves_away_from_nearby_pointer() {
    let palette = Theme::Environmental.palette();
    let pointer = pointer_at(200.0, 60.0);
    let mut p = still_particle(200.0, 0.0);
    let pre = p.position.distance(pointer.position.unwrap());

    p.step(VP, Some(&pointer), &mut ScriptedRandom::new(vec![0.5]), palette);
    let post = p.position.distance(pointer.position.unwrap());
    assert!(post > pre);
    assert!(p.position.y < 0.0);
}

#[test]
fn pointer_beyond_radius_leaves_motion_untouched() {
    let palette = Theme::Environmental.palette();
    let pointer = pointer_at(200.0, 300.0 + INTERACTION_RADIUS + 10.0);
    let mut with_pointer = still_particle(200.0, 300.0);
    with_pointer.velocity = DVec2::new(0.1, 0.3);
    let mut without = with_pointer.clone();

    with_pointer.step(VP, Some(&pointer), &mut ScriptedRandom::new(vec![0.5]), palette);
    without.step(VP, None, &mut ScriptedRandom::new(vec![0.5]), palette);
    assert_eq!(with_pointer, without);
}

#[test]
fn removing_the_pointer_stops_repulsion_next_tick() {
    let config = ParticleConfig::default().with_count(1).interactive(true);
    let mut field = ParticleField::new(config, VP, scripted());
    field.particles_mut()[0] = still_particle(300.0, 0.0);

    field.pointer(Some(DVec2::new(320.0, 0.0)));
    field.step();
    let pushed = field.particles()[0].position;
    assert!(pushed.x < 300.0);

    field.pointer(None);
    field.step();
    assert_eq!(field.particles()[0].position, pushed);
    assert_eq!(field.particles()[0].velocity, DVec2::ZERO);
}

#[test]
fn passive_field_ignores_pointer() {
    let mut field = ParticleField::new(ParticleConfig::default().with_count(1), VP, scripted());
    field.pointer(Some(DVec2::new(100.0, 300.0)));
    assert_eq!(field.pointer_state().position, None);
    assert_eq!(field.events(), &[HostEvent::Resize]);
}

#[test]
fn zero_count_is_clamped_to_one_particle() {
    let config = ParticleConfig {
        particle_count: 0,
        ..Default::default()
    };
    let field = ParticleField::new(config, VP, scripted());
    assert_eq!(field.particles().len(), MIN_PARTICLES);
    assert_eq!(field.config().particle_count, MIN_PARTICLES);
}

#[test]
fn every_kind_draws_a_balanced_save_restore_sequence() {
    for kind in ParticleKind::ALL {
        let mut surface = RecordingSurface::new(VP);
        let mut p = still_particle(50.0, 60.0);
        p.kind = kind;
        shapes::draw_particle(&p, &mut surface).unwrap();

        let cmds = surface.commands();
        let saves = cmds.iter().filter(|c| **c == DrawCommand::Save).count();
        let restores = cmds.iter().filter(|c| **c == DrawCommand::Restore).count();
        assert_eq!(saves, restores, "{kind:?}");
        assert_eq!(cmds[0], DrawCommand::Save);
        assert_eq!(cmds[2], DrawCommand::Translate(50.0, 60.0));
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::FillPath | DrawCommand::StrokePath | DrawCommand::FillRect(..)
        )));
    }
}

#[test]
fn shapes_scale_with_particle_size() {
    let arcs = |size: f64| {
        let mut surface = RecordingSurface::new(VP);
        let mut p = still_particle(0.0, 0.0);
        p.kind = ParticleKind::Earth;
        p.size = size;
        shapes::draw_particle(&p, &mut surface).unwrap();
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
    let small = arcs(20.0);
    let large = arcs(40.0);
    assert_eq!(small.len(), 3);
    for (s, l) in small.iter().zip(&large) {
        assert!((l / s - 2.0).abs() < 1e-12);
    }
}

#[test]
fn draw_reports_detached_surface() {
    let mut surface = RecordingSurface::new(VP);
    surface.detach();
    let p = still_particle(1.0, 1.0);
    assert_eq!(
        shapes::draw_particle(&p, &mut surface),
        Err(SurfaceError::Detached)
    );
}
