// Host-side tests for the mount/tick/unmount lifecycle.

use glam::DVec2;
use rand::{rngs::StdRng, SeedableRng};
use verdant_core::*;

const VP: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

type ParticleStage = Stage<ParticleField<StdRng>, ManualHost>;

fn particles(host: ManualHost, interactive: bool) -> ParticleStage {
    let mut stage = Stage::new(host);
    stage.mount(|vp| {
        ParticleField::new(
            ParticleConfig::default().with_count(20).interactive(interactive),
            vp,
            StdRng::seed_from_u64(1),
        )
    });
    stage
}

fn recorded(stage: &ParticleStage) -> usize {
    stage.host().recording().map_or(0, |r| r.commands().len())
}

#[test]
fn mount_sizes_surface_subscribes_and_schedules() {
    let stage = particles(ManualHost::new(VP), true);
    assert!(stage.is_mounted());
    assert_eq!(stage.host().recording().unwrap().commands()[0], DrawCommand::Resize(VP));
    assert_eq!(
        stage.host().subscribed(),
        &[HostEvent::Resize, HostEvent::PointerMove, HostEvent::PointerLeave]
    );
    assert!(stage.pending_frame().is_some());
    assert_eq!(stage.pending_frame(), stage.host().outstanding_frame());
}

#[test]
fn passive_field_only_listens_for_resize() {
    let stage = particles(ManualHost::new(VP), false);
    assert_eq!(stage.host().subscribed(), &[HostEvent::Resize]);
}

#[test]
fn each_frame_runs_one_tick_and_reschedules() {
    let mut stage = particles(ManualHost::new(VP), false);
    for n in 1..=10 {
        let before = stage.pending_frame();
        assert!(stage.on_frame());
        assert_eq!(stage.ticks(), n);
        assert_ne!(stage.pending_frame(), before);
    }
    assert_eq!(stage.animation().unwrap().particles().len(), 20);
}

#[test]
fn tick_clears_then_draws_particles_in_allocation_order() {
    let mut stage = particles(ManualHost::new(VP), false);
    stage.host_mut().recording_mut().unwrap().take();
    stage.on_frame();

    let cmds = stage.host().recording().unwrap().commands().to_vec();
    assert_eq!(cmds[0], DrawCommand::ClearRect(0.0, 0.0, VP.width, VP.height));
    let translations: Vec<_> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Translate(x, y) => Some(DVec2::new(*x, *y)),
            _ => None,
        })
        .collect();
    let positions: Vec<_> = stage
        .animation()
        .unwrap()
        .particles()
        .iter()
        .map(|p| p.position)
        .collect();
    assert_eq!(translations, positions);
}

#[test]
fn unmount_twice_is_harmless_and_stops_drawing() {
    let mut stage = particles(ManualHost::new(VP), true);
    stage.on_frame();
    let last = stage.pending_frame().unwrap();

    assert!(stage.unmount());
    assert!(!stage.unmount());
    assert!(!stage.is_mounted());
    assert_eq!(stage.pending_frame(), None);
    assert_eq!(stage.host().outstanding_frame(), None);
    assert_eq!(stage.host().cancelled(), &[last]);
    assert!(stage.host().subscribed().is_empty());

    let drawn = recorded(&stage);
    assert!(!stage.on_frame());
    assert_eq!(recorded(&stage), drawn);
}

#[test]
fn unmount_before_mount_is_a_noop() {
    let mut stage: ParticleStage = Stage::new(ManualHost::new(VP));
    assert!(!stage.unmount());
    assert!(stage.host().cancelled().is_empty());
}

#[test]
fn mount_without_surface_does_nothing_until_remounted() {
    let mut stage = particles(ManualHost::without_surface(VP), true);
    assert!(!stage.is_mounted());
    assert!(stage.host().subscribed().is_empty());
    assert_eq!(stage.host().outstanding_frame(), None);
    assert!(!stage.on_frame());
    assert!(!stage.unmount());

    stage.host_mut().attach_surface();
    let outcome =
        stage.mount(|vp| ParticleField::new(ParticleConfig::default(), vp, StdRng::seed_from_u64(2)));
    assert_eq!(outcome, MountOutcome::Started);
    assert!(stage.on_frame());
}

#[test]
fn refused_listeners_degrade_to_a_running_animation() {
    let mut stage = particles(ManualHost::new(VP).refuse_subscriptions(), true);
    assert!(stage.is_mounted());
    assert!(stage.host().subscribed().is_empty());
    assert!(stage.on_frame());
    assert!(stage.on_frame());
    assert_eq!(stage.ticks(), 2);
    assert!(stage.unmount());
}

#[test]
fn detached_surface_ends_the_session() {
    let mut stage = particles(ManualHost::new(VP), true);
    let pending = stage.pending_frame().unwrap();
    stage.host_mut().recording_mut().unwrap().detach();
    let drawn = recorded(&stage);

    assert!(stage.on_frame());
    assert_eq!(recorded(&stage), drawn);
    assert!(!stage.is_mounted());
    assert!(stage.pending_frame().is_none());
    assert!(stage.host().subscribed().is_empty());
    // no frame requested after the failed one
    assert_eq!(stage.host().outstanding_frame(), Some(pending));
}

#[test]
fn detached_stage_stays_quiet_on_late_frames() {
    let mut stage = particles(ManualHost::new(VP), false);
    stage.host_mut().recording_mut().unwrap().detach();
    assert!(stage.on_frame());
    for _ in 0..600 {
        assert!(!stage.on_frame());
    }
    assert_eq!(stage.ticks(), 0);
}

#[test]
fn host_that_stops_scheduling_ends_the_session() {
    let mut stage = particles(ManualHost::new(VP), true);
    assert!(stage.on_frame());
    assert!(stage.is_mounted());

    stage.host_mut().stop_scheduling();
    assert!(stage.on_frame());
    assert!(!stage.is_mounted());
    assert!(stage.host().subscribed().is_empty());
    assert!(!stage.on_frame());
}

#[test]
fn remount_starts_fresh() {
    let mut stage = particles(ManualHost::new(VP), false);
    for _ in 0..5 {
        stage.on_frame();
    }
    let first = stage.pending_frame().unwrap();
    stage.mount(|vp| {
        ParticleField::new(
            ParticleConfig::default().with_count(20),
            vp,
            StdRng::seed_from_u64(1),
        )
    });
    assert_eq!(stage.ticks(), 0);
    assert!(stage.host().cancelled().contains(&first));

    let fresh = ParticleField::new(
        ParticleConfig::default().with_count(20),
        VP,
        StdRng::seed_from_u64(1),
    );
    assert_eq!(stage.animation().unwrap().particles(), fresh.particles());
}

#[test]
fn resize_updates_surface_and_engine_without_moving_particles() {
    let mut stage = particles(ManualHost::new(VP), false);
    let before = stage.animation().unwrap().particles().to_vec();
    let wide = Viewport::new(1920.0, 1080.0);
    stage.host_mut().set_viewport(wide);
    stage.on_resize();

    assert_eq!(stage.host().recording().unwrap().viewport(), wide);
    assert_eq!(stage.animation().unwrap().viewport(), wide);
    assert_eq!(stage.animation().unwrap().particles(), &before[..]);
}

#[test]
fn pointer_events_reach_interactive_field() {
    let mut stage = particles(ManualHost::new(VP), true);
    stage.on_pointer_move(10.0, 20.0);
    assert_eq!(
        stage.animation().unwrap().pointer_state().position,
        Some(DVec2::new(10.0, 20.0))
    );
    stage.on_pointer_leave();
    assert_eq!(stage.animation().unwrap().pointer_state().position, None);
}

#[test]
fn independent_stages_share_nothing() {
    let mut a = particles(ManualHost::new(VP), false);
    let mut b = particles(ManualHost::new(VP), false);
    for _ in 0..3 {
        a.on_frame();
    }
    assert_eq!(a.ticks(), 3);
    assert_eq!(b.ticks(), 0);
    b.unmount();
    assert!(a.is_mounted());
    assert!(a.on_frame());
}
