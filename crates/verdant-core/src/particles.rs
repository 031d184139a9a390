//! Recycling decorative particle field.
//!
//! A fixed population is allocated at mount; particles fall, sway, spin and
//! (optionally) get pushed away from the pointer. A particle that drops below
//! the viewport is reset above the top edge instead of being freed, so the
//! field runs indefinitely without allocating.

use crate::color::{Rgb, Rgba};
use crate::constants::*;
use crate::random::RandomSource;
use crate::shapes;
use crate::stage::{Animation, HostEvent};
use crate::surface::{Surface, SurfaceResult};
use crate::viewport::Viewport;
use glam::DVec2;
use rand::rngs::StdRng;
use std::f64::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Leaf,
    Droplet,
    Recycle,
    Tree,
    Earth,
    Sun,
    Wind,
    Mountain,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; 8] = [
        ParticleKind::Leaf,
        ParticleKind::Droplet,
        ParticleKind::Recycle,
        ParticleKind::Tree,
        ParticleKind::Earth,
        ParticleKind::Sun,
        ParticleKind::Wind,
        ParticleKind::Mountain,
    ];

    pub fn base_color(self) -> Rgb {
        match self {
            ParticleKind::Leaf => Rgb::new(34, 197, 94),
            ParticleKind::Droplet => Rgb::new(14, 165, 233),
            ParticleKind::Recycle => Rgb::new(16, 185, 129),
            ParticleKind::Tree => Rgb::new(22, 163, 74),
            ParticleKind::Earth => Rgb::new(59, 130, 246),
            ParticleKind::Sun => Rgb::new(251, 191, 36),
            ParticleKind::Wind => Rgb::new(6, 182, 212),
            ParticleKind::Mountain => Rgb::new(100, 116, 139),
        }
    }
}

/// Visual palette selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Environmental,
}

impl Theme {
    /// Unknown tags fall back to the default palette.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "" | "environmental" => Theme::Environmental,
            other => {
                log::warn!("[particles] unknown theme {:?}; using environmental", other);
                Theme::Environmental
            }
        }
    }

    pub fn palette(self) -> &'static [ParticleKind] {
        match self {
            Theme::Environmental => &ParticleKind::ALL,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub particle_count: usize,
    pub interactive: bool,
    pub theme: Theme,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLES,
            interactive: false,
            theme: Theme::default(),
        }
    }
}

impl ParticleConfig {
    /// Set the population from an untrusted count, clamped to
    /// `[MIN_PARTICLES, MAX_PARTICLES]`.
    pub fn with_count(mut self, requested: i64) -> Self {
        self.particle_count = clamp_count(requested);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

pub fn clamp_count(requested: i64) -> usize {
    let clamped = requested.clamp(MIN_PARTICLES as i64, MAX_PARTICLES as i64);
    if clamped != requested {
        log::warn!(
            "[particles] particle count {} out of range; using {}",
            requested,
            clamped
        );
    }
    clamped as usize
}

/// Last known pointer position and the radius it repels within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub position: Option<DVec2>,
    pub radius: f64,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: None,
            radius: INTERACTION_RADIUS,
        }
    }
}

impl PointerState {
    /// Positional push for a particle at `at`; zero outside the radius.
    ///
    /// Magnitude falls off linearly from `REPULSION_STRENGTH` at the pointer
    /// to zero at the radius. Velocity is never touched.
    pub fn repulsion(&self, at: DVec2) -> DVec2 {
        let Some(pointer) = self.position else {
            return DVec2::ZERO;
        };
        let d = pointer - at;
        let distance = d.length();
        if distance >= self.radius {
            return DVec2::ZERO;
        }
        let angle = d.y.atan2(d.x);
        let force = (self.radius - distance) / self.radius;
        -DVec2::new(angle.cos(), angle.sin()) * force * REPULSION_STRENGTH
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Drifted,
    /// Left through the side margin; x was re-sampled.
    Relocated,
    /// Fell below the viewport; every attribute was re-sampled.
    Recycled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub size: f64,
    /// `(speedX, speedY)` in pixels per tick.
    pub velocity: DVec2,
    pub opacity: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub kind: ParticleKind,
}

impl Particle {
    /// Initial allocation: like a recycle, but y is spread over the whole
    /// viewport so the population does not enter all at once.
    pub fn spawn(
        rng: &mut impl RandomSource,
        palette: &[ParticleKind],
        viewport: Viewport,
    ) -> Self {
        let mut p = Self::recycled(rng, palette, viewport);
        p.position.y = rng.unit() * viewport.height;
        p
    }

    /// Fresh attributes positioned on the spawn line above the viewport.
    pub fn recycled(
        rng: &mut impl RandomSource,
        palette: &[ParticleKind],
        viewport: Viewport,
    ) -> Self {
        let x = rng.unit() * viewport.width;
        let size = rng.range(SIZE_BASE, SIZE_SPAN);
        let speed_y = rng.range(SPEED_Y_BASE, SPEED_Y_SPAN);
        let speed_x = rng.range(SPEED_X_BASE, SPEED_X_SPAN);
        let opacity = rng.range(OPACITY_BASE, OPACITY_SPAN);
        let rotation = rng.unit() * TAU;
        let rotation_speed = (rng.unit() - 0.5) * ROTATION_SPEED_SPAN;
        let kind = match palette {
            [] => ParticleKind::Leaf,
            kinds => kinds[rng.index(kinds.len())],
        };
        Self {
            position: DVec2::new(x, SPAWN_Y),
            size,
            velocity: DVec2::new(speed_x, speed_y),
            opacity,
            rotation,
            rotation_speed,
            kind,
        }
    }

    pub fn reset(
        &mut self,
        rng: &mut impl RandomSource,
        palette: &[ParticleKind],
        viewport: Viewport,
    ) {
        *self = Self::recycled(rng, palette, viewport);
    }

    #[inline]
    pub fn color(&self) -> Rgba {
        self.kind.base_color().with_alpha(self.opacity)
    }

    /// Advance one tick.
    ///
    /// The sway term uses the y position from before this tick's fall.
    pub fn step(
        &mut self,
        viewport: Viewport,
        pointer: Option<&PointerState>,
        rng: &mut impl RandomSource,
        palette: &[ParticleKind],
    ) -> StepOutcome {
        let pre_y = self.position.y;
        self.position.y += self.velocity.y;
        self.position.x += self.velocity.x + (pre_y * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;
        self.rotation += self.rotation_speed;

        if let Some(pointer) = pointer {
            self.position += pointer.repulsion(self.position);
        }

        if self.position.y > viewport.height + BOTTOM_MARGIN {
            self.reset(rng, palette, viewport);
            return StepOutcome::Recycled;
        }
        self.position.y = self.position.y.max(SPAWN_Y);
        if !viewport.contains_x_with_margin(self.position.x, SIDE_MARGIN) {
            self.position.x = rng.unit() * viewport.width;
            return StepOutcome::Relocated;
        }
        StepOutcome::Drifted
    }
}

/// The particle engine: fixed population, shared pointer state, injected RNG.
pub struct ParticleField<R: RandomSource = StdRng> {
    config: ParticleConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    pointer: PointerState,
    rng: R,
}

impl<R: RandomSource> ParticleField<R> {
    pub fn new(config: ParticleConfig, viewport: Viewport, mut rng: R) -> Self {
        let count = clamp_count(i64::try_from(config.particle_count).unwrap_or(i64::MAX));
        let palette = config.theme.palette();
        let particles = (0..count)
            .map(|_| Particle::spawn(&mut rng, palette, viewport))
            .collect();
        Self {
            config: ParticleConfig {
                particle_count: count,
                ..config
            },
            viewport,
            particles,
            pointer: PointerState::default(),
            rng,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    /// Update every particle without drawing.
    pub fn step(&mut self) {
        let pointer = self.config.interactive.then_some(&self.pointer);
        let palette = self.config.theme.palette();
        for p in &mut self.particles {
            p.step(self.viewport, pointer, &mut self.rng, palette);
        }
    }
}

const INTERACTIVE_EVENTS: &[HostEvent] = &[
    HostEvent::Resize,
    HostEvent::PointerMove,
    HostEvent::PointerLeave,
];
const PASSIVE_EVENTS: &[HostEvent] = &[HostEvent::Resize];

impl<R: RandomSource> Animation for ParticleField<R> {
    const NAME: &'static str = "particles";

    fn events(&self) -> &'static [HostEvent] {
        if self.config.interactive {
            INTERACTIVE_EVENTS
        } else {
            PASSIVE_EVENTS
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn pointer(&mut self, position: Option<DVec2>) {
        if self.config.interactive {
            self.pointer.position = position;
        }
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> SurfaceResult {
        let vp = self.viewport;
        surface.clear_rect(0.0, 0.0, vp.width, vp.height);

        let pointer = self.config.interactive.then_some(&self.pointer);
        let palette = self.config.theme.palette();
        for p in &mut self.particles {
            p.step(vp, pointer, &mut self.rng, palette);
            shapes::draw_particle(p, surface)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let pointer = PointerState {
            position: Some(DVec2::new(0.0, 0.0)),
            ..Default::default()
        };
        assert_eq!(pointer.repulsion(DVec2::new(150.0, 0.0)), DVec2::ZERO);
        assert_eq!(PointerState::default().repulsion(DVec2::ZERO), DVec2::ZERO);
    }

    #[test]
    fn repulsion_points_away_with_linear_falloff() {
        let pointer = PointerState {
            position: Some(DVec2::new(100.0, 100.0)),
            ..Default::default()
        };
        let push = pointer.repulsion(DVec2::new(175.0, 100.0));
        assert!(push.x > 0.0);
        assert!(push.y.abs() < 1e-12);
        assert!((push.x - REPULSION_STRENGTH * 0.5).abs() < 1e-12);
    }

    #[test]
    fn count_is_clamped_into_range() {
        assert_eq!(clamp_count(0), MIN_PARTICLES);
        assert_eq!(clamp_count(-4), MIN_PARTICLES);
        assert_eq!(clamp_count(40), 40);
        assert_eq!(clamp_count(1_000_000), MAX_PARTICLES);
    }

    #[test]
    fn unknown_theme_uses_default_palette() {
        assert_eq!(Theme::from_tag("minimal"), Theme::Environmental);
        assert_eq!(Theme::from_tag(" Environmental "), Theme::Environmental);
        assert_eq!(Theme::Environmental.palette().len(), 8);
    }
}
