//! Drifting gradient-orb backdrop.
//!
//! Four fixed orbs are painted as radial gradients over a flat base color.
//! Only their rendered centers move: each is offset by a sine/cosine of the
//! time accumulator, which advances a fixed step per tick.

use crate::color::{Rgb, Rgba};
use crate::constants::*;
use crate::stage::{Animation, HostEvent};
use crate::surface::{RadialGradient, Surface, SurfaceResult};
use crate::viewport::Viewport;
use glam::DVec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Hero,
    Plain,
}

impl Variant {
    pub const HERO_BASE: Rgb = Rgb::new(0xf0, 0xfd, 0xf4);
    pub const PLAIN_BASE: Rgb = Rgb::WHITE;

    /// `"hero"` selects the tinted base; anything else paints on white.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "hero" => Variant::Hero,
            "plain" => Variant::Plain,
            other => {
                log::warn!("[background] unknown variant {:?}; using plain", other);
                Variant::Plain
            }
        }
    }

    pub fn base_color(self) -> Rgb {
        match self {
            Variant::Hero => Self::HERO_BASE,
            Variant::Plain => Self::PLAIN_BASE,
        }
    }
}

/// Orb placement in viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orb {
    pub x: f64,
    pub y: f64,
    /// Fraction of the viewport's shorter side.
    pub radius: f64,
    pub color: Rgb,
}

pub const ORBS: [Orb; 4] = [
    Orb {
        x: 0.2,
        y: 0.3,
        radius: 0.4,
        color: Rgb::new(16, 185, 129), // emerald
    },
    Orb {
        x: 0.7,
        y: 0.4,
        radius: 0.35,
        color: Rgb::new(59, 130, 246), // blue
    },
    Orb {
        x: 0.5,
        y: 0.7,
        radius: 0.3,
        color: Rgb::new(34, 211, 238), // cyan
    },
    Orb {
        x: 0.8,
        y: 0.2,
        radius: 0.25,
        color: Rgb::new(5, 150, 105), // teal
    },
];

impl Orb {
    /// Rendered center in pixels at accumulator value `time`.
    pub fn center(&self, index: usize, time: f64, viewport: Viewport) -> DVec2 {
        let i = index as f64;
        let offset_x = (time + i).sin() * ORB_DRIFT_AMPLITUDE;
        let offset_y = (time + i * ORB_Y_PHASE_SCALE).cos() * ORB_DRIFT_AMPLITUDE;
        DVec2::new(
            (self.x + offset_x) * viewport.width,
            (self.y + offset_y) * viewport.height,
        )
    }

    pub fn pixel_radius(&self, viewport: Viewport) -> f64 {
        self.radius * viewport.min_side()
    }

    pub fn gradient(&self, index: usize, time: f64, viewport: Viewport) -> RadialGradient {
        let c = self.center(index, time, viewport);
        RadialGradient {
            x: c.x,
            y: c.y,
            inner_radius: 0.0,
            outer_radius: self.pixel_radius(viewport),
            stops: vec![
                (0.0, self.color.with_alpha(ORB_INNER_ALPHA)),
                (ORB_MID_STOP, self.color.with_alpha(ORB_MID_ALPHA)),
                (1.0, Rgba::TRANSPARENT_WHITE),
            ],
        }
    }
}

pub struct BackgroundField {
    variant: Variant,
    viewport: Viewport,
    time: f64,
}

impl BackgroundField {
    pub fn new(variant: Variant, viewport: Viewport) -> Self {
        Self {
            variant,
            viewport,
            time: 0.0,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn orbs(&self) -> &'static [Orb] {
        &ORBS
    }

    /// Paint the current state without advancing time.
    pub fn paint(&self, surface: &mut dyn Surface) -> SurfaceResult {
        let vp = self.viewport;
        surface.set_fill(Rgba::opaque(self.variant.base_color()));
        surface.fill_rect(0.0, 0.0, vp.width, vp.height);

        for (index, orb) in ORBS.iter().enumerate() {
            surface.set_fill_gradient(&orb.gradient(index, self.time, vp))?;
            surface.fill_rect(0.0, 0.0, vp.width, vp.height);
        }
        Ok(())
    }
}

impl Animation for BackgroundField {
    const NAME: &'static str = "background";

    fn events(&self) -> &'static [HostEvent] {
        &[HostEvent::Resize]
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> SurfaceResult {
        self.time += ORB_TIME_STEP;
        self.paint(surface)
    }
}
