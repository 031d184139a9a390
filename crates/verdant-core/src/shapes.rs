//! Per-kind particle silhouettes.
//!
//! All geometry is expressed in multiples of the particle size around the
//! origin; `draw_particle` translates and rotates into place first.

use crate::color::Rgb;
use crate::constants::{BASE_LINE_WIDTH, HIGHLIGHT_ALPHA, SNOW_CAP_ALPHA};
use crate::particles::{Particle, ParticleKind};
use crate::surface::{Surface, SurfaceResult};
use std::f64::consts::{PI, TAU};

/// Run `f` between `save` and `restore`, restoring even when `f` fails.
fn with_saved(
    s: &mut dyn Surface,
    f: impl FnOnce(&mut dyn Surface) -> SurfaceResult,
) -> SurfaceResult {
    s.save();
    let result = f(&mut *s);
    s.restore();
    result
}

pub fn draw_particle(p: &Particle, s: &mut dyn Surface) -> SurfaceResult {
    with_saved(s, |s| {
        s.set_global_alpha(p.opacity);
        s.translate(p.position.x, p.position.y)?;
        s.rotate(p.rotation)?;
        let color = p.color();
        s.set_fill(color);
        s.set_stroke(color);
        s.set_line_width(BASE_LINE_WIDTH);

        let size = p.size;
        match p.kind {
            ParticleKind::Leaf => leaf(s, size),
            ParticleKind::Droplet => droplet(s, size, p.opacity),
            ParticleKind::Recycle => recycle(s, size),
            ParticleKind::Tree => tree(s, size),
            ParticleKind::Earth => earth(s, size, p.opacity),
            ParticleKind::Sun => sun(s, size),
            ParticleKind::Wind => wind(s, size),
            ParticleKind::Mountain => mountain(s, size, p.opacity),
        }
    })
}

fn leaf(s: &mut dyn Surface, size: f64) -> SurfaceResult {
    s.begin_path();
    s.move_to(0.0, -size);
    s.quadratic_curve_to(size * 0.6, -size * 0.3, size * 0.4, size * 0.5);
    s.quadratic_curve_to(0.0, size * 0.3, 0.0, size * 0.8);
    s.quadratic_curve_to(0.0, size * 0.3, -size * 0.4, size * 0.5);
    s.quadratic_curve_to(-size * 0.6, -size * 0.3, 0.0, -size);
    s.fill();

    // vein
    s.begin_path();
    s.move_to(0.0, -size * 0.8);
    s.line_to(0.0, size * 0.6);
    s.stroke();
    Ok(())
}

fn droplet(s: &mut dyn Surface, size: f64, opacity: f64) -> SurfaceResult {
    s.begin_path();
    s.move_to(0.0, -size);
    s.quadratic_curve_to(size * 0.5, -size * 0.5, size * 0.5, size * 0.2);
    s.quadratic_curve_to(size * 0.5, size * 0.8, 0.0, size);
    s.quadratic_curve_to(-size * 0.5, size * 0.8, -size * 0.5, size * 0.2);
    s.quadratic_curve_to(-size * 0.5, -size * 0.5, 0.0, -size);
    s.fill();

    s.set_fill(Rgb::WHITE.with_alpha(opacity * HIGHLIGHT_ALPHA));
    s.begin_path();
    s.arc(-size * 0.2, -size * 0.4, size * 0.2, 0.0, TAU)?;
    s.fill();
    Ok(())
}

fn recycle(s: &mut dyn Surface, size: f64) -> SurfaceResult {
    s.set_line_width(size * 0.15);
    for i in 0..3 {
        with_saved(s, |s| {
            s.rotate(TAU / 3.0 * i as f64)?;
            s.begin_path();
            s.arc(0.0, 0.0, size * 0.6, -PI / 6.0, PI / 3.0)?;
            s.stroke();

            // arrow head
            s.begin_path();
            s.move_to(size * 0.3, size * 0.5);
            s.line_to(size * 0.5, size * 0.3);
            s.line_to(size * 0.2, size * 0.3);
            s.fill();
            Ok(())
        })?;
    }
    Ok(())
}

fn tree(s: &mut dyn Surface, size: f64) -> SurfaceResult {
    s.fill_rect(-size * 0.1, size * 0.2, size * 0.2, size * 0.5);

    s.begin_path();
    s.arc(0.0, -size * 0.3, size * 0.4, 0.0, TAU)?;
    s.arc(-size * 0.3, 0.0, size * 0.35, 0.0, TAU)?;
    s.arc(size * 0.3, 0.0, size * 0.35, 0.0, TAU)?;
    s.fill();
    Ok(())
}

fn earth(s: &mut dyn Surface, size: f64, opacity: f64) -> SurfaceResult {
    s.begin_path();
    s.arc(0.0, 0.0, size * 0.7, 0.0, TAU)?;
    s.fill();

    // continents
    s.set_fill(ParticleKind::Leaf.base_color().with_alpha(opacity));
    s.begin_path();
    s.arc(-size * 0.2, -size * 0.2, size * 0.3, 0.0, TAU)?;
    s.arc(size * 0.3, size * 0.1, size * 0.25, 0.0, TAU)?;
    s.fill();
    Ok(())
}

fn sun(s: &mut dyn Surface, size: f64) -> SurfaceResult {
    s.begin_path();
    s.arc(0.0, 0.0, size * 0.4, 0.0, TAU)?;
    s.fill();

    for i in 0..8 {
        let (sin, cos) = (TAU / 8.0 * i as f64).sin_cos();
        s.begin_path();
        s.move_to(cos * size * 0.5, sin * size * 0.5);
        s.line_to(cos * size * 0.8, sin * size * 0.8);
        s.set_line_width(size * 0.1);
        s.stroke();
    }
    Ok(())
}

fn wind(s: &mut dyn Surface, size: f64) -> SurfaceResult {
    s.set_line_width(size * 0.1);
    for i in 0..3 {
        s.begin_path();
        s.arc(size * 0.2, (i as f64 - 1.0) * size * 0.3, size * 0.4, PI, PI * 1.5)?;
        s.stroke();
    }
    Ok(())
}

fn mountain(s: &mut dyn Surface, size: f64, opacity: f64) -> SurfaceResult {
    s.begin_path();
    s.move_to(-size * 0.8, size * 0.5);
    s.line_to(-size * 0.3, -size * 0.5);
    s.line_to(0.0, 0.0);
    s.line_to(size * 0.4, -size * 0.7);
    s.line_to(size * 0.8, size * 0.5);
    s.close_path();
    s.fill();

    // snow cap
    s.set_fill(Rgb::WHITE.with_alpha(opacity * SNOW_CAP_ALPHA));
    s.begin_path();
    s.move_to(size * 0.4, -size * 0.7);
    s.line_to(size * 0.3, -size * 0.4);
    s.line_to(size * 0.5, -size * 0.4);
    s.close_path();
    s.fill();
    Ok(())
}
