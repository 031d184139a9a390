#![cfg(target_arch = "wasm32")]
use crate::attrs::FxSpec;
use crate::canvas::ContextMode;
use crate::frame::Mounted;
use rand::rngs::StdRng;
use rand::SeedableRng;
use verdant_core::{BackgroundField, ParticleConfig, ParticleField, Theme, Variant};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod attrs;
mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod registry;

/// Handle to one mounted engine, returned to JS.
#[wasm_bindgen]
pub struct FxHandle {
    inner: Box<dyn Mounted>,
}

#[wasm_bindgen]
impl FxHandle {
    /// Stop the frame loop and remove listeners. Safe to call repeatedly.
    pub fn unmount(&self) -> bool {
        self.inner.unmount()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }
}

fn lookup_canvas(canvas_id: &str) -> Option<web::HtmlCanvasElement> {
    let canvas = dom::window_document().and_then(|d| dom::canvas_by_id(&d, canvas_id));
    if canvas.is_none() {
        log::warn!("missing #{}; engine stays idle", canvas_id);
    }
    canvas
}

pub(crate) fn mount_spec(
    canvas: Option<web::HtmlCanvasElement>,
    spec: FxSpec,
) -> Box<dyn Mounted> {
    match spec {
        FxSpec::Particles(config) => {
            let stage = frame::mount(canvas, ContextMode::LowLatency, move |vp| {
                ParticleField::new(config, vp, StdRng::from_entropy())
            });
            Box::new(stage)
        }
        FxSpec::Background(variant) => {
            let stage = frame::mount(canvas, ContextMode::Default, move |vp| {
                BackgroundField::new(variant, vp)
            });
            Box::new(stage)
        }
    }
}

#[wasm_bindgen(js_name = mountParticles)]
pub fn mount_particles(
    canvas_id: &str,
    particle_count: i32,
    interactive: bool,
    theme: &str,
) -> FxHandle {
    let config = ParticleConfig::default()
        .with_count(particle_count as i64)
        .interactive(interactive)
        .theme(Theme::from_tag(theme));
    FxHandle {
        inner: mount_spec(lookup_canvas(canvas_id), FxSpec::Particles(config)),
    }
}

#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(canvas_id: &str, variant: &str) -> FxHandle {
    FxHandle {
        inner: mount_spec(
            lookup_canvas(canvas_id),
            FxSpec::Background(Variant::from_tag(variant)),
        ),
    }
}

#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount_all() -> usize {
    registry::unmount_all()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("verdant-web starting");

    let started = registry::mount_declared();
    log::info!("mounted {} declared canvas engines", started);
    Ok(())
}
