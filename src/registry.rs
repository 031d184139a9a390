//! Stages mounted declaratively from `<canvas data-fx=..>` markup.

use crate::attrs::{self, FxAttrs, FxSpec};
use crate::constants::*;
use crate::frame::Mounted;
use crate::{dom, mount_spec};
use fnv::FnvHashMap;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys as web;

thread_local! {
    static DECLARED: RefCell<FnvHashMap<String, Box<dyn Mounted>>> =
        RefCell::new(FnvHashMap::default());
}

/// Mount every `canvas[data-fx]` in the document; returns how many started.
pub fn mount_declared() -> usize {
    let Some(document) = dom::window_document() else {
        return 0;
    };
    let nodes = match document.query_selector_all(FX_SELECTOR) {
        Ok(n) => n,
        Err(e) => {
            log::warn!("query {:?} failed: {:?}", FX_SELECTOR, e);
            return 0;
        }
    };

    let mut started = 0;
    for i in 0..nodes.length() {
        let Some(canvas) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::HtmlCanvasElement>().ok())
        else {
            continue;
        };
        let fx = canvas.get_attribute(FX_ATTR);
        let count = canvas.get_attribute(COUNT_ATTR);
        let interactive = canvas.get_attribute(INTERACTIVE_ATTR);
        let theme = canvas.get_attribute(THEME_ATTR);
        let variant = canvas.get_attribute(VARIANT_ATTR);
        let spec = attrs::fx_spec(&FxAttrs {
            fx: fx.as_deref(),
            particle_count: count.as_deref(),
            interactive: interactive.as_deref(),
            theme: theme.as_deref(),
            variant: variant.as_deref(),
        });
        let Some(spec) = spec else {
            continue;
        };

        let key = match canvas.id() {
            id if !id.is_empty() => id,
            _ => format!("{}#{}", fx.as_deref().unwrap_or_default(), i),
        };
        log::info!("[registry] {} -> {}", key, spec_kind(&spec));
        let mounted = mount_spec(Some(canvas), spec);
        if mounted.is_running() {
            started += 1;
        }
        insert(key, mounted);
    }
    started
}

fn insert(key: String, mounted: Box<dyn Mounted>) {
    let previous = DECLARED.with(|d| {
        let mut d = d.borrow_mut();
        // stages that ended themselves (detached canvas) are dropped here
        d.retain(|_, m| m.is_running());
        d.insert(key, mounted)
    });
    if let Some(old) = previous {
        old.unmount();
    }
}

/// Unmount and forget every declared stage.
pub fn unmount_all() -> usize {
    let drained: Vec<_> = DECLARED.with(|d| d.borrow_mut().drain().collect());
    drained.iter().filter(|(_, m)| m.unmount()).count()
}

fn spec_kind(spec: &FxSpec) -> &'static str {
    match spec {
        FxSpec::Particles(_) => FX_PARTICLES,
        FxSpec::Background(_) => FX_BACKGROUND,
    }
}
