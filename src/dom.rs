use crate::constants::{FALLBACK_HEIGHT, FALLBACK_WIDTH};
use verdant_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    let el = document.get_element_by_id(id)?;
    match el.dyn_into::<web::HtmlCanvasElement>() {
        Ok(canvas) => Some(canvas),
        Err(_) => {
            log::warn!("#{} is not a <canvas>", id);
            None
        }
    }
}

/// Inner size of the window in CSS pixels.
pub fn window_viewport(window: &web::Window) -> Option<Viewport> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(w, h))
}

#[inline]
pub fn fallback_viewport() -> Viewport {
    Viewport::new(FALLBACK_WIDTH, FALLBACK_HEIGHT)
}
