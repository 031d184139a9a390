//! `Host` implementation backed by the browser window.
//!
//! Frames come from `requestAnimationFrame`; resize and pointer events are
//! plain DOM listeners. The JS callbacks are created once per stage and kept
//! here so the same function objects can be removed again on unmount.

use crate::canvas::CanvasSurface;
use crate::constants::{POINTER_LEAVE_EVENT, POINTER_MOVE_EVENT, RESIZE_EVENT};
use crate::dom;
use crate::events::pointer;
use glam::DVec2;
use verdant_core::{FrameHandle, Host, HostEvent, LastViewport, Surface, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Callbacks {
    pub frame: Closure<dyn FnMut(f64)>,
    pub resize: Closure<dyn FnMut()>,
    pub pointer_move: Closure<dyn FnMut(web::MouseEvent)>,
    pub pointer_leave: Closure<dyn FnMut()>,
}

type Listener<'a> = (web::EventTarget, &'static str, &'a js_sys::Function);

pub struct BrowserHost {
    window: Option<web::Window>,
    surface: Option<CanvasSurface>,
    callbacks: Option<Callbacks>,
    last_viewport: LastViewport,
}

impl BrowserHost {
    pub fn new(surface: Option<CanvasSurface>) -> Self {
        let window = web::window();
        let last_viewport = window
            .as_ref()
            .and_then(dom::window_viewport)
            .or_else(|| surface.as_ref().map(|s| s.viewport()))
            .unwrap_or_else(dom::fallback_viewport);
        Self {
            window,
            surface,
            callbacks: None,
            last_viewport: LastViewport::new(last_viewport),
        }
    }

    pub fn install(&mut self, callbacks: Callbacks) {
        self.callbacks = Some(callbacks);
    }

    /// Pointer position in this host's canvas pixels.
    pub fn pointer_position(&self, ev: &web::MouseEvent) -> Option<DVec2> {
        let canvas = self.surface.as_ref()?.canvas();
        pointer::pointer_canvas_px(ev, canvas)
    }

    fn listener(&self, event: HostEvent) -> Option<Listener<'_>> {
        let window = self.window.as_ref()?;
        let cb = self.callbacks.as_ref()?;
        let wiring: Listener<'_> = match event {
            HostEvent::Resize => (
                window.clone().unchecked_into::<web::EventTarget>(),
                RESIZE_EVENT,
                cb.resize.as_ref().unchecked_ref::<js_sys::Function>(),
            ),
            HostEvent::PointerMove => (
                window.clone().unchecked_into::<web::EventTarget>(),
                POINTER_MOVE_EVENT,
                cb.pointer_move.as_ref().unchecked_ref::<js_sys::Function>(),
            ),
            HostEvent::PointerLeave => (
                window.document()?.document_element()?.unchecked_into::<web::EventTarget>(),
                POINTER_LEAVE_EVENT,
                cb.pointer_leave.as_ref().unchecked_ref::<js_sys::Function>(),
            ),
        };
        Some(wiring)
    }
}

impl Host for BrowserHost {
    fn viewport(&self) -> Viewport {
        let read = self.window.as_ref().and_then(dom::window_viewport);
        self.last_viewport.observe(read)
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        self.surface.as_mut().map(|s| s as &mut dyn Surface)
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = self.window.as_ref()?;
        let cb = self.callbacks.as_ref()?;
        window
            .request_animation_frame(cb.frame.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = &self.window {
            _ = window.cancel_animation_frame(handle.0);
        }
    }

    fn subscribe(&mut self, event: HostEvent) -> bool {
        let Some((target, name, f)) = self.listener(event) else {
            return false;
        };
        target.add_event_listener_with_callback(name, f).is_ok()
    }

    fn unsubscribe(&mut self, event: HostEvent) {
        if let Some((target, name, f)) = self.listener(event) {
            _ = target.remove_event_listener_with_callback(name, f);
        }
    }
}
