//! Wires a `Stage` to the browser: owns it behind `Rc<RefCell<..>>` and
//! builds the JS callbacks that drive it.
//!
//! Callbacks hold only a `Weak` to the stage, so dropping the last handle
//! drops the stage, whose `Drop` cancels the pending frame and removes the
//! listeners before the callbacks themselves are freed.

use crate::canvas::{CanvasSurface, ContextMode};
use crate::host::{BrowserHost, Callbacks};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use verdant_core::{Animation, MountOutcome, Stage, Viewport};
use wasm_bindgen::closure::Closure;
use web_sys as web;

pub type SharedStage<A> = Rc<RefCell<Stage<A, BrowserHost>>>;

/// Type-erased view of a mounted stage, for handles and the registry.
pub trait Mounted {
    fn unmount(&self) -> bool;
    fn is_running(&self) -> bool;
}

impl<A: Animation> Mounted for SharedStage<A> {
    fn unmount(&self) -> bool {
        self.borrow_mut().unmount()
    }

    fn is_running(&self) -> bool {
        self.borrow().is_mounted()
    }
}

pub fn mount<A: Animation + 'static>(
    canvas: Option<web::HtmlCanvasElement>,
    mode: ContextMode,
    build: impl FnOnce(Viewport) -> A,
) -> SharedStage<A> {
    let surface = canvas.and_then(|c| match CanvasSurface::bind(c, mode) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("[{}] canvas unusable: {:?}", A::NAME, e);
            None
        }
    });
    let stage = Rc::new(RefCell::new(Stage::new(BrowserHost::new(surface))));
    let callbacks = callbacks_for(Rc::downgrade(&stage));

    let mut s = stage.borrow_mut();
    s.host_mut().install(callbacks);
    if s.mount(build) == MountOutcome::NoSurface {
        log::info!("[{}] no canvas; staying idle", A::NAME);
    }
    drop(s);
    stage
}

fn callbacks_for<A: Animation + 'static>(
    stage: Weak<RefCell<Stage<A, BrowserHost>>>,
) -> Callbacks {
    let on_frame = stage.clone();
    let frame = Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(stage) = on_frame.upgrade() {
            stage.borrow_mut().on_frame();
        }
    }) as Box<dyn FnMut(f64)>);

    let on_resize = stage.clone();
    let resize = Closure::wrap(Box::new(move || {
        if let Some(stage) = on_resize.upgrade() {
            stage.borrow_mut().on_resize();
        }
    }) as Box<dyn FnMut()>);

    let on_move = stage.clone();
    let pointer_move = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if let Some(stage) = on_move.upgrade() {
            let mut s = stage.borrow_mut();
            if let Some(p) = s.host().pointer_position(&ev) {
                s.on_pointer_move(p.x, p.y);
            }
        }
    }) as Box<dyn FnMut(_)>);

    let on_leave = stage;
    let pointer_leave = Closure::wrap(Box::new(move || {
        if let Some(stage) = on_leave.upgrade() {
            stage.borrow_mut().on_pointer_leave();
        }
    }) as Box<dyn FnMut()>);

    Callbacks {
        frame,
        resize,
        pointer_move,
        pointer_leave,
    }
}
