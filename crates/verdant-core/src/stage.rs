//! Mount/tick/unmount lifecycle shared by every engine.
//!
//! A [`Stage`] owns one [`Host`] (drawing surface, frame scheduler, event
//! listeners) and at most one running [`Animation`]. The state machine is
//! `Unmounted -> Mounted(running) -> Unmounted`; there is no paused state and
//! re-mounting always builds a fresh animation.

use crate::surface::{RecordingSurface, Surface, SurfaceError, SurfaceResult};
use crate::viewport::Viewport;
use glam::DVec2;
use smallvec::SmallVec;

/// Opaque id of one "run again before next repaint" registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    Resize,
    PointerMove,
    PointerLeave,
}

/// Platform services an engine runs on.
pub trait Host {
    /// Current viewport size in pixels.
    fn viewport(&self) -> Viewport;
    /// `None` while no drawing surface is available.
    fn surface(&mut self) -> Option<&mut dyn Surface>;
    /// Ask for one frame callback; `None` when the host cannot schedule.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Returns `false` when the listener could not be installed.
    fn subscribe(&mut self, event: HostEvent) -> bool;
    fn unsubscribe(&mut self, event: HostEvent);
}

pub trait Animation {
    /// Short name used in log lines.
    const NAME: &'static str;

    /// Host events this animation needs delivered.
    fn events(&self) -> &'static [HostEvent];
    fn resize(&mut self, viewport: Viewport);
    /// Pointer position in surface pixels, `None` once the pointer is gone.
    fn pointer(&mut self, _position: Option<DVec2>) {}
    /// One update + draw pass.
    fn tick(&mut self, surface: &mut dyn Surface) -> SurfaceResult;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    Started,
    NoSurface,
}

struct Session<A> {
    animation: A,
    pending: Option<FrameHandle>,
    listeners: SmallVec<[HostEvent; 3]>,
    ticks: u64,
}

pub struct Stage<A: Animation, H: Host> {
    host: H,
    session: Option<Session<A>>,
}

impl<A: Animation, H: Host> Stage<A, H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            session: None,
        }
    }

    /// Start a fresh session, tearing down any running one first.
    ///
    /// Without a drawing surface this is a no-op; the caller re-mounts once
    /// one exists.
    pub fn mount(&mut self, build: impl FnOnce(Viewport) -> A) -> MountOutcome {
        self.unmount();

        let viewport = self.host.viewport();
        let Some(surface) = self.host.surface() else {
            log::debug!("[{}] no drawing surface; mount skipped", A::NAME);
            return MountOutcome::NoSurface;
        };
        surface.resize(viewport);

        let animation = build(viewport);
        let mut listeners = SmallVec::new();
        for &event in animation.events() {
            if self.host.subscribe(event) {
                listeners.push(event);
            } else {
                log::warn!("[{}] {:?} listener unavailable", A::NAME, event);
            }
        }

        let pending = self.host.request_frame();
        if pending.is_none() {
            log::warn!("[{}] host cannot schedule frames", A::NAME);
        }
        self.session = Some(Session {
            animation,
            pending,
            listeners,
            ticks: 0,
        });
        log::info!(
            "[{}] mounted at {}x{}",
            A::NAME,
            viewport.width,
            viewport.height
        );
        MountOutcome::Started
    }

    /// Frame callback: run one tick and schedule the next.
    ///
    /// Returns `false` (and does nothing) when unmounted or when no frame was
    /// pending, so a late callback after `unmount` cannot draw. A detached
    /// surface or a host that stops handing out frames ends the session.
    pub fn on_frame(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.pending.take().is_none() {
            return false;
        }

        let outcome = match self.host.surface() {
            Some(surface) => surface
                .check()
                .and_then(|()| session.animation.tick(surface)),
            None => Err(SurfaceError::Detached),
        };
        session.ticks += 1;
        match outcome {
            Ok(()) => {}
            Err(SurfaceError::Detached) => {
                log::warn!("[{}] surface detached; stopping", A::NAME);
                self.unmount();
                return true;
            }
            Err(e) => log::warn!("[{}] tick aborted: {}", A::NAME, e),
        }

        session.pending = self.host.request_frame();
        if session.pending.is_none() {
            log::warn!("[{}] host stopped scheduling frames; stopping", A::NAME);
            self.unmount();
        }
        true
    }

    pub fn on_resize(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let viewport = self.host.viewport();
        if let Some(surface) = self.host.surface() {
            surface.resize(viewport);
        }
        session.animation.resize(viewport);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if let Some(session) = self.session.as_mut() {
            session.animation.pointer(Some(DVec2::new(x, y)));
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.animation.pointer(None);
        }
    }

    /// Cancel the pending frame and remove every listener. Idempotent.
    pub fn unmount(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        if let Some(handle) = session.pending {
            self.host.cancel_frame(handle);
        }
        for event in session.listeners {
            self.host.unsubscribe(event);
        }
        log::info!("[{}] unmounted after {} ticks", A::NAME, session.ticks);
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.session.as_ref().and_then(|s| s.pending)
    }

    pub fn ticks(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.ticks)
    }

    pub fn animation(&self) -> Option<&A> {
        self.session.as_ref().map(|s| &s.animation)
    }

    pub fn animation_mut(&mut self) -> Option<&mut A> {
        self.session.as_mut().map(|s| &mut s.animation)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<A: Animation, H: Host> Drop for Stage<A, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Deterministic host for driving a [`Stage`] by hand.
///
/// Frames only run when the caller invokes [`Stage::on_frame`], so tests
/// decide exactly how many ticks happen.
#[derive(Debug)]
pub struct ManualHost {
    viewport: Viewport,
    surface: Option<RecordingSurface>,
    next_handle: i32,
    outstanding: Option<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    subscribed: Vec<HostEvent>,
    accept_subscriptions: bool,
    accept_frames: bool,
}

impl ManualHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            surface: Some(RecordingSurface::new(viewport)),
            next_handle: 1,
            outstanding: None,
            cancelled: Vec::new(),
            subscribed: Vec::new(),
            accept_subscriptions: true,
            accept_frames: true,
        }
    }

    pub fn without_surface(viewport: Viewport) -> Self {
        Self {
            surface: None,
            ..Self::new(viewport)
        }
    }

    /// Make every later `subscribe` fail, as on a host without DOM events.
    pub fn refuse_subscriptions(mut self) -> Self {
        self.accept_subscriptions = false;
        self
    }

    /// Make every later `request_frame` fail, as after the page is torn down.
    pub fn stop_scheduling(&mut self) {
        self.accept_frames = false;
    }

    pub fn attach_surface(&mut self) {
        self.surface = Some(RecordingSurface::new(self.viewport));
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn recording(&self) -> Option<&RecordingSurface> {
        self.surface.as_ref()
    }

    pub fn recording_mut(&mut self) -> Option<&mut RecordingSurface> {
        self.surface.as_mut()
    }

    /// The frame registration that would fire next, if any.
    pub fn outstanding_frame(&self) -> Option<FrameHandle> {
        self.outstanding
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    pub fn subscribed(&self) -> &[HostEvent] {
        &self.subscribed
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        self.surface.as_mut().map(|s| s as &mut dyn Surface)
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        if !self.accept_frames {
            return None;
        }
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.outstanding = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
        self.cancelled.push(handle);
    }

    fn subscribe(&mut self, event: HostEvent) -> bool {
        if !self.accept_subscriptions {
            return false;
        }
        if !self.subscribed.contains(&event) {
            self.subscribed.push(event);
        }
        true
    }

    fn unsubscribe(&mut self, event: HostEvent) {
        self.subscribed.retain(|e| *e != event);
    }
}
