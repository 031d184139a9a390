//! Drawing-surface seam between the engines and whatever paints pixels.
//!
//! The operation set mirrors the subset of the 2D canvas API the engines use,
//! so the browser host is a thin forwarding layer and tests can record every
//! call with [`RecordingSurface`].

use crate::color::Rgba;
use crate::viewport::Viewport;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("drawing surface is detached")]
    Detached,
    #[error("drawing backend error: {0}")]
    Backend(String),
}

pub type SurfaceResult = Result<(), SurfaceError>;

/// Radial gradient between two concentric circles with ordered color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub x: f64,
    pub y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// `(offset in [0, 1], color)` in ascending offset order.
    pub stops: Vec<(f64, Rgba)>,
}

pub trait Surface {
    fn viewport(&self) -> Viewport;
    /// Resize the backing store; contents may be discarded.
    fn resize(&mut self, viewport: Viewport);
    /// Cheap validity probe run at the start of every tick.
    fn check(&self) -> SurfaceResult {
        Ok(())
    }

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> SurfaceResult;
    fn rotate(&mut self, angle: f64) -> SurfaceResult;

    fn set_global_alpha(&mut self, alpha: f64);
    fn set_fill(&mut self, color: Rgba);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn set_fill_gradient(&mut self, gradient: &RadialGradient) -> SurfaceResult;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> SurfaceResult;
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    GlobalAlpha(f64),
    Fill(Rgba),
    Stroke(Rgba),
    LineWidth(f64),
    FillGradient(RadialGradient),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    ClosePath,
    FillPath,
    StrokePath,
    FillRect(f64, f64, f64, f64),
    ClearRect(f64, f64, f64, f64),
}

/// In-memory surface that records every call.
///
/// Once [`detach`](RecordingSurface::detach)ed, `check` and every fallible
/// operation fail with [`SurfaceError::Detached`] and nothing more is recorded.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    detached: bool,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, keeping the surface usable.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn record(&mut self, cmd: DrawCommand) {
        if !self.detached {
            self.commands.push(cmd);
        }
    }

    fn record_checked(&mut self, cmd: DrawCommand) -> SurfaceResult {
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        self.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.record(DrawCommand::Resize(viewport));
    }

    fn check(&self) -> SurfaceResult {
        if self.detached {
            Err(SurfaceError::Detached)
        } else {
            Ok(())
        }
    }

    fn save(&mut self) {
        self.record(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.record(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) -> SurfaceResult {
        self.record_checked(DrawCommand::Translate(x, y))
    }

    fn rotate(&mut self, angle: f64) -> SurfaceResult {
        self.record_checked(DrawCommand::Rotate(angle))
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.record(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.record(DrawCommand::Fill(color));
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.record(DrawCommand::Stroke(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.record(DrawCommand::LineWidth(width));
    }

    fn set_fill_gradient(&mut self, gradient: &RadialGradient) -> SurfaceResult {
        self.record_checked(DrawCommand::FillGradient(gradient.clone()))
    }

    fn begin_path(&mut self) {
        self.record(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.record(DrawCommand::LineTo(x, y));
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.record(DrawCommand::QuadraticCurveTo(cpx, cpy, x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> SurfaceResult {
        self.record_checked(DrawCommand::Arc {
            x,
            y,
            radius,
            start,
            end,
        })
    }

    fn close_path(&mut self) {
        self.record(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.record(DrawCommand::FillPath);
    }

    fn stroke(&mut self) {
        self.record(DrawCommand::StrokePath);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.record(DrawCommand::FillRect(x, y, w, h));
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.record(DrawCommand::ClearRect(x, y, w, h));
    }
}
