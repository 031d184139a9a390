//! `Surface` implementation over a `CanvasRenderingContext2d`.

use crate::constants::{CONTEXT_2D, CTX_OPT_ALPHA, CTX_OPT_DESYNCHRONIZED};
use anyhow::anyhow;
use verdant_core::{RadialGradient, Rgba, Surface, SurfaceError, SurfaceResult, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextMode {
    Default,
    /// `{ alpha: true, desynchronized: true }`, used for particle layers.
    LowLatency,
}

pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

fn js_err(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(format!("{:?}", e))
}

fn context_options(mode: ContextMode) -> Result<js_sys::Object, JsValue> {
    let opts = js_sys::Object::new();
    if mode == ContextMode::LowLatency {
        js_sys::Reflect::set(&opts, &CTX_OPT_ALPHA.into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&opts, &CTX_OPT_DESYNCHRONIZED.into(), &JsValue::TRUE)?;
    }
    Ok(opts)
}

impl CanvasSurface {
    pub fn bind(canvas: web::HtmlCanvasElement, mode: ContextMode) -> anyhow::Result<Self> {
        let opts = context_options(mode).map_err(|e| anyhow!("{:?}", e))?;
        let ctx = canvas
            .get_context_with_context_options(CONTEXT_2D, &opts)
            .map_err(|e| anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }

    fn check(&self) -> SurfaceResult {
        if self.canvas.is_connected() {
            Ok(())
        } else {
            Err(SurfaceError::Detached)
        }
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> SurfaceResult {
        self.ctx.translate(x, y).map_err(js_err)
    }

    fn rotate(&mut self, angle: f64) -> SurfaceResult {
        self.ctx.rotate(angle).map_err(js_err)
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.css());
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.css());
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_fill_gradient(&mut self, g: &RadialGradient) -> SurfaceResult {
        let gradient = self
            .ctx
            .create_radial_gradient(g.x, g.y, g.inner_radius, g.x, g.y, g.outer_radius)
            .map_err(js_err)?;
        for (offset, color) in &g.stops {
            gradient
                .add_color_stop(*offset as f32, &color.css())
                .map_err(js_err)?;
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        Ok(())
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cpx, cpy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> SurfaceResult {
        self.ctx.arc(x, y, radius, start, end).map_err(js_err)
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }
}
