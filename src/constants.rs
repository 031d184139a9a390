// DOM-facing names and defaults used by the web host.

// Declarative mounting: <canvas data-fx="particles" data-particle-count="40">
pub const FX_ATTR: &str = "data-fx";
pub const FX_SELECTOR: &str = "canvas[data-fx]";
pub const FX_PARTICLES: &str = "particles";
pub const FX_BACKGROUND: &str = "background";

pub const COUNT_ATTR: &str = "data-particle-count";
pub const INTERACTIVE_ATTR: &str = "data-interactive";
pub const THEME_ATTR: &str = "data-theme";
pub const VARIANT_ATTR: &str = "data-variant";

// Event names per host event
pub const RESIZE_EVENT: &str = "resize"; // on window
pub const POINTER_MOVE_EVENT: &str = "mousemove"; // on window
pub const POINTER_LEAVE_EVENT: &str = "mouseleave"; // on the document element

// 2D context options for particle canvases
pub const CONTEXT_2D: &str = "2d";
pub const CTX_OPT_ALPHA: &str = "alpha";
pub const CTX_OPT_DESYNCHRONIZED: &str = "desynchronized";

// Fallback viewport when the window size cannot be read
pub const FALLBACK_WIDTH: f64 = 300.0;
pub const FALLBACK_HEIGHT: f64 = 150.0; // HTML canvas default size
