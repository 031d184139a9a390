// Shared animation tuning constants used by both the engine and the web host.

// Background orbs
pub const ORB_TIME_STEP: f64 = 0.002; // per tick, not wall-clock scaled
pub const ORB_DRIFT_AMPLITUDE: f64 = 0.05; // fraction of the viewport
pub const ORB_Y_PHASE_SCALE: f64 = 0.7; // index multiplier for the vertical phase
pub const ORB_INNER_ALPHA: f64 = 0.3;
pub const ORB_MID_ALPHA: f64 = 0.1;
pub const ORB_MID_STOP: f64 = 0.5;

// Particle population
pub const DEFAULT_PARTICLES: usize = 50;
pub const MIN_PARTICLES: usize = 1;
pub const MAX_PARTICLES: usize = 500;

// Particle attribute ranges: value = base + unit * span
pub const SIZE_BASE: f64 = 25.0;
pub const SIZE_SPAN: f64 = 25.0;
pub const SPEED_Y_BASE: f64 = 0.15;
pub const SPEED_Y_SPAN: f64 = 0.3;
pub const SPEED_X_BASE: f64 = -0.2;
pub const SPEED_X_SPAN: f64 = 0.4;
pub const OPACITY_BASE: f64 = 0.5;
pub const OPACITY_SPAN: f64 = 0.4;
pub const ROTATION_SPEED_SPAN: f64 = 0.02; // centered on zero

// Motion
pub const SWAY_FREQUENCY: f64 = 0.01; // radians per pixel of y
pub const SWAY_AMPLITUDE: f64 = 0.5; // pixels per tick

// Bounds
pub const SPAWN_Y: f64 = -50.0; // recycled particles re-enter here
pub const BOTTOM_MARGIN: f64 = 10.0; // recycle once y exceeds height + margin
pub const SIDE_MARGIN: f64 = 10.0; // relocate once x leaves [-margin, width + margin]

// Pointer interaction
pub const INTERACTION_RADIUS: f64 = 150.0;
pub const REPULSION_STRENGTH: f64 = 2.0; // max positional nudge per tick (px)

// Drawing
pub const BASE_LINE_WIDTH: f64 = 2.0;
pub const HIGHLIGHT_ALPHA: f64 = 0.5; // droplet specular, relative to opacity
pub const SNOW_CAP_ALPHA: f64 = 0.8; // mountain snow cap, relative to opacity
