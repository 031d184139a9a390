//! Pixel dimensions of the drawing surface.

use std::cell::Cell;

/// Width and height of the drawing surface in pixels.
///
/// Recomputed by the host on every resize and handed to the engines; the
/// engines never persist it beyond their own mount session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Smaller of the two sides; orb radii scale with this.
    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn contains_x_with_margin(&self, x: f64, margin: f64) -> bool {
        x >= -margin && x <= self.width + margin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Most recent viewport a host managed to read, used when a read fails.
#[derive(Debug, Default)]
pub struct LastViewport(Cell<Viewport>);

impl LastViewport {
    pub fn new(initial: Viewport) -> Self {
        Self(Cell::new(initial))
    }

    /// Remember a successful read, or fall back to the last one seen.
    pub fn observe(&self, read: Option<Viewport>) -> Viewport {
        match read {
            Some(vp) => {
                self.0.set(vp);
                vp
            }
            None => self.0.get(),
        }
    }

    pub fn get(&self) -> Viewport {
        self.0.get()
    }
}
