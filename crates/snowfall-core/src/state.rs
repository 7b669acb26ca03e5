//! Small state types shared by the simulation and the frontends.
//!
//! These types avoid referencing platform-specific APIs so the web frontend and
//! host-side tests can use them alike.

/// Pixel size of the drawing surface.
///
/// Zero is a legitimate transient size (e.g. a detached host element); the
/// wrap tests then trigger on every tick instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    #[inline]
    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }
}

/// Externally observable state of the render loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}
