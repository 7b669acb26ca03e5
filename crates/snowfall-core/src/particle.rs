use crate::constants::{BASE_SPEED_RANGE, DRIFT_RANGE, OPACITY_RANGE, RADIUS_RANGE, REENTRY_Y};
use crate::state::Dimensions;
use glam::DVec2;
use rand::Rng;

/// One falling flake. Identity is its slot in the population, nothing more.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    position: DVec2,
    vertical_speed: f64,
    horizontal_drift: f64,
    radius: f64,
    opacity: f64,
}

impl Particle {
    /// Create a particle somewhere above the visible area so new flakes
    /// stream in from the top instead of popping up on screen.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, dims: Dimensions) -> Self {
        let width = dims.width_f64();
        let height = dims.height_f64();
        Self {
            position: DVec2::new(uniform(rng, 0.0, width), uniform(rng, -height, 0.0)),
            vertical_speed: uniform(rng, BASE_SPEED_RANGE.0, BASE_SPEED_RANGE.1),
            horizontal_drift: uniform(rng, DRIFT_RANGE.0, DRIFT_RANGE.1),
            radius: uniform(rng, RADIUS_RANGE.0, RADIUS_RANGE.1),
            opacity: uniform(rng, OPACITY_RANGE.0, OPACITY_RANGE.1),
        }
    }

    /// Advance one tick and recycle the particle in place if it left the
    /// surface. Vertical and horizontal wraps are independent.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, dims: Dimensions) {
        let width = dims.width_f64();
        let height = dims.height_f64();

        self.position.y += self.vertical_speed;
        self.position.x += self.horizontal_drift;

        if self.position.y > height {
            // re-enter at a fresh column, otherwise recycled flakes form a streak
            self.position.y = REENTRY_Y;
            self.position.x = uniform(rng, 0.0, width);
        }

        if self.position.x > width {
            self.position.x = 0.0;
        } else if self.position.x < 0.0 {
            self.position.x = width;
        }
    }

    /// Draw a fresh base speed and scale it by the global speed setting.
    pub fn rescale_speed<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: f64) {
        self.vertical_speed = uniform(rng, BASE_SPEED_RANGE.0, BASE_SPEED_RANGE.1) * speed;
    }

    #[inline]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    pub fn vertical_speed(&self) -> f64 {
        self.vertical_speed
    }

    #[inline]
    pub fn horizontal_drift(&self) -> f64 {
        self.horizontal_drift
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
}

// lo + r * (hi - lo) instead of gen_range: an empty range (zero-size surface)
// collapses to `lo` rather than panicking.
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}
