use crate::constants::{
    DEFAULT_DENSITY, DEFAULT_SPEED, DENSITY_MAX, DENSITY_MIN, MAX_PARTICLES, SLIDER_SPEED_SPAN,
    SPEED_MAX, SPEED_MIN,
};

/// The (density, speed) pair steering the simulation.
///
/// Not stored by the engine: every application recomputes population size and
/// speed distribution from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Intensity {
    /// Percentage of [`MAX_PARTICLES`], 0..=100.
    pub density: u32,
    /// Fall speed multiplier, 1..=10.
    pub speed: u32,
}

impl Intensity {
    pub const fn new(density: u32, speed: u32) -> Self {
        Self { density, speed }
    }

    /// Out-of-range values are programmer error; clamp instead of failing.
    pub fn clamped(self) -> Self {
        Self {
            density: self.density.clamp(DENSITY_MIN, DENSITY_MAX),
            speed: self.speed.clamp(SPEED_MIN, SPEED_MAX),
        }
    }

    /// Convert loosely typed host numbers (a JS `number`) into an in-range
    /// intensity. Clamping happens in signed space, so negatives land on the
    /// floor; NaN falls back to the default and a missing speed means 5.
    pub fn from_host(density: f64, speed: Option<f64>) -> Self {
        Self {
            density: density_from_host(density),
            speed: speed.map_or(DEFAULT_SPEED, speed_from_host),
        }
    }

    /// floor(density / 100 * MAX_PARTICLES), computed in integers.
    pub fn target_count(self) -> usize {
        let density = self.density.min(DENSITY_MAX) as usize;
        density * MAX_PARTICLES / DENSITY_MAX as usize
    }

    /// Map a single 0..=100 slider level onto density and speed: density
    /// follows the level, speed grows with it but never drops below 1.
    pub fn from_level(level: u32) -> Self {
        let level = level.min(DENSITY_MAX);
        Self {
            density: level,
            speed: (level * SLIDER_SPEED_SPAN / DENSITY_MAX).max(SPEED_MIN),
        }
    }
}

/// Host number to density, see [`Intensity::from_host`].
pub fn density_from_host(value: f64) -> u32 {
    host_number(value, DENSITY_MIN, DENSITY_MAX, DEFAULT_DENSITY)
}

/// Host number to speed, see [`Intensity::from_host`].
pub fn speed_from_host(value: f64) -> u32 {
    host_number(value, SPEED_MIN, SPEED_MAX, DEFAULT_SPEED)
}

fn host_number(value: f64, min: u32, max: u32, fallback: u32) -> u32 {
    if value.is_nan() {
        return fallback;
    }
    value.floor().clamp(min as f64, max as f64) as u32
}

/// Payload delivered to observers after every intensity application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntensityChange {
    pub density: u32,
    pub speed: u32,
    pub count: usize,
}
