// Simulation tuning constants shared by the core and the web frontend.

// Population
pub const MAX_PARTICLES: usize = 150; // ceiling that bounds per-frame draw cost

// Intensity ranges (inclusive)
pub const DENSITY_MIN: u32 = 0;
pub const DENSITY_MAX: u32 = 100;
pub const SPEED_MIN: u32 = 1;
pub const SPEED_MAX: u32 = 10;

// Host defaults when an attribute is missing or unparsable
pub const DEFAULT_DENSITY: u32 = 50;
pub const DEFAULT_SPEED: u32 = 5;

// Spawn distributions, as [lo, hi)
pub const BASE_SPEED_RANGE: (f64, f64) = (0.5, 1.5); // scaled by the speed setting
pub const DRIFT_RANGE: (f64, f64) = (-0.25, 0.25);
pub const RADIUS_RANGE: (f64, f64) = (1.0, 4.0);
pub const OPACITY_RANGE: (f64, f64) = (0.4, 1.0);

// Vertical re-entry point for particles that fell past the bottom edge
pub const REENTRY_Y: f64 = -10.0;

// Slider level to speed mapping: speed = level / 100 * SLIDER_SPEED_SPAN
pub const SLIDER_SPEED_SPAN: u32 = 10;
