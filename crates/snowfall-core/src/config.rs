//! Host-facing configuration read from element attributes.

use crate::constants::{DEFAULT_DENSITY, DEFAULT_SPEED};
use crate::intensity::Intensity;
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnowfallConfig {
    pub density: u32,
    pub speed: u32,
    pub paused: bool,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            speed: DEFAULT_SPEED,
            paused: false,
        }
    }
}

impl SnowfallConfig {
    /// Build from raw attribute values. A missing, non-numeric or zero value
    /// falls back to the default, so `density="0"` still yields 50.
    pub fn from_attributes(density: Option<&str>, speed: Option<&str>, paused: bool) -> Self {
        Self {
            density: parse_or(density, DEFAULT_DENSITY),
            speed: parse_or(speed, DEFAULT_SPEED),
            paused,
        }
    }

    pub fn intensity(&self) -> Intensity {
        Intensity::new(self.density, self.speed)
    }
}

/// Parse a leading decimal integer (`"42px"` -> 42, `" 7"` -> 7). Negative
/// values have no meaning here and saturate to 0.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

fn parse_or(raw: Option<&str>, default: u32) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(0) | None => default,
        Some(v) => v.clamp(0, u32::MAX as i64) as u32,
    }
}

/// Settles a property write to exactly one application.
///
/// A property setter writes the attribute and, if the host forwards
/// `attributeChangedCallback`, the hook applies it synchronously. Otherwise
/// the setter must apply it itself. `begin`, then `settle` from the hook, then
/// `finish` from the setter tells the setter which case it was.
#[derive(Debug, Default)]
pub struct AttributeWrite {
    pending: Cell<bool>,
}

impl AttributeWrite {
    pub fn begin(&self) {
        self.pending.set(true);
    }

    /// Called by the attribute-changed hook, which applies the value itself.
    pub fn settle(&self) {
        self.pending.set(false);
    }

    /// `true` if nothing applied the write since `begin`.
    pub fn finish(&self) -> bool {
        self.pending.replace(false)
    }
}
