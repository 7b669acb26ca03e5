// Canvas presentation shared by the surface and the DOM setup.
// Kept free of web-sys so host tests can include it directly.

/// Overlay canvas CSS: fixed, full viewport, never intercepts pointer input.
pub const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("z-index", "9999"),
];

pub const CHANGE_EVENT: &str = "snowfall-change";
pub const CONTROL_CHANGE_EVENT: &str = "snow-control-change";

pub const DEFAULT_CONTROL_LABEL: &str = "Snow Intensity";

/// Fill style for a flake: white at the flake's own opacity.
pub fn flake_fill_style(opacity: f64) -> String {
    format!("rgba(255, 255, 255, {})", opacity.clamp(0.0, 1.0))
}

/// Label shown next to the intensity slider.
pub fn percent_label(level: u32) -> String {
    format!("{level}%")
}
