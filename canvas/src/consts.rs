//! Shared numeric constants and the default palette.

// ── Surface ─────────────────────────────────────────────────────

/// Fallback surface width when the host reports no usable size.
pub const DEFAULT_SURFACE_WIDTH: f64 = 640.0;

/// Fallback surface height when the host reports no usable size.
pub const DEFAULT_SURFACE_HEIGHT: f64 = 480.0;

// ── Pointer ─────────────────────────────────────────────────────

/// Side length of the square pointer hotspot, anchored at its top-left on the pointer.
pub const POINTER_SIZE: f64 = 32.0;

/// How long the pointer-up edge stays observable after release, in milliseconds.
pub const POINTER_UP_HOLD_MS: f64 = 100.0;

// ── Animation ───────────────────────────────────────────────────

/// Opacity change applied by one fade step.
pub const FADE_STEP: u8 = 10;

/// Milliseconds between fade steps.
pub const FADE_INTERVAL_MS: u64 = 60;

/// Fully opaque.
pub const OPACITY_MAX: u8 = 100;

/// Milliseconds between typewriter reveals.
pub const TYPEWRITER_INTERVAL_MS: u64 = 30;

// ── Layout ──────────────────────────────────────────────────────

/// Default spacing kept between an anchored entity and the surface edge.
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Default step for `scale_up` / `scale_down`.
pub const SCALE_STEP: f64 = 10.0;

/// Vertical advance between wrapped text lines.
pub const TEXT_LINE_HEIGHT: f64 = 20.0;

/// Horizontal padding added to measured text when sizing a text entity.
pub const TEXT_PADDING: f64 = 50.0;

// ── Palette ─────────────────────────────────────────────────────

pub const COLOR_BLACK: &str = "#121212";
pub const COLOR_WHITE: &str = "#fafafa";
pub const COLOR_GRAY: &str = "#ababab";
pub const COLOR_ORANGE: &str = "#ff9f1c";
pub const COLOR_FOCUS: &str = "dodgerblue";

/// Outline colors for the debug overlay; one is picked per entity.
pub const DEBUG_COLORS: [&str; 3] = ["#ff00ff", "#00bbff", "#00ff0e"];

/// Size of the debug overlay panel.
pub const DEBUG_PANEL_WIDTH: f64 = 170.0;
pub const DEBUG_PANEL_HEIGHT: f64 = 140.0;
