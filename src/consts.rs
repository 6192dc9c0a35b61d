//! Shared numeric constants for the court coach crate.

use std::f64::consts::PI;

// ── Court ───────────────────────────────────────────────────────

/// Court width divided by court height (30.5 m × 15.25 m).
pub const COURT_RATIO: f64 = 30.5 / 15.25;

/// Padding between the container edge and the court outline, in pixels.
pub const COURT_PADDING_PX: f64 = 40.0;

/// Minimum court width in pixels.
pub const MIN_COURT_WIDTH: f64 = 300.0;

/// Minimum court height in pixels.
pub const MIN_COURT_HEIGHT: f64 = 150.0;

/// Court units spanning the full court width (one unit = 10 cm).
pub const COURT_UNITS_WIDE: f64 = 305.0;

/// Goal circle radius in court units (4.9 m).
pub const GOAL_CIRCLE_UNITS: f64 = 49.0;

/// Center circle radius in court units (0.9 m).
pub const CENTER_CIRCLE_UNITS: f64 = 9.0;

// ── Tokens ──────────────────────────────────────────────────────

/// Smallest token radius in pixels.
pub const MIN_TOKEN_RADIUS: f64 = 20.0;

/// Token radius in court units.
pub const TOKEN_RADIUS_UNITS: f64 = 8.0;

/// Smallest token label font size in pixels.
pub const MIN_TOKEN_FONT: f64 = 8.0;

/// How far past the court edge a token may be dragged, in pixels.
pub const DRAG_MARGIN_PX: f64 = 50.0;

/// Snap distance as a multiple of the token radius.
pub const SNAP_RADIUS_FACTOR: f64 = 2.0;

/// Off-court column spacing as a multiple of the token radius.
pub const BENCH_SPACING_FACTOR: f64 = 2.5;

/// Scale applied to a token while it is being dragged.
pub const DRAG_LIFT_SCALE: f64 = 1.1;

// ── Arrows ──────────────────────────────────────────────────────

/// Arrowhead side length in pixels.
pub const ARROW_HEAD_LEN: f64 = 12.0;

/// Arrowhead half-angle (30°).
pub const ARROW_HEAD_ANGLE: f64 = PI / 6.0;

/// Gestures shorter than this are discarded instead of becoming arrows.
pub const MIN_ARROW_LEN: f64 = 20.0;

/// Arrow stroke width in pixels.
pub const ARROW_STROKE_PX: f64 = 3.0;

/// Extra hit slop around an arrow shaft, in pixels.
pub const ARROW_HIT_SLOP_PX: f64 = 4.0;

// ── Timing ──────────────────────────────────────────────────────

/// Auto-save interval in milliseconds.
pub const AUTO_SAVE_INTERVAL_MS: f64 = 30_000.0;

/// Quiet period after the last resize before relayout, in milliseconds.
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

/// Duration of the place-on-court transition.
pub const FORMATION_TWEEN_MS: f64 = 500.0;

/// Duration of the edge-snap transition.
pub const SNAP_TWEEN_MS: f64 = 200.0;

// ── Storage ─────────────────────────────────────────────────────

/// Key holding the current setup snapshot.
pub const SETUP_KEY: &str = "court-coach-data";

/// Key holding user settings.
pub const SETTINGS_KEY: &str = "court-coach-settings";

/// Key holding the usage log.
pub const USAGE_KEY: &str = "court-coach-usage";

/// Snapshot format version written by this crate.
pub const SETUP_VERSION: &str = "1.0.0";

/// Maximum number of usage log entries retained.
pub const USAGE_LOG_CAP: usize = 100;
