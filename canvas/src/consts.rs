//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest zoom factor the viewport may reach.
pub const MIN_ZOOM: f64 = 0.2;

/// Highest zoom factor the viewport may reach.
pub const MAX_ZOOM: f64 = 3.0;

/// Multiplicative step used by the zoom-in / zoom-out buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Exponential zoom rate per wheel pixel when ctrl/meta is held.
pub const WHEEL_ZOOM_RATE: f64 = 0.0015;

/// Padding in world units added around the tables when fitting the view.
pub const FIT_PADDING: f64 = 80.0;

/// Auto-fit never zooms in past this factor, even for a single small table.
pub const FIT_MAX_ZOOM: f64 = 1.5;

/// Smallest width/height used when fitting a degenerate bounding box.
pub const MIN_FIT_EXTENT: f64 = 1.0;

// ── Gestures ────────────────────────────────────────────────────

/// A table drag shorter than this (world units) is a click, not a move.
pub const MOVE_COMMIT_THRESHOLD: f64 = 2.0;

/// A pan shorter than this (screen pixels) is a background click.
pub const CLICK_SLOP_PX: f64 = 3.0;

/// Rotation applied by one press of the rotate action, in degrees.
pub const ROTATION_STEP_DEG: i32 = 15;

/// Extra screen-space slop in pixels when hit-testing seats.
pub const HIT_SLOP_PX: f64 = 4.0;

// ── Table geometry ──────────────────────────────────────────────

/// Radius of a round table with zero seats.
pub const ROUND_TABLE_BASE_RADIUS: f64 = 40.0;

/// Radius added to a round table for each seat of capacity.
pub const ROUND_TABLE_RADIUS_PER_SEAT: f64 = 4.0;

/// Short-side depth of a rectangular table.
pub const RECT_TABLE_DEPTH: f64 = 60.0;

/// Centre-to-centre spacing of seats along a rectangular edge.
pub const SEAT_SPACING: f64 = 50.0;

/// Distance from the table edge to the seat centre.
pub const SEAT_GAP: f64 = 22.0;

/// Drawn radius of a seat, in world units.
pub const SEAT_RADIUS: f64 = 16.0;

// ── Placement ───────────────────────────────────────────────────

/// World-space centre of the first staggered placement slot.
pub const STAGGER_ORIGIN_X: f64 = 200.0;

/// World-space centre of the first staggered placement slot.
pub const STAGGER_ORIGIN_Y: f64 = 200.0;

/// Distance between neighbouring placement slots.
pub const STAGGER_STEP: f64 = 320.0;

/// Number of placement slots per row before wrapping.
pub const STAGGER_COLUMNS: usize = 4;
