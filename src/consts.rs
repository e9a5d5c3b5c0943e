//! Shared numeric defaults for the spatial engine.
//!
//! These are policy, not law: every value here seeds a field of
//! [`crate::config::EngineConfig`] and can be overridden per deployment.

// ── Shapes ──────────────────────────────────────────────────────

/// Width and height assumed for a shape whose props carry no `w`/`h` when
/// laying out, framing, or placing.
pub const DEFAULT_SHAPE_SIZE: f64 = 300.0;

/// Canonical prefix carried by every shape identifier.
pub const SHAPE_ID_PREFIX: &str = "shape:";

/// Prefix for minted session aliases (`s1`, `s2`, ...).
pub const ALIAS_PREFIX: &str = "s";

/// Maximum length of a one-line shape brief, in characters.
pub const BRIEF_MAX_CHARS: usize = 80;

// ── Grouping / layout ───────────────────────────────────────────

/// Cell edge for the coarse `spatial` grouping strategy.
pub const GROUP_CELL_SIZE: f64 = 500.0;

/// Row width after which row-packing wraps to a new row.
pub const MAX_ROW_WIDTH: f64 = 2000.0;

/// Vertical space reserved above a group for its label.
pub const LABEL_HEIGHT: f64 = 60.0;

/// Gap between shapes and between groups when the caller gives none.
pub const DEFAULT_SPACING: f64 = 40.0;

// ── Frames ──────────────────────────────────────────────────────

/// Extra vertical room above the members for a frame title bar.
pub const FRAME_TITLE_HEIGHT: f64 = 32.0;

/// Padding between a frame edge and its members when the caller gives none.
pub const DEFAULT_FRAME_PADDING: f64 = 40.0;

// ── Clustering ──────────────────────────────────────────────────

/// Cell edge for the flood-fill overview grid.
pub const CLUSTER_CELL_SIZE: f64 = 500.0;

/// Horizontal distance from existing content to the suggested origin.
pub const ORIGIN_MARGIN: f64 = 200.0;

/// Sample briefs reported per cluster.
pub const MAX_SAMPLE_BRIEFS: usize = 3;

// ── Placement ───────────────────────────────────────────────────

/// Minimum clearance between a placed shape and any obstacle.
pub const DEFAULT_GAP: f64 = 40.0;

/// Offset rounds tried around the anchor before giving up.
pub const PLACEMENT_ATTEMPTS: u32 = 10;

/// Multiple of `gap` used for the fallback position right of the anchor.
pub const FALLBACK_GAP_MULTIPLE: f64 = 5.0;
