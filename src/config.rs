//! Engine configuration parsed from environment variables.
//!
//! Every tunable the algorithms use lives here so callers can override it per
//! deployment without touching algorithm code. Unset or unparseable variables
//! fall back to the defaults in [`crate::consts`].

use std::str::FromStr;

use crate::consts;

/// Tunable policy values threaded through every engine operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Width/height assumed when a shape has no `w`/`h` prop.
    pub default_shape_size: f64,
    /// Row width beyond which row-packing wraps.
    pub max_row_width: f64,
    /// Vertical space reserved for a group label.
    pub label_height: f64,
    /// Cell edge for the `spatial` grouping strategy.
    pub group_cell_size: f64,
    /// Cell edge for flood-fill clustering.
    pub cluster_cell_size: f64,
    /// Title-bar allowance added above framed members.
    pub frame_title_height: f64,
    /// Distance right of existing content for the suggested origin.
    pub origin_margin: f64,
    /// Offset rounds in the placement search.
    pub placement_attempts: u32,
    /// Fallback offset, as a multiple of `gap`.
    pub fallback_gap_multiple: f64,
    /// Sample briefs kept per cluster.
    pub max_sample_briefs: usize,
    /// Truncation length for one-line briefs.
    pub brief_max_chars: usize,
    /// Layout spacing used when a tool call omits it.
    pub default_spacing: f64,
    /// Placement gap used when a tool call omits it.
    pub default_gap: f64,
    /// Frame padding used when a tool call omits it.
    pub default_padding: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_shape_size: consts::DEFAULT_SHAPE_SIZE,
            max_row_width: consts::MAX_ROW_WIDTH,
            label_height: consts::LABEL_HEIGHT,
            group_cell_size: consts::GROUP_CELL_SIZE,
            cluster_cell_size: consts::CLUSTER_CELL_SIZE,
            frame_title_height: consts::FRAME_TITLE_HEIGHT,
            origin_margin: consts::ORIGIN_MARGIN,
            placement_attempts: consts::PLACEMENT_ATTEMPTS,
            fallback_gap_multiple: consts::FALLBACK_GAP_MULTIPLE,
            max_sample_briefs: consts::MAX_SAMPLE_BRIEFS,
            brief_max_chars: consts::BRIEF_MAX_CHARS,
            default_spacing: consts::DEFAULT_SPACING,
            default_gap: consts::DEFAULT_GAP,
            default_padding: consts::DEFAULT_FRAME_PADDING,
        }
    }
}

impl EngineConfig {
    /// Build config from `SPATIAL_*` environment variables.
    ///
    /// Recognized (all optional):
    /// - `SPATIAL_DEFAULT_SHAPE_SIZE`: default 300
    /// - `SPATIAL_MAX_ROW_WIDTH`: default 2000
    /// - `SPATIAL_LABEL_HEIGHT`: default 60
    /// - `SPATIAL_GROUP_CELL_SIZE`: default 500
    /// - `SPATIAL_CLUSTER_CELL_SIZE`: default 500
    /// - `SPATIAL_FRAME_TITLE_HEIGHT`: default 32
    /// - `SPATIAL_ORIGIN_MARGIN`: default 200
    /// - `SPATIAL_PLACEMENT_ATTEMPTS`: default 10
    /// - `SPATIAL_FALLBACK_GAP_MULTIPLE`: default 5
    /// - `SPATIAL_MAX_SAMPLE_BRIEFS`: default 3
    /// - `SPATIAL_BRIEF_MAX_CHARS`: default 80
    /// - `SPATIAL_DEFAULT_SPACING`: default 40
    /// - `SPATIAL_DEFAULT_GAP`: default 40
    /// - `SPATIAL_DEFAULT_PADDING`: default 40
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Keys are the full
    /// `SPATIAL_*` names listed on [`EngineConfig::from_env`].
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Self {
            default_shape_size: positive(&lookup, "SPATIAL_DEFAULT_SHAPE_SIZE", d.default_shape_size),
            max_row_width: positive(&lookup, "SPATIAL_MAX_ROW_WIDTH", d.max_row_width),
            label_height: non_negative(&lookup, "SPATIAL_LABEL_HEIGHT", d.label_height),
            group_cell_size: positive(&lookup, "SPATIAL_GROUP_CELL_SIZE", d.group_cell_size),
            cluster_cell_size: positive(&lookup, "SPATIAL_CLUSTER_CELL_SIZE", d.cluster_cell_size),
            frame_title_height: non_negative(&lookup, "SPATIAL_FRAME_TITLE_HEIGHT", d.frame_title_height),
            origin_margin: non_negative(&lookup, "SPATIAL_ORIGIN_MARGIN", d.origin_margin),
            placement_attempts: parse_or(&lookup, "SPATIAL_PLACEMENT_ATTEMPTS", d.placement_attempts),
            fallback_gap_multiple: non_negative(&lookup, "SPATIAL_FALLBACK_GAP_MULTIPLE", d.fallback_gap_multiple),
            max_sample_briefs: parse_or(&lookup, "SPATIAL_MAX_SAMPLE_BRIEFS", d.max_sample_briefs),
            brief_max_chars: parse_or(&lookup, "SPATIAL_BRIEF_MAX_CHARS", d.brief_max_chars),
            default_spacing: non_negative(&lookup, "SPATIAL_DEFAULT_SPACING", d.default_spacing),
            default_gap: non_negative(&lookup, "SPATIAL_DEFAULT_GAP", d.default_gap),
            default_padding: non_negative(&lookup, "SPATIAL_DEFAULT_PADDING", d.default_padding),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

fn positive<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let value: f64 = parse_or(lookup, key, default);
    if value.is_finite() && value > 0.0 { value } else { default }
}

fn non_negative<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let value: f64 = parse_or(lookup, key, default);
    if value.is_finite() && value >= 0.0 { value } else { default }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
