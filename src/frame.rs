//! Bounding-frame computation for an arbitrary shape subset.
//!
//! Produces the geometry for one new enclosing frame; creating that frame and
//! reparenting the members is left to the caller.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::SpatialError;
use crate::geom::{Bounds, Rect};
use crate::shape::{Shape, new_shape_id};

/// Geometry and membership for a frame to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePlan {
    /// Freshly minted id for the new frame shape.
    pub id: String,
    /// Optional title shown in the frame's title bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Padded bounds, including the title-bar allowance on top.
    pub bounds: Rect,
    /// Member ids, unchanged and in input order.
    pub children: Vec<String>,
}

/// Padded box around `shapes` with room for a title bar.
///
/// Missing sizes default to `config.default_shape_size`.
///
/// # Errors
///
/// Returns [`SpatialError::EmptySelection`] when `shapes` is empty.
pub fn frame_bounds(shapes: &[&Shape], padding: f64, config: &EngineConfig) -> Result<Rect, SpatialError> {
    let rects: Vec<Rect> = shapes
        .iter()
        .map(|s| s.rect(config.default_shape_size))
        .collect();
    let b = Bounds::enclosing(&rects).ok_or(SpatialError::EmptySelection)?;
    let title = config.frame_title_height;
    Ok(Rect {
        x: b.min_x - padding,
        y: b.min_y - padding - title,
        w: b.width() + padding * 2.0,
        h: b.height() + padding * 2.0 + title,
    })
}

/// [`frame_bounds`] plus a new frame id and the member list.
///
/// # Errors
///
/// Returns [`SpatialError::EmptySelection`] when `shapes` is empty.
pub fn plan_frame(
    shapes: &[&Shape],
    padding: f64,
    title: Option<&str>,
    config: &EngineConfig,
) -> Result<FramePlan, SpatialError> {
    let bounds = frame_bounds(shapes, padding, config)?;
    let plan = FramePlan {
        id: new_shape_id(),
        title: title.map(str::to_owned),
        bounds,
        children: shapes.iter().map(|s| s.id.clone()).collect(),
    };
    debug!(frame = %plan.id, children = plan.children.len(), "frame: planned");
    Ok(plan)
}
