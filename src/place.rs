//! Non-overlapping placement search for a newly created shape.
//!
//! DESIGN
//! ======
//! Candidates are tried around a single anchor box (the union of the given
//! anchor shapes, or a zero-size point at the viewport center) at growing
//! offsets: for each round `attempt`, right, bottom, left, then top, each
//! `gap * (attempt + 1)` away. Side candidates center vertically on the
//! anchor and top/bottom candidates center horizontally. With no real anchor
//! the centered position is tried first.
//!
//! The search never fails. When every round is blocked the shape goes to the
//! right of the anchor at `gap * fallback_gap_multiple`, overlap or not.

#[cfg(test)]
#[path = "place_test.rs"]
mod place_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::geom::{Bounds, Point, Rect};
use crate::shape::Shape;

/// Which candidate produced the chosen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Center,
    Right,
    Bottom,
    Left,
    Top,
    Fallback,
}

impl Direction {
    /// Search order within one round.
    pub const ROUND: [Direction; 4] = [Direction::Right, Direction::Bottom, Direction::Left, Direction::Top];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Top => "top",
            Self::Fallback => "fallback",
        }
    }
}

/// What to place and relative to what.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub w: f64,
    pub h: f64,
    /// Canonical ids of anchor shapes. Unknown ids are ignored.
    pub anchors: Vec<String>,
    /// Canonical ids that must not count as obstacles.
    pub exclude: Vec<String>,
    /// Minimum clearance to every obstacle.
    pub gap: f64,
    /// Page-space center of the caller's viewport, used without anchors.
    pub viewport_center: Point,
}

/// Chosen position for the new shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementResult {
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    /// Zero-based round that succeeded; `None` for center and fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<u32>,
    /// Set when no round found a free slot; the position may overlap.
    pub fallback: bool,
}

impl PlacementResult {
    #[must_use]
    pub fn rect(&self, w: f64, h: f64) -> Rect {
        Rect { x: self.x, y: self.y, w, h }
    }
}

/// Find a spot for a `w`×`h` box near the requested anchors.
#[must_use]
pub fn find_placement(shapes: &[Shape], request: &PlacementRequest, config: &EngineConfig) -> PlacementResult {
    let anchor_ids: HashSet<&str> = request.anchors.iter().map(String::as_str).collect();
    let excluded: HashSet<&str> = request.exclude.iter().map(String::as_str).collect();

    let mut anchor_rects = Vec::new();
    let mut obstacles = Vec::new();
    for shape in shapes {
        let rect = shape.rect(config.default_shape_size);
        if anchor_ids.contains(shape.id.as_str()) {
            anchor_rects.push(rect);
        } else if !excluded.contains(shape.id.as_str()) {
            obstacles.push(rect);
        }
    }

    let (w, h, gap) = (request.w, request.h, request.gap);
    let is_free = |r: &Rect| !obstacles.iter().any(|o| r.overlaps(o, gap));

    let anchor = match Bounds::enclosing(&anchor_rects) {
        Some(b) => b.to_rect(),
        None => {
            let virtual_anchor = Rect::new(request.viewport_center.x, request.viewport_center.y, 0.0, 0.0);
            let centered = Rect::centered_on(request.viewport_center, w, h);
            if is_free(&centered) {
                debug!(x = centered.x, y = centered.y, "place: centered on viewport");
                return PlacementResult {
                    x: centered.x,
                    y: centered.y,
                    direction: Direction::Center,
                    attempt: None,
                    fallback: false,
                };
            }
            virtual_anchor
        }
    };

    for attempt in 0..config.placement_attempts {
        let offset = gap * f64::from(attempt + 1);
        for direction in Direction::ROUND {
            let slot = candidate(&anchor, direction, offset, w, h);
            if is_free(&slot) {
                debug!(attempt, ?direction, x = slot.x, y = slot.y, "place: found free slot");
                return PlacementResult { x: slot.x, y: slot.y, direction, attempt: Some(attempt), fallback: false };
            }
        }
    }

    let fallback = candidate(&anchor, Direction::Fallback, gap * config.fallback_gap_multiple, w, h);
    warn!(
        attempts = config.placement_attempts,
        obstacles = obstacles.len(),
        "place: no free slot, using fallback"
    );
    PlacementResult {
        x: fallback.x,
        y: fallback.y,
        direction: Direction::Fallback,
        attempt: None,
        fallback: true,
    }
}

/// Candidate box adjacent to `anchor` on `direction`, `offset` away.
fn candidate(anchor: &Rect, direction: Direction, offset: f64, w: f64, h: f64) -> Rect {
    let c = anchor.center();
    let (x, y) = match direction {
        Direction::Right | Direction::Fallback => (anchor.right() + offset, c.y - h / 2.0),
        Direction::Left => (anchor.x - offset - w, c.y - h / 2.0),
        Direction::Bottom => (c.x - w / 2.0, anchor.bottom() + offset),
        Direction::Top => (c.x - w / 2.0, anchor.y - offset - h),
        Direction::Center => (c.x - w / 2.0, c.y - h / 2.0),
    };
    Rect { x, y, w, h }
}
