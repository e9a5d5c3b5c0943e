//! Row-packing layout: turn grouped shapes into target positions.
//!
//! DESIGN
//! ======
//! Groups stack vertically in key order. Inside a group, shapes run
//! left-to-right and wrap once the next shape would cross
//! `origin.x + max_row_width`. This is deliberately not a bin packer: the
//! output must be easy for an agent to predict and identical for identical
//! input.
//!
//! A shape wider than the row limit is still placed on its own row when it
//! arrives first; only the shape after it wraps.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::geom::Point;
use crate::group::{GroupStrategy, Groups, group_shapes};
use crate::shape::Shape;

/// Where one shape should move. Applying it is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub shape_id: String,
    pub x: f64,
    pub y: f64,
}

/// Where a group heading should be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Shapes placed for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLayout {
    pub key: String,
    pub count: usize,
    pub labeled: bool,
}

/// Caller-tunable knobs for one layout call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Gap between neighbouring shapes, rows, and groups.
    pub spacing: f64,
    /// Top-left of the layout; defaults to the minimum x/y of the input.
    pub origin: Option<Point>,
    /// Emit a heading per group (ignored for the uniform strategy).
    pub labels: bool,
}

impl LayoutOptions {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self { spacing: config.default_spacing, origin: None, labels: true }
    }
}

/// Full result of a layout call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub placements: Vec<Placement>,
    pub labels: Vec<LabelPlacement>,
    pub groups: Vec<GroupLayout>,
}

impl LayoutPlan {
    /// `true` when there was nothing to lay out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Group `shapes` under `strategy`, then row-pack the groups.
#[must_use]
pub fn arrange(shapes: &[&Shape], strategy: &GroupStrategy, options: &LayoutOptions, config: &EngineConfig) -> LayoutPlan {
    let groups = group_shapes(shapes, strategy, config);
    row_pack(&groups, strategy, options, config)
}

/// Assign a target position to every grouped shape.
#[must_use]
pub fn row_pack(
    groups: &Groups<'_>,
    strategy: &GroupStrategy,
    options: &LayoutOptions,
    config: &EngineConfig,
) -> LayoutPlan {
    let mut plan = LayoutPlan::default();
    let Some(origin) = options.origin.or_else(|| min_corner(groups)) else {
        return plan;
    };

    let spacing = options.spacing;
    let row_limit = origin.x + config.max_row_width;
    let emit_labels = options.labels && strategy.is_labeled();
    let mut cursor_y = origin.y;

    for (key, members) in groups {
        if emit_labels {
            plan.labels.push(LabelPlacement { text: key.clone(), x: origin.x, y: cursor_y });
            cursor_y += config.label_height;
        }

        let mut row_x = origin.x;
        let mut row_height = 0.0_f64;
        let mut row_count = 0_usize;

        for shape in members {
            let rect = shape.rect(config.default_shape_size);
            if row_x + rect.w > row_limit && row_count > 0 {
                cursor_y += row_height + spacing;
                row_x = origin.x;
                row_height = 0.0;
                row_count = 0;
            }

            plan.placements.push(Placement { shape_id: shape.id.clone(), x: row_x, y: cursor_y });
            row_x += rect.w + spacing;
            row_height = row_height.max(rect.h);
            row_count += 1;
        }

        cursor_y += row_height + spacing;
        plan.groups.push(GroupLayout { key: key.clone(), count: members.len(), labeled: emit_labels });
    }

    debug!(
        %strategy,
        groups = plan.groups.len(),
        placements = plan.placements.len(),
        labels = plan.labels.len(),
        "layout: row-packed"
    );
    plan
}

/// Minimum x and y over every grouped shape, computed before anything moves.
fn min_corner(groups: &Groups<'_>) -> Option<Point> {
    groups
        .values()
        .flatten()
        .fold(None, |acc: Option<Point>, shape| {
            Some(match acc {
                Some(p) => Point { x: p.x.min(shape.x), y: p.y.min(shape.y) },
                None => Point { x: shape.x, y: shape.y },
            })
        })
}
