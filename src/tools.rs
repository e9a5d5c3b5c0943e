//! Spatial tool definitions exposed to an AI agent.
//!
//! Each tool pairs a JSON schema (sent to the model) with a typed input struct
//! (parsed from the model's `tool_use` block). Shape references in inputs may
//! be session aliases (`s3`), canonical ids, or bare ids.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use serde::{Deserialize, Serialize};

use crate::geom::Point;

pub const LIST_SHAPES: &str = "list_shapes";
pub const ARRANGE_SHAPES: &str = "arrange_shapes";
pub const FRAME_SHAPES: &str = "frame_shapes";
pub const CANVAS_OVERVIEW: &str = "canvas_overview";
pub const PLACE_SHAPE: &str = "place_shape";

/// A tool definition passed to the LLM provider API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

// =============================================================================
// INPUTS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArrangeInput {
    /// Shapes to arrange; every shape on the canvas when absent.
    #[serde(default)]
    pub ids: Option<Vec<String>>,
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Metadata field for the `meta` strategy.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub spacing: Option<f64>,
    #[serde(default)]
    pub origin: Option<Point>,
    #[serde(default)]
    pub labels: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub ids: Vec<String>,
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceInput {
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub anchors: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub gap: Option<f64>,
    /// Page-space center of the visible viewport; the page origin when absent.
    #[serde(default)]
    pub viewport: Option<Point>,
}

fn default_strategy() -> String {
    "grid".to_owned()
}

// =============================================================================
// DEFINITIONS
// =============================================================================

/// Build the set of spatial tools available to the agent.
#[must_use]
pub fn spatial_tools() -> Vec<Tool> {
    let ids = serde_json::json!({
        "type": "array",
        "items": { "type": "string" },
        "description": "Shape aliases (s1, s2, ...) from list_shapes, or full shape ids."
    });
    let point = serde_json::json!({
        "type": "object",
        "properties": {
            "x": { "type": "number" },
            "y": { "type": "number" }
        },
        "required": ["x", "y"]
    });

    vec![
        Tool {
            name: LIST_SHAPES.into(),
            description: "List every shape with a short alias, type, position, size, and a one-line description. \
                          Aliases are valid until the next list_shapes call."
                .into(),
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
        },
        Tool {
            name: ARRANGE_SHAPES.into(),
            description: "Group shapes and lay them out in non-overlapping rows, one block per group.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ids": ids,
                    "strategy": {
                        "type": "string",
                        "enum": ["grid", "type", "meta", "spatial"],
                        "description": "grid: one block; type: by shape type; meta: by a metadata field; spatial: by canvas region."
                    },
                    "field": { "type": "string", "description": "Metadata field for the meta strategy (default: model)." },
                    "spacing": { "type": "number" },
                    "origin": point,
                    "labels": { "type": "boolean", "description": "Add a heading above each group." }
                },
                "required": ["strategy"]
            }),
        },
        Tool {
            name: FRAME_SHAPES.into(),
            description: "Compute a frame enclosing the given shapes, with room for a title bar.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "ids": ids,
                    "padding": { "type": "number" },
                    "title": { "type": "string" }
                },
                "required": ["ids"]
            }),
        },
        Tool {
            name: CANVAS_OVERVIEW.into(),
            description: "Summarize the canvas as spatial clusters with type counts and a free-space origin. \
                          Cheaper than list_shapes on large canvases."
                .into(),
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
        },
        Tool {
            name: PLACE_SHAPE.into(),
            description: "Find a position for a new shape of the given size that does not overlap existing shapes."
                .into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "w": { "type": "number" },
                    "h": { "type": "number" },
                    "anchors": ids,
                    "exclude": ids,
                    "gap": { "type": "number" },
                    "viewport": point
                },
                "required": ["w", "h"]
            }),
        },
    ]
}
