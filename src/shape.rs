//! Snapshot data model: shapes, assets, and typed access to their JSON bags.
//!
//! The engine never owns or mutates canvas state. Callers hand it a
//! [`CanvasSnapshot`] parsed from whatever the document store persists, and the
//! engine reads positions, sizes, and descriptive fields from it.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::SHAPE_ID_PREFIX;
use crate::geom::Rect;

/// A canvas element as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Canonical identifier, e.g. `shape:abc123`.
    pub id: String,
    /// Discriminant such as `image`, `text`, `frame`, `geo`, `video`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Left edge in page space.
    pub x: f64,
    /// Top edge in page space.
    pub y: f64,
    /// Open-ended per-type properties (`w`, `h`, `text`, `assetId`, ...).
    #[serde(default)]
    pub props: serde_json::Value,
    /// Free-form metadata attached by the product (`model`, `description`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Shape {
    /// `props.w`, if present and numeric.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.props.get("w").and_then(serde_json::Value::as_f64)
    }

    /// `props.h`, if present and numeric.
    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.props.get("h").and_then(serde_json::Value::as_f64)
    }

    /// Bounding box, substituting `default_size` for a missing width or height.
    #[must_use]
    pub fn rect(&self, default_size: f64) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.width().unwrap_or(default_size),
            h: self.height().unwrap_or(default_size),
        }
    }

    /// Look up a metadata field.
    #[must_use]
    pub fn meta_field(&self, field: &str) -> Option<&serde_json::Value> {
        self.meta.as_ref().and_then(|m| m.get(field))
    }

    /// Look up a string prop, treating blank strings as absent.
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        non_blank(self.props.get(key).and_then(|v| v.as_str()))
    }
}

/// Media record referenced from shape props via `assetId`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub w: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
}

/// A flat, read-only view of the canvas handed in by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub assets: HashMap<String, Asset>,
}

impl CanvasSnapshot {
    #[must_use]
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes, assets: HashMap::new() }
    }

    /// One-line description of `shape`, see [`brief`].
    #[must_use]
    pub fn brief(&self, shape: &Shape, max_chars: usize) -> String {
        brief(shape, &self.assets, max_chars)
    }
}

/// Add the canonical `shape:` prefix unless `id` already carries it.
#[must_use]
pub fn canonical_id(id: &str) -> String {
    if id.starts_with(SHAPE_ID_PREFIX) {
        id.to_owned()
    } else {
        format!("{SHAPE_ID_PREFIX}{id}")
    }
}

/// Mint a fresh canonical shape id.
#[must_use]
pub fn new_shape_id() -> String {
    format!("{SHAPE_ID_PREFIX}{}", Uuid::new_v4())
}

/// One-line human-readable description of a shape.
///
/// Takes the first non-blank of `props.text`, `props.name`, `props.title`,
/// the referenced asset's name, and `meta.description`; falls back to the
/// shape type. Whitespace is collapsed and the result truncated to
/// `max_chars` characters (ellipsis included).
#[must_use]
pub fn brief(shape: &Shape, assets: &HashMap<String, Asset>, max_chars: usize) -> String {
    let asset_name = shape
        .prop_str("assetId")
        .and_then(|id| assets.get(id))
        .and_then(|a| non_blank(Some(a.name.as_str())));
    let description = non_blank(shape.meta_field("description").and_then(|v| v.as_str()));

    let label = shape
        .prop_str("text")
        .or_else(|| shape.prop_str("name"))
        .or_else(|| shape.prop_str("title"))
        .or(asset_name)
        .or(description);

    let kind = if shape.kind.is_empty() { "unknown" } else { shape.kind.as_str() };
    let line = match label {
        Some(text) => format!("{kind}: {}", collapse_whitespace(text)),
        None => kind.to_owned(),
    };
    truncate_chars(&line, max_chars)
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}
