//! Grouping engine: partition a shape list into named buckets.
//!
//! Groups are produced fresh per call and borrow from the caller's slice.
//! Keys come back in lexicographic order (a `BTreeMap`), which is also the
//! order the row-packing layout stacks them in. Within a group the input
//! order is preserved.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::SpatialError;
use crate::shape::Shape;

/// Bucket key for shapes whose relevant field is missing.
pub const UNKNOWN_KEY: &str = "unknown";

/// Key used by [`GroupStrategy::Uniform`].
pub const UNIFORM_KEY: &str = "all";

/// Metadata field used when the caller asks for metadata grouping without naming one.
pub const DEFAULT_META_FIELD: &str = "model";

/// Ordered map from group key to member shapes.
pub type Groups<'a> = BTreeMap<String, Vec<&'a Shape>>;

/// How shapes are bucketed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStrategy {
    /// Everything in one `"all"` group. Exposed to agents as `grid`.
    Uniform,
    /// Key is the shape `type`.
    ByType,
    /// Key is the stringified value of `meta[field]`.
    ByMeta { field: String },
    /// Key is the coarse `cluster (cx,cy)` cell of the shape origin.
    BySpatialCell,
}

impl GroupStrategy {
    /// Build a strategy from its tool-facing name plus optional metadata field.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::UnknownStrategy`] for unrecognized names.
    pub fn parse(name: &str, field: Option<&str>) -> Result<Self, SpatialError> {
        let mut strategy: Self = name.parse()?;
        if let (Self::ByMeta { field: f }, Some(requested)) = (&mut strategy, field) {
            if !requested.trim().is_empty() {
                *f = requested.trim().to_owned();
            }
        }
        Ok(strategy)
    }

    /// Whether groups under this strategy deserve a heading label.
    #[must_use]
    pub fn is_labeled(&self) -> bool {
        !matches!(self, Self::Uniform)
    }
}

impl FromStr for GroupStrategy {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" | "uniform" | "all" => Ok(Self::Uniform),
            "type" | "kind" => Ok(Self::ByType),
            "meta" | "metadata" | "model" => Ok(Self::ByMeta { field: DEFAULT_META_FIELD.to_owned() }),
            "spatial" | "cluster" | "cell" => Ok(Self::BySpatialCell),
            other => Err(SpatialError::UnknownStrategy(other.to_owned())),
        }
    }
}

impl fmt::Display for GroupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => f.write_str("grid"),
            Self::ByType => f.write_str("type"),
            Self::ByMeta { field } => write!(f, "meta:{field}"),
            Self::BySpatialCell => f.write_str("spatial"),
        }
    }
}

/// Partition `shapes` under `strategy`. Empty input yields an empty map.
#[must_use]
pub fn group_shapes<'a>(shapes: &[&'a Shape], strategy: &GroupStrategy, config: &EngineConfig) -> Groups<'a> {
    let mut groups: Groups<'a> = BTreeMap::new();
    for &shape in shapes {
        groups
            .entry(group_key(shape, strategy, config))
            .or_default()
            .push(shape);
    }
    debug!(%strategy, shapes = shapes.len(), groups = groups.len(), "group: partitioned");
    groups
}

/// Key `shape` falls under for `strategy`.
#[must_use]
pub fn group_key(shape: &Shape, strategy: &GroupStrategy, config: &EngineConfig) -> String {
    match strategy {
        GroupStrategy::Uniform => UNIFORM_KEY.to_owned(),
        GroupStrategy::ByType => {
            if shape.kind.is_empty() {
                UNKNOWN_KEY.to_owned()
            } else {
                shape.kind.clone()
            }
        }
        GroupStrategy::ByMeta { field } => match shape.meta_field(field) {
            None | Some(serde_json::Value::Null) => UNKNOWN_KEY.to_owned(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        },
        GroupStrategy::BySpatialCell => {
            let (cx, cy) = cell_of(shape.x, shape.y, config.group_cell_size);
            format!("cluster ({cx},{cy})")
        }
    }
}

/// Grid cell containing `(x, y)` for cell edge `cell`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn cell_of(x: f64, y: f64, cell: f64) -> (i64, i64) {
    ((x / cell).floor() as i64, (y / cell).floor() as i64)
}
