//! Agent sessions and spatial tool dispatch.
//!
//! DESIGN
//! ======
//! Every agent conversation owns one [`ShapeRefMap`]. The store keys them by
//! session id behind a single `RwLock`: `list_shapes` takes the write lock to
//! reassign aliases, every other tool only reads them. The engine operations
//! themselves are synchronous and run while the lock is held; none of them
//! perform I/O.
//!
//! Shape references that do not exist in the snapshot are not errors. They
//! are collected into `missing` and echoed back in the tool content so the
//! agent can correct itself on the next turn.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cluster::overview;
use crate::config::EngineConfig;
use crate::consts::ALIAS_PREFIX;
use crate::error::{ErrorCode, SpatialError};
use crate::frame::{FramePlan, plan_frame};
use crate::group::{GroupStrategy, UNKNOWN_KEY};
use crate::layout::{LabelPlacement, LayoutOptions, Placement, arrange};
use crate::place::{PlacementRequest, PlacementResult, find_placement};
use crate::refs::ShapeRefMap;
use crate::shape::{CanvasSnapshot, Shape};
use crate::tools::{self, ArrangeInput, FrameInput, PlaceInput};

/// Result of one tool call: text for the agent plus structured output for
/// the caller to apply.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolOutcome {
    /// Tool result content returned to the model.
    pub content: String,
    pub placements: Vec<Placement>,
    pub labels: Vec<LabelPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FramePlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementResult>,
    /// References from the input that matched no shape.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl ToolOutcome {
    fn text(content: String) -> Self {
        Self { content, ..Self::default() }
    }

    fn with_missing(mut self, missing: Vec<String>) -> Self {
        if !missing.is_empty() {
            self.content.push_str(&format!("\nmissing: {}", missing.join(", ")));
        }
        self.missing = missing;
        self
    }
}

/// Alias registries for every live agent session.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, ShapeRefMap>>>,
    config: EngineConfig,
}

impl SessionStore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), config }
    }

    /// Start a session with an empty alias set.
    pub async fn open(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.write().await.insert(session_id, ShapeRefMap::new());
        info!(%session_id, "session: opened");
        session_id
    }

    /// Drop a session's aliases. Returns `false` if it was not open.
    pub async fn close(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&session_id).is_some();
        info!(%session_id, removed, "session: closed");
        removed
    }

    /// Number of open sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Run one spatial tool against `snapshot` on behalf of `session_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::SessionNotFound`] for an unknown session,
    /// [`SpatialError::UnknownTool`] for an unrecognized tool name, and
    /// [`SpatialError::InvalidInput`], [`SpatialError::UnknownStrategy`], or
    /// [`SpatialError::EmptySelection`] when the input is unusable.
    pub async fn dispatch_tool(
        &self,
        session_id: Uuid,
        snapshot: &CanvasSnapshot,
        tool_name: &str,
        input: &serde_json::Value,
    ) -> Result<ToolOutcome, SpatialError> {
        let result = self.run_tool(session_id, snapshot, tool_name, input).await;

        match &result {
            Ok(outcome) => info!(
                %session_id,
                tool = tool_name,
                placements = outcome.placements.len(),
                missing = outcome.missing.len(),
                "session: tool complete"
            ),
            Err(e) => warn!(%session_id, tool = tool_name, code = e.error_code(), error = %e, "session: tool failed"),
        }
        result
    }

    async fn run_tool(
        &self,
        session_id: Uuid,
        snapshot: &CanvasSnapshot,
        tool_name: &str,
        input: &serde_json::Value,
    ) -> Result<ToolOutcome, SpatialError> {
        if tool_name == tools::LIST_SHAPES {
            let mut sessions = self.sessions.write().await;
            let refs = sessions
                .get_mut(&session_id)
                .ok_or(SpatialError::SessionNotFound(session_id))?;
            return Ok(list_shapes(refs, snapshot, &self.config));
        }
        let sessions = self.sessions.read().await;
        let refs = sessions
            .get(&session_id)
            .ok_or(SpatialError::SessionNotFound(session_id))?;
        execute_tool(refs, snapshot, tool_name, input, &self.config)
    }
}

// =============================================================================
// TOOL EXECUTION
// =============================================================================

pub(crate) fn execute_tool(
    refs: &ShapeRefMap,
    snapshot: &CanvasSnapshot,
    tool_name: &str,
    input: &serde_json::Value,
    config: &EngineConfig,
) -> Result<ToolOutcome, SpatialError> {
    match tool_name {
        tools::ARRANGE_SHAPES => execute_arrange(refs, snapshot, input, config),
        tools::FRAME_SHAPES => execute_frame(refs, snapshot, input, config),
        tools::CANVAS_OVERVIEW => Ok(ToolOutcome::text(overview(snapshot, config).to_text())),
        tools::PLACE_SHAPE => execute_place(refs, snapshot, input, config),
        _ => Err(SpatialError::UnknownTool(tool_name.to_owned())),
    }
}

/// Reassign aliases over the whole snapshot and render one line per shape.
pub(crate) fn list_shapes(refs: &mut ShapeRefMap, snapshot: &CanvasSnapshot, config: &EngineConfig) -> ToolOutcome {
    refs.assign(snapshot.shapes.iter().map(|s| s.id.as_str()));
    if snapshot.shapes.is_empty() {
        return ToolOutcome::text("Canvas is empty.".to_owned());
    }
    let lines: Vec<String> = snapshot
        .shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let r = shape.rect(config.default_shape_size);
            format!(
                "{ALIAS_PREFIX}{} {} ({:.0},{:.0}) {:.0}x{:.0} {}",
                i + 1,
                kind_label(shape),
                r.x,
                r.y,
                r.w,
                r.h,
                snapshot.brief(shape, config.brief_max_chars),
            )
        })
        .collect();
    ToolOutcome::text(lines.join("\n"))
}

fn execute_arrange(
    refs: &ShapeRefMap,
    snapshot: &CanvasSnapshot,
    input: &serde_json::Value,
    config: &EngineConfig,
) -> Result<ToolOutcome, SpatialError> {
    let input: ArrangeInput = serde_json::from_value(input.clone())?;
    let strategy = GroupStrategy::parse(&input.strategy, input.field.as_deref())?;
    let spacing = distance("spacing", input.spacing, config.default_spacing)?;
    let (shapes, missing) = match &input.ids {
        Some(ids) => resolve_shapes(refs, snapshot, ids),
        None => (snapshot.shapes.iter().collect(), Vec::new()),
    };
    if shapes.is_empty() {
        return Ok(ToolOutcome::text("nothing to arrange".to_owned()).with_missing(missing));
    }

    let options = LayoutOptions {
        spacing,
        origin: input.origin,
        labels: input.labels.unwrap_or(true),
    };
    let plan = arrange(&shapes, &strategy, &options, config);
    let summary: Vec<String> = plan
        .groups
        .iter()
        .map(|g| format!("{} ({})", g.key, g.count))
        .collect();
    let content = format!(
        "arranged {} shapes into {} groups by {strategy}: {}",
        plan.placements.len(),
        plan.groups.len(),
        summary.join(", ")
    );
    Ok(ToolOutcome { content, placements: plan.placements, labels: plan.labels, ..ToolOutcome::default() }
        .with_missing(missing))
}

fn execute_frame(
    refs: &ShapeRefMap,
    snapshot: &CanvasSnapshot,
    input: &serde_json::Value,
    config: &EngineConfig,
) -> Result<ToolOutcome, SpatialError> {
    let input: FrameInput = serde_json::from_value(input.clone())?;
    let padding = distance("padding", input.padding, config.default_padding)?;
    let (shapes, missing) = resolve_shapes(refs, snapshot, &input.ids);
    let plan = plan_frame(&shapes, padding, input.title.as_deref(), config)?;

    let b = plan.bounds;
    let members: Vec<&str> = plan.children.iter().map(|id| refs.display(id)).collect();
    let content = format!(
        "frame {} at ({:.0},{:.0}) {:.0}x{:.0} around {}",
        plan.title.as_deref().unwrap_or("(untitled)"),
        b.x,
        b.y,
        b.w,
        b.h,
        members.join(", ")
    );
    Ok(ToolOutcome { content, frame: Some(plan), ..ToolOutcome::default() }.with_missing(missing))
}

fn execute_place(
    refs: &ShapeRefMap,
    snapshot: &CanvasSnapshot,
    input: &serde_json::Value,
    config: &EngineConfig,
) -> Result<ToolOutcome, SpatialError> {
    let input: PlaceInput = serde_json::from_value(input.clone())?;
    let w = distance("w", Some(input.w), 0.0)?;
    let h = distance("h", Some(input.h), 0.0)?;
    let gap = distance("gap", input.gap, config.default_gap)?;
    let (anchors, missing) = resolve_shapes(refs, snapshot, &input.anchors);
    let request = PlacementRequest {
        w,
        h,
        anchors: anchors.iter().map(|s| s.id.clone()).collect(),
        exclude: refs.resolve_all(&input.exclude),
        gap,
        viewport_center: input.viewport.unwrap_or_default(),
    };
    let result = find_placement(&snapshot.shapes, &request, config);

    let mut content = format!("place at ({:.0},{:.0})", result.x, result.y);
    match result.attempt {
        Some(attempt) => content.push_str(&format!(" {} of anchor, round {}", result.direction.as_str(), attempt + 1)),
        None if result.fallback => content.push_str(" (no free slot found; may overlap)"),
        None => content.push_str(" centered in viewport"),
    }
    Ok(ToolOutcome { content, placement: Some(result), ..ToolOutcome::default() }.with_missing(missing))
}

/// Resolve references against the snapshot, keeping input order and dropping
/// repeats. Unmatched references come back verbatim in the second list.
fn resolve_shapes<'a>(
    refs: &ShapeRefMap,
    snapshot: &'a CanvasSnapshot,
    inputs: &[String],
) -> (Vec<&'a Shape>, Vec<String>) {
    let index: HashMap<&str, &Shape> = snapshot.shapes.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for input in inputs {
        let id = refs.resolve(input);
        match index.get(id.as_str()) {
            Some(&shape) => {
                if seen.insert(id) {
                    found.push(shape);
                }
            }
            None => missing.push(input.trim().to_owned()),
        }
    }
    (found, missing)
}

/// A caller-supplied length: `default` when absent, rejected when negative or
/// not finite.
fn distance(field: &str, value: Option<f64>, default: f64) -> Result<f64, SpatialError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(SpatialError::InvalidInput(format!("{field} must be a non-negative number, got {v}"))),
    }
}

fn kind_label(shape: &Shape) -> &str {
    if shape.kind.is_empty() { UNKNOWN_KEY } else { shape.kind.as_str() }
}
