//! Spatial clustering: a cheap overview of a large canvas.
//!
//! DESIGN
//! ======
//! Each shape drops into exactly one `cluster_cell_size` grid cell by its
//! origin. Occupied cells are nodes of a 4-connected grid graph; a worklist
//! flood fill merges each connected component into one cluster. This is
//! O(shapes + cells), deterministic, and needs no distance threshold.
//!
//! Cells are visited in the order their first shape appears in the input, so
//! cluster discovery order (the tie-breaker after sorting by size) and sample
//! briefs both follow input order.

#[cfg(test)]
#[path = "cluster_test.rs"]
mod cluster_test;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::geom::{Bounds, Point, Rect};
use crate::group::{UNKNOWN_KEY, cell_of};
use crate::shape::CanvasSnapshot;

type Cell = (i64, i64);

/// One connected region of occupied cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub center: Point,
    pub bounds: Bounds,
    pub count: usize,
    pub types: BTreeMap<String, usize>,
    pub sample_briefs: Vec<String>,
    /// Member ids in input order.
    #[serde(skip)]
    pub members: Vec<String>,
}

/// Whole-canvas summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasOverview {
    /// `true` when the snapshot holds no shapes; every other field is then empty.
    pub empty: bool,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    pub types: BTreeMap<String, usize>,
    pub clusters: Vec<Cluster>,
    /// Just right of existing content, top-aligned with it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_origin: Option<Point>,
}

impl CanvasOverview {
    fn empty() -> Self {
        Self {
            empty: true,
            total: 0,
            bounds: None,
            types: BTreeMap::new(),
            clusters: Vec::new(),
            suggested_origin: None,
        }
    }

    /// Plain-text rendering for an agent transcript.
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.empty {
            return "Canvas is empty.".to_owned();
        }
        let mut out = String::new();
        let mut line = |s: String| {
            out.push_str(&s);
            out.push('\n');
        };
        line(format!("{} shapes in {} clusters ({})", self.total, self.clusters.len(), histogram(&self.types)));
        if let Some(b) = &self.bounds {
            line(format!(
                "extent: ({:.0},{:.0}) to ({:.0},{:.0})",
                b.min_x, b.min_y, b.max_x, b.max_y
            ));
        }
        for (i, c) in self.clusters.iter().enumerate() {
            let mut entry = format!(
                "cluster {} @ ({:.0},{:.0}) {:.0}x{:.0} shapes={} [{}]",
                i + 1,
                c.center.x,
                c.center.y,
                c.bounds.width(),
                c.bounds.height(),
                c.count,
                histogram(&c.types),
            );
            for sample in &c.sample_briefs {
                entry.push_str(" | ");
                entry.push_str(sample);
            }
            line(entry);
        }
        if let Some(o) = self.suggested_origin {
            line(format!("free space starts at ({:.0},{:.0})", o.x, o.y));
        }
        out.trim_end().to_owned()
    }
}

/// Lightweight per-shape record accumulated into cells.
struct Digest {
    index: usize,
    id: String,
    kind: String,
    rect: Rect,
    brief: String,
}

/// Grid-cluster the snapshot. Sizes default to zero here: a shape without
/// `w`/`h` contributes only its origin to the bounds.
#[must_use]
pub fn overview(snapshot: &CanvasSnapshot, config: &EngineConfig) -> CanvasOverview {
    if snapshot.shapes.is_empty() {
        debug!("cluster: empty canvas");
        return CanvasOverview::empty();
    }

    // Quantize.
    let mut cells: HashMap<Cell, Vec<Digest>> = HashMap::new();
    let mut cell_order: Vec<Cell> = Vec::new();
    let mut overall: Option<Bounds> = None;
    let mut types: BTreeMap<String, usize> = BTreeMap::new();

    for (index, shape) in snapshot.shapes.iter().enumerate() {
        let rect = shape.rect(0.0);
        let kind = if shape.kind.is_empty() { UNKNOWN_KEY.to_owned() } else { shape.kind.clone() };
        *types.entry(kind.clone()).or_default() += 1;
        let b = Bounds::from_rect(&rect);
        overall = Some(overall.map_or(b, |o| o.union(&b)));

        let cell = cell_of(shape.x, shape.y, config.cluster_cell_size);
        let digest = Digest {
            index,
            id: shape.id.clone(),
            kind,
            rect,
            brief: snapshot.brief(shape, config.brief_max_chars),
        };
        cells
            .entry(cell)
            .or_insert_with(|| {
                cell_order.push(cell);
                Vec::new()
            })
            .push(digest);
    }

    // Flood fill.
    let mut visited: HashSet<Cell> = HashSet::with_capacity(cells.len());
    let mut clusters = Vec::new();
    for &start in &cell_order {
        if !visited.insert(start) {
            continue;
        }
        let mut component: Vec<&Digest> = Vec::new();
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            if let Some(members) = cells.get(&cell) {
                component.extend(members.iter());
            }
            for next in neighbours(cell).into_iter().flatten() {
                if cells.contains_key(&next) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        component.sort_by_key(|d| d.index);
        clusters.push(build_cluster(&component, config));
    }

    // Stable: equal counts keep discovery order.
    clusters.sort_by(|a, b| b.count.cmp(&a.count));

    let suggested_origin = overall.map(|b| Point { x: b.max_x + config.origin_margin, y: b.min_y });
    debug!(shapes = snapshot.shapes.len(), cells = cells.len(), clusters = clusters.len(), "cluster: overview built");

    CanvasOverview {
        empty: false,
        total: snapshot.shapes.len(),
        bounds: overall,
        types,
        clusters,
        suggested_origin,
    }
}

/// The 4-connected neighbours of a cell. Cells at the `i64` edge, where huge
/// coordinates saturate, have fewer.
fn neighbours((cx, cy): Cell) -> [Option<Cell>; 4] {
    [
        cx.checked_add(1).map(|x| (x, cy)),
        cx.checked_sub(1).map(|x| (x, cy)),
        cy.checked_add(1).map(|y| (cx, y)),
        cy.checked_sub(1).map(|y| (cx, y)),
    ]
}

fn build_cluster(members: &[&Digest], config: &EngineConfig) -> Cluster {
    let bounds = Bounds::enclosing(members.iter().map(|d| &d.rect)).unwrap_or_else(|| Bounds::from_rect(&Rect::default()));
    let mut types: BTreeMap<String, usize> = BTreeMap::new();
    for d in members {
        *types.entry(d.kind.clone()).or_default() += 1;
    }
    Cluster {
        center: bounds.center(),
        bounds,
        count: members.len(),
        types,
        sample_briefs: members
            .iter()
            .take(config.max_sample_briefs)
            .map(|d| d.brief.clone())
            .collect(),
        members: members.iter().map(|d| d.id.clone()).collect(),
    }
}

fn histogram(types: &BTreeMap<String, usize>) -> String {
    types
        .iter()
        .map(|(k, n)| format!("{n} {k}"))
        .collect::<Vec<_>>()
        .join(", ")
}
