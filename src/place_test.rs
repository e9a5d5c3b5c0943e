#![allow(clippy::float_cmp)]

use super::*;
use crate::shape::test_helpers::{bare, sized};

fn request(w: f64, h: f64, anchors: &[&str], exclude: &[&str]) -> PlacementRequest {
    PlacementRequest {
        w,
        h,
        anchors: anchors.iter().map(|s| format!("shape:{s}")).collect(),
        exclude: exclude.iter().map(|s| format!("shape:{s}")).collect(),
        gap: 40.0,
        viewport_center: Point::new(1000.0, 500.0),
    }
}

fn place(shapes: &[Shape], req: &PlacementRequest) -> PlacementResult {
    find_placement(shapes, req, &EngineConfig::default())
}

// =============================================================
// Anchored search
// =============================================================

#[test]
fn first_choice_is_right_of_anchor() {
    let shapes = vec![sized("a", "image", 0.0, 0.0, 100.0, 100.0)];
    let r = place(&shapes, &request(50.0, 50.0, &["a"], &[]));
    assert_eq!((r.x, r.y), (140.0, 25.0));
    assert_eq!(r.direction, Direction::Right);
    assert_eq!(r.attempt, Some(0));
}

#[test]
fn blocked_right_falls_through_to_bottom() {
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        sized("wall", "image", 150.0, 0.0, 100.0, 100.0),
    ];
    let r = place(&shapes, &request(50.0, 50.0, &["a"], &[]));
    assert_eq!(r.direction, Direction::Bottom);
    assert_eq!((r.x, r.y), (25.0, 140.0));
}

#[test]
fn unsized_obstacles_occupy_default_size() {
    // As a bare point this shape would not block the right-hand slot.
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        bare("note", "text", 150.0, -200.0),
    ];
    let r = place(&shapes, &request(50.0, 50.0, &["a"], &[]));
    assert_eq!(r.direction, Direction::Bottom);
}

#[test]
fn multiple_anchors_use_their_union() {
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        sized("b", "image", 200.0, 0.0, 100.0, 100.0),
    ];
    let r = place(&shapes, &request(50.0, 50.0, &["a", "b"], &[]));
    assert_eq!((r.x, r.y), (340.0, 25.0));
    assert_eq!(r.direction, Direction::Right);
}

#[test]
fn saturated_canvas_uses_fallback() {
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        sized("wall", "geo", -100_000.0, -100_000.0, 200_000.0, 200_000.0),
    ];
    let r = place(&shapes, &request(50.0, 50.0, &["a"], &[]));
    assert!(r.fallback);
    assert_eq!(r.direction, Direction::Fallback);
    assert_eq!(r.attempt, None);
    assert_eq!((r.x, r.y), (300.0, 25.0));
}

#[test]
fn fallback_distance_follows_config() {
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        sized("wall", "geo", -100_000.0, -100_000.0, 200_000.0, 200_000.0),
    ];
    let cfg = EngineConfig { fallback_gap_multiple: 2.0, placement_attempts: 1, ..EngineConfig::default() };
    let r = find_placement(&shapes, &request(50.0, 50.0, &["a"], &[]), &cfg);
    assert_eq!(r.x, 180.0);
}

#[test]
fn excluded_shapes_are_not_obstacles() {
    let shapes = vec![
        sized("a", "image", 0.0, 0.0, 100.0, 100.0),
        sized("wall", "geo", -100_000.0, -100_000.0, 200_000.0, 200_000.0),
    ];
    let r = place(&shapes, &request(50.0, 50.0, &["a"], &["wall"]));
    assert_eq!(r.direction, Direction::Right);
    assert_eq!(r.attempt, Some(0));
}

// =============================================================
// Pure placement
// =============================================================

#[test]
fn empty_canvas_centers_on_viewport() {
    let r = place(&[], &request(200.0, 100.0, &[], &[]));
    assert_eq!(r.direction, Direction::Center);
    assert_eq!((r.x, r.y), (900.0, 450.0));
}

#[test]
fn unknown_anchor_ids_are_ignored() {
    let shapes = vec![sized("a", "image", 0.0, 0.0, 100.0, 100.0)];
    let r = place(&shapes, &request(200.0, 100.0, &["ghost"], &[]));
    assert_eq!(r.direction, Direction::Center);
}

#[test]
fn blocked_center_searches_around_viewport_point() {
    let shapes = vec![sized("block", "image", 950.0, 450.0, 100.0, 100.0)];
    let r = place(&shapes, &request(200.0, 100.0, &[], &[]));
    assert_eq!(r.direction, Direction::Right);
    assert_eq!(r.attempt, Some(2));
    assert_eq!((r.x, r.y), (1120.0, 450.0));
}

// =============================================================
// Properties
// =============================================================

fn crowded() -> Vec<Shape> {
    (0..40_u32)
        .map(|i| {
            let x = f64::from(i % 8) * 260.0;
            let y = f64::from(i / 8) * 220.0;
            sized(&format!("n{i}"), "image", x, y, 200.0, 160.0)
        })
        .collect()
}

#[test]
fn non_fallback_result_clears_every_obstacle() {
    let shapes = crowded();
    let req = request(180.0, 120.0, &["n17"], &[]);
    let r = place(&shapes, &req);
    assert!(!r.fallback);
    let placed = r.rect(req.w, req.h);
    for s in shapes.iter().filter(|s| s.id != "shape:n17") {
        assert!(!placed.overlaps(&s.rect(300.0), req.gap), "overlaps {}", s.id);
    }
}

#[test]
fn placement_is_deterministic() {
    let shapes = crowded();
    let req = request(180.0, 120.0, &["n3", "n4"], &["n5"]);
    assert_eq!(place(&shapes, &req), place(&shapes, &req));
}

#[test]
fn result_serializes_direction_lowercase() {
    let r = place(&[], &request(10.0, 10.0, &[], &[]));
    let value = serde_json::to_value(r).unwrap();
    assert_eq!(value["direction"], "center");
    assert_eq!(value["fallback"], false);
    assert!(value.get("attempt").is_none());
}
