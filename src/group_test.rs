use serde_json::json;

use super::*;
use crate::shape::test_helpers::{bare, sized, with_meta};

fn ids(members: &[&Shape]) -> Vec<String> {
    members.iter().map(|s| s.id.clone()).collect()
}

fn refs(shapes: &[Shape]) -> Vec<&Shape> {
    shapes.iter().collect()
}

// =============================================================
// Strategy parsing
// =============================================================

#[test]
fn parse_known_strategy_names() {
    assert_eq!(GroupStrategy::parse("grid", None).unwrap(), GroupStrategy::Uniform);
    assert_eq!(GroupStrategy::parse("type", None).unwrap(), GroupStrategy::ByType);
    assert_eq!(GroupStrategy::parse("spatial", None).unwrap(), GroupStrategy::BySpatialCell);
    assert_eq!(
        GroupStrategy::parse("meta", None).unwrap(),
        GroupStrategy::ByMeta { field: "model".into() }
    );
}

#[test]
fn parse_meta_with_field() {
    assert_eq!(
        GroupStrategy::parse("meta", Some("prompt")).unwrap(),
        GroupStrategy::ByMeta { field: "prompt".into() }
    );
    assert_eq!(
        GroupStrategy::parse("meta", Some("  ")).unwrap(),
        GroupStrategy::ByMeta { field: "model".into() }
    );
}

#[test]
fn parse_unknown_strategy_errors() {
    let err = GroupStrategy::parse("alphabetical", None).unwrap_err();
    assert!(matches!(err, SpatialError::UnknownStrategy(ref s) if s == "alphabetical"));
}

#[test]
fn only_uniform_is_unlabeled() {
    assert!(!GroupStrategy::Uniform.is_labeled());
    assert!(GroupStrategy::ByType.is_labeled());
    assert!(GroupStrategy::BySpatialCell.is_labeled());
}

// =============================================================
// Keys
// =============================================================

#[test]
fn uniform_puts_everything_in_all() {
    let shapes = vec![bare("a", "image", 0.0, 0.0), bare("b", "text", 0.0, 0.0)];
    let groups = group_shapes(&refs(&shapes), &GroupStrategy::Uniform, &EngineConfig::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["all"].len(), 2);
}

#[test]
fn scenario_group_by_type_preserves_order() {
    let shapes = vec![
        bare("1", "image", 0.0, 0.0),
        bare("2", "image", 0.0, 0.0),
        bare("3", "text", 0.0, 0.0),
        bare("4", "geo", 0.0, 0.0),
        bare("5", "image", 0.0, 0.0),
    ];
    let groups = group_shapes(&refs(&shapes), &GroupStrategy::ByType, &EngineConfig::default());
    assert_eq!(groups.len(), 3);
    assert_eq!(ids(&groups["image"]), vec!["shape:1", "shape:2", "shape:5"]);
    assert_eq!(ids(&groups["text"]), vec!["shape:3"]);
    assert_eq!(ids(&groups["geo"]), vec!["shape:4"]);
}

#[test]
fn missing_type_goes_to_unknown() {
    let shapes = vec![bare("a", "", 0.0, 0.0)];
    let groups = group_shapes(&refs(&shapes), &GroupStrategy::ByType, &EngineConfig::default());
    assert_eq!(groups["unknown"].len(), 1);
}

#[test]
fn meta_keys_stringify_values() {
    let shapes = vec![
        with_meta(bare("a", "image", 0.0, 0.0), json!({ "model": "flux" })),
        with_meta(bare("b", "image", 0.0, 0.0), json!({ "model": 3 })),
        with_meta(bare("c", "image", 0.0, 0.0), json!({ "model": true })),
        with_meta(bare("d", "image", 0.0, 0.0), json!({ "model": null })),
        bare("e", "image", 0.0, 0.0),
    ];
    let strategy = GroupStrategy::ByMeta { field: "model".into() };
    let groups = group_shapes(&refs(&shapes), &strategy, &EngineConfig::default());
    assert_eq!(ids(&groups["flux"]), vec!["shape:a"]);
    assert_eq!(ids(&groups["3"]), vec!["shape:b"]);
    assert_eq!(ids(&groups["true"]), vec!["shape:c"]);
    assert_eq!(ids(&groups["unknown"]), vec!["shape:d", "shape:e"]);
}

#[test]
fn spatial_cells_floor_coordinates() {
    let shapes = vec![
        bare("a", "image", 10.0, 10.0),
        bare("b", "image", 499.0, 499.0),
        bare("c", "image", 500.0, 0.0),
        bare("d", "image", -1.0, -501.0),
    ];
    let groups = group_shapes(&refs(&shapes), &GroupStrategy::BySpatialCell, &EngineConfig::default());
    assert_eq!(ids(&groups["cluster (0,0)"]), vec!["shape:a", "shape:b"]);
    assert_eq!(ids(&groups["cluster (1,0)"]), vec!["shape:c"]);
    assert_eq!(ids(&groups["cluster (-1,-2)"]), vec!["shape:d"]);
}

#[test]
fn spatial_cells_do_not_merge_neighbours() {
    let shapes = vec![bare("a", "image", 450.0, 0.0), bare("b", "image", 550.0, 0.0)];
    let groups = group_shapes(&refs(&shapes), &GroupStrategy::BySpatialCell, &EngineConfig::default());
    assert_eq!(groups.len(), 2);
}

#[test]
fn spatial_cell_size_follows_config() {
    let cfg = EngineConfig { group_cell_size: 100.0, ..EngineConfig::default() };
    let shape = bare("a", "image", 250.0, 99.0);
    assert_eq!(group_key(&shape, &GroupStrategy::BySpatialCell, &cfg), "cluster (2,0)");
}

// =============================================================
// Completeness / edge cases
// =============================================================

#[test]
fn empty_input_yields_empty_map() {
    for strategy in [GroupStrategy::Uniform, GroupStrategy::ByType, GroupStrategy::BySpatialCell] {
        assert!(group_shapes(&[], &strategy, &EngineConfig::default()).is_empty());
    }
}

#[test]
fn every_strategy_keeps_the_multiset() {
    let shapes: Vec<Shape> = (0..40)
        .map(|i| {
            let kind = ["image", "text", "geo", "video"][i % 4];
            let f = f64::from(u32::try_from(i).unwrap_or(0));
            let s = sized(&format!("n{i}"), kind, f * 137.0, f * 91.0, 100.0, 100.0);
            if i % 3 == 0 { with_meta(s, json!({ "model": format!("m{}", i % 5) })) } else { s }
        })
        .collect();
    let input = refs(&shapes);
    let strategies = [
        GroupStrategy::Uniform,
        GroupStrategy::ByType,
        GroupStrategy::ByMeta { field: "model".into() },
        GroupStrategy::BySpatialCell,
    ];
    for strategy in &strategies {
        let groups = group_shapes(&input, strategy, &EngineConfig::default());
        let mut seen: Vec<String> = groups.values().flat_map(|m| ids(m)).collect();
        let mut expected: Vec<String> = shapes.iter().map(|s| s.id.clone()).collect();
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected, "strategy {strategy} dropped or duplicated shapes");
    }
}

#[test]
fn duplicates_in_input_are_kept() {
    let shape = bare("a", "image", 0.0, 0.0);
    let input = vec![&shape, &shape];
    let groups = group_shapes(&input, &GroupStrategy::ByType, &EngineConfig::default());
    assert_eq!(groups["image"].len(), 2);
}
