//! Integration tests for the desk scene pipeline
//!
//! These tests drive the public API end to end: configuration parsing,
//! octree queries, hierarchy building and frame submission.

use approx::assert_relative_eq;
use desk_engine::foundation::math::utils;
use desk_engine::prelude::*;

// ============================================================================
// SPATIAL INDEX
// ============================================================================

#[test]
fn test_integration_corner_object_query() {
    let mut octree = Octree::new(Vec3::zeros(), 10.0, 5);
    octree.insert(SceneObject::new(1, Vec3::new(9.9, 9.9, 9.9), 0.5));

    assert_eq!(octree.query_region(Vec3::new(9.0, 9.0, 9.0), Vec3::new(10.0, 10.0, 10.0)), vec![1]);
    assert!(octree.query_region(Vec3::new(-10.0, -10.0, -10.0), Vec3::new(-9.0, -9.0, -9.0)).is_empty());
}

#[test]
fn test_integration_remove_then_reinsert_moves_object() {
    let mut octree = Octree::new(Vec3::zeros(), 10.0, 5);
    octree.insert(SceneObject::new(7, Vec3::new(-5.0, 1.0, 2.0), 1.0));

    assert_eq!(octree.remove(7), 1);
    octree.insert(SceneObject::new(7, Vec3::new(5.0, 1.0, 2.0), 1.0));

    assert!(octree.query_region(Vec3::new(-6.0, 0.0, 0.0), Vec3::new(-4.0, 2.0, 4.0)).is_empty());
    assert_eq!(octree.query_region(Vec3::new(4.0, 0.0, 0.0), Vec3::new(6.0, 2.0, 4.0)), vec![7]);
}

#[test]
fn test_integration_octree_from_spatial_config() {
    let spatial = SpatialConfig::new(Vec3::new(100.0, 0.0, 0.0), 2.0, 3);
    let octree = Octree::from_config(&spatial);

    assert_eq!(octree.bounds(), spatial.root_bounds());
}

// ============================================================================
// HIERARCHY
// ============================================================================

#[test]
fn test_integration_lamp_shade_follows_base() {
    let mut scene = SceneManager::new(ApplicationConfig::default()).unwrap();
    scene.build_hierarchy().unwrap();
    scene.refresh_hierarchy();

    let root = scene.graph().root();
    let base = scene.graph().find_child(root, "lamp_base").unwrap();
    let shade = scene.graph().find_child(root, "lamp_shade").unwrap();
    let before = utils::transform_origin(scene.graph().world_transform(shade).unwrap());

    scene.graph_mut().node_mut(base).unwrap().set_position(Vec3::new(-2.5, 0.075, -2.0));
    scene.refresh_hierarchy();

    let after = utils::transform_origin(scene.graph().world_transform(shade).unwrap());
    assert_relative_eq!(after - before, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-4);
}

#[test]
fn test_integration_hierarchy_ancestry() {
    let mut scene = SceneManager::new(ApplicationConfig::default()).unwrap();
    scene.build_hierarchy().unwrap();

    let graph = scene.graph();
    let shade = graph.find_by_object_id(11).unwrap();
    let names: Vec<_> = graph
        .ancestors(shade)
        .map(|id| graph.node(id).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["lamp_neck", "lamp_base", "root"]);
}

// ============================================================================
// FRAME PIPELINE
// ============================================================================

#[test]
fn test_integration_frames_from_toml_config() {
    let text = r#"
        [engine]
        enable_profiling = true

        [culling]
        region_min = [-5.0, -1.0, -3.0]
        region_max = [0.0, 3.0, 3.0]
    "#;
    let config: ApplicationConfig = toml::from_str(text).unwrap();
    let mut scene = SceneManager::new(config).unwrap();
    scene.build_hierarchy().unwrap();
    let mut target = RecordingTarget::new();

    for _ in 0..4 {
        scene.render_frame(&mut target);
    }

    let mut ids: Vec<_> = target.calls().iter().map(|c| c.object_id).collect();
    ids.sort_unstable();
    // Everything at x <= 0; the books sit at x = 3.5
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 9, 10, 11, 12, 13]);
    assert_eq!(target.frames_completed(), 4);

    let report = scene.profiler().report();
    assert_eq!(report.frame, 4);
    assert_eq!(report.total_objects, 13);
    assert_eq!(report.visible_objects, 10);
    assert_eq!(report.draw_calls, 10);
    let sections: Vec<_> = report.sections.iter().map(|s| (s.name.as_str(), s.calls)).collect();
    assert_eq!(sections, vec![("Frustum Culling", 4), ("Object Rendering", 4)]);
}

#[test]
fn test_integration_bundled_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../desk_app/config/desk_scene.toml");
    let config = ApplicationConfig::load_from_file(path).unwrap();

    assert_eq!(config, ApplicationConfig::default());
}

#[test]
fn test_integration_profile_report_file() {
    let path = std::env::temp_dir().join(format!("desk_engine_it_report_{}.txt", std::process::id()));
    std::fs::remove_file(&path).ok();

    let mut scene = SceneManager::new(ApplicationConfig::default()).unwrap();
    let mut target = RecordingTarget::new();
    scene.render_frame(&mut target);
    scene.profiler().write_report(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(text.contains("Visible Objects: 13 (culled: 0)"));
    assert!(text.contains("Draw Calls: 13"));
}
