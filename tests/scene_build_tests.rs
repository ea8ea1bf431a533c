use scene_viewer::assets::AssetLoader;
use scene_viewer::document::SceneDocument;
use scene_viewer::error::NodeError;
use scene_viewer::graph::{self, NodeBuilt, DEFAULT_CAMERA_RADIUS, LIGHT_INTENSITY};
use scene_viewer::scene::Scene;

// Single-triangle glTF container with an embedded base64 buffer, written to
// a temp assets root by the model instantiation test.
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0 } ],
  "meshes": [ { "name": "hull", "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
  "buffers": [ {
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA",
    "byteLength": 36
  } ],
  "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
  "accessors": [ {
    "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
    "min": [0, 0, 0], "max": [1, 1, 0]
  } ]
}"#;

fn build(json: &str) -> (Scene, graph::BuildReport) {
    let document = SceneDocument::parse(json.as_bytes()).expect("test document must parse");
    let mut scene = Scene::new();
    let assets = AssetLoader::new("test-assets-not-present");
    let report = graph::instantiate(&document, &mut scene, &assets);
    (scene, report)
}

#[cfg(test)]
mod scene_build_tests {
    use super::*;

    #[test]
    fn test_empty_document_builds_empty_scene() {
        let (scene, report) = build(r#"{ "nodes": [] }"#);

        assert!(scene.meshes().is_empty());
        assert!(scene.cameras().is_empty());
        assert!(report.outcomes.is_empty());
        assert!(!report.is_degraded());
    }

    #[test]
    fn test_camera_radius_comes_from_position_magnitude() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "cam", "kind": "camera", "transform": { "position": [3, 4, 0] } }
            ] }"#,
        );

        let camera = scene.active_camera().expect("camera must exist");
        assert_eq!(camera.radius, 5.0);
        assert_eq!(camera.target, glam::Vec3::ZERO, "target is fixed at origin");
    }

    #[test]
    fn test_camera_zero_position_uses_default_radius() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "cam", "kind": "camera", "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        let camera = scene.active_camera().unwrap();
        assert_eq!(camera.radius, DEFAULT_CAMERA_RADIUS);
    }

    #[test]
    fn test_camera_without_position_fails_that_node_only() {
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "cam", "kind": "camera" },
                { "id": "sun", "kind": "light" }
            ] }"#,
        );

        assert!(scene.cameras().is_empty());
        assert_eq!(scene.lights().len(), 1, "later nodes still instantiate");
        assert!(matches!(
            report.outcomes[0].result,
            Err(NodeError::Instantiation(_))
        ));
    }

    #[test]
    fn test_light_uses_fixed_direction_and_intensity() {
        let (scene, _) = build(
            r#"{ "nodes": [ { "id": "sun", "kind": "light" } ] }"#,
        );

        let light = scene.active_light().expect("light must exist");
        assert_eq!(light.direction, glam::Vec3::Y, "direction is straight up");
        assert_eq!(light.intensity, LIGHT_INTENSITY);
    }

    #[test]
    fn test_default_cube_and_ground_produce_geometry() {
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "defaultCube", "kind": "mesh", "transform": { "position": [0, 1, 0] } },
                { "id": "ground", "kind": "mesh", "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        assert_eq!(scene.meshes().len(), 2);
        assert_eq!(report.built(), 2);

        let cube = scene.mesh("defaultCube").unwrap();
        assert!(!cube.geometry.vertices.is_empty());
        assert_eq!(cube.transform.position, glam::Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_unrecognized_mesh_id_is_silent_no_op() {
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "torusKnot", "kind": "mesh", "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        assert!(scene.meshes().is_empty(), "no geometry is produced");
        assert!(!report.is_degraded(), "and no error is recorded");
        assert!(matches!(report.outcomes[0].result, Ok(NodeBuilt::Skipped)));
    }

    #[test]
    fn test_unknown_kind_is_skipped_silently() {
        let (scene, report) = build(
            r#"{ "nodes": [ { "id": "fx", "kind": "particleSystem" } ] }"#,
        );

        assert!(scene.meshes().is_empty());
        assert!(matches!(report.outcomes[0].result, Ok(NodeBuilt::Skipped)));
    }

    #[test]
    fn test_model_without_src_is_a_no_op() {
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "ghost", "kind": "model", "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        assert!(scene.meshes().is_empty());
        assert!(matches!(report.outcomes[0].result, Ok(NodeBuilt::Skipped)));
    }

    #[test]
    fn test_failed_node_does_not_abort_the_sequence() {
        // Node 3 fails (model asset cannot be loaded); nodes 4..N must still
        // instantiate, and the failure stays in the report.
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "cam", "kind": "camera", "transform": { "position": [0, 5, -10] } },
                { "id": "sun", "kind": "light" },
                { "id": "broken", "kind": "model", "src": "missing/model.glb",
                  "transform": { "position": [0, 0, 0] } },
                { "id": "ground", "kind": "mesh", "transform": { "position": [0, 0, 0] } },
                { "id": "defaultCube", "kind": "mesh", "transform": { "position": [0, 1, 0] } }
            ] }"#,
        );

        assert_eq!(scene.meshes().len(), 2, "nodes after the failure still build");
        assert_eq!(scene.cameras().len(), 1);
        assert_eq!(scene.lights().len(), 1);

        assert!(report.is_degraded());
        let failures: Vec<&str> = report.failures().map(|(id, _)| id).collect();
        assert_eq!(failures, vec!["broken"]);
        assert!(matches!(
            report.outcomes[2].result,
            Err(NodeError::AssetLoad { .. })
        ));
    }

    #[test]
    fn test_malformed_node_fails_only_itself() {
        let (scene, report) = build(
            r#"{ "nodes": [
                { "id": "bad", "kind": "mesh", "transform": { "position": "oops" } },
                { "id": "ground", "kind": "mesh", "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        assert!(matches!(
            report.outcomes[0].result,
            Err(NodeError::Instantiation(_))
        ));
        let failures: Vec<&str> = report.failures().map(|(id, _)| id).collect();
        assert_eq!(failures, vec!["bad"]);
        assert!(
            scene.mesh("ground").is_some(),
            "a wrong-typed field never takes the rest of the document down"
        );
    }

    #[test]
    fn test_model_with_resolvable_asset_builds_a_group() {
        let root = std::env::temp_dir().join("scene-viewer-model-build-test");
        std::fs::create_dir_all(&root).expect("fixture dir must be writable");
        std::fs::write(root.join("hull.gltf"), TRIANGLE_GLTF)
            .expect("fixture file must be writable");

        let document = SceneDocument::parse(
            br#"{ "nodes": [
                { "id": "ship", "kind": "model", "src": "models/hull.gltf",
                  "visible": false, "transform": { "position": [1, 2, 3] } }
            ] }"#,
        )
        .expect("test document must parse");

        let mut scene = Scene::new();
        let assets = AssetLoader::new(&root);
        let report = graph::instantiate(&document, &mut scene, &assets);

        assert!(
            matches!(report.outcomes[0].result, Ok(NodeBuilt::Model { meshes: 1 })),
            "got {:?}",
            report.outcomes[0].result
        );
        assert!(!report.is_degraded());

        assert_eq!(scene.groups().len(), 1, "one parent group per model node");
        assert_eq!(scene.groups()[0].name, "ship");
        assert!(scene.groups()[0].enabled);

        let hull = scene.mesh("hull").expect("imported mesh is registered");
        assert!(hull.group.is_some(), "imported meshes hang under the group");
        assert!(scene.mesh_enabled(hull));
        assert_eq!(
            hull.opacity, 0.0,
            "visible: false fans out to every imported mesh"
        );

        let origin = scene.world_matrix(hull).transform_point3(glam::Vec3::ZERO);
        assert_eq!(
            origin,
            glam::Vec3::new(1.0, 2.0, 3.0),
            "the descriptor transform lands on the parent group"
        );
    }

    #[test]
    fn test_enabled_and_visible_flags_are_applied() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "defaultCube", "kind": "mesh", "enabled": false, "visible": false,
                  "transform": { "position": [0, 0, 0] } },
                { "id": "ground", "kind": "mesh",
                  "transform": { "position": [0, 0, 0] } }
            ] }"#,
        );

        let cube = scene.mesh("defaultCube").unwrap();
        assert!(!cube.enabled);
        assert_eq!(cube.opacity, 0.0, "visible: false is opacity 0, not removal");
        assert!(!scene.mesh_enabled(cube));

        let ground = scene.mesh("ground").unwrap();
        assert!(ground.enabled);
        assert_eq!(ground.opacity, 1.0);
        assert!(scene.mesh_enabled(ground));
    }

    #[test]
    fn test_transform_defaults_for_rotation_and_scaling() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "defaultCube", "kind": "mesh",
                  "transform": { "position": [1, 2, 3] } }
            ] }"#,
        );

        let cube = scene.mesh("defaultCube").unwrap();
        assert_eq!(cube.transform.rotation, glam::Vec3::ZERO);
        assert_eq!(cube.transform.scaling, glam::Vec3::ONE);
    }

    #[test]
    fn test_mesh_name_collision_replaces_earlier_mesh() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "defaultCube", "kind": "mesh", "transform": { "position": [0, 0, 0] } },
                { "id": "defaultCube", "kind": "mesh", "transform": { "position": [5, 0, 0] } }
            ] }"#,
        );

        assert_eq!(scene.meshes().len(), 1, "same-name mesh silently overwrites");
        let cube = scene.mesh("defaultCube").unwrap();
        assert_eq!(cube.transform.position, glam::Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_first_camera_in_document_order_is_active() {
        let (scene, _) = build(
            r#"{ "nodes": [
                { "id": "main", "kind": "camera", "transform": { "position": [0, 0, 5] } },
                { "id": "alt", "kind": "camera", "transform": { "position": [0, 0, 9] } }
            ] }"#,
        );

        assert_eq!(scene.cameras().len(), 2);
        assert_eq!(scene.active_camera().unwrap().name, "main");
    }
}
