use glam::Vec3;
use scene_viewer::primitives::Geometry;
use scene_viewer::scene::{Group, MeshInstance, Scene, Transform};

fn mesh(name: &str) -> MeshInstance {
    MeshInstance {
        name: name.to_owned(),
        geometry: Geometry::cuboid(2.0),
        transform: Transform::default(),
        group: None,
        enabled: true,
        opacity: 1.0,
    }
}

#[cfg(test)]
mod scene_model_tests {
    use super::*;

    #[test]
    fn test_group_transform_composes_with_mesh_transform() {
        let mut scene = Scene::new();

        let group = scene.add_group(Group {
            name: "model".to_owned(),
            transform: Transform {
                position: Vec3::new(10.0, 0.0, 0.0),
                ..Default::default()
            },
            enabled: true,
        });

        let mut child = mesh("part");
        child.group = Some(group);
        child.transform.position = Vec3::new(0.0, 2.0, 0.0);
        scene.add_mesh(child);

        let child = scene.mesh("part").unwrap();
        let world = scene.world_matrix(child);
        let origin = world.transform_point3(Vec3::ZERO);

        assert_eq!(origin, Vec3::new(10.0, 2.0, 0.0));
    }

    #[test]
    fn test_disabled_group_disables_children() {
        let mut scene = Scene::new();

        let group = scene.add_group(Group {
            name: "model".to_owned(),
            transform: Transform::default(),
            enabled: false,
        });

        let mut child = mesh("part");
        child.group = Some(group);
        scene.add_mesh(child);

        let child = scene.mesh("part").unwrap();
        assert!(child.enabled, "the mesh itself is enabled");
        assert!(
            !scene.mesh_enabled(child),
            "but its parent group disables it"
        );
    }

    #[test]
    fn test_ungrouped_mesh_enabled_stands_alone() {
        let mut scene = Scene::new();
        scene.add_mesh(mesh("solo"));

        let solo = scene.mesh("solo").unwrap();
        assert!(scene.mesh_enabled(solo));
    }

    #[test]
    fn test_rotation_applies_in_yxz_order() {
        use std::f32::consts::FRAC_PI_2;

        let transform = Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scaling: Vec3::ONE,
        };

        // A quarter turn around Y maps +X to -Z.
        let rotated = transform.matrix().transform_point3(Vec3::X);
        assert!((rotated - Vec3::NEG_Z).length() < 1e-6, "got {rotated}");
    }

    #[test]
    fn test_orbit_camera_eye_matches_radius() {
        let mut scene = Scene::new();
        scene.add_camera(scene_viewer::scene::OrbitCamera {
            name: "cam".to_owned(),
            alpha: -std::f32::consts::FRAC_PI_2,
            beta: std::f32::consts::FRAC_PI_2,
            radius: 10.0,
            target: Vec3::ZERO,
            enabled: true,
        });

        let camera = scene.active_camera().unwrap();
        assert!((camera.eye().length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_beta_away_from_poles() {
        let mut camera = scene_viewer::scene::OrbitCamera {
            name: "cam".to_owned(),
            alpha: 0.0,
            beta: 0.5,
            radius: 10.0,
            target: Vec3::ZERO,
            enabled: true,
        };

        camera.orbit(0.0, -10.0);
        assert!(camera.beta > 0.0, "beta never reaches the pole");

        camera.orbit(0.0, 10.0);
        assert!(camera.beta < std::f32::consts::PI);
    }

    #[test]
    fn test_zoom_never_collapses_radius() {
        let mut camera = scene_viewer::scene::OrbitCamera {
            name: "cam".to_owned(),
            alpha: 0.0,
            beta: 1.0,
            radius: 2.0,
            target: Vec3::ZERO,
            enabled: true,
        };

        camera.zoom(100.0);
        assert!(camera.radius > 0.0);
    }
}
