// graph.rs - Turns a validated scene document into live scene objects
use glam::Vec3;

use crate::assets::AssetLoader;
use crate::document::{NodeDescriptor, NodeEntry, NodeKind, SceneDocument};
use crate::error::NodeError;
use crate::scene::{Group, HemisphericLight, MeshInstance, OrbitCamera, Scene, Transform};

// Fixed preview-viewer defaults. Descriptor fields do not influence these;
// only the camera radius is derived from the node position.
pub const DEFAULT_CAMERA_ALPHA: f32 = -std::f32::consts::FRAC_PI_2;
pub const DEFAULT_CAMERA_BETA: f32 = std::f32::consts::PI / 2.5;
pub const DEFAULT_CAMERA_RADIUS: f32 = 10.0;
pub const LIGHT_DIRECTION: Vec3 = Vec3::Y;
pub const LIGHT_INTENSITY: f32 = 0.7;
pub const CUBE_EDGE: f32 = 2.0;
pub const GROUND_SIZE: f32 = 6.0;

/// What a single descriptor produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeBuilt {
    Camera,
    Light,
    Mesh,
    Model { meshes: usize },
    /// Unrecognized kind, unrecognized mesh id, or a model without `src`.
    /// Not an error.
    Skipped,
}

/// Outcome of one descriptor, in document order.
#[derive(Debug)]
pub struct NodeOutcome {
    pub id: String,
    pub result: Result<NodeBuilt, NodeError>,
}

/// Per-node outcomes of one instantiation pass. Failures never abort the
/// sequence; callers inspect the report to see which nodes were dropped.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outcomes: Vec<NodeOutcome>,
}

impl BuildReport {
    pub fn built(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(b) if b != NodeBuilt::Skipped))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &NodeError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id.as_str(), e)))
    }

    pub fn is_degraded(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Walks the document strictly in order and instantiates each node into
/// `scene`. Model asset loads complete before the next node starts, so
/// later nodes can rely on earlier registered names. A node failure is
/// logged and recorded, and the walk continues.
pub fn instantiate(document: &SceneDocument, scene: &mut Scene, assets: &AssetLoader) -> BuildReport {
    let mut report = BuildReport::default();

    for (index, entry) in document.nodes.iter().enumerate() {
        let id = entry.label(index);
        let result = match entry {
            NodeEntry::Node(descriptor) => build_node(descriptor, scene, assets),
            NodeEntry::Malformed { message, .. } => Err(NodeError::Instantiation(format!(
                "malformed descriptor: {message}"
            ))),
        };

        if let Err(err) = &result {
            log::warn!("skipping node {id}: {err}");
        }

        report.outcomes.push(NodeOutcome { id, result });
    }

    report
}

fn build_node(
    descriptor: &NodeDescriptor,
    scene: &mut Scene,
    assets: &AssetLoader,
) -> Result<NodeBuilt, NodeError> {
    match descriptor.kind {
        NodeKind::Camera => build_camera(descriptor, scene),
        NodeKind::Light => build_light(descriptor, scene),
        NodeKind::Mesh => build_mesh(descriptor, scene),
        NodeKind::Model => build_model(descriptor, scene, assets),
        NodeKind::Unknown => Ok(NodeBuilt::Skipped),
    }
}

fn build_camera(descriptor: &NodeDescriptor, scene: &mut Scene) -> Result<NodeBuilt, NodeError> {
    let position = required_position(descriptor)?;

    let mut radius = position.length();
    if radius == 0.0 {
        radius = DEFAULT_CAMERA_RADIUS;
    }

    scene.add_camera(OrbitCamera {
        name: descriptor.id.clone(),
        alpha: DEFAULT_CAMERA_ALPHA,
        beta: DEFAULT_CAMERA_BETA,
        radius,
        target: Vec3::ZERO,
        enabled: descriptor.enabled,
    });

    Ok(NodeBuilt::Camera)
}

fn build_light(descriptor: &NodeDescriptor, scene: &mut Scene) -> Result<NodeBuilt, NodeError> {
    // Direction and intensity are fixed; the descriptor carries neither.
    scene.add_light(HemisphericLight {
        name: descriptor.id.clone(),
        direction: LIGHT_DIRECTION,
        intensity: LIGHT_INTENSITY,
        enabled: descriptor.enabled,
    });

    Ok(NodeBuilt::Light)
}

fn build_mesh(descriptor: &NodeDescriptor, scene: &mut Scene) -> Result<NodeBuilt, NodeError> {
    let geometry = match descriptor.id.as_str() {
        "defaultCube" => crate::primitives::Geometry::cuboid(CUBE_EDGE),
        "ground" => crate::primitives::Geometry::plane(GROUND_SIZE, GROUND_SIZE),
        // Any other id produces no geometry and no error.
        _ => return Ok(NodeBuilt::Skipped),
    };

    let transform = required_transform(descriptor)?;

    scene.add_mesh(MeshInstance {
        name: descriptor.id.clone(),
        geometry,
        transform,
        group: None,
        enabled: descriptor.enabled,
        opacity: if descriptor.visible { 1.0 } else { 0.0 },
    });

    Ok(NodeBuilt::Mesh)
}

fn build_model(
    descriptor: &NodeDescriptor,
    scene: &mut Scene,
    assets: &AssetLoader,
) -> Result<NodeBuilt, NodeError> {
    let Some(src) = descriptor.src.as_deref() else {
        return Ok(NodeBuilt::Skipped);
    };

    let meshes = assets.load_meshes(src)?;
    if meshes.is_empty() {
        return Ok(NodeBuilt::Model { meshes: 0 });
    }

    let transform = required_transform(descriptor)?;
    let count = meshes.len();

    // One parent group named after the descriptor; every imported mesh
    // hangs under it and shares the descriptor's flags.
    let group = scene.add_group(Group {
        name: descriptor.id.clone(),
        transform,
        enabled: descriptor.enabled,
    });

    let opacity = if descriptor.visible { 1.0 } else { 0.0 };
    for (name, geometry) in meshes {
        scene.add_mesh(MeshInstance {
            name,
            geometry,
            transform: Transform::default(),
            group: Some(group),
            enabled: descriptor.enabled,
            opacity,
        });
    }

    let display_name = descriptor.name.as_deref().unwrap_or(&descriptor.id);
    log::info!("loaded model {display_name}: {count} meshes");

    Ok(NodeBuilt::Model { meshes: count })
}

fn required_position(descriptor: &NodeDescriptor) -> Result<Vec3, NodeError> {
    descriptor
        .transform
        .as_ref()
        .and_then(|t| t.position)
        .map(Vec3::from_array)
        .ok_or_else(|| NodeError::Instantiation("missing transform.position".to_owned()))
}

fn required_transform(descriptor: &NodeDescriptor) -> Result<Transform, NodeError> {
    let position = required_position(descriptor)?;
    let transform = descriptor.transform.as_ref();

    let rotation = transform
        .and_then(|t| t.rotation)
        .map(Vec3::from_array)
        .unwrap_or(Vec3::ZERO);
    let scaling = transform
        .and_then(|t| t.scaling)
        .map(Vec3::from_array)
        .unwrap_or(Vec3::ONE);

    Ok(Transform {
        position,
        rotation,
        scaling,
    })
}
