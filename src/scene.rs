// scene.rs - The instantiated scene model the renderer consumes
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::primitives::Geometry;

/// Transparent clear color; the scene composites over whatever is behind
/// the surface.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

const DEFAULT_FOV: f32 = 0.8;

/// Position / Euler rotation / scale triple, matching the descriptor
/// transform. Rotation applies in YXZ order.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scaling: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scaling: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scaling, rotation, self.position)
    }
}

/// Orbit camera: polar/azimuthal angles around a fixed target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub name: String,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    pub enabled: bool,
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        self.target
            + self.radius
                * Vec3::new(
                    self.alpha.cos() * self.beta.sin(),
                    self.beta.cos(),
                    self.alpha.sin() * self.beta.sin(),
                )
    }

    pub fn view_projection(&self, aspect_ratio: f32) -> Mat4 {
        let projection = Mat4::perspective_rh(DEFAULT_FOV, aspect_ratio, 0.1, 1000.0);
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        projection * view
    }

    /// Drag input: horizontal motion changes the azimuth, vertical motion
    /// the polar angle. Beta is clamped away from the poles.
    pub fn orbit(&mut self, delta_alpha: f32, delta_beta: f32) {
        self.alpha += delta_alpha;
        self.beta = (self.beta + delta_beta).clamp(0.01, std::f32::consts::PI - 0.01);
    }

    pub fn zoom(&mut self, amount: f32) {
        self.radius = (self.radius - amount).max(0.5);
    }
}

/// Hemispheric fill light. Direction points towards the sky half.
#[derive(Debug, Clone)]
pub struct HemisphericLight {
    pub name: String,
    pub direction: Vec3,
    pub intensity: f32,
    pub enabled: bool,
}

/// Handle to a parent transform group created for an imported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupId(usize);

/// Parent transform node; imported model meshes hang under one of these.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    pub transform: Transform,
    pub enabled: bool,
}

/// One renderable mesh. `opacity` is 0 or 1 for the document `visible`
/// flag; an invisible mesh still exists in the scene, it just draws fully
/// transparent.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub name: String,
    pub geometry: Geometry,
    pub transform: Transform,
    pub group: Option<GroupId>,
    pub enabled: bool,
    pub opacity: f32,
}

/// The live scene. Exclusively mutated during instantiation, read-only for
/// the render loop afterwards.
pub struct Scene {
    cameras: Vec<OrbitCamera>,
    lights: Vec<HemisphericLight>,
    groups: Vec<Group>,
    meshes: Vec<MeshInstance>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            cameras: Vec::new(),
            lights: Vec::new(),
            groups: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub fn add_camera(&mut self, camera: OrbitCamera) {
        self.cameras.push(camera);
    }

    pub fn add_light(&mut self, light: HemisphericLight) {
        self.lights.push(light);
    }

    pub fn add_group(&mut self, group: Group) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    /// Adds a mesh. A name collision silently replaces the earlier mesh of
    /// the same name, mirroring the engine namespace the document format
    /// was written against.
    pub fn add_mesh(&mut self, mesh: MeshInstance) {
        if let Some(existing) = self.meshes.iter_mut().find(|m| m.name == mesh.name) {
            *existing = mesh;
        } else {
            self.meshes.push(mesh);
        }
    }

    /// The camera frames render from: the first camera in document order.
    pub fn active_camera(&self) -> Option<&OrbitCamera> {
        self.cameras.first()
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut OrbitCamera> {
        self.cameras.first_mut()
    }

    /// The light frames shade with: the first enabled light.
    pub fn active_light(&self) -> Option<&HemisphericLight> {
        self.lights.iter().find(|l| l.enabled)
    }

    pub fn cameras(&self) -> &[OrbitCamera] {
        &self.cameras
    }

    pub fn lights(&self) -> &[HemisphericLight] {
        &self.lights
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn meshes(&self) -> &[MeshInstance] {
        &self.meshes
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshInstance> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// World matrix of a mesh: its own transform, composed under its parent
    /// group when it has one.
    pub fn world_matrix(&self, mesh: &MeshInstance) -> Mat4 {
        let local = mesh.transform.matrix();
        match mesh.group {
            Some(id) => self.groups[id.0].transform.matrix() * local,
            None => local,
        }
    }

    /// A mesh renders only when it and its parent group are enabled.
    pub fn mesh_enabled(&self, mesh: &MeshInstance) -> bool {
        let group_enabled = mesh.group.map(|id| self.groups[id.0].enabled).unwrap_or(true);
        mesh.enabled && group_enabled
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
