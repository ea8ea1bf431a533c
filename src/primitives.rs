// primitives.rs - CPU-side mesh geometry and the built-in primitives
use glam::{Mat4, Vec3};

/// Vertex data shared between primitive and imported geometry
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// An indexed triangle mesh with a flat base color.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 3],
}

impl Geometry {
    /// Axis-aligned box centered at the origin with the given edge length.
    pub fn cuboid(edge: f32) -> Self {
        let h = edge * 0.5;

        // One face per normal direction so shading stays flat.
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::NEG_Z, Vec3::X),
            (Vec3::Z, Vec3::Y, Vec3::NEG_X),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, up, right) in faces {
            let base = vertices.len() as u32;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = (normal + right * u + up * v) * h;
                vertices.push(Vertex {
                    position: position.to_array(),
                    normal: normal.to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            vertices,
            indices,
            base_color: [0.8, 0.8, 0.8],
        }
    }

    /// Flat ground plane in the XZ plane, centered at the origin, facing +Y.
    pub fn plane(width: f32, depth: f32) -> Self {
        let hw = width * 0.5;
        let hd = depth * 0.5;
        let normal = Vec3::Y.to_array();

        let vertices = vec![
            Vertex {
                position: [-hw, 0.0, -hd],
                normal,
            },
            Vertex {
                position: [hw, 0.0, -hd],
                normal,
            },
            Vertex {
                position: [hw, 0.0, hd],
                normal,
            },
            Vertex {
                position: [-hw, 0.0, hd],
                normal,
            },
        ];

        Self {
            vertices,
            indices: vec![0, 2, 1, 0, 3, 2],
            base_color: [0.6, 0.6, 0.6],
        }
    }

    /// Bakes a transform into the vertex data. Used while walking imported
    /// asset containers so node hierarchies collapse into flat meshes.
    pub fn bake_transform(&mut self, matrix: Mat4) {
        let normal_matrix = matrix.inverse().transpose();
        for vertex in &mut self.vertices {
            let p = matrix.transform_point3(Vec3::from_array(vertex.position));
            let n = normal_matrix
                .transform_vector3(Vec3::from_array(vertex.normal))
                .normalize_or_zero();
            vertex.position = p.to_array();
            vertex.normal = n.to_array();
        }
    }
}
