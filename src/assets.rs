// assets.rs - Model asset path derivation and glTF import
use std::path::PathBuf;

use glam::Mat4;

use crate::error::NodeError;
use crate::primitives::{Geometry, Vertex};

/// Derives the flat on-disk file name for a descriptor `src`.
///
/// The final `/`-separated segment wins; when the final segment is empty
/// (e.g. a trailing slash) every separator in the whole string is replaced
/// with an underscore instead. This rule is a contract shared with the
/// export tool that writes the asset bundle and must not drift from it.
pub fn flattened_file_name(src: &str) -> String {
    match src.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_owned(),
        _ => src.replace('/', "_"),
    }
}

/// Loads model containers from a flat assets directory.
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path a descriptor `src` resolves to.
    pub fn asset_path(&self, src: &str) -> PathBuf {
        self.root.join(flattened_file_name(src))
    }

    /// Imports every mesh primitive in the container at `src`, with node
    /// transforms baked in. Returns named geometry in container order; an
    /// empty container yields an empty list, which the caller treats as a
    /// silent no-op.
    pub fn load_meshes(&self, src: &str) -> Result<Vec<(String, Geometry)>, NodeError> {
        let path = self.asset_path(src);
        let (document, buffers, _images) =
            gltf::import(&path).map_err(|e| NodeError::AssetLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut meshes = Vec::new();
        for scene in document.scenes() {
            for node in scene.nodes() {
                collect_node(&node, &buffers, Mat4::IDENTITY, &mut meshes);
            }
        }

        log::debug!(
            "imported {}: {} meshes",
            path.display(),
            meshes.len()
        );

        Ok(meshes)
    }
}

fn collect_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: Mat4,
    out: &mut Vec<(String, Geometry)>,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let transform = parent_transform * local;

    if let Some(mesh) = node.mesh() {
        for (index, primitive) in mesh.primitives().enumerate() {
            if let Some(mut geometry) = read_primitive(&primitive, buffers) {
                geometry.bake_transform(transform);
                let name = mesh
                    .name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("mesh{}", mesh.index()));
                let name = if index == 0 {
                    name
                } else {
                    format!("{name}.{index}")
                };
                out.push((name, geometry));
            }
        }
    }

    for child in node.children() {
        collect_node(&child, buffers, transform, out);
    }
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> Option<Geometry> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()][..]));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(normals) => normals.collect(),
        // Containers without normals still render; shade them straight up.
        None => vec![[0.0, 1.0, 0.0]; positions.len()],
    };

    let vertices = positions
        .into_iter()
        .zip(normals)
        .map(|(position, normal)| Vertex { position, normal })
        .collect::<Vec<_>>();

    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    let base_color_factor = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();
    let base_color = [
        base_color_factor[0],
        base_color_factor[1],
        base_color_factor[2],
    ];

    Some(Geometry {
        vertices,
        indices,
        base_color,
    })
}
