use glam::Mat4;
use std::path::{Path, PathBuf};

use super::import::{
    ImportError, ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, SceneImporter,
};
use crate::{lantern_debug, lantern_warn};

/// Imports `.gltf` and `.glb` files.
///
/// Texture images are returned as paths, images embedded into buffers are skipped.
#[derive(Default)]
pub struct GltfImporter {}

impl SceneImporter for GltfImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, ImportError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)?;

        let mut scene = ImportedScene::default();

        // One imported mesh per primitive
        let mut primitive_meshes: Vec<Vec<usize>> = Vec::new();
        for mesh in document.meshes() {
            let mut indices = Vec::new();
            for primitive in mesh.primitives() {
                let name = format!("{}#{}", mesh.name().unwrap_or("mesh"), primitive.index());
                match import_primitive(&primitive, &buffers, &name) {
                    Some(imported) => {
                        indices.push(scene.meshes.len());
                        scene.meshes.push(imported);
                    }
                    None => lantern_warn!("glTF: Skipped primitive '{}'", name),
                }
            }
            primitive_meshes.push(indices);
        }

        for material in document.materials() {
            scene.materials.push(import_material(&material));
        }

        for node in document.nodes() {
            scene.nodes.push(ImportedNode {
                name: node.name().unwrap_or_default().to_string(),
                transform: Mat4::from_cols_array_2d(&node.transform().matrix()),
                meshes: node
                    .mesh()
                    .map(|mesh| primitive_meshes[mesh.index()].clone())
                    .unwrap_or_default(),
                children: node.children().map(|child| child.index()).collect(),
            });
        }

        if let Some(root_scene) = document.default_scene().or_else(|| document.scenes().next()) {
            scene.root = Some(scene.nodes.len());
            scene.nodes.push(ImportedNode {
                name: root_scene.name().unwrap_or("root").to_string(),
                children: root_scene.nodes().map(|node| node.index()).collect(),
                ..Default::default()
            });
        }

        scene.incomplete = scene.meshes.is_empty();

        lantern_debug!(
            "glTF: {} nodes, {} meshes, {} materials",
            scene.nodes.len(),
            scene.meshes.len(),
            scene.materials.len()
        );

        Ok(scene)
    }
}

fn import_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    name: &str,
) -> Option<ImportedMesh> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));

    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|normals| normals.collect())
        .unwrap_or_default();
    // Flip to match the bottom-up rows textures are uploaded with
    let tex_coords = reader.read_tex_coords(0).map(|tex_coords| {
        tex_coords
            .into_f32()
            .map(|[u, v]| [u, 1.0 - v])
            .collect::<Vec<_>>()
    });

    let raw_indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let indices = triangulate(primitive.mode(), &raw_indices)?;

    Some(ImportedMesh {
        name: name.to_string(),
        positions,
        normals,
        tex_coords,
        indices,
        material: primitive.material().index(),
    })
}

/// Converts primitive indices into a triangle list. `None` for point and line primitives.
pub fn triangulate(mode: gltf::mesh::Mode, indices: &[u32]) -> Option<Vec<u32>> {
    use gltf::mesh::Mode;

    match mode {
        Mode::Triangles => Some(indices[..indices.len() - indices.len() % 3].to_vec()),
        Mode::TriangleStrip => {
            let mut triangles = Vec::new();
            for (i, window) in indices.windows(3).enumerate() {
                // Every other triangle has flipped winding in a strip
                if i % 2 == 0 {
                    triangles.extend_from_slice(&[window[0], window[1], window[2]]);
                } else {
                    triangles.extend_from_slice(&[window[1], window[0], window[2]]);
                }
            }
            Some(triangles)
        }
        Mode::TriangleFan => {
            let mut triangles = Vec::new();
            if let Some((&center, rest)) = indices.split_first() {
                for pair in rest.windows(2) {
                    triangles.extend_from_slice(&[center, pair[0], pair[1]]);
                }
            }
            Some(triangles)
        }
        Mode::Points | Mode::Lines | Mode::LineLoop | Mode::LineStrip => None,
    }
}

fn import_material(material: &gltf::Material) -> ImportedMaterial {
    let mut imported = ImportedMaterial {
        name: material.name().unwrap_or_default().to_string(),
        ..Default::default()
    };

    if let Some(info) = material.pbr_metallic_roughness().base_color_texture() {
        imported.diffuse.extend(texture_path(&info.texture()));
    }
    if let Some(specular) = material.specular() {
        if let Some(info) = specular.specular_color_texture() {
            imported.specular.extend(texture_path(&info.texture()));
        }
        if let Some(info) = specular.specular_texture() {
            imported.specular.extend(texture_path(&info.texture()));
        }
    }
    if let Some(info) = material.emissive_texture() {
        imported.emission.extend(texture_path(&info.texture()));
    }

    imported
}

fn texture_path(texture: &gltf::Texture) -> Option<PathBuf> {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => uri_path(uri),
        _ => {
            lantern_warn!(
                "glTF: Embedded image {} is not supported",
                texture.source().index()
            );
            None
        }
    }
}

/// Relative URIs in glTF are percent-encoded
fn uri_path(uri: &str) -> Option<PathBuf> {
    match urlencoding::decode(uri) {
        Ok(decoded) => Some(PathBuf::from(decoded.as_ref())),
        Err(why) => {
            lantern_warn!("glTF: Invalid image uri '{}': {}", uri, why);
            None
        }
    }
}
