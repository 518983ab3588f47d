use std::path::{Path, PathBuf};

use super::import::{
    ImportError, ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene, SceneImporter,
};
use crate::{lantern_debug, lantern_warn};

/// Imports Wavefront `.obj` files with their `.mtl` libraries.
///
/// OBJ has no hierarchy so every object hangs directly off the root node.
#[derive(Default)]
pub struct ObjImporter {}

impl SceneImporter for ObjImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, ImportError> {
        let (models, materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;
        let materials = materials.unwrap_or_else(|why| {
            lantern_warn!(
                "OBJ: Failed to load materials for '{}': {}",
                path.to_string_lossy(),
                why
            );
            Vec::new()
        });

        let mut scene = ImportedScene::default();

        for model in &models {
            let mesh = &model.mesh;
            let vertex_count = mesh.positions.len() / 3;
            let normals = if mesh.normals.len() == mesh.positions.len() {
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect()
            } else {
                Vec::new()
            };
            let tex_coords = if mesh.texcoords.len() == vertex_count * 2 && vertex_count > 0 {
                Some(
                    mesh.texcoords
                        .chunks_exact(2)
                        .map(|t| [t[0], t[1]])
                        .collect(),
                )
            } else {
                None
            };

            scene.meshes.push(ImportedMesh {
                name: model.name.clone(),
                positions: mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| [p[0], p[1], p[2]])
                    .collect(),
                normals,
                tex_coords,
                indices: mesh.indices.clone(),
                material: mesh.material_id,
            });
        }

        for material in &materials {
            scene.materials.push(ImportedMaterial {
                name: material.name.clone(),
                diffuse: material.diffuse_texture.iter().map(PathBuf::from).collect(),
                specular: material
                    .specular_texture
                    .iter()
                    .map(PathBuf::from)
                    .collect(),
                emission: material
                    .unknown_param
                    .get("map_Ke")
                    .map(PathBuf::from)
                    .into_iter()
                    .collect(),
            });
        }

        scene.root = Some(0);
        scene.nodes.push(ImportedNode {
            name: path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            meshes: (0..scene.meshes.len()).collect(),
            ..Default::default()
        });
        scene.incomplete = scene.meshes.is_empty();

        lantern_debug!(
            "OBJ: {} meshes, {} materials",
            scene.meshes.len(),
            scene.materials.len()
        );

        Ok(scene)
    }
}
