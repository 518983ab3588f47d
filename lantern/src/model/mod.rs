mod gltf_importer;
mod import;
mod obj_importer;

pub use gltf_importer::{triangulate, GltfImporter};
pub use import::{
    importer_for, ImportError, ImportedMaterial, ImportedMesh, ImportedNode, ImportedScene,
    SceneImporter,
};
pub use obj_importer::ObjImporter;

use glam::{Mat4, Vec3};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::{Path, PathBuf},
    time::Instant,
};
use strum::IntoEnumIterator;

use crate::{
    backend::{Backend, TextureId},
    lantern_error, lantern_info, lantern_warn,
    material::{Material, Texture, TextureRole, MAX_ROLE_TEXTURES},
    mesh::{Mesh, MeshError, Vertex},
    shader::ShaderProgram,
    texture::TextureLoader,
};

/// Color of meshes that end up without any textures
pub const DEFAULT_COLOR: Vec3 = Vec3::new(1.0, 0.925, 0.5568);

#[derive(Debug)]
pub enum ModelError {
    Import(ImportError),
    Incomplete,
    MissingRoot,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Import(why) => write!(f, "{}", why),
            ModelError::Incomplete => write!(f, "Scene is incomplete"),
            ModelError::MissingRoot => write!(f, "Scene has no root node"),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ImportError> for ModelError {
    fn from(why: ImportError) -> Self {
        ModelError::Import(why)
    }
}

/// A multi-mesh asset drawn as one.
///
/// Meshes are kept in scene traversal order, which is also the draw order. Textures are
/// cached by resolved path so each image file is uploaded at most once per model.
pub struct Model<B: Backend> {
    meshes: Vec<Mesh<B>>,
    directory: PathBuf,
    loaded_textures: HashMap<PathBuf, TextureId>,
    failed_textures: HashSet<PathBuf>,
}

impl<B: Backend> Default for Model<B> {
    fn default() -> Self {
        Self {
            meshes: Vec::new(),
            directory: PathBuf::new(),
            loaded_textures: HashMap::new(),
            failed_textures: HashSet::new(),
        }
    }
}

impl<B: Backend> Model<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path` with the importer matching its extension.
    ///
    /// Failures are logged and leave the model empty.
    pub fn from_file(backend: &B, loader: &mut dyn TextureLoader, path: &Path) -> Self {
        let mut model = Self::new();
        match importer_for(path) {
            Ok(importer) => {
                // Already logged
                let _ = model.load(backend, importer.as_ref(), loader, path);
            }
            Err(why) => {
                lantern_error!("Failed to load model '{}': {}", path.to_string_lossy(), why);
            }
        }
        model
    }

    /// Replaces the meshes of this model with the ones in the scene at `path`.
    ///
    /// Returns the number of meshes created. On failure the error is logged and the model is
    /// left without meshes.
    pub fn load(
        &mut self,
        backend: &B,
        importer: &dyn SceneImporter,
        loader: &mut dyn TextureLoader,
        path: &Path,
    ) -> Result<usize, ModelError> {
        self.meshes.clear();
        self.directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let load_start = Instant::now();
        let result = importer
            .import(path)
            .map_err(ModelError::from)
            .and_then(|scene| self.build(backend, loader, &scene));

        match &result {
            Ok(mesh_count) => lantern_info!(
                "Loaded '{}' in {:.2}s: {} meshes, {} textures",
                path.to_string_lossy(),
                load_start.elapsed().as_secs_f32(),
                mesh_count,
                self.loaded_textures.len()
            ),
            Err(why) => {
                lantern_error!("Failed to load model '{}': {}", path.to_string_lossy(), why)
            }
        }

        result
    }

    fn build(
        &mut self,
        backend: &B,
        loader: &mut dyn TextureLoader,
        scene: &ImportedScene,
    ) -> Result<usize, ModelError> {
        if scene.incomplete {
            return Err(ModelError::Incomplete);
        }
        let root = match scene.root {
            Some(root) if root < scene.nodes.len() => root,
            _ => return Err(ModelError::MissingRoot),
        };

        // Depth-first pre-order with an explicit stack, children pushed in reverse to keep
        // their source order
        let mut visited = vec![false; scene.nodes.len()];
        let mut stack = vec![(root, Mat4::IDENTITY)];
        while let Some((node_index, parent_tr)) = stack.pop() {
            if visited[node_index] {
                lantern_warn!("Node {} is referenced more than once, skipping", node_index);
                continue;
            }
            visited[node_index] = true;

            let node = &scene.nodes[node_index];
            let node_tr = parent_tr * node.transform;

            for &mesh_index in &node.meshes {
                let imported = match scene.meshes.get(mesh_index) {
                    Some(mesh) => mesh,
                    None => {
                        lantern_warn!(
                            "Node '{}' references missing mesh {}",
                            node.name,
                            mesh_index
                        );
                        continue;
                    }
                };
                match self.convert_mesh(backend, loader, scene, imported) {
                    Ok(mut mesh) => {
                        mesh.set_local_tr(node_tr);
                        self.meshes.push(mesh);
                    }
                    Err(why) => lantern_error!("Skipping mesh '{}': {}", imported.name, why),
                }
            }

            for &child in node.children.iter().rev() {
                if child < scene.nodes.len() {
                    stack.push((child, node_tr));
                } else {
                    lantern_warn!("Node '{}' references missing child {}", node.name, child);
                }
            }
        }

        Ok(self.meshes.len())
    }

    fn convert_mesh(
        &mut self,
        backend: &B,
        loader: &mut dyn TextureLoader,
        scene: &ImportedScene,
        imported: &ImportedMesh,
    ) -> Result<Mesh<B>, MeshError> {
        let vertices = imported
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: imported.normals.get(i).copied().unwrap_or_default(),
                tex_coord: imported
                    .tex_coords
                    .as_ref()
                    .and_then(|uvs| uvs.get(i).copied())
                    .unwrap_or_default(),
            })
            .collect();

        let material = self.convert_material(loader, scene, imported);

        Mesh::new(backend, vertices, imported.indices.clone(), material)
    }

    fn convert_material(
        &mut self,
        loader: &mut dyn TextureLoader,
        scene: &ImportedScene,
        imported: &ImportedMesh,
    ) -> Material {
        let mut material = Material::default();

        if let Some(material_index) = imported.material {
            match scene.materials.get(material_index) {
                Some(source) => {
                    for role in TextureRole::iter() {
                        for relative_path in source.textures(role) {
                            if let Some(id) = self.texture(loader, relative_path) {
                                material.textures.push(Texture::new(id, role));
                            }
                        }
                    }
                }
                None => lantern_warn!(
                    "Mesh '{}' references missing material {}",
                    imported.name,
                    material_index
                ),
            }
        }

        if material.textures.is_empty() {
            material.color = DEFAULT_COLOR;
        }
        for role in material.overflowing_roles() {
            lantern_warn!(
                "Mesh '{}' has more than {} {} textures, the rest won't be sampled",
                imported.name,
                MAX_ROLE_TEXTURES,
                role.as_ref()
            );
        }

        material
    }

    fn texture(
        &mut self,
        loader: &mut dyn TextureLoader,
        relative_path: &Path,
    ) -> Option<TextureId> {
        let path = self.directory.join(relative_path);
        if let Some(&id) = self.loaded_textures.get(&path) {
            return Some(id);
        }
        if self.failed_textures.contains(&path) {
            return None;
        }

        match loader.load(&path) {
            Some(id) => {
                self.loaded_textures.insert(path, id);
                Some(id)
            }
            None => {
                self.failed_textures.insert(path);
                None
            }
        }
    }

    /// Draws every mesh in order. `shader` has to be the active program.
    pub fn draw(&self, shader: &ShaderProgram<'_, B>) {
        for mesh in &self.meshes {
            mesh.draw(shader);
        }
    }

    pub fn meshes(&self) -> &[Mesh<B>] {
        &self.meshes
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Number of distinct texture files uploaded for this model
    pub fn texture_count(&self) -> usize {
        self.loaded_textures.len()
    }
}
