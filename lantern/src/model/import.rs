use glam::Mat4;
use std::{
    fmt,
    path::{Path, PathBuf},
};

use super::{gltf_importer::GltfImporter, obj_importer::ObjImporter};
use crate::material::TextureRole;

/// A scene graph as handed over by an importer, before anything touches the GPU.
///
/// Nodes, meshes and materials reference each other by index into the flat arrays.
#[derive(Clone, Debug, Default)]
pub struct ImportedScene {
    pub nodes: Vec<ImportedNode>,
    pub meshes: Vec<ImportedMesh>,
    pub materials: Vec<ImportedMaterial>,
    pub root: Option<usize>,
    /// Set when the importer couldn't produce usable geometry
    pub incomplete: bool,
}

#[derive(Clone, Debug)]
pub struct ImportedNode {
    pub name: String,
    /// Relative to the parent node
    pub transform: Mat4,
    pub meshes: Vec<usize>,
    pub children: Vec<usize>,
}

impl Default for ImportedNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Mat4::IDENTITY,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    /// Either empty or one per position
    pub normals: Vec<[f32; 3]>,
    /// First UV channel if the source has one
    pub tex_coords: Option<Vec<[f32; 2]>>,
    /// Triangle list
    pub indices: Vec<u32>,
    pub material: Option<usize>,
}

/// Texture file paths per role, relative to the scene file
#[derive(Clone, Debug, Default)]
pub struct ImportedMaterial {
    pub name: String,
    pub diffuse: Vec<PathBuf>,
    pub specular: Vec<PathBuf>,
    pub emission: Vec<PathBuf>,
}

impl ImportedMaterial {
    pub fn textures(&self, role: TextureRole) -> &[PathBuf] {
        match role {
            TextureRole::Diffuse => &self.diffuse,
            TextureRole::Specular => &self.specular,
            TextureRole::Emission => &self.emission,
        }
    }
}

#[derive(Debug)]
pub enum ImportError {
    Gltf(gltf::Error),
    Obj(tobj::LoadError),
    UnsupportedFormat(PathBuf),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Gltf(why) => write!(f, "glTF: {}", why),
            ImportError::Obj(why) => write!(f, "OBJ: {}", why),
            ImportError::UnsupportedFormat(path) => {
                write!(f, "Unsupported scene file '{}'", path.to_string_lossy())
            }
        }
    }
}

impl std::error::Error for ImportError {}

impl From<gltf::Error> for ImportError {
    fn from(why: gltf::Error) -> Self {
        ImportError::Gltf(why)
    }
}

impl From<tobj::LoadError> for ImportError {
    fn from(why: tobj::LoadError) -> Self {
        ImportError::Obj(why)
    }
}

/// Parses a scene file into an [`ImportedScene`]. Faces come out as triangles.
pub trait SceneImporter {
    fn import(&self, path: &Path) -> Result<ImportedScene, ImportError>;
}

/// Picks an importer by file extension.
pub fn importer_for(path: &Path) -> Result<Box<dyn SceneImporter>, ImportError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("gltf") | Some("glb") => Ok(Box::new(GltfImporter::default())),
        Some("obj") => Ok(Box::new(ObjImporter::default())),
        _ => Err(ImportError::UnsupportedFormat(path.to_path_buf())),
    }
}
