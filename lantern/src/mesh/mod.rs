mod cube;

pub use cube::{create_cube_mesh, cube_mesh, CUBE_INDICES, CUBE_VERTICES};

use glam::{Mat4, Vec2, Vec3};
use std::fmt;

use crate::{
    backend::{Backend, GpuError},
    lantern_error,
    material::Material,
    shader::ShaderProgram,
};

/// Name of the composed model transform uniform
pub const MODEL_TR_UNIFORM: &str = "modelTr";
/// Name of the material struct uniform
pub const MATERIAL_UNIFORM: &str = "material";

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coord: tex_coord.to_array(),
        }
    }
}

#[derive(Debug)]
pub enum MeshError {
    IndexOutOfRange { index: u32, vertex_count: usize },
    Gpu(GpuError),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(
                f,
                "Index {} is out of range for {} vertices",
                index, vertex_count
            ),
            MeshError::Gpu(why) => write!(f, "{}", why),
        }
    }
}

impl std::error::Error for MeshError {}

/// A triangle list with its material and placement.
///
/// GPU buffers are created once in [`Mesh::new`] and released with the mesh. The final
/// transform is `model_tr * local_tr`: `local_tr` adjusts the shape itself and stays put
/// while `model_tr` places it for each draw.
pub struct Mesh<B: Backend> {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    material: Material,
    local_tr: Mat4,
    model_tr: Mat4,
    // None for meshes without indices, nothing to draw
    geometry: Option<B::Geometry>,
}

impl<B: Backend> Mesh<B> {
    pub fn new(
        backend: &B,
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        material: Material,
    ) -> Result<Self, MeshError> {
        if let Some(&index) = indices.iter().find(|&&i| (i as usize) >= vertices.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let geometry = if indices.is_empty() {
            None
        } else {
            Some(
                backend
                    .create_geometry(&vertices, &indices)
                    .map_err(MeshError::Gpu)?,
            )
        };

        Ok(Self {
            vertices,
            indices,
            material,
            local_tr: Mat4::IDENTITY,
            model_tr: Mat4::IDENTITY,
            geometry,
        })
    }

    /// Draws the mesh with `shader`, which has to be the active program already.
    pub fn draw(&self, shader: &ShaderProgram<'_, B>) {
        let geometry = match &self.geometry {
            Some(geometry) => geometry,
            None => return,
        };

        shader.set_uniform(MODEL_TR_UNIFORM, &self.transform());
        shader.set_uniform(MATERIAL_UNIFORM, &self.material);
        if let Err(why) = shader.draw(geometry) {
            lantern_error!("Mesh draw failed: {}", why);
        }
    }

    /// The composed `model_tr * local_tr`.
    pub fn transform(&self) -> Mat4 {
        self.model_tr * self.local_tr
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Swaps the whole material, the GPU buffers stay as they are.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn local_tr(&self) -> Mat4 {
        self.local_tr
    }

    pub fn set_local_tr(&mut self, tr: Mat4) {
        self.local_tr = tr;
    }

    pub fn reset_local_tr(&mut self) {
        self.local_tr = Mat4::IDENTITY;
    }

    pub fn model_tr(&self) -> Mat4 {
        self.model_tr
    }

    pub fn set_model_tr(&mut self, tr: Mat4) {
        self.model_tr = tr;
    }

    pub fn reset_model_tr(&mut self) {
        self.model_tr = Mat4::IDENTITY;
    }
}
