mod glium_backend;

pub use glium_backend::GliumBackend;

use std::fmt;
use strum::{AsRefStr, EnumIter};

use crate::mesh::Vertex;

/// Opaque handle to a texture uploaded through a [`Backend`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum StageKind {
    Vertex,
    Fragment,
}

/// A value that can be written to a single named uniform
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Vec3([f32; 3]),
    Mat4([[f32; 4]; 4]),
    Texture(TextureId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GpuError {
    Compile { stage: StageKind, log: String },
    Link(String),
    Buffer(String),
    Texture(String),
    Draw(String),
    NoFrame,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::Compile { stage, log } => {
                write!(f, "{} stage compilation failed: {}", stage.as_ref(), log)
            }
            GpuError::Link(log) => write!(f, "Program linkage failed: {}", log),
            GpuError::Buffer(msg) => write!(f, "Buffer creation failed: {}", msg),
            GpuError::Texture(msg) => write!(f, "Texture creation failed: {}", msg),
            GpuError::Draw(msg) => write!(f, "Draw failed: {}", msg),
            GpuError::NoFrame => write!(f, "Draw issued outside of a frame"),
        }
    }
}

impl std::error::Error for GpuError {}

/// The native graphics API as seen by the rest of the crate.
///
/// Resources are returned as owned values and released when dropped, so whoever holds a
/// `Program` or `Geometry` is its sole owner. Methods take `&self` since the pipeline state
/// behind them is global and the whole renderer runs on one thread.
pub trait Backend {
    type Stage;
    type Program;
    type Geometry;

    fn compile_stage(&self, kind: StageKind, source: &str) -> Result<Self::Stage, GpuError>;

    fn link_program(
        &self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, GpuError>;

    /// Makes `program` the target of subsequent draws.
    fn use_program(&self, program: &Self::Program);

    /// Writes `value` to the uniform `name` of `program`.
    ///
    /// Names that don't resolve to a live uniform are ignored.
    fn set_uniform(&self, program: &Self::Program, name: &str, value: UniformValue);

    fn create_geometry(&self, vertices: &[Vertex], indices: &[u32])
        -> Result<Self::Geometry, GpuError>;

    /// Draws all of `geometry`'s indices as triangles with `program`, which has to be the
    /// active one.
    fn draw(&self, program: &Self::Program, geometry: &Self::Geometry) -> Result<(), GpuError>;

    /// Uploads an RGBA8 image with mipmaps. Textures live as long as the backend.
    fn create_texture(&self, image: image::RgbaImage) -> Result<TextureId, GpuError>;
}
