use glam::{Mat4, Vec3};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    backend::{Backend, GpuError, StageKind, TextureId, UniformValue},
    lantern_error, lantern_info,
};

/// Something that can be written to the uniform(s) under a name.
///
/// Plain values map to a single uniform, aggregates like materials and lights fan out to
/// `<name>.<field>` uniforms.
pub trait Uniform {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str);
}

#[derive(Debug)]
pub enum ShaderError {
    MissingFile(PathBuf),
    Io(PathBuf, std::io::Error),
    EmptySource(StageKind),
    Compile { stage: StageKind, log: String },
    Link(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::MissingFile(path) => {
                write!(f, "Can't find shader file '{}'", path.to_string_lossy())
            }
            ShaderError::Io(path, why) => {
                write!(f, "Failed to read '{}': {}", path.to_string_lossy(), why)
            }
            ShaderError::EmptySource(stage) => write!(f, "{} shader: Empty source", stage.as_ref()),
            ShaderError::Compile { stage, log } => {
                write!(f, "{} shader: Compilation failed\n{}", stage.as_ref(), log)
            }
            ShaderError::Link(log) => write!(f, "Program: Linkage failed\n{}", log),
        }
    }
}

impl std::error::Error for ShaderError {}

impl From<GpuError> for ShaderError {
    fn from(why: GpuError) -> Self {
        match why {
            GpuError::Compile { stage, log } => ShaderError::Compile { stage, log },
            GpuError::Link(log) => ShaderError::Link(log),
            other => ShaderError::Link(other.to_string()),
        }
    }
}

/// A linked vertex + fragment program.
///
/// The program doesn't remember scene state between frames: whatever a draw reads has to be
/// written before it. Not `Clone` since the native program must have a single owner.
pub struct ShaderProgram<'a, B: Backend> {
    backend: &'a B,
    program: B::Program,
}

impl<'a, B: Backend> ShaderProgram<'a, B> {
    /// Reads, compiles and links the two stage sources.
    ///
    /// Every failure is logged before it is returned.
    pub fn create(
        backend: &'a B,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex_source = read_source(vertex_path)?;
        let fragment_source = read_source(fragment_path)?;

        let program = Self::from_sources(backend, &vertex_source, &fragment_source)?;
        lantern_info!(
            "Built program from '{}' and '{}'",
            vertex_path.to_string_lossy(),
            fragment_path.to_string_lossy()
        );

        Ok(program)
    }

    /// Compiles and links the two stage sources.
    pub fn from_sources(
        backend: &'a B,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(backend, StageKind::Vertex, vertex_source)?;
        // Early returns from here on drop the vertex stage, releasing it
        let fragment = compile_stage(backend, StageKind::Fragment, fragment_source)?;

        let program = backend.link_program(&vertex, &fragment).map_err(|why| {
            let why = ShaderError::from(why);
            lantern_error!("{}", why);
            why
        })?;

        Ok(Self { backend, program })
    }

    /// Makes this the active program for subsequent draws.
    pub fn use_program(&self) {
        self.backend.use_program(&self.program);
    }

    pub fn set_uniform<U: Uniform + ?Sized>(&self, name: &str, value: &U) {
        value.set_on(self, name);
    }

    pub fn set_value(&self, name: &str, value: UniformValue) {
        self.backend.set_uniform(&self.program, name, value);
    }

    /// Issues an indexed draw of `geometry` with this program.
    ///
    /// Doesn't activate the program, see [`ShaderProgram::use_program`].
    pub fn draw(&self, geometry: &B::Geometry) -> Result<(), GpuError> {
        self.backend.draw(&self.program, geometry)
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    if !path.is_file() {
        let why = ShaderError::MissingFile(path.to_path_buf());
        lantern_error!("{}", why);
        return Err(why);
    }

    std::fs::read_to_string(path).map_err(|e| {
        let why = ShaderError::Io(path.to_path_buf(), e);
        lantern_error!("{}", why);
        why
    })
}

fn compile_stage<B: Backend>(
    backend: &B,
    kind: StageKind,
    source: &str,
) -> Result<B::Stage, ShaderError> {
    if source.trim().is_empty() {
        let why = ShaderError::EmptySource(kind);
        lantern_error!("{}", why);
        return Err(why);
    }

    backend.compile_stage(kind, source).map_err(|why| {
        let why = ShaderError::from(why);
        lantern_error!("{}", why);
        why
    })
}

impl Uniform for bool {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::Bool(*self));
    }
}

impl Uniform for i32 {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::Int(*self));
    }
}

impl Uniform for u32 {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::UInt(*self));
    }
}

impl Uniform for f32 {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::Float(*self));
    }
}

impl Uniform for Vec3 {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::Vec3(self.to_array()));
    }
}

impl Uniform for Mat4 {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        // Column major like GL expects
        program.set_value(name, UniformValue::Mat4(self.to_cols_array_2d()));
    }
}

impl Uniform for TextureId {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_value(name, UniformValue::Texture(*self));
    }
}
