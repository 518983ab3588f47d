use glium::{program::ShaderType, Surface};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use super::{Backend, GpuError, StageKind, TextureId, UniformValue};
use crate::{lantern_debug, lantern_trace, lantern_warn, mesh::Vertex};

glium::implement_vertex!(Vertex, position, normal, tex_coord);

/// Stage source held until link time, glium compiles both stages when building the program
pub struct GliumStage {
    kind: StageKind,
    source: String,
}

pub struct GliumProgram {
    id: u64,
    program: glium::Program,
    uniforms: RefCell<HashMap<String, UniformValue>>,
}

pub struct GliumGeometry {
    vertex_buffer: glium::VertexBuffer<Vertex>,
    index_buffer: glium::IndexBuffer<u32>,
}

/// [`Backend`] on top of a glium display
pub struct GliumBackend {
    display: glium::Display,
    frame: RefCell<Option<glium::Frame>>,
    textures: RefCell<Vec<glium::Texture2d>>,
    next_program_id: Cell<u64>,
    active_program: Cell<Option<u64>>,
}

impl GliumBackend {
    pub fn new(display: glium::Display) -> Self {
        Self {
            display,
            frame: RefCell::new(None),
            textures: RefCell::new(Vec::new()),
            next_program_id: Cell::new(0),
            active_program: Cell::new(None),
        }
    }

    pub fn display(&self) -> &glium::Display {
        &self.display
    }

    /// Starts a new frame and clears its color and depth.
    pub fn begin_frame(&self, clear_color: [f32; 3]) {
        // A frame left over from an interrupted loop iteration panics on drop if it isn't
        // finished first
        if let Some(stale) = self.frame.borrow_mut().take() {
            if let Err(why) = stale.finish() {
                lantern_warn!("Failed to finish a stale frame: {:?}", why);
            }
        }

        let mut frame = self.display.draw();
        frame.clear_color_and_depth((clear_color[0], clear_color[1], clear_color[2], 1.0), 1.0);
        *self.frame.borrow_mut() = Some(frame);
    }

    /// Swaps the current frame to the window.
    pub fn end_frame(&self) -> Result<(), glium::SwapBuffersError> {
        match self.frame.borrow_mut().take() {
            Some(frame) => frame.finish(),
            None => Ok(()),
        }
    }

    /// Current framebuffer aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.display.get_framebuffer_dimensions();
        if height == 0 {
            1.0
        } else {
            (width as f32) / (height as f32)
        }
    }
}

impl Backend for GliumBackend {
    type Stage = GliumStage;
    type Program = GliumProgram;
    type Geometry = GliumGeometry;

    fn compile_stage(&self, kind: StageKind, source: &str) -> Result<Self::Stage, GpuError> {
        Ok(GliumStage {
            kind,
            source: source.to_string(),
        })
    }

    fn link_program(
        &self,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, GpuError> {
        if vertex.kind != StageKind::Vertex || fragment.kind != StageKind::Fragment {
            return Err(GpuError::Link(format!(
                "Expected vertex and fragment stages, got {} and {}",
                vertex.kind.as_ref(),
                fragment.kind.as_ref()
            )));
        }

        let program =
            glium::Program::from_source(&self.display, &vertex.source, &fragment.source, None)
                .map_err(|why| match why {
                    glium::ProgramCreationError::CompilationError(log, ShaderType::Vertex) => {
                        GpuError::Compile {
                            stage: StageKind::Vertex,
                            log,
                        }
                    }
                    glium::ProgramCreationError::CompilationError(log, ShaderType::Fragment) => {
                        GpuError::Compile {
                            stage: StageKind::Fragment,
                            log,
                        }
                    }
                    glium::ProgramCreationError::LinkingError(log) => GpuError::Link(log),
                    other => GpuError::Link(format!("{:?}", other)),
                })?;

        let id = self.next_program_id.get();
        self.next_program_id.set(id + 1);
        lantern_debug!("Linked program {}", id);

        Ok(GliumProgram {
            id,
            program,
            uniforms: RefCell::new(HashMap::new()),
        })
    }

    fn use_program(&self, program: &Self::Program) {
        self.active_program.set(Some(program.id));
    }

    fn set_uniform(&self, program: &Self::Program, name: &str, value: UniformValue) {
        if program.program.get_uniform(name).is_none() {
            lantern_trace!("Uniform '{}' is not active in program {}", name, program.id);
            return;
        }
        program
            .uniforms
            .borrow_mut()
            .insert(name.to_string(), value);
    }

    fn create_geometry(
        &self,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Self::Geometry, GpuError> {
        let vertex_buffer = glium::VertexBuffer::new(&self.display, vertices)
            .map_err(|why| GpuError::Buffer(format!("{:?}", why)))?;
        let index_buffer = glium::IndexBuffer::new(
            &self.display,
            glium::index::PrimitiveType::TrianglesList,
            indices,
        )
        .map_err(|why| GpuError::Buffer(format!("{:?}", why)))?;

        Ok(GliumGeometry {
            vertex_buffer,
            index_buffer,
        })
    }

    fn draw(&self, program: &Self::Program, geometry: &Self::Geometry) -> Result<(), GpuError> {
        if self.active_program.get() != Some(program.id) {
            return Err(GpuError::Draw(format!(
                "Program {} is not the active program",
                program.id
            )));
        }

        let mut frame = self.frame.borrow_mut();
        let frame = frame.as_mut().ok_or(GpuError::NoFrame)?;

        let values = program.uniforms.borrow();
        let textures = self.textures.borrow();
        let uniforms = UniformTable {
            values: &values,
            textures: &textures,
        };

        let params = glium::DrawParameters {
            depth: glium::Depth {
                test: glium::draw_parameters::DepthTest::IfLess,
                write: true,
                ..Default::default()
            },
            ..Default::default()
        };

        frame
            .draw(
                &geometry.vertex_buffer,
                &geometry.index_buffer,
                &program.program,
                &uniforms,
                &params,
            )
            .map_err(|why| GpuError::Draw(format!("{:?}", why)))
    }

    fn create_texture(&self, image: image::RgbaImage) -> Result<TextureId, GpuError> {
        let dimensions = image.dimensions();
        let raw = glium::texture::RawImage2d::from_raw_rgba(image.into_raw(), dimensions);
        let texture = glium::Texture2d::new(&self.display, raw)
            .map_err(|why| GpuError::Texture(format!("{:?}", why)))?;

        let mut textures = self.textures.borrow_mut();
        let id = TextureId(textures.len() as u32);
        textures.push(texture);
        lantern_debug!(
            "Uploaded texture {} ({}x{})",
            id.0,
            dimensions.0,
            dimensions.1
        );

        Ok(id)
    }
}

struct UniformTable<'a> {
    values: &'a HashMap<String, UniformValue>,
    textures: &'a [glium::Texture2d],
}

impl<'a> glium::uniforms::Uniforms for UniformTable<'a> {
    fn visit_values<'b, F: FnMut(&str, glium::uniforms::UniformValue<'b>)>(
        &'b self,
        mut output: F,
    ) {
        use glium::uniforms::UniformValue as Value;

        for (name, value) in self.values {
            let value = match *value {
                UniformValue::Bool(v) => Value::Bool(v),
                UniformValue::Int(v) => Value::SignedInt(v),
                UniformValue::UInt(v) => Value::UnsignedInt(v),
                UniformValue::Float(v) => Value::Float(v),
                UniformValue::Vec3(v) => Value::Vec3(v),
                UniformValue::Mat4(v) => Value::Mat4(v),
                UniformValue::Texture(TextureId(id)) => match self.textures.get(id as usize) {
                    Some(texture) => Value::Texture2d(texture, None),
                    None => continue,
                },
            };
            output(name, value);
        }
    }
}
