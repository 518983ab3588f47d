use glam::Vec3;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::{
    backend::{Backend, TextureId},
    shader::{ShaderProgram, Uniform},
};

/// What a texture feeds in the lighting equation.
///
/// The string form is the name of the matching sampler array in the material struct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TextureRole {
    Diffuse,
    Specular,
    Emission,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    pub id: TextureId,
    pub role: TextureRole,
}

impl Texture {
    pub fn new(id: TextureId, role: TextureRole) -> Self {
        Self { id, role }
    }
}

pub const DEFAULT_SHININESS: f32 = 32.0;
/// Sampler array length per role in the fragment shader
pub const MAX_ROLE_TEXTURES: u32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Used by the shader when the material has no textures
    pub color: Vec3,
    pub textures: Vec<Texture>,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ZERO,
            textures: Vec::new(),
            shininess: DEFAULT_SHININESS,
        }
    }
}

impl Material {
    pub fn from_color(color: Vec3) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Counts of textures per role, in [`TextureRole`] order.
    pub fn role_counts(&self) -> RoleCounts {
        let mut counts = RoleCounts::default();
        for texture in &self.textures {
            counts.bump(texture.role);
        }
        counts
    }

    /// Roles with more textures than the shader has sampler slots for. Textures past the
    /// limit are uploaded as uniforms but never sampled.
    pub fn overflowing_roles(&self) -> Vec<TextureRole> {
        let counts = self.role_counts();
        TextureRole::iter()
            .filter(|&role| counts.get(role) > MAX_ROLE_TEXTURES)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleCounts {
    pub diffuse: u32,
    pub specular: u32,
    pub emission: u32,
}

impl RoleCounts {
    pub fn get(&self, role: TextureRole) -> u32 {
        match role {
            TextureRole::Diffuse => self.diffuse,
            TextureRole::Specular => self.specular,
            TextureRole::Emission => self.emission,
        }
    }

    /// Increments the count of `role`, returning the count before the increment.
    fn bump(&mut self, role: TextureRole) -> u32 {
        let count = match role {
            TextureRole::Diffuse => &mut self.diffuse,
            TextureRole::Specular => &mut self.specular,
            TextureRole::Emission => &mut self.emission,
        };
        let index = *count;
        *count += 1;
        index
    }
}

impl Uniform for Material {
    /// Writes the textures as `<name>.<role>[<index in role>]` followed by the per-role counts,
    /// shininess and color. The counts bound the sampler loops on the shader side.
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        let mut counts = RoleCounts::default();
        for texture in &self.textures {
            let index = counts.bump(texture.role);
            program.set_uniform(
                &format!("{}.{}[{}]", name, texture.role.as_ref(), index),
                &texture.id,
            );
        }

        program.set_uniform(
            &format!("{}.diffuseTexturesNumber", name),
            &(counts.diffuse as i32),
        );
        program.set_uniform(
            &format!("{}.specularTexturesNumber", name),
            &(counts.specular as i32),
        );
        program.set_uniform(
            &format!("{}.emissionTexturesNumber", name),
            &(counts.emission as i32),
        );
        program.set_uniform(&format!("{}.shininess", name), &self.shininess);
        program.set_uniform(&format!("{}.color", name), &self.color);
    }
}
