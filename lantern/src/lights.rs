use glam::Vec3;

use crate::{
    backend::Backend,
    shader::{ShaderProgram, Uniform},
};

// The three light kinds share a few field names on the shader side but are otherwise
// independent. Each one writes its own exhaustive field list.

/// Directional light covering the whole scene
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlobalLight {
    pub color: Vec3,
    /// Stands for the negated light direction
    pub position: Vec3,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
}

impl Default for GlobalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            position: Vec3::ZERO,
            ambient_intensity: 0.3,
            diffuse_intensity: 0.7,
            specular_intensity: 1.0,
        }
    }
}

impl Uniform for GlobalLight {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_uniform(&format!("{}.ambientIntensity", name), &self.ambient_intensity);
        program.set_uniform(&format!("{}.diffuseIntensity", name), &self.diffuse_intensity);
        program.set_uniform(
            &format!("{}.specularIntensity", name),
            &self.specular_intensity,
        );
        program.set_uniform(&format!("{}.color", name), &self.color);
        program.set_uniform(&format!("{}.position", name), &self.position);
    }
}

/// Omnidirectional light with distance attenuation `1 / (constant + linear*d + quadratic*d^2)`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub position: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            position: Vec3::ZERO,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient_intensity: 0.3,
            diffuse_intensity: 0.7,
            specular_intensity: 1.0,
        }
    }
}

impl Uniform for PointLight {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_uniform(&format!("{}.ambientIntensity", name), &self.ambient_intensity);
        program.set_uniform(&format!("{}.diffuseIntensity", name), &self.diffuse_intensity);
        program.set_uniform(
            &format!("{}.specularIntensity", name),
            &self.specular_intensity,
        );
        program.set_uniform(&format!("{}.color", name), &self.color);
        program.set_uniform(&format!("{}.position", name), &self.position);
        program.set_uniform(&format!("{}.constant", name), &self.constant);
        program.set_uniform(&format!("{}.linear", name), &self.linear);
        program.set_uniform(&format!("{}.quadratic", name), &self.quadratic);
    }
}

/// Cone light with the same attenuation as [`PointLight`].
///
/// The cutoffs are cosines of the inner and outer cone half-angles so the shader can compare
/// them directly against a dot product.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub color: Vec3,
    pub position: Vec3,
    pub direction: Vec3,
    pub cut_off: f32,
    pub outer_cut_off: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient_intensity: f32,
    pub diffuse_intensity: f32,
    pub specular_intensity: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            position: Vec3::ZERO,
            direction: Vec3::X,
            cut_off: 12.5_f32.to_radians().cos(),
            outer_cut_off: 15.0_f32.to_radians().cos(),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient_intensity: 0.0,
            diffuse_intensity: 1.0,
            specular_intensity: 1.0,
        }
    }
}

impl Uniform for SpotLight {
    fn set_on<B: Backend>(&self, program: &ShaderProgram<'_, B>, name: &str) {
        program.set_uniform(&format!("{}.ambientIntensity", name), &self.ambient_intensity);
        program.set_uniform(&format!("{}.diffuseIntensity", name), &self.diffuse_intensity);
        program.set_uniform(
            &format!("{}.specularIntensity", name),
            &self.specular_intensity,
        );
        program.set_uniform(&format!("{}.color", name), &self.color);
        program.set_uniform(&format!("{}.position", name), &self.position);
        program.set_uniform(&format!("{}.direction", name), &self.direction);
        program.set_uniform(&format!("{}.constant", name), &self.constant);
        program.set_uniform(&format!("{}.linear", name), &self.linear);
        program.set_uniform(&format!("{}.quadratic", name), &self.quadratic);
        program.set_uniform(&format!("{}.cutOff", name), &self.cut_off);
        program.set_uniform(&format!("{}.outerCutOff", name), &self.outer_cut_off);
    }
}
