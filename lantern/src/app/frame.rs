use glam::{Mat4, Vec3};
use std::{cell::RefCell, path::PathBuf, rc::Rc};
use strum::IntoEnumIterator;

use super::{
    scene_state::{SceneState, POINT_LIGHT_COUNT},
    settings::Settings,
};
use crate::{
    backend::Backend,
    lantern_warn,
    material::{Material, Texture, TextureRole, MAX_ROLE_TEXTURES},
    mesh::{create_cube_mesh, Mesh, MeshError},
    model::Model,
    shader::ShaderProgram,
    texture::TextureLoader,
};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

pub const CONTAINER_COUNT: usize = 6;
const CONTAINER_RING_RADIUS: f64 = 3.0;
const POINT_LIGHT_CUBE_SCALE: f32 = 0.5;

/// Per-frame uniform names
pub const GLOBAL_LIGHT_UNIFORM: &str = "globalLight";
pub const POINT_LIGHTS_UNIFORM: &str = "pointlights";
pub const SPOT_LIGHT_UNIFORM: &str = "spotLight";
pub const VIEW_POSITION_UNIFORM: &str = "viewPosition";
pub const VIEW_TR_UNIFORM: &str = "viewTr";
pub const PROJECTION_TR_UNIFORM: &str = "projectionTr";
pub const TIME_UNIFORM: &str = "time";

/// The drawable content of the demo: a ring of containers, light markers and a model.
///
/// All cubes are the same mesh, restyled and moved between draws.
pub struct DemoScene<B: Backend> {
    pub cube: Rc<RefCell<Mesh<B>>>,
    pub container_material: Material,
    pub model: Model<B>,
}

impl<B: Backend> DemoScene<B> {
    pub fn new(
        backend: &B,
        loader: &mut dyn TextureLoader,
        settings: &Settings,
    ) -> Result<Self, MeshError> {
        let container_material = container_material(loader, settings);
        let cube = create_cube_mesh(backend, container_material.clone())?;
        let model = Model::from_file(backend, loader, &settings.model);

        Ok(Self {
            cube,
            container_material,
            model,
        })
    }

    /// Draws everything with `shader`, which has to be the active program.
    pub fn draw(&self, shader: &ShaderProgram<'_, B>, state: &SceneState) {
        {
            let mut cube = self.cube.borrow_mut();

            cube.set_material(self.container_material.clone());
            cube.reset_local_tr();
            for i in 0..CONTAINER_COUNT {
                cube.set_model_tr(container_tr(i));
                cube.draw(shader);
            }

            let global_light = state.active_global_light();
            cube.set_material(Material::from_color(global_light.color));
            cube.set_model_tr(Mat4::from_translation(global_light.position));
            cube.draw(shader);

            cube.set_local_tr(Mat4::from_scale(Vec3::splat(POINT_LIGHT_CUBE_SCALE)));
            for i in 0..POINT_LIGHT_COUNT {
                let light = state.active_point_light(i);
                cube.set_material(Material::from_color(light.color));
                cube.set_model_tr(Mat4::from_translation(light.position));
                cube.draw(shader);
            }

            cube.reset_local_tr();
            cube.reset_model_tr();
        }

        self.model.draw(shader);
    }
}

/// Model transform of container `index`, counted from 0.
///
/// The containers spiral around the z axis, each one a step further along it.
pub fn container_tr(index: usize) -> Mat4 {
    let step = (index + 1) as f64;
    let angle = step * std::f64::consts::TAU / (CONTAINER_COUNT as f64);
    Mat4::from_translation(Vec3::new(
        (CONTAINER_RING_RADIUS * angle.cos()) as f32,
        (CONTAINER_RING_RADIUS * angle.sin()) as f32,
        (step / 2.0) as f32,
    ))
}

fn container_material(loader: &mut dyn TextureLoader, settings: &Settings) -> Material {
    let mut material = Material {
        shininess: settings.container.shininess,
        ..Default::default()
    };
    for role in TextureRole::iter() {
        let paths: &[PathBuf] = match role {
            TextureRole::Diffuse => &settings.container.diffuse,
            TextureRole::Specular => &settings.container.specular,
            TextureRole::Emission => &settings.container.emission,
        };
        for path in paths {
            match loader.load(path) {
                Some(id) => material.textures.push(Texture::new(id, role)),
                None => lantern_warn!(
                    "Container {} texture '{}' skipped",
                    role.as_ref(),
                    path.to_string_lossy()
                ),
            }
        }
    }
    for role in material.overflowing_roles() {
        lantern_warn!(
            "Containers have more than {} {} textures, the rest won't be sampled",
            MAX_ROLE_TEXTURES,
            role.as_ref()
        );
    }
    material
}

/// Pushes the per-frame uniforms and draws `scene`.
pub fn render_frame<B: Backend>(
    shader: &ShaderProgram<'_, B>,
    state: &SceneState,
    scene: &DemoScene<B>,
    aspect_ratio: f32,
) {
    shader.use_program();

    shader.set_uniform(GLOBAL_LIGHT_UNIFORM, &state.active_global_light());
    for i in 0..POINT_LIGHT_COUNT {
        shader.set_uniform(
            &format!("{}[{}]", POINT_LIGHTS_UNIFORM, i),
            &state.active_point_light(i),
        );
    }
    shader.set_uniform(SPOT_LIGHT_UNIFORM, &state.active_spot_light());

    shader.set_uniform(VIEW_POSITION_UNIFORM, &state.camera.position());
    shader.set_uniform(VIEW_TR_UNIFORM, &state.camera.view_matrix());
    shader.set_uniform(
        PROJECTION_TR_UNIFORM,
        &state
            .camera
            .projection_matrix(aspect_ratio, NEAR_PLANE, FAR_PLANE),
    );
    shader.set_uniform(TIME_UNIFORM, &state.time);

    scene.draw(shader, state);
}
