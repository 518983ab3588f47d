mod frame;
mod input;
mod scene_state;
mod settings;
mod window;

pub use frame::{
    container_tr, render_frame, DemoScene, CONTAINER_COUNT, FAR_PLANE, GLOBAL_LIGHT_UNIFORM,
    NEAR_PLANE, POINT_LIGHTS_UNIFORM, PROJECTION_TR_UNIFORM, SPOT_LIGHT_UNIFORM, TIME_UNIFORM,
    VIEW_POSITION_UNIFORM, VIEW_TR_UNIFORM,
};
pub use input::{
    apply_held_keys, handle_cursor, handle_focus, handle_key, handle_pixel_scroll, handle_scroll,
    Key,
};
pub use scene_state::{LightToggles, SceneState, POINT_LIGHT_COUNT, WARM_LIGHT_COLOR};
pub use settings::{ContainerSettings, Settings, SettingsError};
pub use window::Window;

use std::fmt;

use crate::{
    lantern_info,
    mesh::MeshError,
    shader::{ShaderError, ShaderProgram},
    texture::ImageTextureLoader,
};

#[derive(Debug)]
pub enum AppError {
    Display(glium::backend::glutin::DisplayCreationError),
    Shader(ShaderError),
    Scene(MeshError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Display(why) => write!(f, "Failed to initialize glium display: {}", why),
            AppError::Shader(why) => write!(f, "Failed to build the main shader: {}", why),
            AppError::Scene(why) => write!(f, "Failed to create scene geometry: {}", why),
        }
    }
}

impl std::error::Error for AppError {}

/// Opens the window and runs the frame loop until the user quits.
///
/// Only returns on setup failure.
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let window = Window::new(settings).map_err(AppError::Display)?;
    let backend = window.backend();

    let shader = ShaderProgram::create(backend, &settings.vertex_shader, &settings.fragment_shader)
        .map_err(AppError::Shader)?;

    let mut loader = ImageTextureLoader::new(backend);
    let scene = DemoScene::new(backend, &mut loader, settings).map_err(AppError::Scene)?;

    let state = SceneState::new(settings.invert_mouse_y);

    lantern_info!("Setup done, entering main loop");
    window.main_loop(shader, scene, state)
}
