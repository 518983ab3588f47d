use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::lantern_warn;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub model: PathBuf,
    pub container: ContainerSettings,
    pub clear_color: [f32; 3],
    pub invert_mouse_y: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "lantern".into(),
            width: 800,
            height: 600,
            vertex_shader: PathBuf::from("shaders/shader.vs"),
            fragment_shader: PathBuf::from("shaders/shader.fs"),
            model: PathBuf::from("samples/backpack/backpack.obj"),
            container: ContainerSettings::default(),
            clear_color: [0.1, 0.1, 0.1],
            invert_mouse_y: false,
        }
    }
}

/// Textures of the crates circling the model
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerSettings {
    pub diffuse: Vec<PathBuf>,
    pub specular: Vec<PathBuf>,
    pub emission: Vec<PathBuf>,
    pub shininess: f32,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            diffuse: vec![PathBuf::from("samples/container.png")],
            specular: vec![PathBuf::from("samples/containerMetalBorder.png")],
            emission: vec![PathBuf::from("samples/matrix.jpg")],
            shininess: 1024.0,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_yaml::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(path, why) => {
                write!(f, "Failed to read '{}': {}", path.to_string_lossy(), why)
            }
            SettingsError::Parse(path, why) => {
                write!(f, "Failed to parse '{}': {}", path.to_string_lossy(), why)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Reads settings from a YAML file.
    ///
    /// A missing file gives the defaults, fields missing from the file get their default values.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            lantern_warn!(
                "Settings file '{}' not found, using defaults",
                path.to_string_lossy()
            );
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .map_err(|why| SettingsError::Io(path.to_path_buf(), why))?;
        serde_yaml::from_str(&text).map_err(|why| SettingsError::Parse(path.to_path_buf(), why))
    }

    /// Resolves the asset paths relative to `dir`. Absolute paths are left alone.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        let root = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        };
        root(&mut self.vertex_shader);
        root(&mut self.fragment_shader);
        root(&mut self.model);
        self.container
            .diffuse
            .iter_mut()
            .chain(self.container.specular.iter_mut())
            .chain(self.container.emission.iter_mut())
            .for_each(root);
        self
    }
}
