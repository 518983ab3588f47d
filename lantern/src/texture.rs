use std::{fmt, path::Path};

use crate::{
    backend::{Backend, GpuError, TextureId},
    lantern_error, lantern_info,
};

/// Turns image files into GPU textures
pub trait TextureLoader {
    /// Returns `None` if the image couldn't be read, decoded or uploaded. The failure is
    /// logged and callers treat the texture as absent.
    fn load(&mut self, path: &Path) -> Option<TextureId>;
}

#[derive(Debug)]
pub enum LoadError {
    DecodeError(image::error::ImageError),
    UploadError(GpuError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::DecodeError(why) => write!(f, "{}", why),
            LoadError::UploadError(why) => write!(f, "{}", why),
        }
    }
}

impl std::error::Error for LoadError {}

/// Decodes images from disk and uploads them through a [`Backend`]
pub struct ImageTextureLoader<'a, B: Backend> {
    backend: &'a B,
}

impl<'a, B: Backend> ImageTextureLoader<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub fn try_load(&self, path: &Path) -> Result<TextureId, LoadError> {
        let img = image::open(path).map_err(LoadError::DecodeError)?;
        // Images are stored top row first but GL expects the bottom row first
        let img = image::imageops::flip_vertical(&img.to_rgba8());
        self.backend
            .create_texture(img)
            .map_err(LoadError::UploadError)
    }
}

impl<'a, B: Backend> TextureLoader for ImageTextureLoader<'a, B> {
    fn load(&mut self, path: &Path) -> Option<TextureId> {
        match self.try_load(path) {
            Ok(id) => {
                lantern_info!("Loaded texture '{}'", path.to_string_lossy());
                Some(id)
            }
            Err(why) => {
                lantern_error!(
                    "Failed to load texture '{}': {}",
                    path.to_string_lossy(),
                    why
                );
                None
            }
        }
    }
}
