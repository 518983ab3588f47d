#[doc(hidden)]
pub use log;

mod macros;

pub mod app;
pub mod backend;
pub mod camera;
pub mod lights;
pub mod material;
pub mod mesh;
pub mod model;
pub mod shader;
pub mod texture;
