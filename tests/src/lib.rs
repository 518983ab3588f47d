
mod model;
mod shader;
