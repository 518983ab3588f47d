use std::{cell::RefCell, rc::Rc};

use super::{Mesh, MeshError, Vertex};
use crate::{backend::Backend, material::Material};

const fn v(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        tex_coord,
    }
}

/// Unit cube centered at the origin, four vertices per face so each face gets a flat normal
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 24] = [
    // -Z
    v([-0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
    // +Z
    v([-0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
    v([-0.5,  0.5,  0.5], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
    // -X
    v([-0.5, -0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 0.0]),
    v([-0.5, -0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 0.0]),
    v([-0.5,  0.5,  0.5], [-1.0,  0.0,  0.0], [1.0, 1.0]),
    v([-0.5,  0.5, -0.5], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    // +X
    v([ 0.5, -0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
    v([ 0.5, -0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
    v([ 0.5,  0.5,  0.5], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
    // -Y
    v([-0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
    v([ 0.5, -0.5, -0.5], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
    v([ 0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
    v([-0.5, -0.5,  0.5], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
    // +Y
    v([-0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
    v([ 0.5,  0.5,  0.5], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
    v([ 0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
    v([-0.5,  0.5, -0.5], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
];

/// Two counter-clockwise triangles per face
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  2,  1,  0,  3,  2,
     4,  5,  6,  4,  6,  7,
     8,  9, 10,  8, 10, 11,
    12, 13, 14, 12, 14, 15,
    16, 17, 18, 16, 18, 19,
    20, 21, 22, 20, 22, 23,
];

/// Creates a unit cube with `material`.
pub fn cube_mesh<B: Backend>(backend: &B, material: Material) -> Result<Mesh<B>, MeshError> {
    Mesh::new(
        backend,
        CUBE_VERTICES.to_vec(),
        CUBE_INDICES.to_vec(),
        material,
    )
}

/// Creates a unit cube behind a shared handle so several draw sites can restyle and place the
/// same buffers.
pub fn create_cube_mesh<B: Backend>(
    backend: &B,
    material: Material,
) -> Result<Rc<RefCell<Mesh<B>>>, MeshError> {
    Ok(Rc::new(RefCell::new(cube_mesh(backend, material)?)))
}
