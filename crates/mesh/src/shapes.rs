//! Hardcoded scene geometry.

use crate::normals::{MeshError, compute_face_normals};
use crate::vertex::{LightVertex, Mesh, Vertex};

const HULL: [f32; 3] = [1.00, 1.00, 1.00];
const WING: [f32; 3] = [0.00, 0.55, 0.96];

/// Ship triangles as corner positions; color is assigned per section.
#[rustfmt::skip]
const HULL_TRIANGLES: [[[f32; 3]; 3]; 10] = [
    // belly
    [[-1.000,  0.000,  0.000], [ 1.000,  0.000,  0.000], [ 0.000, -0.500, -0.250]],
    // cockpit
    [[-1.000,  0.000,  0.000], [-0.750,  1.000,  0.000], [ 0.000,  0.600,  2.000]],
    [[-0.750,  1.000,  0.000], [ 0.000,  1.000,  0.000], [ 0.000,  0.600,  2.000]],
    [[ 0.000,  1.000,  0.000], [ 0.750,  1.000,  0.000], [ 0.000,  0.600,  2.000]],
    [[ 0.750,  1.000,  0.000], [ 1.000,  0.000,  0.000], [ 0.000,  0.600,  2.000]],
    // nose
    [[-1.000,  0.000,  0.000], [-0.750,  1.000,  0.000], [ 0.000,  0.250, -6.000]],
    [[-0.750,  1.000,  0.000], [ 0.750,  1.000,  0.000], [ 0.000,  0.250, -6.000]],
    [[ 0.750,  1.000,  0.000], [ 1.000,  0.000,  0.000], [ 0.000,  0.250, -6.000]],
    [[-1.000,  0.000,  0.000], [ 0.000, -0.500, -0.250], [ 0.000,  0.250, -6.000]],
    [[ 1.000,  0.000,  0.000], [ 0.000, -0.500, -0.250], [ 0.000,  0.250, -6.000]],
];

#[rustfmt::skip]
const WING_TRIANGLES: [[[f32; 3]; 3]; 16] = [
    // left fin
    [[-1.000,  0.000,  0.000], [-2.000,  0.000,  0.000], [-1.500,  4.000,  2.000]],
    [[-2.000,  0.000,  0.000], [-1.750,  0.750, -1.000], [-1.500,  4.000,  2.000]],
    [[-1.750,  0.750, -1.000], [-1.000,  0.000,  0.000], [-1.500,  4.000,  2.000]],
    [[-1.000,  0.000,  0.000], [-2.000,  0.000,  0.000], [-1.750,  0.750, -1.000]],
    // left wing
    [[-1.000,  0.000,  0.000], [-1.500, -1.000,  0.000], [-4.000, -1.250,  5.000]],
    [[-1.000,  0.000,  0.000], [-2.000,  0.000,  0.000], [-4.000, -1.250,  5.000]],
    [[-2.000,  0.000,  0.000], [-1.500, -1.000,  0.000], [-4.000, -1.250,  5.000]],
    [[-1.000,  0.000,  0.000], [-2.000,  0.000,  0.000], [-1.500, -1.000,  0.000]],
    // right fin
    [[ 1.000,  0.000,  0.000], [ 2.000,  0.000,  0.000], [ 1.500,  4.000,  2.000]],
    [[ 2.000,  0.000,  0.000], [ 1.750,  0.750, -1.000], [ 1.500,  4.000,  2.000]],
    [[ 1.750,  0.750, -1.000], [ 1.000,  0.000,  0.000], [ 1.500,  4.000,  2.000]],
    [[ 1.000,  0.000,  0.000], [ 2.000,  0.000,  0.000], [ 1.750,  0.750, -1.000]],
    // right wing
    [[ 1.000,  0.000,  0.000], [ 1.500, -1.000,  0.000], [ 4.000, -1.250,  5.000]],
    [[ 1.000,  0.000,  0.000], [ 2.000,  0.000,  0.000], [ 4.000, -1.250,  5.000]],
    [[ 2.000,  0.000,  0.000], [ 1.500, -1.000,  0.000], [ 4.000, -1.250,  5.000]],
    [[ 1.000,  0.000,  0.000], [ 2.000,  0.000,  0.000], [ 1.500, -1.000,  0.000]],
];

#[rustfmt::skip]
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [-1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [ 1.0,  1.0, -1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u32; 36] = [
    0, 1, 2,  2, 1, 3, // +Z
    4, 0, 6,  6, 0, 2, // -X
    5, 1, 7,  7, 1, 3, // +X
    4, 5, 6,  6, 5, 7, // -Z
    6, 7, 2,  2, 7, 3, // +Y
    4, 5, 0,  0, 5, 1, // -Y
];

/// Player ship as a non-indexed triangle list with flat normals filled in.
pub fn ship_mesh() -> Result<Mesh<Vertex>, MeshError> {
    let sections = [(&HULL_TRIANGLES[..], HULL), (&WING_TRIANGLES[..], WING)];
    let mut vertices: Vec<Vertex> = sections
        .iter()
        .flat_map(|(triangles, color)| {
            triangles
                .iter()
                .flatten()
                .map(move |&corner| Vertex::new(corner, *color))
        })
        .collect();
    compute_face_normals(&mut vertices)?;

    Ok(Mesh::new("ship", vertices, None))
}

/// Light indicator: a 2×2×2 cube centred on the origin.
pub fn light_cube_mesh() -> Mesh<LightVertex> {
    let vertices = CUBE_CORNERS
        .iter()
        .map(|&position| LightVertex { position })
        .collect();
    Mesh::new("light_cube", vertices, Some(CUBE_INDICES.to_vec()))
}
