use crate::vertex::{Vertex, VertexLayout};
use glam::Vec3;

/// Errors from the normal pass.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("buffer of {len} floats is not a whole number of triangles (stride {stride})")]
    IncompleteTriangle { len: usize, stride: usize },
    #[error("vertex layout {0:?} does not fit disjoint position and normal slots inside its stride")]
    InvalidLayout(VertexLayout),
}

/// Write a flat face normal into every vertex of a non-indexed triangle list.
///
/// See [`compute_face_normals_strided`] for the exact semantics.
pub fn compute_face_normals(vertices: &mut [Vertex]) -> Result<(), MeshError> {
    compute_face_normals_strided(
        bytemuck::cast_slice_mut(vertices),
        VertexLayout::POSITION_COLOR_NORMAL,
    )
}

/// Write a flat face normal into every vertex of a flat float buffer.
///
/// Every three consecutive vertices form one triangle `(p1, p2, p3)`. The
/// normal is `(p2 - p1) × (p3 - p1)`, written unchanged into all three
/// vertices. It is neither normalized nor averaged with neighbouring faces,
/// so its length is twice the triangle's area and a degenerate triangle gets
/// the zero vector. Shaders normalize at the point of use.
pub fn compute_face_normals_strided(
    data: &mut [f32],
    layout: VertexLayout,
) -> Result<(), MeshError> {
    if !layout.is_valid() {
        return Err(MeshError::InvalidLayout(layout));
    }
    let triangle_len = 3 * layout.stride;
    if data.len() % triangle_len != 0 {
        return Err(MeshError::IncompleteTriangle {
            len: data.len(),
            stride: layout.stride,
        });
    }

    for triangle in data.chunks_exact_mut(triangle_len) {
        let position = |vertex: usize| {
            let at = vertex * layout.stride + layout.position_offset;
            Vec3::from_slice(&triangle[at..at + 3])
        };
        let (p1, p2, p3) = (position(0), position(1), position(2));
        let normal = (p2 - p1).cross(p3 - p1);

        for vertex in 0..3 {
            let at = vertex * layout.stride + layout.normal_offset;
            normal.write_to_slice(&mut triangle[at..at + 3]);
        }
    }

    tracing::debug!(
        triangles = data.len() / triangle_len,
        "computed flat face normals"
    );
    Ok(())
}
