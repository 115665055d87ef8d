use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Lit vertex: position, color, and a flat face normal.
///
/// Laid out as nine tightly packed `f32`s so a `&[Vertex]` can be uploaded
/// (or reinterpreted as a flat float buffer) without copying.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Vertex with a zeroed normal, to be filled in by the normal pass.
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            color,
            normal: [0.0; 3],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Unlit vertex used by the light indicator: position only.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
pub struct LightVertex {
    pub position: [f32; 3],
}

/// Where positions and normals live inside a flat float vertex buffer.
///
/// All quantities are counted in `f32` slots, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub position_offset: usize,
    pub normal_offset: usize,
}

impl VertexLayout {
    /// Layout of [`Vertex`]: 3 position, 3 color, 3 normal.
    pub const POSITION_COLOR_NORMAL: Self = Self {
        stride: 9,
        position_offset: 0,
        normal_offset: 6,
    };

    /// Both three-float slots must fit inside one stride without overlapping.
    pub fn is_valid(&self) -> bool {
        self.stride > 0
            && self.position_offset + 3 <= self.stride
            && self.normal_offset + 3 <= self.stride
            && self.position_offset.abs_diff(self.normal_offset) >= 3
    }
}

/// A fixed piece of geometry, optionally indexed.
///
/// Meshes are built once at startup and never change after upload, so the
/// data is only reachable through shared slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    name: &'static str,
    vertices: Vec<V>,
    indices: Option<Vec<u32>>,
}

impl<V> Mesh<V> {
    pub fn new(name: &'static str, vertices: Vec<V>, indices: Option<Vec<u32>>) -> Self {
        Self {
            name,
            vertices,
            indices,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.as_ref().map_or(0, |i| i.len() as u32)
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Triangles drawn for this mesh, whether indexed or not.
    pub fn triangle_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32 / 3,
            None => self.vertices.len() as u32 / 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_nine_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 9 * 4);
        assert_eq!(std::mem::size_of::<LightVertex>(), 3 * 4);
    }

    #[test]
    fn standard_layout_matches_vertex() {
        let layout = VertexLayout::POSITION_COLOR_NORMAL;
        assert!(layout.is_valid());
        assert_eq!(layout.stride * 4, std::mem::size_of::<Vertex>());
    }

    #[test]
    fn normal_slot_past_stride_is_invalid() {
        let layout = VertexLayout {
            stride: 5,
            position_offset: 0,
            normal_offset: 3,
        };
        assert!(!layout.is_valid());
    }

    #[test]
    fn overlapping_slots_are_invalid() {
        for normal_offset in 0..3 {
            let layout = VertexLayout {
                stride: 9,
                position_offset: 0,
                normal_offset,
            };
            assert!(!layout.is_valid(), "normal at {normal_offset}");
        }
        let layout = VertexLayout {
            stride: 9,
            position_offset: 4,
            normal_offset: 2,
        };
        assert!(!layout.is_valid());
    }

    #[test]
    fn adjacent_slots_are_valid() {
        let layout = VertexLayout {
            stride: 6,
            position_offset: 0,
            normal_offset: 3,
        };
        assert!(layout.is_valid());
    }

    #[test]
    fn mesh_counts() {
        let mesh = Mesh::new(
            "quad",
            vec![LightVertex::default(); 4],
            Some(vec![0, 1, 2, 2, 1, 3]),
        );
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.is_indexed());
    }

    #[test]
    fn mesh_exposes_read_only_data() {
        let mesh = Mesh::new("tri", vec![Vertex::default(); 3], None);
        assert_eq!(mesh.name(), "tri");
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.indices(), None);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_indexed());
    }
}
