//! Input buffers describing a subdivision mesh.
//!
//! These mirror the flat buffers an application typically hands to a
//! rendering kernel: per-face corner counts, a corner index buffer, one
//! position buffer per time step, and sparse crease/level/hole annotations.
//! All buffers are read exactly once, during topology construction.

use nalgebra::Point3;

/// Sharpness value marking a fully sharp crease or corner.
///
/// Crease weights live in `[0, ∞)`; `0.0` means smooth and this sentinel
/// means the subdivision rules never round the feature off.
pub const SHARP: f32 = f32::INFINITY;

/// Face, vertex, crease, and hole buffers for one subdivision mesh.
///
/// Only the counts, indices, and positions are mandatory; the sparse
/// annotations default to empty. A missing level buffer assigns every
/// edge a tessellation level of 1.0.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use tessera::mesh::SubdivMeshDesc;
///
/// let desc = SubdivMeshDesc::new(
///     vec![4],
///     vec![0, 1, 2, 3],
///     vec![vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ]],
/// )
/// .with_edge_creases(vec![(0, 1, 2.5)]);
/// assert_eq!(desc.face_vertex_counts.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SubdivMeshDesc {
    /// Number of corners of each face; every entry must be at least 3.
    pub face_vertex_counts: Vec<u32>,

    /// Vertex index of every face corner, faces back to back; length must
    /// equal the sum of `face_vertex_counts`.
    pub vertex_indices: Vec<u32>,

    /// Vertex positions, one buffer per time step (1 or 2 steps). All
    /// buffers must have the same length.
    pub positions: Vec<Vec<Point3<f32>>>,

    /// Sparse edge creases as `(v0, v1, weight)`. Entries naming an edge
    /// that does not appear in the topology are ignored.
    pub edge_creases: Vec<(u32, u32, f32)>,

    /// Sparse vertex creases as `(vertex, weight)`.
    pub vertex_creases: Vec<(u32, f32)>,

    /// Tessellation level per face corner; either empty (all edges get
    /// level 1.0) or the same length as `vertex_indices`.
    pub levels: Vec<f32>,

    /// Faces excluded from rendering. The topology still covers them.
    pub holes: Vec<u32>,
}

impl SubdivMeshDesc {
    /// Create a description from the mandatory buffers.
    pub fn new(
        face_vertex_counts: Vec<u32>,
        vertex_indices: Vec<u32>,
        positions: Vec<Vec<Point3<f32>>>,
    ) -> Self {
        Self {
            face_vertex_counts,
            vertex_indices,
            positions,
            edge_creases: Vec::new(),
            vertex_creases: Vec::new(),
            levels: Vec::new(),
            holes: Vec::new(),
        }
    }

    /// Attach an edge crease buffer.
    pub fn with_edge_creases(mut self, edge_creases: Vec<(u32, u32, f32)>) -> Self {
        self.edge_creases = edge_creases;
        self
    }

    /// Attach a vertex crease buffer.
    pub fn with_vertex_creases(mut self, vertex_creases: Vec<(u32, f32)>) -> Self {
        self.vertex_creases = vertex_creases;
        self
    }

    /// Attach a per-corner tessellation level buffer.
    pub fn with_levels(mut self, levels: Vec<f32>) -> Self {
        self.levels = levels;
        self
    }

    /// Attach a hole face buffer.
    pub fn with_holes(mut self, holes: Vec<u32>) -> Self {
        self.holes = holes;
        self
    }

    /// Number of faces described.
    pub fn num_faces(&self) -> usize {
        self.face_vertex_counts.len()
    }

    /// Number of vertices in time step 0 (0 if no positions were given).
    pub fn num_vertices(&self) -> usize {
        self.positions.first().map_or(0, Vec::len)
    }
}
