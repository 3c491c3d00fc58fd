//! # Tessera
//!
//! Half-edge topology engine for Catmull-Clark subdivision surfaces inside
//! a ray-tracing kernel.
//!
//! Tessera converts application-supplied polygon buffers (face corner
//! counts, corner indices, positions, creases, holes) into a compact
//! half-edge connectivity table and answers the geometric queries a build
//! pipeline asks per primitive: regularity classification and conservative
//! patch bounds.
//!
//! ## Features
//!
//! - **Compact half-edge table**: fixed-size records linked by relative
//!   offsets, so the table survives relocation and copying
//! - **Sort-based edge matching**: opposite half-edges discovered with one
//!   O(E log E) key sort, tolerant of boundary and non-manifold edges
//! - **Crease and hole semantics**: sparse sharpness and hole buffers
//!   folded into the dense topology at build time
//! - **Deterministic parallel construction**: rayon-partitioned build with
//!   byte-identical output regardless of thread count
//!
//! ## Quick Start
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::Point3;
//!
//! // A single quad.
//! let desc = SubdivMeshDesc::new(
//!     vec![4],
//!     vec![0, 1, 2, 3],
//!     vec![vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ]],
//! );
//!
//! let mesh = SubdivMesh::new(desc).unwrap();
//! assert_eq!(mesh.size(), 1);
//! assert!(mesh.valid(0));
//!
//! // Walk the face cycle.
//! let start = mesh.half_edge(0);
//! assert_eq!(start.face_vertex_count(), 4);
//! assert!(!start.has_opposite()); // lone quad: every edge is boundary
//!
//! // Conservative patch bounds.
//! let bounds = mesh.bounds(0);
//! assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
//! assert_eq!(bounds.max, Point3::new(1.0, 1.0, 0.0));
//! ```
//!
//! ## Creases and Holes
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::Point3;
//!
//! # let positions = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! #     Point3::new(0.5, -1.0, 0.0),
//! # ];
//! let desc = SubdivMeshDesc::new(vec![3, 3], vec![0, 1, 2, 1, 0, 3], vec![positions])
//!     .with_edge_creases(vec![(0, 1, tessera::mesh::SHARP)])
//!     .with_holes(vec![1]);
//!
//! let mesh = SubdivMesh::new(desc).unwrap();
//! assert!(!mesh.valid(1)); // the hole is excluded from rendering
//! assert!(mesh.bounds(1).is_finite()); // but still has bounds
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod parallel;

/// Prelude module for convenient imports.
///
/// ```
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TopologyError};
    pub use crate::geometry::Aabb;
    pub use crate::mesh::{HalfEdge, HalfEdgeRef, SubdivMesh, SubdivMeshDesc};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_closed_cube() {
        // A cube: 8 vertices, 6 quads, no boundary anywhere.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let counts = vec![4; 6];
        let indices = vec![
            0, 3, 2, 1, // bottom
            4, 5, 6, 7, // top
            0, 1, 5, 4, // front
            1, 2, 6, 5, // right
            2, 3, 7, 6, // back
            3, 0, 4, 7, // left
        ];
        let mesh = SubdivMesh::new(SubdivMeshDesc::new(counts, indices, vec![positions])).unwrap();

        assert_eq!(mesh.size(), 6);
        assert_eq!(mesh.num_half_edges(), 24);
        for f in 0..mesh.size() {
            let mut he = mesh.half_edge(f);
            for _ in 0..4 {
                assert!(he.has_opposite());
                // Cube corners have valence 3, so nothing is regular.
                assert!(!he.is_regular_vertex());
                he = he.next();
            }
            assert!(!mesh.half_edge(f).is_regular_face());
            assert!(mesh.valid(f));
        }

        let b = mesh.bounds_all();
        assert_eq!(b.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(b.max, Point3::new(1.0, 1.0, 1.0));
    }
}
