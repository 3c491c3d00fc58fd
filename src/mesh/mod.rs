//! Subdivision mesh topology: input buffers, half-edge table, and queries.
//!
//! # Overview
//!
//! An application describes a polygon mesh with flat buffers
//! ([`SubdivMeshDesc`]): per-face corner counts, a corner index buffer,
//! vertex positions, and sparse crease/level/hole annotations.
//! [`SubdivMesh::new`] converts that description into a contiguous
//! half-edge table with relative-offset links, a face index for O(1)
//! start-of-traversal, and a hole set — or reports a single construction
//! error without publishing anything.
//!
//! Once built, the structure is immutable. [`HalfEdgeRef`] walks the table
//! and answers the queries Catmull-Clark evaluation and spatial bounding
//! need: regularity classification, face bounds, 1-ring bounds, and
//! conservative patch bounds.

mod buffers;
mod builder;
mod edge_key;
mod halfedge;
mod subdiv;

pub use buffers::{SubdivMeshDesc, SHARP};
pub use halfedge::{HalfEdge, HalfEdgeRef};
pub use subdiv::SubdivMesh;
