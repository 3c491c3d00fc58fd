//! Error types for tessera.
//!
//! All construction-time failures are reported through [`TopologyError`].
//! Once a mesh has been built successfully its topology is guaranteed
//! well-formed, so the query layer has no error paths: queries on odd but
//! valid meshes degrade to boundary/irregular classification instead.

use thiserror::Error;

/// Result type alias using [`TopologyError`].
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors that can occur while building the half-edge topology.
///
/// Any of these aborts the whole build; a partially populated half-edge
/// table is never returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// The number of position time steps is not 1 or 2.
    #[error("{count} position time steps provided, expected 1 or 2")]
    BadTimeStepCount {
        /// Number of position buffers provided.
        count: usize,
    },

    /// A position buffer disagrees with time step 0 about the vertex count.
    #[error("position buffer for time step {time_step} has {actual} vertices, expected {expected}")]
    PositionCountMismatch {
        /// The offending time step.
        time_step: usize,
        /// Vertex count of time step 0.
        expected: usize,
        /// Vertex count of the offending buffer.
        actual: usize,
    },

    /// A face has fewer than 3 corners.
    #[error("face {face} has {corners} corners, at least 3 required")]
    DegenerateFace {
        /// The face index.
        face: usize,
        /// The declared corner count.
        corners: usize,
    },

    /// The face corner counts do not sum to the index buffer length.
    #[error("face corner counts sum to {expected} but the index buffer has {actual} entries")]
    CornerCountMismatch {
        /// Sum of the per-face corner counts.
        expected: usize,
        /// Length of the corner index buffer.
        actual: usize,
    },

    /// A face corner references a vertex outside the position buffer.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The out-of-range vertex index.
        vertex: u32,
    },

    /// The per-corner level buffer has the wrong length.
    #[error("level buffer has {actual} entries, expected {expected}")]
    LevelCountMismatch {
        /// Length of the corner index buffer.
        expected: usize,
        /// Length of the level buffer.
        actual: usize,
    },

    /// A crease entry references a vertex outside the position buffer.
    #[error("crease references invalid vertex index {vertex}")]
    InvalidCreaseVertex {
        /// The out-of-range vertex index.
        vertex: u32,
    },

    /// A hole entry references a face outside the face range.
    #[error("hole references invalid face index {face}")]
    InvalidHoleFace {
        /// The out-of-range face index.
        face: u32,
    },

    /// The mesh has more half-edges than the relative-offset links support.
    #[error("mesh has {count} half-edges, more than the supported maximum")]
    TooManyHalfEdges {
        /// Total number of half-edges requested.
        count: usize,
    },
}
