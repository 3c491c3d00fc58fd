//! The owning subdivision mesh object.
//!
//! [`SubdivMesh`] pairs the finalized half-edge table with the vertex
//! position buffers and exposes the per-primitive queries the build
//! pipeline needs: face count, validity (holes), a traversal handle, and
//! conservative patch bounds. Everything here is a pure read; a built mesh
//! can be queried from any number of threads.

use nalgebra::Point3;

use crate::error::Result;
use crate::geometry::Aabb;
use crate::parallel;

use super::buffers::SubdivMeshDesc;
use super::builder::{self, Topology};
use super::halfedge::HalfEdgeRef;

/// Granularity of the parallel whole-mesh bounding pass.
const BOUNDS_MIN_STEP: usize = 1024;

/// A subdivision mesh with finalized half-edge connectivity.
///
/// Built once from a [`SubdivMeshDesc`], then immutable. The input corner
/// and crease buffers are consumed by construction; only the position
/// buffers are retained for the geometric queries.
#[derive(Debug, Clone)]
pub struct SubdivMesh {
    positions: Vec<Vec<Point3<f32>>>,
    topology: Topology,
}

impl SubdivMesh {
    /// Build the half-edge topology for `desc`.
    ///
    /// Returns an error if any input buffer is malformed; no partially
    /// built mesh is ever produced.
    pub fn new(desc: SubdivMeshDesc) -> Result<Self> {
        let topology = builder::build(&desc)?;
        Ok(Self {
            positions: desc.positions,
            topology,
        })
    }

    /// Number of faces.
    pub fn size(&self) -> usize {
        self.topology.face_offsets.len()
    }

    /// Total number of half-edges (one per face corner).
    pub fn num_half_edges(&self) -> usize {
        self.topology.half_edges.len()
    }

    /// Number of position time steps (1 or 2).
    pub fn num_time_steps(&self) -> usize {
        self.positions.len()
    }

    /// Vertex positions of one time step.
    pub fn positions(&self, time_step: usize) -> &[Point3<f32>] {
        &self.positions[time_step]
    }

    /// The first half-edge of face `face`.
    pub fn half_edge(&self, face: usize) -> HalfEdgeRef<'_> {
        HalfEdgeRef::new(
            &self.topology.half_edges,
            self.topology.face_offsets[face] as usize,
        )
    }

    /// False iff the face is flagged as a hole. Holes stay in the topology
    /// and keep answering bound queries; they are only excluded from
    /// rendering.
    pub fn valid(&self, face: usize) -> bool {
        !self.topology.holes.contains(&(face as u32))
    }

    /// Conservative bounds of the subdivision patch of face `face` at time
    /// step 0: the union of the 1-rings of all its corners, so the limit
    /// surface within the face never escapes the box.
    pub fn bounds(&self, face: usize) -> Aabb {
        self.half_edge(face).bounds(&self.positions[0])
    }

    /// Conservative bounds of the whole mesh, reduced over faces in
    /// parallel.
    pub fn bounds_all(&self) -> Aabb {
        parallel::reduce(
            0,
            self.size(),
            BOUNDS_MIN_STEP,
            Aabb::empty(),
            |range| {
                let mut b = Aabb::empty();
                for f in range {
                    b.extend(&self.bounds(f));
                }
                b
            },
            |a, b| a.union(&b),
        )
    }
}
