//! Construction of the half-edge table from the input buffers.
//!
//! The build runs in phases: validate every buffer, prefix-sum the corner
//! counts into the face index, emit one record per corner (folding crease
//! weights and edge levels in from prebuilt sparse maps), then resolve
//! opposite links with one global key sort. Record positions come from the
//! prefix sum alone, so the result is byte-identical no matter how the work
//! is partitioned across threads.
//!
//! The crease maps and the key array live only inside [`build`]; the
//! long-lived output is the table, the face index, and the hole set.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::parallel;

use super::buffers::SubdivMeshDesc;
use super::edge_key::{edge_key, resolve_opposites, KeyedHalfEdge};
use super::halfedge::HalfEdge;

/// Granularity of parallel validation and emission tasks.
const MIN_STEP: usize = 4096;

/// The finalized connectivity of one subdivision mesh.
///
/// Immutable once built; shared by concurrent readers without locking.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Topology {
    /// One record per face corner, faces contiguous.
    pub half_edges: Vec<HalfEdge>,
    /// Table position of the first half-edge of each face.
    pub face_offsets: Vec<u32>,
    /// Faces excluded from rendering.
    pub holes: AHashSet<u32>,
}

/// Build the half-edge table, face index, and hole set from `desc`.
///
/// Fails without publishing anything if any buffer is malformed; see
/// [`TopologyError`] for the conditions checked.
pub(crate) fn build(desc: &SubdivMeshDesc) -> Result<Topology> {
    let num_faces = desc.num_faces();
    if num_faces == 0 {
        return Err(TopologyError::EmptyMesh);
    }
    if desc.positions.is_empty() || desc.positions.len() > 2 {
        return Err(TopologyError::BadTimeStepCount {
            count: desc.positions.len(),
        });
    }
    let num_vertices = desc.num_vertices();
    for (t, buf) in desc.positions.iter().enumerate().skip(1) {
        if buf.len() != num_vertices {
            return Err(TopologyError::PositionCountMismatch {
                time_step: t,
                expected: num_vertices,
                actual: buf.len(),
            });
        }
    }

    // Face index: exclusive prefix sum over the corner counts.
    let mut face_offsets = Vec::with_capacity(num_faces);
    let mut total = 0usize;
    for (f, &count) in desc.face_vertex_counts.iter().enumerate() {
        if count < 3 {
            return Err(TopologyError::DegenerateFace {
                face: f,
                corners: count as usize,
            });
        }
        face_offsets.push(total as u32);
        total += count as usize;
    }
    if total != desc.vertex_indices.len() {
        return Err(TopologyError::CornerCountMismatch {
            expected: total,
            actual: desc.vertex_indices.len(),
        });
    }
    // Relative offsets are i32 and key positions are u32.
    if total > i32::MAX as usize {
        return Err(TopologyError::TooManyHalfEdges { count: total });
    }
    if !desc.levels.is_empty() && desc.levels.len() != total {
        return Err(TopologyError::LevelCountMismatch {
            expected: total,
            actual: desc.levels.len(),
        });
    }

    validate_corner_indices(desc, &face_offsets, num_vertices)?;

    for &(v0, v1, _) in &desc.edge_creases {
        for v in [v0, v1] {
            if v as usize >= num_vertices {
                return Err(TopologyError::InvalidCreaseVertex { vertex: v });
            }
        }
    }
    for &(v, _) in &desc.vertex_creases {
        if v as usize >= num_vertices {
            return Err(TopologyError::InvalidCreaseVertex { vertex: v });
        }
    }
    for &f in &desc.holes {
        if f as usize >= num_faces {
            return Err(TopologyError::InvalidHoleFace { face: f });
        }
    }

    // Sparse annotations keyed for dense lookup during emission. Entries
    // whose edge never shows up in the topology are simply never queried.
    let edge_crease_map: AHashMap<u64, f32> = desc
        .edge_creases
        .iter()
        .map(|&(v0, v1, w)| (edge_key(v0, v1), w))
        .collect();
    let vertex_crease_map: AHashMap<u32, f32> = desc.vertex_creases.iter().copied().collect();

    let counts = &desc.face_vertex_counts;
    let indices = &desc.vertex_indices;
    let levels = &desc.levels;
    let offsets = &face_offsets;
    let edge_crease_map = &edge_crease_map;
    let vertex_crease_map = &vertex_crease_map;

    let half_edges: Vec<HalfEdge> = (0..num_faces)
        .into_par_iter()
        .flat_map_iter(|f| {
            let first = offsets[f] as usize;
            let count = counts[f] as usize;
            (0..count).map(move |k| {
                let v0 = indices[first + k];
                let v1 = indices[first + (k + 1) % count];
                HalfEdge {
                    start_vertex: v0,
                    next_ofs: if k + 1 == count { -((count - 1) as i32) } else { 1 },
                    prev_ofs: if k == 0 { (count - 1) as i32 } else { -1 },
                    opposite_ofs: 0,
                    edge_crease_weight: edge_crease_map
                        .get(&edge_key(v0, v1))
                        .copied()
                        .unwrap_or(0.0),
                    vertex_crease_weight: vertex_crease_map.get(&v0).copied().unwrap_or(0.0),
                    edge_level: if levels.is_empty() { 1.0 } else { levels[first + k] },
                }
            })
        })
        .collect();
    debug!(faces = num_faces, half_edges = total, "emitted half-edge table");

    let mut half_edges = half_edges;
    let mut keys: Vec<KeyedHalfEdge> = half_edges
        .par_iter()
        .enumerate()
        .map(|(pos, he)| {
            let end = half_edges[(pos as i64 + he.next_ofs as i64) as usize].start_vertex;
            KeyedHalfEdge {
                key: edge_key(he.start_vertex, end),
                pos: pos as u32,
            }
        })
        .collect();
    resolve_opposites(&mut keys, &mut half_edges);

    let holes: AHashSet<u32> = desc.holes.iter().copied().collect();
    debug!(
        edge_creases = desc.edge_creases.len(),
        vertex_creases = desc.vertex_creases.len(),
        holes = holes.len(),
        "resolved opposite half-edges and sparse annotations"
    );

    Ok(Topology {
        half_edges,
        face_offsets,
        holes,
    })
}

/// Check that every face corner references a vertex inside the position
/// buffer. Partitioned over faces; the lowest-indexed offending face wins.
fn validate_corner_indices(
    desc: &SubdivMeshDesc,
    face_offsets: &[u32],
    num_vertices: usize,
) -> Result<()> {
    let counts = &desc.face_vertex_counts;
    let indices = &desc.vertex_indices;
    parallel::reduce(
        0,
        face_offsets.len(),
        MIN_STEP,
        Ok(()),
        |range| {
            for f in range {
                let first = face_offsets[f] as usize;
                for k in 0..counts[f] as usize {
                    let v = indices[first + k];
                    if v as usize >= num_vertices {
                        return Err(TopologyError::InvalidVertexIndex { face: f, vertex: v });
                    }
                }
            }
            Ok(())
        },
        |a, b| a.and(b),
    )
}
