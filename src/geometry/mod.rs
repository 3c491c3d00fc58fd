//! Geometric primitives used by the topology queries.

mod aabb;

pub use aabb::Aabb;
