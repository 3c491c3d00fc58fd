//! Axis-aligned bounding boxes.

use nalgebra::Point3;

/// An axis-aligned bounding box in 3D.
///
/// The empty box (`min = +inf`, `max = -inf`) is the identity for
/// [`union`](Aabb::union) and [`extend`](Aabb::extend), which lets bound
/// computations start from [`Aabb::empty`] and fold points and boxes in
/// any grouping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// The empty box: identity for union.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create a box from explicit corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// The smallest box containing a single point.
    pub fn from_point(p: &Point3<f32>) -> Self {
        Self { min: *p, max: *p }
    }

    /// Grow the box to contain `p`.
    pub fn extend_point(&mut self, p: &Point3<f32>) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Grow the box to contain `other`.
    pub fn extend(&mut self, other: &Aabb) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut b = *self;
        b.extend(other);
        b
    }

    /// True if the box contains no points.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// True if both corners are finite (in particular, the box is not empty).
    pub fn is_finite(&self) -> bool {
        (0..3).all(|i| self.min[i].is_finite() && self.max[i].is_finite())
    }

    /// Center of the box.
    pub fn center(&self) -> Point3<f32> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// True if `p` lies inside or on the boundary of the box.
    pub fn contains_point(&self, p: &Point3<f32>) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
