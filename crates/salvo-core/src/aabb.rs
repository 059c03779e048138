//! Axis-aligned bounding boxes.
//!
//! A box is stored as center + half extents. The min/max corners are cached
//! and refreshed by every setter, so the fields stay private.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Serialized form: the corners are derived and never read from input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct AabbRepr {
    center: Vec3,
    half_extents: Vec3,
}

impl From<AabbRepr> for Aabb {
    fn from(repr: AabbRepr) -> Self {
        Aabb::new(repr.center, repr.half_extents)
    }
}

impl From<Aabb> for AabbRepr {
    fn from(aabb: Aabb) -> Self {
        Self {
            center: aabb.center,
            half_extents: aabb.half_extents,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "AabbRepr", into = "AabbRepr")]
pub struct Aabb {
    center: Vec3,
    half_extents: Vec3,
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        let mut aabb = Self {
            center,
            half_extents,
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };
        aabb.recompute_corners();
        aabb
    }

    /// Build a box from its full size rather than its half extents.
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
        self.recompute_corners();
    }

    pub fn set_half_extents(&mut self, half_extents: Vec3) {
        self.half_extents = half_extents;
        self.recompute_corners();
    }

    fn recompute_corners(&mut self) {
        self.min = self.center - self.half_extents;
        self.max = self.center + self.half_extents;
    }

    /// Finite center and strictly positive, finite half extents.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && positive_finite(self.half_extents)
    }

    /// Overlap test against a box given by its center and full size.
    ///
    /// True iff the intervals overlap strictly on all three axes. Despite the
    /// name this does not require full containment; see [`Aabb::encloses`].
    pub fn contains(&self, other_center: Vec3, other_size: Vec3) -> bool {
        let other = Self::from_size(other_center, other_size);
        self.overlaps(&other)
    }

    /// Strict interval overlap on all three axes, half extents on both sides.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        other.min.x < self.max.x
            && other.max.x > self.min.x
            && other.min.y < self.max.y
            && other.max.y > self.min.y
            && other.min.z < self.max.z
            && other.max.z > self.min.z
    }

    /// Full containment of a box given by its center and full size.
    pub fn encloses(&self, other_center: Vec3, other_size: Vec3) -> bool {
        let other = Self::from_size(other_center, other_size);
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
            && other.min.z >= self.min.z
            && other.max.z <= self.max.z
    }
}

fn positive_finite(v: Vec3) -> bool {
    v.is_finite() && v.x > 0.0 && v.y > 0.0 && v.z > 0.0
}
