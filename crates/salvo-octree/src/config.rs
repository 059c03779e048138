//! Octree tuning.

use serde::{Deserialize, Serialize};

use salvo_core::aabb::Aabb;
use salvo_core::constants::{OCTREE_CAPACITY, OCTREE_MAX_DEPTH};
use salvo_core::error::ConfigError;

use crate::node::BodyBounds;

/// Rule deciding whether a node admits a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Admit any body whose box overlaps the node ([`Aabb::contains`]).
    /// A body straddling a split plane descends into the first overlapping
    /// child in octant order.
    #[default]
    Overlap,
    /// Admit only bodies fully inside the node ([`Aabb::encloses`]).
    /// Straddling bodies stay at the parent.
    Enclose,
}

impl Placement {
    pub fn admits(self, bbox: &Aabb, body: &BodyBounds) -> bool {
        match self {
            Placement::Overlap => bbox.contains(body.center, body.size),
            Placement::Enclose => bbox.encloses(body.center, body.size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Body count at which a leaf subdivides.
    pub capacity: usize,
    /// Leaves at this depth never subdivide. The root is depth 0.
    pub max_depth: u8,
    pub placement: Placement,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            capacity: OCTREE_CAPACITY,
            max_depth: OCTREE_MAX_DEPTH,
            placement: Placement::default(),
        }
    }
}

impl OctreeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity < 2 {
            return Err(ConfigError::Invalid(format!(
                "octree capacity must be at least 2, got {}",
                self.capacity
            )));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "octree max_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
