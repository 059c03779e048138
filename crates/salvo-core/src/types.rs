//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;
use crate::math::Vec3;

/// Opaque identifier of a moving body. The engine uses the bit pattern of its
/// ECS entity handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// Per-tick view of a projectile as seen by the broad phase and tracking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingBody {
    pub id: BodyId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Full size of the body's own box (not half extents).
    pub extents: Vec3,
    /// Remaining lifetime in simulation seconds.
    pub lifespan: f32,
}

impl MovingBody {
    /// World-space bounding box of this body.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_size(self.position, self.extents)
    }

    /// Position after `t` seconds of constant acceleration: `p + vt + ½at²`.
    pub fn predicted_position(&self, t: f32) -> Vec3 {
        self.position + self.velocity * t + self.acceleration * (0.5 * t * t)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` simulation seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
