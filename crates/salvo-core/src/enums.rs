//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Cannons disabled, nothing moves.
    #[default]
    Idle,
    /// Systems run every tick.
    Active,
    /// Frozen; resumes where it left off.
    Paused,
}

/// Which side fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Shell,
    Interceptor,
}
