//! Simulation snapshot: the complete visible state handed to a renderer each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::math::Vec3;
use crate::types::{BodyId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub projectiles: Vec<ProjectileView>,
    pub cannons: Vec<CannonView>,
    pub defender: DefenderView,
    /// Node volumes of the octree built this tick.
    pub octree: Vec<BoxView>,
    pub events: Vec<SimEvent>,
    pub targets_hit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: BodyId,
    pub kind: ProjectileKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub lifespan: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CannonView {
    pub index: u8,
    pub enabled: bool,
    /// Sampled path of the latest shot.
    pub trajectory: Vec<Vec3>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefenderView {
    pub position: Vec3,
    /// Speed of the last engaged target (m/s).
    pub target_speed: Option<f32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxView {
    pub center: Vec3,
    pub half_extents: Vec3,
}
