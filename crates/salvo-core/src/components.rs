//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Ballistic state of a projectile in flight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Full size of the projectile's bounding box.
    pub extents: Vec3,
    /// Remaining lifetime in simulation seconds. Expired when negative.
    pub lifespan: f32,
}

/// Muzzle speed and elevation of a launcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaunchProfile {
    /// Muzzle speed (m/s).
    pub speed: f32,
    /// Elevation above the horizon (degrees).
    pub angle_deg: f32,
}

/// A cannon that lobs shells into the scene on a randomized delay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    pub index: u8,
    pub launch_point: Vec3,
    /// Rotation about Y (radians). Zero fires along +Z.
    pub yaw: f32,
    pub profile: LaunchProfile,
    pub gravity: f32,
    /// Tick at which the cannon becomes active after a start command.
    pub activate_at_tick: u64,
    pub enabled: bool,
    /// Tick at which the next shell may be fired.
    pub next_fire_tick: u64,
}

/// The defensive launcher that tracks incoming shells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defender {
    pub position: Vec3,
    pub vision_radius: f32,
    pub profile: LaunchProfile,
    pub gravity: f32,
    pub cooldown_ticks: u64,
    /// Tick at which the defender may fire again.
    pub ready_at_tick: u64,
    /// Speed of the most recently engaged target (m/s), for display.
    pub last_target_speed: Option<f32>,
}

/// Marks a projectile fired by a cannon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shell {
    pub cannon: u8,
}

/// Marks a projectile fired by the defender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interceptor;

/// Sampled flight path of a cannon's latest shot, for visualization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryPreview {
    pub points: Vec<Vec3>,
}
