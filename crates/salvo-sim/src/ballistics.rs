//! Launch ballistics: muzzle velocity, flight time, trajectory sampling, and
//! orienting a launcher toward an aim point.

use glam::Mat3;

use salvo_core::components::{Cannon, LaunchProfile};
use salvo_core::math::Vec3;

use crate::intercept::larger_quadratic_root;

/// Muzzle velocity in the launcher's own frame: forward is +Z, up is +Y.
pub fn local_launch_velocity(profile: &LaunchProfile) -> Vec3 {
    let (sin, cos) = profile.angle_deg.to_radians().sin_cos();
    Vec3::new(0.0, profile.speed * sin, profile.speed * cos)
}

/// Horizontal component of the muzzle velocity. This is the launcher speed
/// the intercept solver works with.
pub fn horizontal_speed(profile: &LaunchProfile) -> f32 {
    profile.speed * profile.angle_deg.to_radians().cos()
}

/// Time until a body launched from `height` with `vertical_speed` under
/// `gravity` returns to the ground: the larger root of
/// `g·t² + 2·v·t + 2·h = 0`.
pub fn air_time(vertical_speed: f32, gravity: f32, height: f32) -> f32 {
    larger_quadratic_root(gravity, 2.0 * vertical_speed, 2.0 * height)
}

/// `steps + 1` points along `origin + v·t + ½·a·t²` for `t` in `[0, duration]`.
pub fn trajectory_points(
    origin: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
    duration: f32,
    steps: usize,
) -> Vec<Vec3> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32 * duration;
            origin + velocity * t + acceleration * (0.5 * t * t)
        })
        .collect()
}

/// A fully resolved shot, ready to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub lifespan: f32,
}

/// Shot fired by `cannon` from its launch point along its yaw.
/// Lifespan is the time until the shell reaches the ground.
pub fn cannon_shot(cannon: &Cannon) -> Shot {
    let mut velocity = local_launch_velocity(&cannon.profile);
    velocity.rotate_y(cannon.yaw);
    let acceleration = Vec3::new(0.0, cannon.gravity, 0.0);
    Shot {
        position: cannon.launch_point,
        velocity,
        acceleration,
        lifespan: air_time(velocity.y, cannon.gravity, cannon.launch_point.y),
    }
}

/// Rotation whose +Z axis points along `forward`, keeping +Y as close to
/// world up as possible.
pub fn look_rotation(forward: Vec3) -> Mat3 {
    let forward = glam::Vec3::from(forward).normalize_or_zero();
    if forward == glam::Vec3::ZERO {
        return Mat3::IDENTITY;
    }
    let mut right = glam::Vec3::Y.cross(forward);
    if right.length_squared() < 1.0e-6 {
        // Looking straight up or down.
        right = glam::Vec3::X;
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Mat3::from_cols(right, up, forward)
}

/// Muzzle velocity of a launcher turned to face `aim`.
pub fn aimed_launch_velocity(profile: &LaunchProfile, aim: Vec3) -> Vec3 {
    let local = glam::Vec3::from(local_launch_velocity(profile));
    (look_rotation(aim) * local).into()
}
