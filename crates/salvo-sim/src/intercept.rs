//! Closed-form ballistic intercept.
//!
//! The solver works in the ground plane: the target's vertical velocity is
//! dropped and the launcher is described by the horizontal component of its
//! muzzle velocity. Vertical motion is left to the aiming transform.

use serde::{Deserialize, Serialize};

use salvo_core::constants::QUADRATIC_EPSILON;
use salvo_core::math::Vec3;

/// Larger root of `a·t² + b·t + c = 0`.
///
/// Returns `0.0` when `|a|` is below [`QUADRATIC_EPSILON`] or the
/// discriminant is negative. That `0.0` means "no solution", never a real
/// zero time. The larger root is not guaranteed to be positive.
pub fn larger_quadratic_root(a: f32, b: f32, c: f32) -> f32 {
    if a.abs() < QUADRATIC_EPSILON {
        return 0.0;
    }
    let discriminant = b * b - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return 0.0;
    }
    let root = discriminant.sqrt();
    let t1 = (-b + root) / (2.0 * a);
    let t2 = (-b - root) / (2.0 * a);
    t1.max(t2)
}

/// Time at which a shot fired now at `launcher_speed` meets the target.
///
/// With `d = shooter - target` and `v` the target's horizontal velocity this
/// solves `(L² - v·v)t² + 2(d·v)t - d·d = 0`. Callers must check `time > 0`.
pub fn solve_intercept(
    launcher_speed: f32,
    shooter_pos: Vec3,
    target_pos: Vec3,
    target_vel: Vec3,
) -> f32 {
    let d = shooter_pos - target_pos;
    let v = target_vel.horizontal();
    let a = launcher_speed * launcher_speed - v.dot(v);
    let b = 2.0 * d.dot(v);
    let c = -d.dot(d);
    larger_quadratic_root(a, b, c)
}

/// Everything needed to aim at one candidate target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptQuery {
    /// Horizontal component of the muzzle velocity (m/s).
    pub launcher_speed: f32,
    pub shooter_position: Vec3,
    pub target_position: Vec3,
    pub target_velocity: Vec3,
    pub target_acceleration: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Where the target will be at the intercept time.
    pub predicted_position: Vec3,
    /// Unit vector from the shooter toward `predicted_position`.
    pub direction: Vec3,
    /// Distance from the shooter to `predicted_position`.
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptSolution {
    /// Raw solver output, kept even when infeasible.
    pub time: f32,
    /// Finite and strictly positive time.
    pub feasible: bool,
    pub aim: Option<Aim>,
}

impl InterceptQuery {
    pub fn solve(&self) -> InterceptSolution {
        let time = solve_intercept(
            self.launcher_speed,
            self.shooter_position,
            self.target_position,
            self.target_velocity,
        );
        if !(time.is_finite() && time > 0.0) {
            return InterceptSolution {
                time,
                feasible: false,
                aim: None,
            };
        }

        let predicted_position = self.target_position
            + self.target_velocity * time
            + self.target_acceleration * (0.5 * time * time);
        let mut direction = predicted_position - self.shooter_position;
        let distance = direction.normalize();

        InterceptSolution {
            time,
            feasible: true,
            aim: Some(Aim {
                predicted_position,
                direction,
                distance,
            }),
        }
    }
}
