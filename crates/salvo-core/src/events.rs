//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::types::BodyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A cannon fired a shell.
    ShellFired {
        cannon: u8,
        body: BodyId,
        air_time: f32,
    },
    /// The defender fired at a target.
    InterceptorFired {
        body: BodyId,
        target: BodyId,
        time_to_intercept: f32,
        aim: Vec3,
    },
    /// Two bodies collided and were destroyed.
    Collision { a: BodyId, b: BodyId },
}
