//! Commands sent from a driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Enable the cannons with staggered activation and start ticking.
    Start,
    /// Freeze the simulation.
    Pause,
    /// Continue after a pause.
    Resume,
    /// Disable every cannon and return to idle. Projectiles in flight stay.
    Stop,
}
