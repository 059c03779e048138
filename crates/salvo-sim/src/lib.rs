//! Simulation engine for SALVO.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces SimSnapshots for a renderer or the command-line runner.

pub mod ballistics;
pub mod engine;
pub mod intercept;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use intercept::{solve_intercept, InterceptQuery, InterceptSolution};
pub use salvo_core as core;

#[cfg(test)]
mod tests;
