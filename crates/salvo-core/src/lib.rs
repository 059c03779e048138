//! Core types and definitions for the SALVO simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vector math, bounding boxes, components, commands, snapshots, events,
//! and constants. It has no dependency on the ECS or any runtime.

pub mod aabb;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod state;
pub mod types;

pub use aabb::Aabb;
pub use math::{Vec2, Vec3};
pub use types::{BodyId, MovingBody};

#[cfg(test)]
mod tests;
