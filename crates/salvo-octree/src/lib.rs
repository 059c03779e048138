//! Octree broad phase for SALVO.
//!
//! Indexes moving bodies by their bounding boxes and reports overlapping
//! pairs. A tree is meant to live for one simulation tick.

pub mod config;
pub mod node;
pub mod octree;

pub use config::{OctreeConfig, Placement};
pub use node::{BodyBounds, Bounded, NodeId, OctreeNode};
pub use octree::{CollisionReporter, Contact, Octree};
