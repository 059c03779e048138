//! Snapshot system: queries the ECS world and builds a complete SimSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use salvo_core::components::*;
use salvo_core::enums::{ProjectileKind, SimPhase};
use salvo_core::events::SimEvent;
use salvo_core::state::*;
use salvo_core::types::SimTime;

use crate::world_setup;

/// Build a complete SimSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    events: Vec<SimEvent>,
    octree: Vec<BoxView>,
    targets_hit: u32,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        projectiles: build_projectiles(world),
        cannons: build_cannons(world),
        defender: build_defender(world),
        octree,
        events,
        targets_hit,
    }
}

/// Every projectile, ordered by id.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&Projectile, Option<&Interceptor>)>();
    let mut projectiles: Vec<ProjectileView> = query
        .iter()
        .map(|(entity, (p, interceptor))| ProjectileView {
            id: world_setup::body_id(entity),
            kind: if interceptor.is_some() {
                ProjectileKind::Interceptor
            } else {
                ProjectileKind::Shell
            },
            position: p.position,
            velocity: p.velocity,
            lifespan: p.lifespan,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_cannons(world: &World) -> Vec<CannonView> {
    let mut query = world.query::<(&Cannon, &TrajectoryPreview)>();
    let mut cannons: Vec<CannonView> = query
        .iter()
        .map(|(_, (cannon, preview))| CannonView {
            index: cannon.index,
            enabled: cannon.enabled,
            trajectory: preview.points.clone(),
        })
        .collect();
    cannons.sort_by_key(|c| c.index);
    cannons
}

fn build_defender(world: &World) -> DefenderView {
    world
        .query::<&Defender>()
        .iter()
        .next()
        .map(|(_, d)| DefenderView {
            position: d.position,
            target_speed: d.last_target_speed,
        })
        .unwrap_or_default()
}
