//! Cleanup system: removes projectiles that expired or left the scene.

use hecs::{Entity, World};

use salvo_core::aabb::Aabb;
use salvo_core::components::Projectile;
use salvo_core::constants::SCENE_DESPAWN_MARGIN;
use salvo_core::math::Vec3;

/// Whether `position` lies beyond `scene` grown by the despawn margin.
pub fn out_of_bounds(scene: &Aabb, position: Vec3) -> bool {
    let offset = position - scene.center();
    let limit = scene.half_extents() + Vec3::splat(SCENE_DESPAWN_MARGIN);
    offset.x.abs() > limit.x || offset.y.abs() > limit.y || offset.z.abs() > limit.z
}

/// Despawn projectiles whose lifespan went negative or that are out of bounds.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, scene: &Aabb, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.lifespan < 0.0 || out_of_bounds(scene, projectile.position) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
