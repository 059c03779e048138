//! Kinematic integration system.
//!
//! Semi-implicit Euler: velocity first, then position from the new velocity.

use hecs::World;

use salvo_core::components::Projectile;

/// Age and integrate every projectile by `dt` simulation seconds.
pub fn run(world: &mut World, dt: f32) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.lifespan -= dt;
        projectile.velocity += projectile.acceleration * dt;
        projectile.position += projectile.velocity * dt;
    }
}
