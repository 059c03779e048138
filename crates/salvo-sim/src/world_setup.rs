//! Entity spawn factories for the scene.
//!
//! Creates the cannon row, the defender, and projectile entities with
//! their component bundles.

use hecs::{Entity, World};

use salvo_core::components::*;
use salvo_core::constants::*;
use salvo_core::math::Vec3;
use salvo_core::types::{BodyId, MovingBody};

use crate::ballistics::Shot;

/// Spacing between cannons along X (m).
const CANNON_SPACING: f32 = 8.0;

/// Set up the static scene: a row of disabled cannons and the defender.
pub fn setup_scene(world: &mut World) {
    for index in 0..CANNON_COUNT {
        spawn_cannon(world, index as u8);
    }
    spawn_defender(world);
}

/// Spawn a disabled cannon on the far edge of the scene, facing +Z.
pub fn spawn_cannon(world: &mut World, index: u8) -> Entity {
    let cannon = Cannon {
        index,
        launch_point: Vec3::new(4.0 + CANNON_SPACING * f32::from(index), 1.0, -50.0),
        yaw: 0.0,
        profile: LaunchProfile {
            speed: CANNON_LAUNCH_SPEED,
            angle_deg: CANNON_LAUNCH_ANGLE_DEG,
        },
        gravity: GRAVITY,
        activate_at_tick: u64::MAX,
        enabled: false,
        next_fire_tick: u64::MAX,
    };
    world.spawn((cannon, TrajectoryPreview::default()))
}

pub fn spawn_defender(world: &mut World) -> Entity {
    world.spawn((Defender {
        position: DEFENDER_POSITION,
        vision_radius: DEFENDER_VISION_RADIUS,
        profile: LaunchProfile {
            speed: DEFENDER_LAUNCH_SPEED,
            angle_deg: DEFENDER_LAUNCH_ANGLE_DEG,
        },
        gravity: GRAVITY,
        cooldown_ticks: DEFENDER_COOLDOWN_TICKS,
        ready_at_tick: 0,
        last_target_speed: None,
    },))
}

fn projectile(shot: &Shot, extents: Vec3) -> Projectile {
    Projectile {
        position: shot.position,
        velocity: shot.velocity,
        acceleration: shot.acceleration,
        extents,
        lifespan: shot.lifespan,
    }
}

/// Spawn a shell fired by cannon `cannon`.
pub fn spawn_shell(world: &mut World, cannon: u8, shot: &Shot) -> Entity {
    world.spawn((projectile(shot, SHELL_SIZE), Shell { cannon }))
}

/// Spawn an interceptor fired by the defender.
pub fn spawn_interceptor(world: &mut World, shot: &Shot) -> Entity {
    world.spawn((projectile(shot, INTERCEPTOR_SIZE), Interceptor))
}

/// Stable body id of an entity.
pub fn body_id(entity: Entity) -> BodyId {
    BodyId(entity.to_bits().get())
}

/// Entity behind a body id, if the bits are a valid handle.
pub fn entity_of(id: BodyId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Broad-phase view of a projectile entity.
pub fn moving_body(entity: Entity, projectile: &Projectile) -> MovingBody {
    MovingBody {
        id: body_id(entity),
        position: projectile.position,
        velocity: projectile.velocity,
        acceleration: projectile.acceleration,
        extents: projectile.extents,
        lifespan: projectile.lifespan,
    }
}
