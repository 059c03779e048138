//! Cannon system: activates armed cannons and fires shells on a random delay.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use salvo_core::components::{Cannon, TrajectoryPreview};
use salvo_core::constants::{FIRE_DELAY_MAX_TICKS, FIRE_DELAY_MIN_TICKS, TRAJECTORY_STEPS};
use salvo_core::events::SimEvent;

use crate::ballistics::{cannon_shot, trajectory_points, Shot};
use crate::world_setup;

/// Arm every cannon, staggering activation from `tick` by `offsets`.
pub fn arm(world: &mut World, tick: u64, offsets: &[u64]) {
    for (_entity, cannon) in world.query_mut::<&mut Cannon>() {
        let offset = offsets
            .get(usize::from(cannon.index))
            .copied()
            .unwrap_or_default();
        cannon.activate_at_tick = tick.saturating_add(offset);
        cannon.enabled = false;
        cannon.next_fire_tick = u64::MAX;
    }
}

/// Disable every cannon.
pub fn disarm(world: &mut World) {
    for (_entity, cannon) in world.query_mut::<&mut Cannon>() {
        cannon.enabled = false;
        cannon.activate_at_tick = u64::MAX;
        cannon.next_fire_tick = u64::MAX;
    }
}

/// Activate cannons whose time has come and fire those that are due.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, tick: u64, events: &mut Vec<SimEvent>) {
    let mut fired: Vec<(u8, Shot)> = Vec::new();

    for (_entity, (cannon, preview)) in
        world.query_mut::<(&mut Cannon, &mut TrajectoryPreview)>()
    {
        if !cannon.enabled && tick >= cannon.activate_at_tick {
            cannon.enabled = true;
            cannon.next_fire_tick = tick;
            info!(cannon = cannon.index, tick, "cannon enabled");
        }
        if !cannon.enabled || tick < cannon.next_fire_tick {
            continue;
        }

        let shot = cannon_shot(cannon);
        preview.points = trajectory_points(
            shot.position,
            shot.velocity,
            shot.acceleration,
            shot.lifespan,
            TRAJECTORY_STEPS,
        );
        let delay = rng.gen_range(FIRE_DELAY_MIN_TICKS..=FIRE_DELAY_MAX_TICKS);
        cannon.next_fire_tick = tick + delay;
        fired.push((cannon.index, shot));
    }

    for (index, shot) in fired {
        let entity = world_setup::spawn_shell(world, index, &shot);
        let body = world_setup::body_id(entity);
        info!(cannon = index, ?body, air_time = shot.lifespan, "shell fired");
        events.push(SimEvent::ShellFired {
            cannon: index,
            body,
            air_time: shot.lifespan,
        });
    }
}
