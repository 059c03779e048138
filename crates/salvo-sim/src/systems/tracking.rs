//! Tracking system: the defender picks the shell it can reach soonest and
//! fires an interceptor at the predicted meeting point.

use hecs::{Entity, World};
use tracing::{debug, info};

use salvo_core::components::{Defender, Projectile, Shell};
use salvo_core::constants::INTERCEPTOR_LIFESPAN_MARGIN;
use salvo_core::events::SimEvent;
use salvo_core::math::Vec3;
use salvo_core::types::MovingBody;

use crate::ballistics::{aimed_launch_velocity, horizontal_speed, Shot};
use crate::intercept::{Aim, InterceptQuery};
use crate::world_setup;

/// A chosen target and how to hit it.
#[derive(Debug, Clone, Copy)]
pub struct Engagement {
    pub target: MovingBody,
    pub time: f32,
    pub aim: Aim,
}

/// Among `candidates`, the one with the smallest feasible intercept time.
/// Ties keep the earlier candidate.
pub fn select_target(defender: &Defender, candidates: &[MovingBody]) -> Option<Engagement> {
    let launcher_speed = horizontal_speed(&defender.profile);
    let mut best: Option<Engagement> = None;

    for target in candidates {
        let solution = InterceptQuery {
            launcher_speed,
            shooter_position: defender.position,
            target_position: target.position,
            target_velocity: target.velocity,
            target_acceleration: target.acceleration,
        }
        .solve();
        let Some(aim) = solution.aim else {
            continue;
        };
        if best.map_or(true, |b| solution.time < b.time) {
            best = Some(Engagement {
                target: *target,
                time: solution.time,
                aim,
            });
        }
    }
    best
}

/// Shells strictly inside the defender's vision sphere.
fn visible_shells(world: &mut World, defender: &Defender) -> Vec<MovingBody> {
    let radius_sq = defender.vision_radius * defender.vision_radius;
    world
        .query_mut::<(&Projectile, &Shell)>()
        .into_iter()
        .filter(|(_, (p, _))| (p.position - defender.position).magnitude_squared() < radius_sq)
        .map(|(entity, (p, _))| world_setup::moving_body(entity, p))
        .collect()
}

pub fn run(world: &mut World, tick: u64, events: &mut Vec<SimEvent>) {
    let defenders: Vec<(Entity, Defender)> = world
        .query_mut::<&Defender>()
        .into_iter()
        .map(|(entity, d)| (entity, d.clone()))
        .collect();

    for (entity, defender) in defenders {
        if tick < defender.ready_at_tick {
            continue;
        }
        let candidates = visible_shells(world, &defender);
        let Some(engagement) = select_target(&defender, &candidates) else {
            if !candidates.is_empty() {
                debug!(count = candidates.len(), "no feasible intercept");
            }
            continue;
        };

        let shot = Shot {
            position: defender.position,
            velocity: aimed_launch_velocity(&defender.profile, engagement.aim.direction),
            acceleration: Vec3::new(0.0, defender.gravity, 0.0),
            lifespan: engagement.time + INTERCEPTOR_LIFESPAN_MARGIN,
        };
        let interceptor = world_setup::spawn_interceptor(world, &shot);
        let body = world_setup::body_id(interceptor);

        if let Ok(mut d) = world.get::<&mut Defender>(entity) {
            d.ready_at_tick = tick + d.cooldown_ticks;
            d.last_target_speed = Some(engagement.target.speed());
        }

        info!(
            ?body,
            target = ?engagement.target.id,
            time = engagement.time,
            "interceptor fired"
        );
        events.push(SimEvent::InterceptorFired {
            body,
            target: engagement.target.id,
            time_to_intercept: engagement.time,
            aim: engagement.aim.direction,
        });
    }
}
