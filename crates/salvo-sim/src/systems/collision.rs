//! Collision system: rebuilds the octree from every live projectile, reports
//! the contacts, and destroys both bodies of each contact.

use hecs::{Entity, World};
use tracing::debug;

use salvo_core::aabb::Aabb;
use salvo_core::components::Projectile;
use salvo_core::events::SimEvent;
use salvo_core::state::BoxView;
use salvo_octree::{CollisionReporter, Contact, Octree, OctreeConfig};

use crate::world_setup;

/// Counts hits and keeps the contacts reported since the last drain.
#[derive(Debug, Default)]
pub struct HitCounter {
    hits: u32,
    pending: Vec<Contact>,
}

impl HitCounter {
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Take the contacts reported since the previous call.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Contact> {
        self.pending.drain(..)
    }
}

impl CollisionReporter for HitCounter {
    fn report(&mut self, contact: Contact) {
        self.hits += 1;
        self.pending.push(contact);
    }
}

/// Run the broad phase for this tick. Returns the octree node volumes.
pub fn run(
    world: &mut World,
    scene: &Aabb,
    config: OctreeConfig,
    hit_counter: &mut HitCounter,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) -> Vec<BoxView> {
    let mut tree = Octree::with_config(scene.center(), scene.half_extents(), config);
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        tree.insert(&world_setup::moving_body(entity, projectile));
    }

    let count = tree.report_collisions(hit_counter);
    if count > 0 {
        debug!(count, bodies = tree.len(), nodes = tree.node_count(), "collisions this tick");
    }

    despawn_buffer.clear();
    for contact in hit_counter.drain() {
        for id in [contact.a, contact.b] {
            if let Some(entity) = world_setup::entity_of(id) {
                despawn_buffer.push(entity);
            }
        }
        events.push(SimEvent::Collision {
            a: contact.a,
            b: contact.b,
        });
    }
    despawn_buffer.sort_unstable_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    tree.bounding_boxes()
        .iter()
        .map(|b| BoxView {
            center: b.center(),
            half_extents: b.half_extents(),
        })
        .collect()
}
