//! Cleanup system: removes projectiles that reached a terminal phase.

use hecs::{Entity, World};

use corsair_core::components::Projectile;
use corsair_core::enums::ProjectilePhase;

/// Despawn every projectile that is no longer flying.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.phase != ProjectilePhase::Flying {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
