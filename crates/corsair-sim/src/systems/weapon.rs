//! Broadside cannon fire.
//!
//! Checks the firing preconditions in order (agent, target, reload, range),
//! then aims, picks a mount, launches a projectile and starts the reload.
//! A rejected shot never touches the reload timer.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use corsair_core::components::{Combat, Health, Hull, Ship};
use corsair_core::config::{AgentConfig, WorldConfig};
use corsair_core::constants::{CANNON_FIRE_VOLUME, SOUND_CANNON_FIRE};
use corsair_core::events::SimEvent;
use corsair_core::math::is_finite_point;
use corsair_core::types::{AgentId, Point3, ProjectileId};

use corsair_ai::gunnery::{apply_inaccuracy, launch_direction, select_mount};

use crate::systems::projectiles::{self, ProjectileSpec};

/// Why a shot was not fired.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FireRejection {
    #[error("no live agent for the given handle")]
    UnknownAgent,
    #[error("{0} is destroyed")]
    AgentDestroyed(AgentId),
    #[error("target position is not finite")]
    InvalidTarget,
    #[error("reloading, {remaining_secs:.2}s left")]
    OnCooldown { remaining_secs: f64 },
    #[error("target at {distance:.1} is beyond weapon range {range:.1}")]
    OutOfRange { distance: f64, range: f64 },
    #[error("weapon has no mounts")]
    NoMount,
}

impl FireRejection {
    /// Reload and range rejections are routine; the rest indicate a bad call.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            FireRejection::OnCooldown { .. } | FireRejection::OutOfRange { .. }
        )
    }
}

/// Mutable world state a shot touches.
pub struct Armory<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<SimEvent>,
    pub next_projectile_id: &'a mut u32,
}

/// Fire the agent's cannons at `target`.
pub fn try_fire(
    armory: Armory<'_>,
    config: &WorldConfig,
    entity: Entity,
    target: Point3,
) -> Result<ProjectileId, FireRejection> {
    let Armory {
        world,
        rng,
        events,
        next_projectile_id,
    } = armory;

    let (id, hull, destroyed, cooldown_secs, reload) = match world
        .query_one_mut::<(&Ship, &Hull, &Health, &Combat, &AgentConfig)>(entity)
    {
        Ok((ship, hull, health, combat, agent)) => (
            ship.id,
            *hull,
            health.destroyed,
            combat.cooldown_secs,
            (agent.min_cooldown_secs, agent.max_cooldown_secs),
        ),
        Err(_) => {
            warn!(?entity, "fire requested for unknown agent");
            return Err(FireRejection::UnknownAgent);
        }
    };

    if destroyed {
        warn!(agent = %id, "fire requested for destroyed agent");
        return Err(FireRejection::AgentDestroyed(id));
    }
    if !is_finite_point(target) {
        warn!(agent = %id, ?target, "fire requested at non-finite target");
        return Err(FireRejection::InvalidTarget);
    }
    if cooldown_secs > 0.0 {
        trace!(agent = %id, cooldown_secs, "still reloading");
        return Err(FireRejection::OnCooldown {
            remaining_secs: cooldown_secs,
        });
    }

    let weapon = &config.weapon;
    let distance = hull.position.distance(target);
    if distance > weapon.range {
        trace!(agent = %id, distance, range = weapon.range, "target out of range");
        return Err(FireRejection::OutOfRange {
            distance,
            range: weapon.range,
        });
    }

    let aim = apply_inaccuracy(rng, target, distance, weapon);
    let Some(mount) = select_mount(hull.position, hull.yaw, aim, &weapon.starboard_mounts) else {
        warn!(agent = %id, "weapon has no mounts");
        return Err(FireRejection::NoMount);
    };
    let direction = launch_direction(mount.world_position, aim, weapon);

    let projectile = projectiles::spawn(
        world,
        next_projectile_id,
        ProjectileSpec::from_weapon(
            mount.world_position,
            direction * weapon.launch_speed,
            Some(id),
            weapon,
        ),
    );

    events.push(SimEvent::MuzzleFlash {
        point: mount.world_position,
        direction,
    });
    events.push(SimEvent::PlaySound {
        name: SOUND_CANNON_FIRE.to_string(),
        volume: CANNON_FIRE_VOLUME,
        spatial: true,
        position: Some(mount.world_position),
    });

    let (min_secs, max_secs) = reload;
    let next_cooldown = rng.gen_range(min_secs..=max_secs);
    if let Ok(mut combat) = world.get::<&mut Combat>(entity) {
        combat.cooldown_secs = next_cooldown;
    }

    debug!(
        agent = %id,
        %projectile,
        distance,
        side = ?mount.side,
        mount = mount.index,
        cooldown_secs = next_cooldown,
        "cannon fired"
    );
    Ok(projectile)
}
