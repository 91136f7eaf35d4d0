//! Agent lifecycle: spawning, damage, destruction, removal and respawn.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use corsair_core::components::*;
use corsair_core::config::{AgentConfig, WorldConfig};
use corsair_core::constants::{EXPLOSION_VOLUME, SOUND_SHIP_EXPLOSION, STAT_SHIPS_SUNK};
use corsair_core::enums::{CombatState, DamageSource, MovementState, VisualState};
use corsair_core::error::{SimError, SimResult};
use corsair_core::events::SimEvent;
use corsair_core::types::{AgentId, Point3};

use corsair_ai::path::plan_route;

use crate::host::CombatHost;

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Already destroyed, inside the damage cooldown, or not a valid amount.
    Ignored,
    Applied { remaining: f64 },
    /// This hit sank the ship.
    Destroyed,
}

/// A removed ship waiting to come back.
#[derive(Debug, Clone)]
pub struct RespawnTicket {
    pub due_secs: f64,
    pub origin: Point3,
    pub config: AgentConfig,
}

/// Spawn a ship at `position` on the water plane with a random heading and
/// a freshly planned route.
pub fn spawn_agent(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<SimEvent>,
    id: AgentId,
    position: Point3,
    config: AgentConfig,
    world_config: &WorldConfig,
) -> Entity {
    let origin = Point3::new(position.x, world_config.water_level, position.z);
    let yaw = rng.gen_range(0.0..TAU);
    let mut zigzag_sign = 1.0;
    let plan = plan_route(
        rng,
        origin,
        origin,
        config.patrol_radius,
        &mut zigzag_sign,
        &world_config.navigation,
    );

    events.push(SimEvent::AttachVisual {
        agent: id,
        model: config.model.clone(),
    });

    let entity = world.spawn((
        Ship { id },
        Hull {
            position: origin,
            yaw,
            velocity: Point3::ZERO,
        },
        Attitude::default(),
        Health {
            current: config.max_health,
            max: config.max_health,
            destroyed: false,
            last_damage_secs: None,
            damage_cooldown_secs: config.damage_cooldown_secs,
        },
        Combat {
            state: CombatState::Passive,
            enabled: config.combat_enabled,
            attack_range: config.attack_range,
            aggro_range: config.aggro_range,
            cooldown_secs: 0.0,
        },
        Patrol {
            movement: MovementState::Patrolling,
            spawn_origin: origin,
            waypoint: plan.waypoint,
            queue: plan.queue,
            idle_secs: 0.0,
            zigzag_sign,
            shape: plan.shape,
        },
        Visual {
            state: VisualState::Pending,
            visible: true,
        },
        config,
    ));

    info!(agent = %id, x = origin.x, z = origin.z, yaw, "agent created");
    entity
}

/// Apply `amount` of damage to an agent.
///
/// Hits inside the per-agent damage cooldown are ignored. Reaching zero
/// health starts the destruction sequence exactly once.
#[allow(clippy::too_many_arguments)]
pub fn take_damage<H: CombatHost + ?Sized>(
    world: &mut World,
    events: &mut Vec<SimEvent>,
    world_config: &WorldConfig,
    now_secs: f64,
    entity: Entity,
    amount: f64,
    source: DamageSource,
    host: &mut H,
) -> SimResult<DamageOutcome> {
    let Ok((ship, hull, health)) = world.query_one_mut::<(&Ship, &Hull, &mut Health)>(entity)
    else {
        warn!(?entity, "damage for unknown agent");
        return Err(SimError::UnknownAgent);
    };
    let id = ship.id;
    let position = hull.position;

    if health.destroyed {
        return Ok(DamageOutcome::Ignored);
    }
    if !(amount.is_finite() && amount >= 0.0) {
        warn!(agent = %id, amount, "ignoring invalid damage amount");
        return Ok(DamageOutcome::Ignored);
    }
    if let Some(last) = health.last_damage_secs {
        if now_secs - last < health.damage_cooldown_secs {
            return Ok(DamageOutcome::Ignored);
        }
    }

    health.current = (health.current - amount).clamp(0.0, health.max);
    health.last_damage_secs = Some(now_secs);
    if health.current > 0.0 {
        return Ok(DamageOutcome::Applied {
            remaining: health.current,
        });
    }

    health.destroyed = true;
    destroy(world, events, world_config, now_secs, entity, id, position);
    host.increment_stat(STAT_SHIPS_SUNK, 1);
    info!(agent = %id, ?source, "agent destroyed");
    Ok(DamageOutcome::Destroyed)
}

/// Destruction sequence: effects, hide the model, stop, schedule removal.
fn destroy(
    world: &mut World,
    events: &mut Vec<SimEvent>,
    world_config: &WorldConfig,
    now_secs: f64,
    entity: Entity,
    id: AgentId,
    position: Point3,
) {
    events.push(SimEvent::ExplosionEffect { point: position });
    events.push(SimEvent::PlaySound {
        name: SOUND_SHIP_EXPLOSION.to_string(),
        volume: EXPLOSION_VOLUME,
        spatial: true,
        position: Some(position),
    });
    events.push(SimEvent::SetVisible {
        agent: id,
        visible: false,
    });

    if let Ok((hull, combat, visual)) =
        world.query_one_mut::<(&mut Hull, &mut Combat, &mut Visual)>(entity)
    {
        hull.velocity = Point3::ZERO;
        combat.state = CombatState::Passive;
        visual.visible = false;
    }
    let _ = world.remove_one::<FollowState>(entity);
    let _ = world.insert_one(
        entity,
        Wreck {
            destroyed_at_secs: now_secs,
            remove_at_secs: now_secs + world_config.destruction_delay_secs,
        },
    );
}

/// Wrecks whose removal time has come, with their respawn tickets.
pub fn due_wrecks(world: &World, now_secs: f64) -> Vec<(Entity, AgentId, Option<RespawnTicket>)> {
    let mut due: Vec<(Entity, AgentId, Option<RespawnTicket>)> = world
        .query::<(&Ship, &Wreck, &Patrol, &AgentConfig)>()
        .iter()
        .filter(|(_, (_, wreck, _, _))| wreck.remove_at_secs <= now_secs)
        .map(|(entity, (ship, _, patrol, config))| {
            let ticket = config.respawn_delay_secs.map(|delay| RespawnTicket {
                due_secs: now_secs + delay,
                origin: patrol.spawn_origin,
                config: config.clone(),
            });
            (entity, ship.id, ticket)
        })
        .collect();
    due.sort_by_key(|(_, id, _)| *id);
    due
}
