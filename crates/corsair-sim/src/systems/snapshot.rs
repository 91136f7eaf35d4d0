//! Snapshot system: queries the ECS world and builds a `WorldSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use corsair_core::components::*;
use corsair_core::config::AgentConfig;
use corsair_core::state::{AgentView, ProjectileView, WorldSnapshot};
use corsair_core::types::SimTime;

/// Build a snapshot with agents in insertion order.
pub fn build_snapshot(world: &World, time: &SimTime, roster: &[Entity]) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        agents: roster
            .iter()
            .filter_map(|entity| agent_view(world, *entity))
            .collect(),
        projectiles: build_projectiles(world),
    }
}

/// View of a single agent, or `None` if the entity is not an agent.
pub fn agent_view(world: &World, entity: Entity) -> Option<AgentView> {
    let mut query = world
        .query_one::<(
            &Ship,
            &Hull,
            &Attitude,
            &Health,
            &Combat,
            &Patrol,
            &Visual,
            Option<&FollowState>,
        )>(entity)
        .ok()?;
    let (ship, hull, attitude, health, combat, patrol, visual, follow) = query.get()?;

    Some(AgentView {
        id: ship.id,
        position: hull.position,
        yaw: hull.yaw,
        velocity: hull.velocity,
        heave: attitude.heave,
        pitch: attitude.pitch,
        roll: attitude.roll,
        health: health.current,
        max_health: health.max,
        destroyed: health.destroyed,
        movement: patrol.movement,
        combat: combat.state,
        follow_mode: follow.map(|f| f.mode),
        cooldown_secs: combat.cooldown_secs,
        waypoint: patrol.waypoint,
        queued_waypoints: patrol.queue.len(),
        visual: visual.state,
        visible: visual.visible,
    })
}

/// Configuration stored on an agent.
pub fn agent_config(world: &World, entity: Entity) -> Option<AgentConfig> {
    world.get::<&AgentConfig>(entity).ok().map(|c| (*c).clone())
}

/// Flying projectiles ordered by id.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            id: p.id,
            owner: p.owner,
            position: p.position,
            velocity: p.velocity,
            spin: p.spin,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
