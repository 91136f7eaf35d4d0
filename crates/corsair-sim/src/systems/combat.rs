//! Per-agent combat update.
//!
//! Ticks the reload timer, evaluates the combat FSM from corsair-ai, keeps
//! the follow state in step with the combat state, then hands motion to
//! pursuit (aggressive) or patrol navigation (passive).

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use corsair_core::components::{Combat, FollowState, Health, Hull, Patrol, Ship};
use corsair_core::config::{AgentConfig, WorldConfig};
use corsair_core::enums::CombatState;
use corsair_core::math::horizontal_distance;
use corsair_core::types::Point3;

use corsair_ai::fsm::{evaluate, tick_cooldown, CombatContext};
use corsair_ai::pursuit::begin_follow;

use crate::systems::navigation;
use crate::systems::pursuit::{self, PursuitFrame};

/// Per-update inputs shared by every agent.
pub struct AgentFrame<'a> {
    pub now_secs: f64,
    pub dt: f64,
    pub player: Option<Point3>,
    pub config: &'a WorldConfig,
}

/// Update one agent. Returns the point to fire at when the FSM asks for a
/// shot this tick.
pub fn update_agent(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    frame: &AgentFrame<'_>,
) -> Option<Point3> {
    let (state, should_fire) = evaluate_posture(world, rng, entity, frame)?;

    match state {
        CombatState::Aggressive => {
            let Ok((ship, hull, follow, agent)) = world
                .query_one_mut::<(&Ship, &mut Hull, &mut FollowState, &AgentConfig)>(entity)
            else {
                return None;
            };
            let pursuit_frame = PursuitFrame {
                player: frame.player,
                now_secs: frame.now_secs,
                dt: frame.dt,
                water_level: frame.config.water_level,
                config: &frame.config.pursuit,
            };
            // Nothing to chase means nothing to shoot at either
            if !pursuit::update_follow(rng, ship.id, hull, follow, agent, &pursuit_frame) {
                return None;
            }
        }
        CombatState::Passive => {
            let Ok((hull, patrol, agent)) =
                world.query_one_mut::<(&mut Hull, &mut Patrol, &AgentConfig)>(entity)
            else {
                return None;
            };
            navigation::run(rng, hull, patrol, agent, &frame.config.navigation, frame.dt);
        }
    }

    if should_fire {
        frame.player
    } else {
        None
    }
}

/// Tick the reload, run the FSM and create or drop follow state on a
/// transition. `None` for missing or destroyed agents.
fn evaluate_posture(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    entity: Entity,
    frame: &AgentFrame<'_>,
) -> Option<(CombatState, bool)> {
    let (id, position, update) = {
        let (ship, hull, health, combat) = world
            .query_one_mut::<(&Ship, &Hull, &Health, &mut Combat)>(entity)
            .ok()?;
        if health.destroyed {
            return None;
        }

        combat.cooldown_secs = tick_cooldown(combat.cooldown_secs, frame.dt);
        let distance = frame
            .player
            .map(|player| horizontal_distance(hull.position, player));
        let update = evaluate(&CombatContext {
            state: combat.state,
            combat_enabled: combat.enabled,
            distance_to_player: distance,
            attack_range: combat.attack_range,
            aggro_range: combat.aggro_range,
            cooldown_secs: combat.cooldown_secs,
        });
        if update.state_changed {
            debug!(
                agent = %ship.id,
                from = ?combat.state,
                to = ?update.new_state,
                distance = distance.unwrap_or(f64::INFINITY),
                "combat state changed"
            );
            combat.state = update.new_state;
        }
        (ship.id, hull.position, update)
    };

    let has_follow = world.get::<&FollowState>(entity).is_ok();
    match (update.new_state, frame.player) {
        (CombatState::Aggressive, Some(player)) if !has_follow => {
            let follow = begin_follow(
                rng,
                position,
                player,
                frame.now_secs,
                &frame.config.pursuit,
            );
            debug!(agent = %id, mode = ?follow.mode, "pursuit started");
            let _ = world.insert_one(entity, follow);
        }
        (CombatState::Passive, _) if has_follow => {
            let _ = world.remove_one::<FollowState>(entity);
        }
        _ => {}
    }

    Some((update.new_state, update.should_fire))
}
