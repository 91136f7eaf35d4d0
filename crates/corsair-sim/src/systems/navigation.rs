//! Patrol navigation: steer toward the current waypoint, consume the
//! waypoint queue, idle, then plan a new route.

use rand_chacha::ChaCha8Rng;

use corsair_core::components::{Hull, Patrol};
use corsair_core::config::{AgentConfig, NavigationConfig};
use corsair_core::enums::MovementState;
use corsair_core::types::Point3;

use corsair_ai::path::plan_route;
use corsair_ai::steering::{steer, SteerInput};

/// Advance one patrol step for a passive ship.
pub fn run(
    rng: &mut ChaCha8Rng,
    hull: &mut Hull,
    patrol: &mut Patrol,
    config: &AgentConfig,
    navigation: &NavigationConfig,
    dt: f64,
) {
    match patrol.movement {
        MovementState::Patrolling => move_towards_waypoint(hull, patrol, config, dt),
        MovementState::Idling => idle(rng, hull, patrol, config, navigation, dt),
    }
}

/// Steer toward the current waypoint. On arrival, take the next queued
/// point or start idling.
pub fn move_towards_waypoint(hull: &mut Hull, patrol: &mut Patrol, config: &AgentConfig, dt: f64) {
    let out = steer(&SteerInput {
        position: hull.position,
        yaw: hull.yaw,
        target: patrol.waypoint,
        speed: config.speed,
        turn_speed: config.turn_speed,
        dt,
    });
    hull.position = out.position;
    hull.yaw = out.yaw;
    hull.velocity = out.velocity;

    if out.distance_to_target <= config.arrival_radius {
        match patrol.queue.pop_front() {
            Some(next) => patrol.waypoint = next,
            None => {
                patrol.movement = MovementState::Idling;
                patrol.idle_secs = 0.0;
            }
        }
    }
}

/// Hold position until the idle duration elapses, then plan the next leg.
pub fn idle(
    rng: &mut ChaCha8Rng,
    hull: &mut Hull,
    patrol: &mut Patrol,
    config: &AgentConfig,
    navigation: &NavigationConfig,
    dt: f64,
) {
    hull.velocity = Point3::ZERO;
    patrol.idle_secs += dt;
    if patrol.idle_secs < config.idle_duration_secs {
        return;
    }

    let plan = plan_route(
        rng,
        hull.position,
        patrol.spawn_origin,
        config.patrol_radius,
        &mut patrol.zigzag_sign,
        navigation,
    );
    patrol.waypoint = plan.waypoint;
    patrol.queue = plan.queue;
    patrol.shape = plan.shape;
    patrol.idle_secs = 0.0;
    patrol.movement = MovementState::Patrolling;
}
