//! Pursuit and orbit target planning for engaged ships.
//!
//! Each call yields a point near the player for the steering step plus a
//! speed multiplier. The maneuver (direct approach or orbit) is re-rolled
//! on a timer so engaged ships stay hard to predict.

use std::f64::consts::TAU;

use rand::Rng;

use corsair_core::components::FollowState;
use corsair_core::config::PursuitConfig;
use corsair_core::enums::FollowMode;
use corsair_core::math::{horizontal_direction, horizontal_distance};
use corsair_core::types::Point3;

/// Where an engaged ship sits relative to its follow band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// Inside the minimum distance; back off at reduced speed.
    BackOff,
    /// Within the band; hold the optimal stand-off.
    Hold,
    /// Beyond the maximum distance; close in at boosted speed.
    CloseIn,
}

/// Result of a pursuit planning step.
#[derive(Debug, Clone, Copy)]
pub struct FollowPlan {
    pub target: Point3,
    pub speed_multiplier: f64,
    pub distance_to_player: f64,
    pub approach: Approach,
    /// The maneuver timer fired this step.
    pub rerolled: bool,
}

/// Fresh follow state for a ship that just turned aggressive.
pub fn begin_follow(
    rng: &mut impl Rng,
    agent: Point3,
    player: Point3,
    now_secs: f64,
    config: &PursuitConfig,
) -> FollowState {
    let (jitter, radius_jitter) = roll_jitter(rng, config.jitter);
    FollowState {
        mode: FollowMode::Direct,
        orbit_angle: orbit_angle_of(agent, player),
        orbit_direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        last_mode_change_secs: now_secs,
        jitter,
        radius_jitter,
    }
}

/// Classify a distance against the follow band.
pub fn approach_for(distance: f64, config: &PursuitConfig) -> Approach {
    if distance < config.min_distance {
        Approach::BackOff
    } else if distance > config.max_distance {
        Approach::CloseIn
    } else {
        Approach::Hold
    }
}

/// Advance the follow state and compute this step's target.
#[allow(clippy::too_many_arguments)]
pub fn plan_follow(
    rng: &mut impl Rng,
    state: &mut FollowState,
    agent: Point3,
    player: Point3,
    now_secs: f64,
    dt: f64,
    water_level: f64,
    config: &PursuitConfig,
) -> FollowPlan {
    let rerolled = now_secs - state.last_mode_change_secs >= config.mode_switch_interval_secs;
    if rerolled {
        reroll_maneuver(rng, state, agent, player, now_secs, config);
    }

    let distance = horizontal_distance(agent, player);
    let approach = approach_for(distance, config);

    let mut target = match state.mode {
        FollowMode::Direct => {
            // Stand-off point on the line from the player back toward the ship.
            // The approach band only scales speed; the point stays at optimal distance.
            let toward_agent = horizontal_direction(player, agent)
                .unwrap_or_else(|| Point3::new(1.0, 0.0, 0.0));
            player + toward_agent * config.optimal_distance + state.jitter
        }
        FollowMode::Orbit => {
            state.orbit_angle =
                (state.orbit_angle + config.orbit_speed * dt * state.orbit_direction).rem_euclid(TAU);
            let radius = (config.optimal_distance + state.radius_jitter).max(0.0);
            player
                + Point3::new(
                    state.orbit_angle.cos() * radius,
                    0.0,
                    state.orbit_angle.sin() * radius,
                )
        }
    };
    target.y = water_level;

    let speed_multiplier = match approach {
        Approach::BackOff => config.speed_reduction,
        Approach::Hold => 1.0,
        Approach::CloseIn => config.speed_boost,
    };

    FollowPlan {
        target,
        speed_multiplier,
        distance_to_player: distance,
        approach,
        rerolled,
    }
}

fn reroll_maneuver(
    rng: &mut impl Rng,
    state: &mut FollowState,
    agent: Point3,
    player: Point3,
    now_secs: f64,
    config: &PursuitConfig,
) {
    let next_mode = if rng.gen_bool(config.orbit_probability) {
        FollowMode::Orbit
    } else {
        FollowMode::Direct
    };
    if next_mode == FollowMode::Orbit && state.mode != FollowMode::Orbit {
        // Start the orbit where the ship currently is
        state.orbit_angle = orbit_angle_of(agent, player);
    }
    state.mode = next_mode;

    if rng.gen_bool(config.direction_flip_probability) {
        state.orbit_direction = -state.orbit_direction;
    }

    let (jitter, radius_jitter) = roll_jitter(rng, config.jitter);
    state.jitter = jitter;
    state.radius_jitter = radius_jitter;
    state.last_mode_change_secs = now_secs;
}

fn roll_jitter(rng: &mut impl Rng, bound: f64) -> (Point3, f64) {
    if bound <= 0.0 {
        return (Point3::ZERO, 0.0);
    }
    let jitter = Point3::new(
        rng.gen_range(-bound..=bound),
        0.0,
        rng.gen_range(-bound..=bound),
    );
    (jitter, rng.gen_range(-bound..=bound))
}

/// Angle of `agent` around `player`, in the orbit parametrization.
fn orbit_angle_of(agent: Point3, player: Point3) -> f64 {
    (agent.z - player.z).atan2(agent.x - player.x).rem_euclid(TAU)
}
