//! Pursuit motion for aggressive ships.
//!
//! Overrides patrol navigation while engaged: plans a stand-off or orbit
//! point around the player and steers toward it.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use corsair_core::components::{FollowState, Hull};
use corsair_core::config::{AgentConfig, PursuitConfig};
use corsair_core::types::{AgentId, Point3};

use corsair_ai::pursuit::plan_follow;
use corsair_ai::steering::{steer, SteerInput};

/// Per-update inputs shared by every pursuing ship.
pub struct PursuitFrame<'a> {
    pub player: Option<Point3>,
    pub now_secs: f64,
    pub dt: f64,
    pub water_level: f64,
    pub config: &'a PursuitConfig,
}

/// Move one engaged ship. Returns `false` when there was nothing to follow
/// and no motion was applied.
pub fn update_follow(
    rng: &mut ChaCha8Rng,
    id: AgentId,
    hull: &mut Hull,
    follow: &mut FollowState,
    agent: &AgentConfig,
    frame: &PursuitFrame<'_>,
) -> bool {
    let Some(player) = frame.player else {
        return false;
    };

    let previous_mode = follow.mode;
    let plan = plan_follow(
        rng,
        follow,
        hull.position,
        player,
        frame.now_secs,
        frame.dt,
        frame.water_level,
        frame.config,
    );
    if plan.rerolled && follow.mode != previous_mode {
        debug!(agent = %id, from = ?previous_mode, to = ?follow.mode, "follow mode switched");
    }

    let out = steer(&SteerInput {
        position: hull.position,
        yaw: hull.yaw,
        target: plan.target,
        speed: agent.speed * plan.speed_multiplier,
        turn_speed: agent.turn_speed,
        dt: frame.dt,
    });
    hull.position = out.position;
    hull.yaw = out.yaw;
    hull.velocity = out.velocity;
    true
}
