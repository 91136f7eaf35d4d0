//! World snapshot: the visible simulation state after an update.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, Point3, ProjectileId, SimTime};

/// Everything a presentation layer needs to draw the current frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
}

/// One ship, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Point3,
    pub yaw: f64,
    pub velocity: Point3,
    /// Cosmetic wave offsets (not part of collision).
    pub heave: f64,
    pub pitch: f64,
    pub roll: f64,
    pub health: f64,
    pub max_health: f64,
    pub destroyed: bool,
    pub movement: MovementState,
    pub combat: CombatState,
    pub follow_mode: Option<FollowMode>,
    pub cooldown_secs: f64,
    pub waypoint: Point3,
    pub queued_waypoints: usize,
    pub visual: VisualState,
    pub visible: bool,
}

/// One in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub owner: Option<AgentId>,
    pub position: Point3,
    pub velocity: Point3,
    pub spin: f64,
}
