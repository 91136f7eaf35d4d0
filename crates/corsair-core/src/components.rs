//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and in `corsair-ai`, not components.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::ImpactInfo;
use crate::types::{AgentId, Point3, ProjectileId};

/// Marks an entity as an NPC ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship {
    pub id: AgentId,
}

/// Simulated pose of a ship. Always on the water plane.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hull {
    pub position: Point3,
    /// Radians about +Y; the hull faces opposite its travel vector.
    pub yaw: f64,
    /// Velocity applied during the last update (derived, never integrated).
    pub velocity: Point3,
}

/// Cosmetic wave motion layered over the hull pose.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Attitude {
    pub heave: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Hull points and hit bookkeeping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    pub destroyed: bool,
    /// Sim time of the last accepted hit.
    pub last_damage_secs: Option<f64>,
    pub damage_cooldown_secs: f64,
}

/// Engagement posture and weapon readiness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Combat {
    pub state: CombatState,
    pub enabled: bool,
    pub attack_range: f64,
    pub aggro_range: f64,
    /// Seconds until the cannons are reloaded; fire is allowed at zero.
    pub cooldown_secs: f64,
}

/// Patrol navigation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patrol {
    pub movement: MovementState,
    /// Anchor for waypoint generation and respawn.
    pub spawn_origin: Point3,
    pub waypoint: Point3,
    /// Remaining points of the current plan, consumed front to back.
    pub queue: VecDeque<Point3>,
    pub idle_secs: f64,
    /// Sign of the next zigzag offset; flips on every zigzag leg.
    pub zigzag_sign: f64,
    pub shape: PathShape,
}

/// Pursuit state. Present only while the ship is aggressive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowState {
    pub mode: FollowMode,
    pub orbit_angle: f64,
    /// +1.0 or -1.0.
    pub orbit_direction: f64,
    /// Sim time the maneuver was last re-rolled.
    pub last_mode_change_secs: f64,
    /// Offset added to direct-mode target points.
    pub jitter: Point3,
    /// Offset added to the orbit radius.
    pub radius_jitter: f64,
}

/// Presentation readiness of the ship model.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Visual {
    pub state: VisualState,
    pub visible: bool,
}

/// Attached when a ship is destroyed; the ship is removed at `remove_at_secs`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wreck {
    pub destroyed_at_secs: f64,
    pub remove_at_secs: f64,
}

/// Invoked once when a projectile ends on something.
pub type ImpactCallback = Arc<dyn Fn(&ImpactInfo) + Send + Sync>;

/// A cannonball in flight.
#[derive(Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: Option<AgentId>,
    pub phase: ProjectilePhase,
    pub position: Point3,
    pub velocity: Point3,
    /// Simulated flight time: the sum of ballistic steps taken.
    pub elapsed_secs: f64,
    pub traveled: f64,
    pub damage: f64,
    pub hit_radius: f64,
    pub splash_radius: f64,
    pub splash_damage: f64,
    pub max_travel_distance: f64,
    pub max_lifetime_secs: f64,
    /// Visual spin angle (radians).
    pub spin: f64,
    pub spin_rate: f64,
    pub terminal: Option<TerminalCause>,
    pub on_impact: Option<ImpactCallback>,
}

impl std::fmt::Debug for Projectile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Projectile")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("phase", &self.phase)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("traveled", &self.traveled)
            .field("terminal", &self.terminal)
            .field("on_impact", &self.on_impact.is_some())
            .finish_non_exhaustive()
    }
}
