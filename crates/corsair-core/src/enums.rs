//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// What an agent does while not engaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    /// Sailing toward the current waypoint.
    #[default]
    Patrolling,
    /// Holding position until the idle timer runs out.
    Idling,
}

/// Engagement posture toward the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Passive,
    Aggressive,
}

/// Pursuit maneuver used while aggressive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowMode {
    /// Close to a stand-off point on the line to the player.
    #[default]
    Direct,
    /// Circle the player at roughly the optimal range.
    Orbit,
}

/// Shape of a generated patrol leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathShape {
    Direct,
    Curved,
    Zigzag,
}

/// Which side of the hull a cannon mount sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MountSide {
    Port,
    Starboard,
}

/// Projectile lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    #[default]
    Flying,
    /// Ended on something: the player, a registered target, or the water.
    Hit,
    /// Ended without striking anything.
    Expired,
}

/// Why a projectile stopped flying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    /// Traveled farther than the projectile's max distance.
    RangeExceeded,
    /// Struck a target reported by the host's impact probe.
    TargetHit,
    /// Intersected the player's collision sphere.
    PlayerHit,
    /// Dropped to the water plane.
    WaterImpact,
    /// Outlived its time box.
    LifetimeExpired,
}

impl TerminalCause {
    /// Phase a projectile ends in for this cause.
    pub fn phase(self) -> ProjectilePhase {
        match self {
            TerminalCause::TargetHit | TerminalCause::PlayerHit | TerminalCause::WaterImpact => {
                ProjectilePhase::Hit
            }
            TerminalCause::RangeExceeded | TerminalCause::LifetimeExpired => {
                ProjectilePhase::Expired
            }
        }
    }
}

/// Readiness of an agent's visual representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualState {
    /// Attach requested, model not loaded yet.
    #[default]
    Pending,
    Ready,
    /// Model failed to load; the agent keeps simulating without it.
    Placeholder,
}

/// Origin of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum DamageSource {
    /// Fired by an NPC ship.
    Agent(crate::types::AgentId),
    /// Dealt by the player.
    Player,
    /// Collisions, hazards and anything else the host applies.
    Environment,
}

/// How projectile flight is integrated relative to frame time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "step")]
pub enum BallisticStep {
    /// One step of the given size per frame, regardless of the frame delta.
    Fixed(f64),
    /// One step of the frame's actual delta.
    FrameDelta,
}

impl Default for BallisticStep {
    fn default() -> Self {
        BallisticStep::Fixed(crate::constants::BALLISTIC_FIXED_STEP)
    }
}

impl BallisticStep {
    /// Integration step to use for a frame of `dt` seconds.
    pub fn step_for(self, dt: f64) -> f64 {
        match self {
            BallisticStep::Fixed(step) => step,
            BallisticStep::FrameDelta => dt,
        }
    }
}
