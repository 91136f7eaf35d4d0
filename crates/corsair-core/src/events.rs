//! Requests emitted by the simulation for the presentation layer, and
//! impact reports handed to projectile callbacks.

use serde::{Deserialize, Serialize};

use crate::enums::TerminalCause;
use crate::types::{AgentId, Point3, ProjectileId};

/// Fire-and-forget requests for rendering, audio and effects.
///
/// The simulation never waits on these; the host drains them after each
/// update and forwards them to whatever renders the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Load and attach a model; answer with `SimulationWorld::visual_ready`.
    AttachVisual { agent: AgentId, model: String },
    SetVisible { agent: AgentId, visible: bool },
    DestroyVisual { agent: AgentId },
    PlaySound {
        name: String,
        volume: f64,
        spatial: bool,
        position: Option<Point3>,
    },
    MuzzleFlash { point: Point3, direction: Point3 },
    HitEffect { point: Point3 },
    SplashEffect { point: Point3 },
    ExplosionEffect { point: Point3 },
}

/// Something other than the player that a projectile struck, as reported
/// by the host's impact probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactTarget {
    /// Host-defined identifier of what was struck.
    pub target: String,
    pub point: Point3,
}

/// Passed to a projectile's impact callback when it ends on something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactInfo {
    pub projectile: ProjectileId,
    pub owner: Option<AgentId>,
    pub cause: TerminalCause,
    pub point: Point3,
    /// Set for `TargetHit`.
    pub target: Option<String>,
    /// Whether the host accepted the damage (player hits only).
    pub damage_applied: bool,
}
