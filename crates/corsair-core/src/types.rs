//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// A point or direction in simulation space.
/// x = East, y = Up, z = South; the water plane is y = 0.
pub type Point3 = glam::DVec3;

/// Stable identifier for an agent, unique for the lifetime of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Identifier of an in-flight projectile (its collision registration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Simulation time tracking.
///
/// Frames arrive with real deltas, so unlike a fixed-rate clock this
/// accumulates whatever `dt` each update reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of updates processed.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shot#{}", self.0)
    }
}
