//! The game the simulation runs inside.
//!
//! Player state, damage bookkeeping and stats belong to the host. The
//! simulation reads the player position once per update and reports hits
//! back through this trait. The water plane is static and comes from
//! `WorldConfig::water_level`. Presentation requests (models, sounds, effects)
//! are not routed here; they are queued as `SimEvent`s instead.

use corsair_core::enums::DamageSource;
use corsair_core::events::ImpactTarget;
use corsair_core::types::{AgentId, Point3};

/// Collaborator interface implemented by the embedding game.
pub trait CombatHost {
    /// Current player position, or `None` when there is no player to engage.
    fn player_position(&self) -> Option<Point3>;

    /// Apply damage to the player. Returns whether it was accepted.
    fn apply_damage_to_player(&mut self, amount: f64, source: DamageSource) -> bool;

    /// Damage everything within `radius` of `point`.
    fn apply_splash_damage(&mut self, _point: Point3, _radius: f64, _amount: f64) {}

    fn increment_stat(&mut self, _name: &str, _delta: i64) {}

    /// Report anything other than the player struck by the segment
    /// `from -> to`. Checked before the player and water tests.
    fn probe_impact(
        &mut self,
        _from: Point3,
        _to: Point3,
        _owner: Option<AgentId>,
    ) -> Option<ImpactTarget> {
        None
    }
}
