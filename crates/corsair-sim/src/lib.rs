//! Simulation engine for Corsair NPC ships.
//!
//! Owns the hecs ECS world, advances agents and projectiles once per frame,
//! and produces `WorldSnapshot`s and presentation events for the host game.

pub mod engine;
pub mod host;
pub mod systems;

pub use corsair_core as core;
pub use engine::SimulationWorld;
pub use host::CombatHost;
pub use systems::lifecycle::DamageOutcome;
pub use systems::projectiles::ProjectileSpec;
pub use systems::weapon::FireRejection;
