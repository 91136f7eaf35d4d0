//! ECS systems that operate on the simulation world each update.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus whatever per-update inputs they need. They do not own state; all
//! state lives in components or in `SimulationWorld`.

pub mod bobbing;
pub mod cleanup;
pub mod combat;
pub mod lifecycle;
pub mod navigation;
pub mod projectiles;
pub mod pursuit;
pub mod snapshot;
pub mod weapon;
