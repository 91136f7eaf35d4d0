//! Ship AI for Corsair.
//!
//! Implements the combat posture state machine, steering, procedural patrol
//! paths, pursuit/orbit planning and gunnery as pure functions over plain
//! data. Randomness is always injected by the caller.

pub mod fsm;
pub mod gunnery;
pub mod path;
pub mod pursuit;
pub mod steering;

pub use corsair_core as core;

#[cfg(test)]
mod tests;
