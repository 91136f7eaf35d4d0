//! Core types and definitions for the Corsair NPC combat simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! components, configuration, presentation events, snapshots, constants
//! and the small vector toolkit. It has no engine state and no runtime.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
