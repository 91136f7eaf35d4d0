//! Error type for operations that can be refused.
//!
//! Nothing in the simulation is fatal; these errors describe why a single
//! call did nothing.

use thiserror::Error;

use crate::types::AgentId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no live agent for the given handle")]
    UnknownAgent,
    #[error("{0} is destroyed")]
    AgentDestroyed(AgentId),
    #[error("target position is not finite")]
    InvalidTarget,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("malformed config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
