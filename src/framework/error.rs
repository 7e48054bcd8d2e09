//! # Framework Errors
//!
//! Errors a caller of the till can see: either the request never made it through the
//! mailbox, or the engine rejected it.

use crate::engine::TillError;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ActorError {
    #[error("Till actor closed")]
    ActorClosed,
    #[error("Till actor dropped response channel")]
    ActorDropped,
    #[error(transparent)]
    Till(#[from] TillError),
}

impl ActorError {
    /// The engine error behind this failure, if the request reached the engine.
    pub fn till_error(&self) -> Option<&TillError> {
        match self {
            ActorError::Till(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_blocked_sale(&self) -> bool {
        matches!(self, ActorError::Till(TillError::BlockedSale { .. }))
    }
}
