//! Actor plumbing for the till.
//!
//! This module wraps the synchronous [`TransactionEngine`](crate::engine::TransactionEngine)
//! in a Tokio task so any number of callers can share it safely.
//!
//! # Main Components
//!
//! - [`TillActor`] - Owns the engine and processes requests one at a time
//! - [`TillRequest`] - The message enum carried over the mailbox
//! - [`ActorError`] - Channel failures plus the engine's own [`TillError`](crate::engine::TillError)
//!
//! # Testing
//!
//! See [`mock`] for helpers that stand in for the actor when testing client code.

pub mod actor;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::TillActor;
pub use error::ActorError;
pub use message::{Response, TillRequest};
