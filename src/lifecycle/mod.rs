//! Starting, wiring and stopping the till.

pub mod till_system;
pub mod tracing;

pub use till_system::TillSystem;
pub use tracing::setup_tracing;
