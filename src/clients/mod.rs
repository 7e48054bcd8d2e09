//! Type-safe handles onto the till actor.

pub mod point_of_sale;
pub mod till_client;

pub use point_of_sale::*;
pub use till_client::*;
