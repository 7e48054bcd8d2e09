//! Pure data structures: product records and the global aggregate counters.

pub mod aggregates;
pub mod product;

pub use aggregates::*;
pub use product::*;
