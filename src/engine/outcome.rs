//! Results of the forgiving till operations.
//!
//! Sale and restock are triggered from an already rendered listing, so a product
//! that vanished in the meantime is not an error: the operation reports
//! `Skipped` and writes nothing. Only an out-of-stock sale is rejected, and that
//! travels as [`TillError::BlockedSale`](super::TillError::BlockedSale).

use crate::catalog::Catalog;
use crate::model::{Aggregates, ProductRecord};

/// What a sale did.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    Sold(SaleReceipt),
    /// No product by that name; nothing changed.
    Skipped,
}

/// State of the sold product and the till right after a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    pub product: ProductRecord,
    pub aggregates: Aggregates,
}

/// What a restock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestockOutcome {
    Restocked { stock: u32 },
    /// No product by that name; nothing changed.
    Skipped,
}

/// Everything a front-end needs to redraw after a mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub aggregates: Aggregates,
}
