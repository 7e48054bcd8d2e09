//! # PointOfSale Trait
//!
//! The operations a presentation layer may invoke, as one async interface. Every
//! call returns an outcome the front-end must surface to the user; after any
//! mutation the front-end re-reads state through [`PointOfSale::snapshot`].
use crate::engine::{RestockOutcome, SaleOutcome, Snapshot};
use crate::framework::ActorError;
use crate::model::{Aggregates, ProductRecord};
use crate::money::Money;
use async_trait::async_trait;

#[async_trait]
pub trait PointOfSale: Send + Sync {
    /// Current catalog and aggregates, for rendering.
    async fn snapshot(&self) -> Result<Snapshot, ActorError>;

    /// Adds a product with empty stock.
    async fn create_product(&self, name: &str, price: Money) -> Result<ProductRecord, ActorError>;

    /// Removes a product. Unknown names are an error.
    async fn delete_product(&self, name: &str) -> Result<ProductRecord, ActorError>;

    /// Sells one unit. Unknown names are skipped, empty stock is an error.
    async fn sell(&self, name: &str) -> Result<SaleOutcome, ActorError>;

    /// Adds one unit of stock. Unknown names are skipped.
    async fn restock(&self, name: &str) -> Result<RestockOutcome, ActorError>;

    /// Zeroes units sold and total revenue. Callers confirm with the user first.
    async fn reset_stats(&self) -> Result<Aggregates, ActorError>;

    /// Zeroes the cart total.
    async fn reset_cart(&self) -> Result<Aggregates, ActorError>;
}
