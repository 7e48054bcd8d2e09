//! # Transaction Engine
//!
//! The till's state machine. It applies sale and restock events to the catalog and
//! keeps the global aggregate counters in the same persistence port.
//!
//! ## States
//!
//! A product is `InStock` when `stock > 0` and `OutOfStock` otherwise.
//!
//! - **Restock**: `stock += 1`. Always moves an out-of-stock product back in stock.
//! - **Sell**: rejected with [`TillError::BlockedSale`] when out of stock. Otherwise,
//!   as one transition: product `sales += 1` and `revenue += price`; cart total,
//!   units sold and total revenue grow by the price (units by one); stock drops by
//!   one, floored at zero.
//! - **Reset stats**: units sold and total revenue go to zero. The cart and every
//!   product's own counters are left alone.
//! - **Reset cart**: the cart total goes to zero.
//!
//! A sale that would push a product's revenue, the cart or total revenue past
//! [`Money::MAX`] is rejected with [`TillError::LimitExceeded`] and writes nothing.
//!
//! A sale writes the catalog and all three counters in one
//! [`set_many`](crate::storage::KeyValueStore::set_many) call, so on stores that
//! batch atomically there is no moment where one is updated and the other is not.
//!
//! ## Ownership
//!
//! The engine is plain synchronous code and assumes it is the only writer. When
//! several tasks need it, run it inside a [`TillActor`](crate::framework::TillActor),
//! which hands it one request at a time.

pub mod error;
mod ledger;
pub mod outcome;

pub use error::TillError;
pub use outcome::*;

use crate::catalog::{Catalog, CatalogStore};
use crate::model::{Aggregates, ProductRecord};
use crate::money::Money;
use crate::storage::{KeyValueStore, CARDS_KEY};
use tracing::{debug, info, warn};

pub struct TransactionEngine<S> {
    catalog: CatalogStore<S>,
}

impl<S: KeyValueStore> TransactionEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            catalog: CatalogStore::new(store),
        }
    }

    pub fn catalog(&self) -> Result<Catalog, TillError> {
        Ok(self.catalog.load()?)
    }

    pub fn product(&self, name: &str) -> Result<Option<ProductRecord>, TillError> {
        Ok(self.catalog.load()?.get(name).cloned())
    }

    pub fn aggregates(&self) -> Result<Aggregates, TillError> {
        Ok(ledger::load(self.catalog.store())?)
    }

    pub fn snapshot(&self) -> Result<Snapshot, TillError> {
        Ok(Snapshot {
            catalog: self.catalog()?,
            aggregates: self.aggregates()?,
        })
    }

    pub fn create_product(&mut self, name: &str, price: Money) -> Result<ProductRecord, TillError> {
        Ok(self.catalog.create(name, price)?)
    }

    pub fn delete_product(&mut self, name: &str) -> Result<ProductRecord, TillError> {
        Ok(self.catalog.delete(name)?)
    }

    /// Adds one unit of stock. Unknown products are skipped.
    pub fn restock(&mut self, name: &str) -> Result<RestockOutcome, TillError> {
        match self.catalog.update(name, |record| record.restock())? {
            Some(stock) => {
                info!(product = name, stock, "Restocked");
                Ok(RestockOutcome::Restocked { stock })
            }
            None => {
                debug!(product = name, "Restock skipped, no such product");
                Ok(RestockOutcome::Skipped)
            }
        }
    }

    /// Sells one unit. Unknown products are skipped; out-of-stock products are
    /// rejected without touching any counter.
    pub fn sell(&mut self, name: &str) -> Result<SaleOutcome, TillError> {
        let mut catalog = self.catalog.load()?;
        let Some(record) = catalog.get_mut(name) else {
            debug!(product = name, "Sale skipped, no such product");
            return Ok(SaleOutcome::Skipped);
        };
        if !record.is_in_stock() {
            warn!(product = name, "Blocked sale, out of stock");
            return Err(TillError::BlockedSale {
                name: name.to_string(),
            });
        }

        let mut aggregates = ledger::load(self.catalog.store())?;
        record
            .record_sale()
            .and_then(|()| aggregates.record_sale(record.price))
            .map_err(|e| {
                warn!(product = name, error = %e, "Sale rejected, money limit");
                TillError::LimitExceeded {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            })?;
        let product = record.clone();

        let [sold, revenue] = ledger::stats_entries(&aggregates);
        let entries = [
            (CARDS_KEY, catalog.to_json()?),
            ledger::cart_entry(&aggregates),
            sold,
            revenue,
        ];
        self.catalog.store().set_many(&entries)?;

        info!(
            product = name,
            price = %product.price,
            stock = product.stock,
            cart = %aggregates.cart_total,
            "Sold"
        );
        Ok(SaleOutcome::Sold(SaleReceipt {
            product,
            aggregates,
        }))
    }

    /// Zeroes units sold and total revenue. Confirmation is the caller's job.
    pub fn reset_stats(&mut self) -> Result<Aggregates, TillError> {
        let mut aggregates = self.aggregates()?;
        aggregates.reset_stats();
        self.catalog
            .store()
            .set_many(&ledger::stats_entries(&aggregates))?;
        info!("Stats reset");
        Ok(aggregates)
    }

    /// Zeroes the cart total.
    pub fn reset_cart(&mut self) -> Result<Aggregates, TillError> {
        let mut aggregates = self.aggregates()?;
        aggregates.reset_cart();
        let (key, value) = ledger::cart_entry(&aggregates);
        self.catalog.store().set(key, &value)?;
        info!("Cart reset");
        Ok(aggregates)
    }
}
