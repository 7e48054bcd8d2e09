use crate::money::{Money, MoneyError};
use serde::{Deserialize, Serialize};

/// Represents one product in the catalog.
///
/// # Persistence
/// Records are stored inside the `cards` document keyed by name, so `name` is not
/// part of the serialized body; the catalog restores it from the key on load.
///
/// # Counters
/// `sales` and `revenue` only ever grow. Resetting the till's statistics does not
/// touch them, see [`Aggregates`](crate::model::Aggregates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(skip)]
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub sales: u64,
    #[serde(default)]
    pub revenue: Money,
}

/// Availability derived from the stock level. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl ProductRecord {
    /// Creates a fresh record with empty stock and zeroed counters.
    ///
    /// # Arguments
    /// * `name` - Unique product name (already trimmed)
    /// * `price` - Unit price, fixed for the life of the record
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            price,
            stock: 0,
            sales: 0,
            revenue: Money::ZERO,
        }
    }

    pub fn availability(&self) -> Availability {
        if self.stock > 0 {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.availability() == Availability::InStock
    }

    /// Adds one unit of stock and returns the new level.
    pub fn restock(&mut self) -> u32 {
        self.stock = self.stock.saturating_add(1);
        self.stock
    }

    /// Books one unit sold against this record.
    ///
    /// The caller checks availability first; stock is still floored at zero here.
    /// If revenue would pass [`Money::MAX`] the record is left unchanged.
    pub fn record_sale(&mut self) -> Result<(), MoneyError> {
        self.revenue = self.revenue.checked_add(self.price)?;
        self.sales = self.sales.saturating_add(1);
        self.stock = self.stock.saturating_sub(1);
        Ok(())
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Money,
}
