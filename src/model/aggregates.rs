//! Global till counters.
//!
//! The three aggregates are a separately persisted, separately resettable
//! projection of the sales stream. They are **not** recomputed from the catalog:
//! after a stats reset `units_sold` no longer equals the sum of per-product `sales`,
//! and that is intended. Deleting a product likewise leaves the aggregates alone.

use crate::money::{Money, MoneyError};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    /// Sum of sale prices since the cart was last cleared.
    pub cart_total: Money,
    /// Units sold since stats were last reset.
    pub units_sold: u64,
    /// Sale amounts since stats were last reset.
    pub total_revenue: Money,
}

impl Aggregates {
    /// Adds one sale at `price`. Either every counter moves or none does.
    pub fn record_sale(&mut self, price: Money) -> Result<(), MoneyError> {
        let cart_total = self.cart_total.checked_add(price)?;
        let total_revenue = self.total_revenue.checked_add(price)?;
        self.cart_total = cart_total;
        self.total_revenue = total_revenue;
        self.units_sold = self.units_sold.saturating_add(1);
        Ok(())
    }

    /// Clears units sold and total revenue. The cart is left as is.
    pub fn reset_stats(&mut self) {
        self.units_sold = 0;
        self.total_revenue = Money::ZERO;
    }

    pub fn reset_cart(&mut self) {
        self.cart_total = Money::ZERO;
    }
}
