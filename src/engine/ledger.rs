//! Reading and writing the aggregate counters.
//!
//! Each counter lives under its own key as plain text. Unreadable values count as
//! zero, matching how the till has always treated missing or garbled counters.

use crate::model::Aggregates;
use crate::money::Money;
use crate::storage::{KeyValueStore, StorageError, CART_KEY, REVENUE_KEY, SOLD_KEY};
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

pub(crate) fn load<S: KeyValueStore>(store: &S) -> Result<Aggregates, StorageError> {
    Ok(Aggregates {
        cart_total: read_money(store, CART_KEY)?,
        units_sold: read_count(store, SOLD_KEY)?,
        total_revenue: read_money(store, REVENUE_KEY)?,
    })
}

pub(crate) fn cart_entry(aggregates: &Aggregates) -> (&'static str, String) {
    (CART_KEY, aggregates.cart_total.to_string())
}

pub(crate) fn stats_entries(aggregates: &Aggregates) -> [(&'static str, String); 2] {
    [
        (SOLD_KEY, aggregates.units_sold.to_string()),
        (REVENUE_KEY, aggregates.total_revenue.to_string()),
    ]
}

fn read_money<S: KeyValueStore>(store: &S, key: &str) -> Result<Money, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(Money::ZERO);
    };
    Ok(Money::parse(&raw).unwrap_or_else(|e| {
        warn!(key, value = %raw, error = %e, "Unreadable counter, treating as zero");
        Money::ZERO
    }))
}

fn read_count<S: KeyValueStore>(store: &S, key: &str) -> Result<u64, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(0);
    };
    if let Ok(count) = raw.trim().parse::<u64>() {
        return Ok(count);
    }
    // Older data may hold the count as a float ("3.0").
    let count = Money::parse(&raw)
        .ok()
        .and_then(|m| m.as_decimal().trunc().to_u64());
    Ok(count.unwrap_or_else(|| {
        warn!(key, value = %raw, "Unreadable counter, treating as zero");
        0
    }))
}
