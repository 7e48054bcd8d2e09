//! # Catalog Store
//!
//! Owns the mapping of product name to [`ProductRecord`] and its persistence under
//! the [`CARDS_KEY`] key.
//!
//! ## Contract
//!
//! - [`CatalogStore::load`] never fails on absence: no `cards` value is an empty catalog.
//! - [`CatalogStore::save`] replaces the whole document in a single `set`.
//! - [`CatalogStore::create`] rejects blank and duplicate names (exact, case-sensitive).
//! - [`CatalogStore::delete`] rejects unknown names and leaves storage untouched.
//!
//! Names are trimmed on create and delete. Lookups for sale and restock use the key
//! exactly as rendered.

pub mod error;

pub use error::CatalogError;

use crate::model::ProductRecord;
use crate::money::Money;
use crate::storage::{KeyValueStore, StorageError, CARDS_KEY};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info, warn};

/// The full set of products, in creation order.
///
/// Keys are unique; the record's own `name` always equals its key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: IndexMap<String, ProductRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ProductRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ProductRecord> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
        self.records.values()
    }

    /// Inserts a record under its name. Fails if the name is taken.
    pub fn insert(&mut self, record: ProductRecord) -> Result<(), CatalogError> {
        if self.contains(&record.name) {
            return Err(CatalogError::DuplicateName(record.name));
        }
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    /// Removes a record, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<ProductRecord> {
        self.records.shift_remove(name)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Encode {
            key: CARDS_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Corrupt {
            key: CARDS_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut records = IndexMap::<String, ProductRecord>::deserialize(deserializer)?;
        for (name, record) in records.iter_mut() {
            record.name = name.clone();
        }
        Ok(Self { records })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ProductRecord;
    type IntoIter = indexmap::map::Values<'a, String, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

/// Catalog persistence over an injected [`KeyValueStore`].
#[derive(Debug)]
pub struct CatalogStore<S> {
    store: S,
}

impl<S: KeyValueStore> CatalogStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying persistence port.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the persisted catalog, or an empty one if nothing was saved yet.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        match self.store.get(CARDS_KEY)? {
            Some(json) => Ok(Catalog::from_json(&json)?),
            None => {
                debug!("No catalog stored yet");
                Ok(Catalog::new())
            }
        }
    }

    /// Persists the full catalog, replacing the previous document.
    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let json = catalog.to_json()?;
        self.store.set(CARDS_KEY, &json)?;
        debug!(products = catalog.len(), "Catalog saved");
        Ok(())
    }

    /// Adds a product with empty stock and zeroed counters.
    ///
    /// # Errors
    /// - [`CatalogError::Validation`] if the trimmed name is empty, or the price is not
    ///   positive or above [`Money::MAX`]
    /// - [`CatalogError::DuplicateName`] if the name is already in use
    pub fn create(&self, name: &str, price: Money) -> Result<ProductRecord, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("Product name is required".into()));
        }
        if !price.is_positive() {
            return Err(CatalogError::Validation(format!(
                "Price must be greater than zero, got {}",
                price
            )));
        }
        if !price.is_within_limit() {
            return Err(CatalogError::Validation(format!(
                "Price must be at most {}, got {}",
                Money::MAX,
                price
            )));
        }

        let mut catalog = self.load()?;
        let record = ProductRecord::new(name, price);
        if let Err(e) = catalog.insert(record.clone()) {
            warn!(product = name, "Product already exists");
            return Err(e);
        }
        self.save(&catalog)?;

        info!(product = name, %price, size = catalog.len(), "Created");
        Ok(record)
    }

    /// Removes a product and discards its counters.
    ///
    /// Returns the record as it was just before removal.
    pub fn delete(&self, name: &str) -> Result<ProductRecord, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::Validation("Product name is required".into()));
        }

        let mut catalog = self.load()?;
        let Some(record) = catalog.remove(name) else {
            warn!(product = name, "Not found");
            return Err(CatalogError::NotFound(name.to_string()));
        };
        self.save(&catalog)?;

        info!(product = name, size = catalog.len(), "Deleted");
        Ok(record)
    }

    /// Applies `mutate` to one record and saves the catalog.
    ///
    /// Returns `None` without writing anything when the record does not exist.
    pub fn update<R>(
        &self,
        name: &str,
        mutate: impl FnOnce(&mut ProductRecord) -> R,
    ) -> Result<Option<R>, CatalogError> {
        let mut catalog = self.load()?;
        let Some(record) = catalog.get_mut(name) else {
            return Ok(None);
        };
        let result = mutate(record);
        self.save(&catalog)?;
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn store() -> (Arc<MemoryStore>, CatalogStore<Arc<MemoryStore>>) {
        let backing = Arc::new(MemoryStore::new());
        (backing.clone(), CatalogStore::new(backing))
    }

    #[test]
    fn test_load_without_data_is_empty() {
        let (_, catalog_store) = store();
        let catalog = catalog_store.load().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_create_trims_and_zeroes_counters() {
        let (_, catalog_store) = store();
        let record = catalog_store.create("  Widget ", Money::from_minor(999)).unwrap();
        assert_eq!(record.name, "Widget");
        assert_eq!(record.stock, 0);
        assert_eq!(record.sales, 0);
        assert_eq!(record.revenue, Money::ZERO);

        let loaded = catalog_store.load().unwrap();
        assert_eq!(loaded.get("Widget"), Some(&record));
    }

    #[test]
    fn test_create_captures_two_decimal_price() {
        let (_, catalog_store) = store();
        let price = Money::parse("9.999").unwrap();
        catalog_store.create("Widget", price).unwrap();

        let loaded = catalog_store.load().unwrap();
        assert_eq!(loaded.get("Widget").unwrap().price.to_string(), "10.00");
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let (backing, catalog_store) = store();
        let err = catalog_store.create("   ", Money::from_units(1)).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(backing.is_empty());
    }

    #[test]
    fn test_create_rejects_non_positive_price() {
        let (_, catalog_store) = store();
        let err = catalog_store.create("Widget", Money::ZERO).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        let err = catalog_store.create("Widget", Money::from_units(-3)).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_price_above_limit() {
        let (backing, catalog_store) = store();
        for raw in [
            "10000000000000",
            "12345678901234567.89",
            "79228162514264337593543950335",
        ] {
            let err = catalog_store
                .create("Yacht", Money::parse(raw).unwrap())
                .unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)), "{}", raw);
        }
        assert!(backing.is_empty());

        // The store is still usable afterwards.
        catalog_store.create("Tea", Money::from_units(1)).unwrap();
        assert!(catalog_store.load().unwrap().contains("Tea"));
    }

    #[test]
    fn test_largest_price_survives_save_and_load() {
        let (backing, catalog_store) = store();
        let record = catalog_store.create("Yacht", Money::MAX).unwrap();
        catalog_store
            .create("Dinghy", Money::parse("8765432109876.54").unwrap())
            .unwrap();
        let original = backing.get(CARDS_KEY).unwrap();

        let loaded = catalog_store.load().unwrap();
        assert_eq!(loaded.get("Yacht"), Some(&record));
        assert_eq!(loaded.get("Dinghy").unwrap().price.to_string(), "8765432109876.54");

        catalog_store.save(&loaded).unwrap();
        assert_eq!(backing.get(CARDS_KEY).unwrap(), original);
    }

    #[test]
    fn test_create_rejects_duplicate_case_sensitively() {
        let (_, catalog_store) = store();
        catalog_store.create("Widget", Money::from_units(1)).unwrap();

        let err = catalog_store.create("Widget", Money::from_units(2)).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("Widget".into()));

        // Different case is a different product.
        catalog_store.create("widget", Money::from_units(2)).unwrap();
        assert_eq!(catalog_store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_missing_leaves_storage_untouched() {
        let (backing, catalog_store) = store();
        catalog_store.create("Widget", Money::from_units(1)).unwrap();
        let before = backing.get(CARDS_KEY).unwrap();

        let err = catalog_store.delete("Gadget").unwrap_err();
        assert_eq!(err, CatalogError::NotFound("Gadget".into()));
        assert_eq!(backing.get(CARDS_KEY).unwrap(), before);
    }

    #[test]
    fn test_delete_keeps_order_of_remaining() {
        let (_, catalog_store) = store();
        for name in ["A", "B", "C"] {
            catalog_store.create(name, Money::from_units(1)).unwrap();
        }
        let removed = catalog_store.delete("B").unwrap();
        assert_eq!(removed.name, "B");

        let names: Vec<_> = catalog_store.load().unwrap().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn test_update_missing_record_does_not_write() {
        let (backing, catalog_store) = store();
        let result = catalog_store.update("Ghost", |r| r.restock()).unwrap();
        assert_eq!(result, None);
        assert_eq!(backing.get(CARDS_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_of_loaded_catalog_is_idempotent() {
        let (backing, catalog_store) = store();
        catalog_store.create("Widget", Money::parse("2.50").unwrap()).unwrap();
        catalog_store.create("Gadget", Money::parse("0.99").unwrap()).unwrap();
        catalog_store.update("Widget", |r| r.restock()).unwrap();
        let original = backing.get(CARDS_KEY).unwrap();

        let loaded = catalog_store.load().unwrap();
        catalog_store.save(&loaded).unwrap();
        assert_eq!(backing.get(CARDS_KEY).unwrap(), original);
    }

    #[test]
    fn test_loads_string_prices_from_older_data() {
        let backing = MemoryStore::with_entries([(
            CARDS_KEY,
            r#"{"Tea":{"price":"1.20","stock":2,"sales":5,"revenue":6}}"#,
        )]);
        let catalog = CatalogStore::new(backing).load().unwrap();
        let tea = catalog.get("Tea").unwrap();
        assert_eq!(tea.name, "Tea");
        assert_eq!(tea.price, Money::from_minor(120));
        assert_eq!(tea.stock, 2);
        assert_eq!(tea.sales, 5);
        assert_eq!(tea.revenue, Money::from_units(6));
    }

    #[test]
    fn test_corrupt_cards_value_is_storage_error() {
        let backing = MemoryStore::with_entries([(CARDS_KEY, "[1, 2")]);
        let err = CatalogStore::new(backing).load().unwrap_err();
        assert!(matches!(err, CatalogError::Storage(StorageError::Corrupt { .. })));
    }
}
