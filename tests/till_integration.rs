use pos_inventory::clients::PointOfSale;
use pos_inventory::config::TillConfig;
use pos_inventory::engine::{RestockOutcome, SaleOutcome, TillError};
use pos_inventory::framework::ActorError;
use pos_inventory::lifecycle::TillSystem;
use pos_inventory::money::Money;
use pos_inventory::storage::{FileStore, KeyValueStore, MemoryStore, CARDS_KEY, SOLD_KEY};
use std::sync::Arc;

/// A full till session against real actors and an in-memory store.
#[tokio::test]
async fn test_full_till_session() {
    let system = TillSystem::start(16, MemoryStore::new());
    let till = &system.client;

    till.create_product("Coffee", Money::parse("2.40").unwrap())
        .await
        .expect("Failed to create product");
    till.create_product("Tea", Money::parse("1.999").unwrap())
        .await
        .expect("Failed to create product");

    // Rounded on capture
    let snapshot = till.snapshot().await.unwrap();
    assert_eq!(snapshot.catalog.get("Tea").unwrap().price.to_string(), "2.00");

    // Duplicate names are rejected
    let err = till
        .create_product("Coffee", Money::from_units(9))
        .await
        .unwrap_err();
    assert_eq!(err, ActorError::Till(TillError::DuplicateName("Coffee".into())));

    for _ in 0..3 {
        till.restock("Coffee").await.unwrap();
    }
    till.restock("Tea").await.unwrap();

    for _ in 0..2 {
        assert!(matches!(till.sell("Coffee").await.unwrap(), SaleOutcome::Sold(_)));
    }
    assert!(matches!(till.sell("Tea").await.unwrap(), SaleOutcome::Sold(_)));
    assert!(till.sell("Tea").await.unwrap_err().is_blocked_sale());

    let snapshot = till.snapshot().await.unwrap();
    let coffee = snapshot.catalog.get("Coffee").unwrap();
    assert_eq!(coffee.stock, 1);
    assert_eq!(coffee.sales, 2);
    assert_eq!(coffee.revenue, Money::from_minor(480));
    assert_eq!(snapshot.aggregates.units_sold, 3);
    assert_eq!(snapshot.aggregates.cart_total, Money::from_minor(680));
    assert_eq!(snapshot.aggregates.total_revenue, Money::from_minor(680));

    // Insertion order is kept for rendering
    let names: Vec<_> = snapshot.catalog.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Coffee", "Tea"]);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_resets_leave_product_counters_alone() {
    let system = TillSystem::start(16, MemoryStore::new());
    let till = &system.client;

    till.create_product("Widget", Money::from_units(5)).await.unwrap();
    till.restock("Widget").await.unwrap();
    till.restock("Widget").await.unwrap();
    till.sell("Widget").await.unwrap();

    let aggregates = till.reset_stats().await.unwrap();
    assert_eq!(aggregates.units_sold, 0);
    assert_eq!(aggregates.total_revenue, Money::ZERO);
    assert_eq!(aggregates.cart_total, Money::from_units(5));

    let aggregates = till.reset_cart().await.unwrap();
    assert_eq!(aggregates.cart_total, Money::ZERO);

    // The product still remembers its sale.
    let snapshot = till.snapshot().await.unwrap();
    let widget = snapshot.catalog.get("Widget").unwrap();
    assert_eq!(widget.sales, 1);
    assert_eq!(widget.revenue, Money::from_units(5));

    // The next sale counts from the reset point.
    till.sell("Widget").await.unwrap();
    let snapshot = till.snapshot().await.unwrap();
    assert_eq!(snapshot.aggregates.units_sold, 1);
    assert_eq!(snapshot.catalog.get("Widget").unwrap().sales, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = TillConfig::with_file(dir.path().join("till.json"));

    let system = TillSystem::from_config(&config).unwrap();
    system
        .client
        .create_product("Widget", Money::from_minor(999))
        .await
        .unwrap();
    system.client.restock("Widget").await.unwrap();
    system.client.restock("Widget").await.unwrap();
    system.client.sell("Widget").await.unwrap();
    system.shutdown().await.unwrap();

    let system = TillSystem::from_config(&config).unwrap();
    let snapshot = system.client.snapshot().await.unwrap();
    let widget = snapshot.catalog.get("Widget").unwrap();
    assert_eq!(widget.stock, 1);
    assert_eq!(widget.sales, 1);
    assert_eq!(widget.price.to_string(), "9.99");
    assert_eq!(snapshot.aggregates.units_sold, 1);
    assert_eq!(snapshot.aggregates.cart_total, Money::from_minor(999));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_products_are_skipped_and_deletes_are_strict() {
    let store = Arc::new(MemoryStore::new());
    let system = TillSystem::start(16, store.clone());
    let till = &system.client;

    till.create_product("Widget", Money::from_units(1)).await.unwrap();
    let before = store.get(CARDS_KEY).unwrap();

    assert_eq!(till.sell("Gadget").await.unwrap(), SaleOutcome::Skipped);
    assert_eq!(till.restock("Gadget").await.unwrap(), RestockOutcome::Skipped);
    let err = till.delete_product("Gadget").await.unwrap_err();
    assert_eq!(err.till_error(), Some(&TillError::NotFound("Gadget".into())));

    assert_eq!(store.get(CARDS_KEY).unwrap(), before);
    assert_eq!(store.get(SOLD_KEY).unwrap(), None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reads_data_written_by_older_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("till.json");
    {
        let store = FileStore::open(&path).unwrap();
        store
            .set(
                CARDS_KEY,
                r#"{"Widget":{"price":"2.50","stock":1,"sales":4,"revenue":10}}"#,
            )
            .unwrap();
        store.set(SOLD_KEY, "4").unwrap();
        store.set("revenue", "10").unwrap();
        store.set("cart", "NaN").unwrap();
    }

    let system = TillSystem::start(4, FileStore::open(&path).unwrap());
    let SaleOutcome::Sold(receipt) = system.client.sell("Widget").await.unwrap() else {
        panic!("expected a sale");
    };
    assert_eq!(receipt.product.sales, 5);
    assert_eq!(receipt.product.revenue, Money::from_minor(1250));
    assert_eq!(receipt.aggregates.units_sold, 5);
    assert_eq!(receipt.aggregates.total_revenue, Money::from_minor(1250));
    assert_eq!(receipt.aggregates.cart_total, Money::from_minor(250));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_clients_share_one_till() {
    let system = TillSystem::start(8, MemoryStore::new());
    system
        .client
        .create_product("Widget", Money::from_units(1))
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..40 {
        let till = system.client.clone();
        handles.push(tokio::spawn(async move {
            till.restock("Widget").await.unwrap();
            till.sell("Widget").await
        }));
    }
    for handle in handles {
        // Each task restocks before selling, but other tasks may have sold in
        // between, so a few sells can still be blocked.
        match handle.await.unwrap() {
            Ok(SaleOutcome::Sold(_)) => {}
            Err(e) if e.is_blocked_sale() => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    let snapshot = system.client.snapshot().await.unwrap();
    let widget = snapshot.catalog.get("Widget").unwrap();
    // Every unit is either still in stock or sold, never lost or doubled.
    assert_eq!(u64::from(widget.stock) + widget.sales, 40);
    assert_eq!(snapshot.aggregates.units_sold, widget.sales);
    assert_eq!(
        snapshot.aggregates.total_revenue,
        Money::from_units(widget.sales as i64)
    );

    system.shutdown().await.unwrap();
}
