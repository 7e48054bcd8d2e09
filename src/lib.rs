//! # POS Inventory
//!
//! > **A single-user till: products, stock, sales and the running totals.**
//!
//! The crate keeps a catalog of named products, each with a price, a stock level and
//! cumulative sales and revenue, plus three till-wide counters (cart total, units
//! sold, total revenue). Everything lives in a key-value store that survives
//! restarts.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for the state
//! Every mutation is a load-modify-save cycle against the store. The
//! [`TransactionEngine`](engine::TransactionEngine) that runs those cycles is plain
//! synchronous code with `&mut self`, and exactly one task owns it: the
//! [`TillActor`](framework::TillActor). Any number of callers talk to it through
//! cheap [`TillClient`](clients::TillClient) clones, so two cycles never interleave
//! and no lock guards the catalog.
//!
//! ### Two kinds of counters
//! Per-product `sales`/`revenue` only ever grow. The till-wide
//! [`Aggregates`](model::Aggregates) are a separately resettable projection of the
//! same sales. After a stats reset the two disagree, and that is expected.
//!
//! ### Forgiving vs strict
//! Selling or restocking a product that no longer exists is a no-op reported as
//! `Skipped`. Deleting one is a `NotFound` error. Selling with empty stock is
//! refused as [`BlockedSale`](engine::TillError::BlockedSale) and changes nothing.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer has its own `thiserror` enum: [`StorageError`](storage::StorageError),
//! [`CatalogError`](catalog::CatalogError), [`TillError`](engine::TillError) and the
//! actor plumbing's [`ActorError`](framework::ActorError). `#[from]` carries errors
//! up without losing the variant.
//!
//! ### 2. Late Binding of the Store
//! The persistence port is handed to [`TillActor::run`](framework::TillActor::run),
//! not to the constructor, so clients exist before the store is opened.
//!
//! ### 3. Money
//! Amounts are fixed-point [`Money`](money::Money) with two decimal places. Prices are
//! rounded half away from zero when a product is created; sums are exact.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Persistence ([`storage`])
//! - **Role**: The [`KeyValueStore`](storage::KeyValueStore) port and its in-memory
//!   and JSON-file implementations.
//!
//! ### 2. Domain ([`model`], [`money`], [`catalog`], [`engine`])
//! - **Role**: Product records, aggregates, the catalog store and the sale/restock
//!   state machine. All synchronous.
//!
//! ### 3. The Till ([`framework`], [`clients`])
//! - **Role**: The actor that serializes requests, the
//!   [`PointOfSale`](clients::PointOfSale) trait front-ends program against, and mock
//!   helpers for testing them.
//!
//! ### 4. Running It ([`config`], [`lifecycle`], [`console`])
//! - **Role**: Choosing a store, starting and stopping the
//!   [`TillSystem`](lifecycle::TillSystem), and the text front-end behind the
//!   `pos-inventory` binary.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use pos_inventory::clients::PointOfSale;
//! use pos_inventory::engine::SaleOutcome;
//! use pos_inventory::lifecycle::TillSystem;
//! use pos_inventory::money::Money;
//! use pos_inventory::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = TillSystem::start(32, MemoryStore::new());
//!     let till = &system.client;
//!
//!     till.create_product("Widget", Money::parse("2.50").unwrap()).await.unwrap();
//!     till.restock("Widget").await.unwrap();
//!
//!     let SaleOutcome::Sold(receipt) = till.sell("Widget").await.unwrap() else {
//!         panic!("expected a sale");
//!     };
//!     assert_eq!(receipt.aggregates.cart_total.to_string(), "2.50");
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```
//!
//! ## 🧪 Testing
//!
//! See [`framework::mock`] for driving a [`TillClient`](clients::TillClient) without
//! spawning the actor.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod console;
pub mod engine;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod money;
pub mod storage;
