//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing`
//! crate for the whole process. Call it once, before the till starts.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); every event
//! carries its own structured fields (`product`, `stock`, `kind`) instead. Levels come
//! from `RUST_LOG`:
//!
//! ```bash
//! # State changes only
//! RUST_LOG=info pos-inventory sell Widget
//!
//! # Every request the till receives, and every client call
//! RUST_LOG=debug pos-inventory shell
//! ```
//!
//! ## What Gets Traced
//!
//! - **Till lifecycle**: start and shutdown, with the number of requests handled
//! - **State changes**: products added or removed, restocks, sales, resets
//! - **Refusals**: blocked sales, validation failures and storage errors at `warn`
//! - **Client calls**: one span per [`PointOfSale`](crate::clients::PointOfSale) call
//!
//! With `RUST_LOG=info` a short session looks like:
//!
//! ```text
//! INFO Opened file store path=pos-inventory.json keys=4
//! INFO Till started
//! INFO Created product="Widget" price=2.50 size=1
//! INFO Restocked product="Widget" stock=1
//! INFO Sold product="Widget" price=2.50 stock=0 cart=2.50
//! WARN Blocked sale, out of stock product="Widget"
//! INFO Till shutdown handled=5
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
