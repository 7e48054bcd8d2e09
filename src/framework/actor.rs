//! # Till Actor
//!
//! The server half of the till. It owns the [`TransactionEngine`] and the receiving
//! end of the mailbox, and processes requests sequentially.
//!
//! **Concurrency Model**:
//! The engine does a load-modify-save cycle against the persistence port on every
//! mutation. Two interleaved cycles would lose writes, so exactly one task ever runs
//! them: this actor. Callers hold cheap [`TillClient`] clones; no `Mutex` is needed
//! around the catalog or the aggregates.
//!
//! # Usage Pattern
//!
//! 1. **Create**: `TillActor::new()` gives the actor and its client.
//! 2. **Wire**: pass the persistence port into `actor.run(store)`.
//! 3. **Run**: spawn the run loop in a background task.
//!
//! ```rust
//! use pos_inventory::clients::PointOfSale;
//! use pos_inventory::framework::TillActor;
//! use pos_inventory::money::Money;
//! use pos_inventory::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TillActor::new(32);
//!     tokio::spawn(actor.run(MemoryStore::new()));
//!
//!     client.create_product("Widget", Money::from_units(3)).await.unwrap();
//!     client.restock("Widget").await.unwrap();
//!     client.sell("Widget").await.unwrap();
//! }
//! ```

use crate::clients::TillClient;
use crate::engine::{TillError, TransactionEngine};
use crate::framework::message::{Response, TillRequest};
use crate::storage::KeyValueStore;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct TillActor {
    receiver: mpsc::Receiver<TillRequest>,
}

impl TillActor {
    /// Creates a new `TillActor` and its associated `TillClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the mailbox. If it is full, client calls
    ///   wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, TillClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, TillClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Late Binding
    /// The persistence port is injected here rather than in `new()`, so the client can
    /// be handed out before the store is opened.
    pub async fn run<S: KeyValueStore>(mut self, store: S) {
        let mut engine = TransactionEngine::new(store);
        info!("Till started");

        let mut handled: u64 = 0;
        while let Some(request) = self.receiver.recv().await {
            debug!(kind = request.kind(), "Request");
            dispatch(&mut engine, request);
            handled += 1;
        }

        info!(handled, "Till shutdown");
    }
}

fn dispatch<S: KeyValueStore>(engine: &mut TransactionEngine<S>, request: TillRequest) {
    match request {
        TillRequest::Snapshot { respond_to } => {
            reply("Snapshot", respond_to, engine.snapshot());
        }
        TillRequest::CreateProduct { params, respond_to } => {
            reply(
                "CreateProduct",
                respond_to,
                engine.create_product(&params.name, params.price),
            );
        }
        TillRequest::DeleteProduct { name, respond_to } => {
            reply("DeleteProduct", respond_to, engine.delete_product(&name));
        }
        TillRequest::Sell { name, respond_to } => {
            reply("Sell", respond_to, engine.sell(&name));
        }
        TillRequest::Restock { name, respond_to } => {
            reply("Restock", respond_to, engine.restock(&name));
        }
        TillRequest::ResetStats { respond_to } => {
            reply("ResetStats", respond_to, engine.reset_stats());
        }
        TillRequest::ResetCart { respond_to } => {
            reply("ResetCart", respond_to, engine.reset_cart());
        }
    }
}

fn reply<T>(kind: &'static str, respond_to: Response<T>, result: Result<T, TillError>) {
    if let Err(e) = &result {
        warn!(kind, error = %e, "Request failed");
    }
    // The caller may have given up waiting; that is not the till's problem.
    let _ = respond_to.send(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::PointOfSale;
    use crate::engine::{RestockOutcome, SaleOutcome};
    use crate::framework::ActorError;
    use crate::money::Money;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_till_actor_full_lifecycle() {
        let (actor, client) = TillActor::new(10);
        let handle = tokio::spawn(actor.run(MemoryStore::new()));

        // 1. Create
        let record = client
            .create_product("Widget", Money::from_minor(450))
            .await
            .unwrap();
        assert_eq!(record.stock, 0);

        // 2. Sell while empty is blocked
        let err = client.sell("Widget").await.unwrap_err();
        assert!(err.is_blocked_sale());

        // 3. Restock and sell
        assert_eq!(
            client.restock("Widget").await.unwrap(),
            RestockOutcome::Restocked { stock: 1 }
        );
        assert!(matches!(client.sell("Widget").await.unwrap(), SaleOutcome::Sold(_)));

        // 4. Snapshot reflects everything
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.aggregates.units_sold, 1);
        assert_eq!(snapshot.catalog.get("Widget").unwrap().sales, 1);

        // 5. Delete
        client.delete_product("Widget").await.unwrap();
        assert!(client.snapshot().await.unwrap().catalog.is_empty());

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_engine_errors_do_not_stop_the_actor() {
        let (actor, client) = TillActor::new(10);
        tokio::spawn(actor.run(MemoryStore::new()));

        let err = client.delete_product("Ghost").await.unwrap_err();
        assert_eq!(err, ActorError::Till(TillError::NotFound("Ghost".into())));

        // Still serving.
        client.create_product("Ghost", Money::from_units(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_sales_never_oversell() {
        let backing = Arc::new(MemoryStore::new());
        let (actor, client) = TillActor::new(64);
        tokio::spawn(actor.run(backing.clone()));

        client.create_product("Limited", Money::from_units(2)).await.unwrap();
        for _ in 0..20 {
            client.restock("Limited").await.unwrap();
        }

        let mut handles = vec![];
        for _ in 0..50 {
            let client = client.clone();
            handles.push(tokio::spawn(async move { client.sell("Limited").await }));
        }

        let mut sold = 0;
        let mut blocked = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(SaleOutcome::Sold(_)) => sold += 1,
                Err(e) if e.is_blocked_sale() => blocked += 1,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(sold, 20);
        assert_eq!(blocked, 30);

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.catalog.get("Limited").unwrap().stock, 0);
        assert_eq!(snapshot.aggregates.units_sold, 20);
        assert_eq!(snapshot.aggregates.total_revenue, Money::from_units(40));
    }

    #[tokio::test]
    async fn test_sale_past_money_limit_keeps_actor_alive() {
        let (actor, client) = TillActor::new(10);
        tokio::spawn(actor.run(MemoryStore::new()));

        client.create_product("Yacht", Money::MAX).await.unwrap();
        client.restock("Yacht").await.unwrap();
        client.restock("Yacht").await.unwrap();
        client.sell("Yacht").await.unwrap();

        let err = client.sell("Yacht").await.unwrap_err();
        assert!(matches!(
            err.till_error(),
            Some(TillError::LimitExceeded { .. })
        ));

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.catalog.get("Yacht").unwrap().stock, 1);
        assert_eq!(snapshot.aggregates.units_sold, 1);
    }

    #[tokio::test]
    async fn test_closed_actor_is_reported() {
        let (actor, client) = TillActor::new(1);
        drop(actor);

        let err = client.snapshot().await.unwrap_err();
        assert_eq!(err, ActorError::ActorClosed);
    }
}
