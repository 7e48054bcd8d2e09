//! # Mock Till
//!
//! Utilities for testing code that talks to the till without spawning the actor.
//!
//! [`create_mock_client`] returns a real [`TillClient`] whose mailbox you hold. Pull
//! requests off the receiver with the `expect_*` helpers, assert on their payload,
//! and answer through the returned responder with whatever outcome or error the
//! test needs.
//!
//! | | Mock | Real actor |
//! |---|---|---|
//! | **State** | none, you script the answers | real engine over a store |
//! | **Error injection** | send any `TillError` | needs the right state |
//! | **Use case** | client and front-end logic | the till itself |
//!
//! ```rust
//! use pos_inventory::clients::PointOfSale;
//! use pos_inventory::engine::RestockOutcome;
//! use pos_inventory::framework::mock::{create_mock_client, expect_restock};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (client, mut receiver) = create_mock_client(4);
//!     let task = tokio::spawn(async move { client.restock("Widget").await });
//!
//!     let (name, responder) = expect_restock(&mut receiver).await.unwrap();
//!     assert_eq!(name, "Widget");
//!     responder.send(Ok(RestockOutcome::Restocked { stock: 1 })).unwrap();
//!
//!     assert_eq!(task.await.unwrap().unwrap(), RestockOutcome::Restocked { stock: 1 });
//! }
//! ```

use crate::clients::TillClient;
use crate::engine::{RestockOutcome, SaleOutcome, Snapshot};
use crate::framework::{Response, TillRequest};
use crate::model::{Aggregates, ProductCreate, ProductRecord};
use tokio::sync::mpsc;

/// Creates a client and the receiving end of its mailbox.
pub fn create_mock_client(buffer_size: usize) -> (TillClient, mpsc::Receiver<TillRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TillClient::new(sender), receiver)
}

/// Next message if it is a Snapshot request.
pub async fn expect_snapshot(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<Response<Snapshot>> {
    match receiver.recv().await {
        Some(TillRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message if it is a CreateProduct request.
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<(ProductCreate, Response<ProductRecord>)> {
    match receiver.recv().await {
        Some(TillRequest::CreateProduct { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message if it is a DeleteProduct request.
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<(String, Response<ProductRecord>)> {
    match receiver.recv().await {
        Some(TillRequest::DeleteProduct { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Next message if it is a Sell request.
pub async fn expect_sell(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<(String, Response<SaleOutcome>)> {
    match receiver.recv().await {
        Some(TillRequest::Sell { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Next message if it is a Restock request.
pub async fn expect_restock(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<(String, Response<RestockOutcome>)> {
    match receiver.recv().await {
        Some(TillRequest::Restock { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Next message if it is a ResetStats request.
pub async fn expect_reset_stats(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<Response<Aggregates>> {
    match receiver.recv().await {
        Some(TillRequest::ResetStats { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message if it is a ResetCart request.
pub async fn expect_reset_cart(
    receiver: &mut mpsc::Receiver<TillRequest>,
) -> Option<Response<Aggregates>> {
    match receiver.recv().await {
        Some(TillRequest::ResetCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}
