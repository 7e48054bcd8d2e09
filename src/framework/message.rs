//! # Till Messages
//!
//! The request enum sent from a [`TillClient`](crate::clients::TillClient) to the
//! [`TillActor`](super::TillActor). Each variant carries a one-shot sender the actor
//! answers on.

use crate::engine::{RestockOutcome, SaleOutcome, Snapshot, TillError};
use crate::model::{Aggregates, ProductCreate, ProductRecord};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, TillError>>;

/// One operation for the till to perform.
///
/// Catalog operations (`CreateProduct`, `DeleteProduct`) are strict and fail on bad
/// input or unknown names. `Sell` and `Restock` are forgiving about unknown names and
/// answer with a `Skipped` outcome instead.
#[derive(Debug)]
pub enum TillRequest {
    Snapshot {
        respond_to: Response<Snapshot>,
    },
    CreateProduct {
        params: ProductCreate,
        respond_to: Response<ProductRecord>,
    },
    DeleteProduct {
        name: String,
        respond_to: Response<ProductRecord>,
    },
    Sell {
        name: String,
        respond_to: Response<SaleOutcome>,
    },
    Restock {
        name: String,
        respond_to: Response<RestockOutcome>,
    },
    ResetStats {
        respond_to: Response<Aggregates>,
    },
    ResetCart {
        respond_to: Response<Aggregates>,
    },
}

impl TillRequest {
    /// Short operation name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TillRequest::Snapshot { .. } => "Snapshot",
            TillRequest::CreateProduct { .. } => "CreateProduct",
            TillRequest::DeleteProduct { .. } => "DeleteProduct",
            TillRequest::Sell { .. } => "Sell",
            TillRequest::Restock { .. } => "Restock",
            TillRequest::ResetStats { .. } => "ResetStats",
            TillRequest::ResetCart { .. } => "ResetCart",
        }
    }
}
