//! # Till Client
//!
//! Cloneable handle for talking to a [`TillActor`](crate::framework::TillActor).
//! It holds only the mailbox sender; every call sends one [`TillRequest`] and waits
//! for the answer on a one-shot channel.
use crate::clients::PointOfSale;
use crate::engine::{RestockOutcome, SaleOutcome, Snapshot};
use crate::framework::{ActorError, Response, TillRequest};
use crate::model::{Aggregates, ProductCreate, ProductRecord};
use crate::money::Money;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct TillClient {
    sender: mpsc::Sender<TillRequest>,
}

impl TillClient {
    pub fn new(sender: mpsc::Sender<TillRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> TillRequest,
    ) -> Result<T, ActorError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        let result = response.await.map_err(|_| ActorError::ActorDropped)?;
        Ok(result?)
    }
}

#[async_trait]
impl PointOfSale for TillClient {
    #[instrument(skip(self))]
    async fn snapshot(&self) -> Result<Snapshot, ActorError> {
        debug!("Sending request");
        self.request(|respond_to| TillRequest::Snapshot { respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn create_product(&self, name: &str, price: Money) -> Result<ProductRecord, ActorError> {
        debug!("Sending request");
        let params = ProductCreate {
            name: name.to_string(),
            price,
        };
        self.request(|respond_to| TillRequest::CreateProduct { params, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, name: &str) -> Result<ProductRecord, ActorError> {
        debug!("Sending request");
        let name = name.to_string();
        self.request(|respond_to| TillRequest::DeleteProduct { name, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn sell(&self, name: &str) -> Result<SaleOutcome, ActorError> {
        debug!("Sending request");
        let name = name.to_string();
        self.request(|respond_to| TillRequest::Sell { name, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn restock(&self, name: &str) -> Result<RestockOutcome, ActorError> {
        debug!("Sending request");
        let name = name.to_string();
        self.request(|respond_to| TillRequest::Restock { name, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn reset_stats(&self) -> Result<Aggregates, ActorError> {
        debug!("Sending request");
        self.request(|respond_to| TillRequest::ResetStats { respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn reset_cart(&self) -> Result<Aggregates, ActorError> {
        debug!("Sending request");
        self.request(|respond_to| TillRequest::ResetCart { respond_to })
            .await
    }
}
