use crate::clients::TillClient;
use crate::config::TillConfig;
use crate::framework::TillActor;
use crate::storage::{KeyValueStore, StorageError};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A running till: the actor task and the client that talks to it.
///
/// # Example
///
/// ```rust
/// use pos_inventory::clients::PointOfSale;
/// use pos_inventory::lifecycle::TillSystem;
/// use pos_inventory::storage::MemoryStore;
///
/// #[tokio::main]
/// async fn main() {
///     let system = TillSystem::start(32, MemoryStore::new());
///     let snapshot = system.client.snapshot().await.unwrap();
///     assert!(snapshot.catalog.is_empty());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct TillSystem {
    /// Client for the till actor. Clone it freely.
    pub client: TillClient,

    handle: JoinHandle<()>,
}

impl TillSystem {
    /// Spawns the till actor over `store`.
    pub fn start<S: KeyValueStore + 'static>(mailbox_capacity: usize, store: S) -> Self {
        let (actor, client) = TillActor::new(mailbox_capacity);
        let handle = tokio::spawn(actor.run(store));
        Self { client, handle }
    }

    /// Opens the configured store and spawns the till over it.
    pub fn from_config(config: &TillConfig) -> Result<Self, StorageError> {
        let store = config.open_store()?;
        Ok(Self::start(config.mailbox_capacity, store))
    }

    /// Drops this system's client and waits for the till to drain its mailbox.
    ///
    /// Clones of the client handed out earlier keep the till alive; drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the till stopped cleanly
    /// - `Err(String)` if the actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down till...");

        // The actor's receiver returns None once every sender is gone.
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Till task failed: {:?}", e);
            return Err(format!("Till task failed: {:?}", e));
        }

        info!("Till shutdown complete.");
        Ok(())
    }
}
