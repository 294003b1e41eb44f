use crate::checkout::PurchaseOrchestrator;
use crate::clients::{ListingClient, PurchaseClient};
use crate::listing_actor::ListingError;
use crate::model::{ListingCreate, ListingId};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to seed listing: {0}")]
    Seed(#[from] ListingError),

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// Owns the two store actors of the marketplace.
///
/// `MarketSystem` is responsible for:
/// - **Lifecycle Management**: Spawning the listing and purchase actors, and stopping them
/// - **Dependency Wiring**: Handing out clients and the [`PurchaseOrchestrator`] built on them
/// - **Seeding**: Loading initial listings
///
/// # Example
///
/// ```ignore
/// let system = MarketSystem::new(32);
/// let id = system.listing_client.insert(pasta).await?;
/// let purchase = system.orchestrator().purchase("a@b.com", request).await?;
/// system.shutdown().await?;
/// ```
pub struct MarketSystem {
    pub listing_client: ListingClient,
    pub purchase_client: PurchaseClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns both store actors, each with a request channel of `buffer_size`.
    pub fn new(buffer_size: usize) -> Self {
        let (listing_actor, listing_client) = crate::listing_actor::new(buffer_size);
        let (purchase_actor, purchase_client) = crate::purchase_actor::new(buffer_size);

        let listing_handle = tokio::spawn(listing_actor.run());
        let purchase_handle = tokio::spawn(purchase_actor.run());

        Self {
            listing_client,
            purchase_client,
            handles: vec![listing_handle, purchase_handle],
        }
    }

    pub fn orchestrator(&self) -> PurchaseOrchestrator {
        PurchaseOrchestrator::new(self.listing_client.clone(), self.purchase_client.clone())
    }

    /// Inserts `listings` in order and returns their ids.
    pub async fn seed(&self, listings: Vec<ListingCreate>) -> Result<Vec<ListingId>, SystemError> {
        let mut ids = Vec::with_capacity(listings.len());
        for listing in listings {
            ids.push(self.listing_client.insert(listing).await?);
        }
        info!(count = ids.len(), "Listings seeded");
        Ok(ids)
    }

    /// Seeds from a JSON array of listing payloads.
    pub async fn seed_from_file(&self, path: &Path) -> Result<Vec<ListingId>, SystemError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SystemError::SeedRead {
                path: path.to_path_buf(),
                source,
            })?;
        let listings: Vec<ListingCreate> =
            serde_json::from_str(&raw).map_err(|source| SystemError::SeedParse {
                path: path.to_path_buf(),
                source,
            })?;
        self.seed(listings).await
    }

    /// Gracefully shuts down both actors.
    ///
    /// Actors stop once every clone of their client is gone, so drop the HTTP state
    /// (and any other clones) before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.listing_client);
        drop(self.purchase_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
