use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

use crate::api::{ApiClient, ApiError};
use crate::domain::Product;

#[derive(Debug, Error)]
pub enum WishlistError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("wishlist storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("wishlist data error: {0}")]
    Data(#[from] serde_json::Error),
}

/// The single wishlist capability: add, remove, membership, list.
///
/// Exactly one backend is selected at composition time. The two historical
/// implementations (backend endpoints vs. a locally persisted snapshot
/// list) live behind this seam and are never active together.
#[async_trait]
pub trait WishlistBackend: Send + Sync {
    async fn add(&self, product: &Product) -> Result<(), WishlistError>;
    async fn remove(&self, product_id: u64) -> Result<(), WishlistError>;
    async fn is_member(&self, product_id: u64) -> Result<bool, WishlistError>;
    async fn list(&self) -> Result<Vec<Product>, WishlistError>;
}

/// Backend-backed wishlist over the `/wishlist` endpoints.
pub struct RemoteWishlist {
    client: ApiClient,
}

impl RemoteWishlist {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WishlistBackend for RemoteWishlist {
    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn add(&self, product: &Product) -> Result<(), WishlistError> {
        self.client.add_to_wishlist(product.id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, product_id: u64) -> Result<(), WishlistError> {
        self.client.remove_from_wishlist(product_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, product_id: u64) -> Result<bool, WishlistError> {
        Ok(self.client.wishlist_contains(product_id).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, WishlistError> {
        let entries = self.client.wishlist().await?;
        Ok(entries.into_iter().map(|entry| entry.product).collect())
    }
}

/// Locally persisted wishlist: one JSON array of product snapshots,
/// rewritten whole on every mutation, membership by linear scan.
///
/// Snapshots go stale by design; nothing reconciles them with the catalog.
pub struct LocalWishlist {
    path: PathBuf,
}

impl LocalWishlist {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<Vec<Product>, WishlistError> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_all(&self, products: &[Product]) -> Result<(), WishlistError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(products)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl WishlistBackend for LocalWishlist {
    #[instrument(skip(self, product), fields(product_id = product.id))]
    async fn add(&self, product: &Product) -> Result<(), WishlistError> {
        let mut products = self.read_all().await?;
        if !products.iter().any(|saved| saved.id == product.id) {
            products.push(product.clone());
            self.write_all(&products).await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, product_id: u64) -> Result<(), WishlistError> {
        let mut products = self.read_all().await?;
        let before = products.len();
        products.retain(|saved| saved.id != product_id);
        if products.len() != before {
            self.write_all(&products).await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_member(&self, product_id: u64) -> Result<bool, WishlistError> {
        let products = self.read_all().await?;
        Ok(products.iter().any(|saved| saved.id == product_id))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, WishlistError> {
        self.read_all().await
    }
}
