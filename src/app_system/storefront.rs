use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::{ApiClient, ApiError, SessionContext, SessionStore};
use crate::domain::Role;
use crate::stores::{
    CartStore, CatalogStore, CheckoutFlow, LocalWishlist, OrdersStore, RemoteWishlist,
    ReviewPanel, VendorOrdersStore, WishlistBackend,
};

/// Which wishlist backend the system composes. Exactly one is ever active;
/// mixing the two was the correctness hazard this seam exists to close.
#[derive(Debug, Clone)]
pub enum WishlistMode {
    Remote,
    Local(PathBuf),
}

/// Composition root: builds the API client and every store over it.
///
/// Responsible for session lifecycle (login, register, logout) and for
/// rehydrating the immutable session context once at startup.
pub struct Storefront {
    pub client: ApiClient,
    pub catalog: CatalogStore,
    pub cart: CartStore,
    pub checkout: CheckoutFlow,
    pub orders: OrdersStore,
    pub vendor_orders: VendorOrdersStore,
    pub wishlist: Arc<dyn WishlistBackend>,
    session_store: Arc<dyn SessionStore>,
}

impl Storefront {
    pub fn new(
        base_url: impl Into<String>,
        session_store: Arc<dyn SessionStore>,
        wishlist_mode: WishlistMode,
    ) -> Self {
        let client = ApiClient::new(base_url, session_store.clone());
        let wishlist: Arc<dyn WishlistBackend> = match wishlist_mode {
            WishlistMode::Remote => Arc::new(RemoteWishlist::new(client.clone())),
            WishlistMode::Local(path) => Arc::new(LocalWishlist::new(path)),
        };
        Self {
            catalog: CatalogStore::new(client.clone()),
            cart: CartStore::new(client.clone()),
            checkout: CheckoutFlow::new(client.clone()),
            orders: OrdersStore::new(client.clone()),
            vendor_orders: VendorOrdersStore::new(client.clone()),
            wishlist,
            session_store,
            client,
        }
    }

    /// Rehydrates the session context from persisted tokens. Called once at
    /// startup; the result is handed to the shell and passed by reference
    /// from there.
    pub async fn session_context(&self) -> Option<SessionContext> {
        self.session_store
            .load()
            .await
            .map(|tokens| SessionContext::from_tokens(&tokens))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext, ApiError> {
        let tokens = self.client.login(email, password).await?;
        info!("Signed in");
        Ok(SessionContext::from_tokens(&tokens))
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), ApiError> {
        self.client.register(username, email, password, role).await
    }

    pub async fn logout(&self) {
        self.session_store.clear().await;
        info!("Signed out");
    }

    /// Review state is per-product; panels are built on demand for the
    /// product detail view.
    pub fn review_panel(&self, product_id: u64) -> ReviewPanel {
        ReviewPanel::new(self.client.clone(), product_id)
    }
}
