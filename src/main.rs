mod api;
mod app_system;
mod domain;
mod stores;

#[cfg(test)]
mod mock_backend;

use std::sync::Arc;

use tracing::{info, Instrument};

use crate::api::FileSessionStore;
use crate::app_system::{setup_tracing, Shell, Storefront, View, WishlistMode};
use crate::stores::CheckoutForm;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let base_url = std::env::var("STOREFRONT_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    let session_path = std::env::var("STOREFRONT_SESSION_FILE")
        .unwrap_or_else(|_| ".storefront/session.json".to_string());

    info!(%base_url, "Starting storefront client");

    let session_store = Arc::new(FileSessionStore::new(session_path));
    let mut front = Storefront::new(base_url, session_store, WishlistMode::Remote);

    // Rehydrate the session once; everything downstream receives the
    // context from the shell.
    let mut shell = Shell::new(front.session_context().await);
    if !shell.authenticated() {
        let email = std::env::var("STOREFRONT_EMAIL").map_err(|e| e.to_string())?;
        let password = std::env::var("STOREFRONT_PASSWORD").map_err(|e| e.to_string())?;
        let context = front
            .login(&email, &password)
            .await
            .map_err(|e| e.to_string())?;
        shell.sign_in(context);
    }

    let span = tracing::info_span!("browse_catalog");
    async {
        front.catalog.load_products().await.map_err(|e| e.to_string())?;
        shell.set_search_query("shirt");
        front.catalog.set_query(shell.search_query());
        info!(
            total = front.catalog.products().len(),
            matching = front.catalog.filtered().len(),
            "Catalog loaded"
        );
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    if let Some(first) = front.catalog.filtered().first().cloned().cloned() {
        let size = first.size_options().first().map(|s| s.to_string());
        front
            .catalog
            .add_to_cart(&first, 1, size.as_deref())
            .await
            .map_err(|e| e.to_string())?;
        info!(product_id = first.id, "Added to cart");
    }

    shell.request_view(View::Cart);
    front.cart.load().await.map_err(|e| e.to_string())?;
    let totals = front.cart.totals();
    info!(
        lines = front.cart.lines().len(),
        subtotal = totals.subtotal,
        tax = totals.tax,
        total = totals.total,
        "Cart loaded"
    );

    if !front.cart.is_empty() {
        let span = tracing::info_span!("checkout");
        async {
            let form = CheckoutForm::new("5551234567", "12 Main Street");
            front.checkout.place_order(&form).await.map_err(|e| e.to_string())?;
            // Success implies the backend emptied the cart; reload to reflect it.
            front.cart.load().await.map_err(|e| e.to_string())
        }
        .instrument(span)
        .await?;

        front.orders.load().await.map_err(|e| e.to_string())?;
        let summary = front.orders.summary();
        info!(
            total = summary.total,
            pending = summary.pending,
            "Order history loaded"
        );
    }

    info!("Storefront demo completed");
    Ok(())
}
