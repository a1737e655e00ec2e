use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{ApiClient, ApiError};
use crate::domain::{clamp_quantity, Product};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} is out of stock")]
    OutOfStock(u64),
    #[error("product {0} requires a size to be chosen")]
    SizeRequired(u64),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Product catalog state: one full fetch, filtered purely client-side.
///
/// There is no pagination contract; the whole collection is assumed to fit
/// in one response. Filtering is recomputed from the in-memory set whenever
/// asked, never refetched.
pub struct CatalogStore {
    client: ApiClient,
    products: Vec<Product>,
    query: String,
    generation: u64,
}

impl CatalogStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            query: String::new(),
            generation: 0,
        }
    }

    /// Replaces the product set with a fresh full fetch.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<(), CatalogError> {
        let generation = self.begin_load();
        let products = self.client.products().await?;
        self.apply_products(generation, products);
        Ok(())
    }

    /// Stamps a new request generation. Responses carrying an older stamp
    /// are discarded by [`CatalogStore::apply_products`].
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply_products(&mut self, generation: u64, products: Vec<Product>) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale product load"
            );
            return;
        }
        self.products = products;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The subset of products whose name or description contains the current
    /// query, case-insensitively. An empty query yields the full set.
    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.matches(&self.query))
            .collect()
    }

    /// Adds a product to the cart, clamping quantity into [1, 10].
    ///
    /// Stock is not consulted by the clamp: a product with 2 in stock still
    /// accepts quantity 3. Only an explicit zero stock blocks the action,
    /// and a sized product rejects the add until a size is chosen.
    #[instrument(skip(self, product), fields(product_id = product.id))]
    pub async fn add_to_cart(
        &self,
        product: &Product,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<(), CatalogError> {
        if !product.in_stock() {
            return Err(CatalogError::OutOfStock(product.id));
        }
        if product.has_sizes() && size.is_none() {
            return Err(CatalogError::SizeRequired(product.id));
        }
        let quantity = clamp_quantity(quantity);
        self.client.add_to_cart(product.id, quantity, size).await?;
        Ok(())
    }
}
