use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::domain::{CartLine, Order, OrderStatus, Product, ProductPayload, Review, Role, WishlistEntry};

use super::envelope::Envelope;
use super::error::ApiError;
use super::session::{SessionStore, SessionTokens};

/// Typed surface over the storefront REST backend.
///
/// Every request carries the persisted bearer token when one exists. On a
/// 401 the client performs exactly one refresh-and-retry: refresh the token
/// pair via `/auth/refresh`, then replay the original request once. If no
/// refresh token is persisted, or the refresh itself fails, the session is
/// cleared and [`ApiError::SessionExpired`] is returned.
///
/// Single retry, no backoff, and no queuing of concurrent refreshes: two
/// requests that 401 at the same time will both attempt a refresh.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // -------------------------------------------------------------------------
    // Request plumbing: bearer injection + one-shot refresh-and-retry
    // -------------------------------------------------------------------------

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let mut request = self.http.request(method, self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let bearer = self.session.load().await.map(|tokens| tokens.access_token);
        let response = self
            .dispatch(method.clone(), path, query, body, bearer.as_deref())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::screen(response);
        }

        debug!(path, "Unauthorized, attempting one-shot token refresh");
        let fresh = self.refresh_session().await?;
        let retried = self
            .dispatch(method, path, query, body, Some(&fresh))
            .await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // The retried request is never retried again.
            self.session.clear().await;
            return Err(ApiError::SessionExpired);
        }
        Self::screen(retried)
    }

    fn screen(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        Ok(response)
    }

    /// A body that fails to parse is a malformed response, not a network
    /// failure; transport errors pass through unchanged.
    fn body_error(error: reqwest::Error) -> ApiError {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Network(error)
        }
    }

    /// Exchanges the persisted refresh token for a new pair and saves it.
    /// Any failure clears the session: the caller is effectively signed out.
    async fn refresh_session(&self) -> Result<String, ApiError> {
        let Some(previous) = self.session.load().await else {
            return Err(ApiError::SessionExpired);
        };
        let Some(refresh_token) = previous.refresh_token.clone() else {
            self.session.clear().await;
            return Err(ApiError::SessionExpired);
        };

        match self.exchange_refresh_token(&refresh_token, previous.role).await {
            Ok(tokens) => {
                let access = tokens.access_token.clone();
                self.session.save(tokens).await;
                Ok(access)
            }
            Err(error) => {
                warn!(%error, "Token refresh failed, clearing session");
                self.session.clear().await;
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
        role: Option<Role>,
    ) -> Result<SessionTokens, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await?;
        let mut tokens = response
            .json::<Envelope<SessionTokens>>()
            .await
            .map_err(Self::body_error)?
            .into_result()?;
        // Backends that rotate only the access token omit the other fields.
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh_token.to_string());
        }
        if tokens.role.is_none() {
            tokens.role = role;
        }
        Ok(tokens)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let response = self.send(method, path, query, body.as_ref()).await?;
        response
            .json::<Envelope<T>>()
            .await
            .map_err(Self::body_error)?
            .into_result()
    }

    async fn request_ack(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<(), ApiError> {
        let response = self.send(method, path, query, body.as_ref()).await?;
        response
            .json::<Envelope<serde_json::Value>>()
            .await
            .map_err(Self::body_error)?
            .into_ack()
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// Signs in and persists the returned token pair. Auth endpoints bypass
    /// the bearer/refresh plumbing; they are the thing that establishes it.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, ApiError> {
        debug!("Sending request");
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let tokens = response
            .json::<Envelope<SessionTokens>>()
            .await
            .map_err(Self::body_error)?
            .into_result()?;
        self.session.save(tokens.clone()).await;
        Ok(tokens)
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
                "usertype": role,
            }))
            .send()
            .await?;
        response
            .json::<Envelope<serde_json::Value>>()
            .await
            .map_err(Self::body_error)?
            .into_ack()
    }

    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/products", &[], None).await
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, &format!("/products/{id}"), &[], None)
            .await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ApiError> {
        debug!("Sending request");
        let body = serde_json::to_value(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::POST, "/products", &[], Some(body)).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_product(
        &self,
        id: u64,
        payload: &ProductPayload,
    ) -> Result<Product, ApiError> {
        debug!("Sending request");
        let body = serde_json::to_value(payload)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(Method::PUT, &format!("/products/{id}"), &[], Some(body))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(Method::DELETE, &format!("/products/{id}"), &[], None)
            .await
    }

    /// Products owned by the signed-in vendor (scoped server-side).
    #[instrument(skip(self))]
    pub async fn vendor_products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/products/vendor", &[], None).await
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartLine>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/cart", &[], None).await
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        product_id: u64,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let mut query = vec![("quantity", quantity.to_string())];
        if let Some(size) = size {
            query.push(("size", size.to_string()));
        }
        self.request_ack(
            Method::POST,
            &format!("/cart/add/{product_id}"),
            &query,
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn update_cart_line(
        &self,
        line_id: u64,
        quantity: u32,
        size: Option<&str>,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let mut query = vec![("quantity", quantity.to_string())];
        if let Some(size) = size {
            query.push(("size", size.to_string()));
        }
        self.request_ack(Method::PUT, &format!("/cart/{line_id}"), &query, None)
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_cart_line(&self, line_id: u64) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(Method::DELETE, &format!("/cart/{line_id}"), &[], None)
            .await
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Converts the current cart into orders with the given delivery details.
    /// The backend is expected to empty the cart on success; the caller
    /// reloads it rather than verifying.
    #[instrument(skip(self, phone, address))]
    pub async fn place_order(&self, phone: &str, address: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(
            Method::POST,
            "/orders/place",
            &[],
            Some(json!({ "phone": phone, "address": address })),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/orders", &[], None).await
    }

    /// Orders for the signed-in vendor's products (scoped server-side).
    #[instrument(skip(self))]
    pub async fn vendor_orders(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/orders/vendor", &[], None).await
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(
            Method::PUT,
            &format!("/orders/{order_id}/status"),
            &[("status", status.as_str().to_string())],
            None,
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Wishlist (backend-backed variant)
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn wishlist(&self) -> Result<Vec<WishlistEntry>, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, "/wishlist", &[], None).await
    }

    #[instrument(skip(self))]
    pub async fn add_to_wishlist(&self, product_id: u64) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(
            Method::POST,
            &format!("/wishlist/add/{product_id}"),
            &[],
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_wishlist(&self, product_id: u64) -> Result<(), ApiError> {
        debug!("Sending request");
        self.request_ack(
            Method::DELETE,
            &format!("/wishlist/remove/{product_id}"),
            &[],
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn wishlist_contains(&self, product_id: u64) -> Result<bool, ApiError> {
        debug!("Sending request");
        self.request(Method::GET, &format!("/wishlist/check/{product_id}"), &[], None)
            .await
    }

    // -------------------------------------------------------------------------
    // Reviews
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn product_reviews(&self, product_id: u64) -> Result<Vec<Review>, ApiError> {
        debug!("Sending request");
        self.request(
            Method::GET,
            &format!("/reviews/product/{product_id}"),
            &[],
            None,
        )
        .await
    }

    #[instrument(skip(self, comment))]
    pub async fn submit_review(
        &self,
        product_id: u64,
        rating: u8,
        comment: Option<&str>,
    ) -> Result<(), ApiError> {
        debug!("Sending request");
        let mut query = vec![("rating", rating.to_string())];
        if let Some(comment) = comment {
            query.push(("comment", comment.to_string()));
        }
        self.request_ack(
            Method::POST,
            &format!("/reviews/product/{product_id}"),
            &query,
            None,
        )
        .await
    }

    /// Whether the signed-in user may review this product (eligibility is
    /// determined server-side, presumed tied to a completed purchase).
    #[instrument(skip(self))]
    pub async fn can_review(&self, product_id: u64) -> Result<bool, ApiError> {
        debug!("Sending request");
        self.request(
            Method::GET,
            &format!("/reviews/can-review/{product_id}"),
            &[],
            None,
        )
        .await
    }
}
