//! # Mock backend
//!
//! Utilities for testing stores and the API client against a stubbed REST
//! backend.
//!
//! Responses are built with the same `{success, message, data}` envelope
//! the real backend uses; helpers exist for the common entity shapes so
//! tests read as scenarios rather than JSON literals.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::{MockServer, ResponseTemplate};

use crate::api::{MemorySessionStore, SessionTokens};
use crate::app_system::{Storefront, WishlistMode};
use crate::domain::Role;

/// 200 response wrapping `data` in a successful envelope.
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "Success",
        "data": data,
    }))
}

/// 200 response carrying a backend-reported failure.
pub fn fail(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": false,
        "message": message,
    }))
}

/// Bare 401, as the backend answers requests with a bad or expired token.
pub fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401)
}

pub fn product_json(id: u64, name: &str, price: f64, description: &str) -> Value {
    json!({
        "pid": id,
        "name": name,
        "price": price,
        "detail": description,
        "imgpath": format!("/images/{id}.png"),
    })
}

pub fn cart_line_json(id: u64, product: Value, unit_price: f64, quantity: u32) -> Value {
    json!({
        "id": id,
        "product": product,
        "price": unit_price,
        "quantity": quantity,
    })
}

pub fn order_json(id: u64, product: Value, unit_price: f64, quantity: u32, status: &str) -> Value {
    json!({
        "id": id,
        "product": product,
        "price": unit_price,
        "quantity": quantity,
        "orderDate": "2025-06-01T10:00:00Z",
        "status": status,
    })
}

pub fn review_json(id: u64, rating: u8, comment: &str) -> Value {
    json!({
        "id": id,
        "user": {
            "userid": 1,
            "username": "buyer",
            "email": "buyer@example.com",
            "usertype": "CUSTOMER",
        },
        "rating": rating,
        "comment": comment,
        "createdAt": "2025-06-02T09:00:00Z",
    })
}

/// A session store preloaded with a token pair, the way a returning user's
/// persisted storage looks at startup.
pub fn seeded_session(
    access: &str,
    refresh: Option<&str>,
    role: Option<Role>,
) -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_tokens(SessionTokens {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        role,
    }))
}

/// A storefront wired to the mock server with the remote wishlist backend.
pub fn storefront_against(server: &MockServer, session: Arc<MemorySessionStore>) -> Storefront {
    Storefront::new(server.uri(), session, WishlistMode::Remote)
}
