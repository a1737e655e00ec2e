use serde::{Deserialize, Serialize};

use super::product::Product;

/// Represents one saved product as the backend-backed wishlist returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: u64,
    pub product: Product,
    #[serde(rename = "addedAt")]
    pub added_at: String,
}
