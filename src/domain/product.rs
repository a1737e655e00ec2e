use serde::{Deserialize, Serialize};

use super::user::User;

/// Represents a product in the catalog.
///
/// Field names map to the backend's wire names (`pid`, `detail`, `imgpath`).
/// The optional fields are only populated by newer backend versions; older
/// responses simply omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "pid")]
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(rename = "detail")]
    pub description: String,
    #[serde(rename = "imgpath")]
    pub image_path: String,
    /// Comma-separated size tokens, e.g. `"S,M,L"`. Absent for unsized goods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(rename = "averageRating", default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(rename = "reviewCount", default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<User>,
}

/// Payload for creating or replacing a product (vendor-only endpoints).
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
    #[serde(rename = "detail")]
    pub description: String,
    #[serde(rename = "imgpath")]
    pub image_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Splits the comma-separated size string into trimmed, non-empty tokens.
    pub fn size_options(&self) -> Vec<&str> {
        self.sizes
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// True when the product requires a size to be chosen before add-to-cart.
    pub fn has_sizes(&self) -> bool {
        !self.size_options().is_empty()
    }

    /// Only an explicit zero stock count disables purchase. Unknown stock is
    /// treated as available, matching the backend-of-record behavior.
    pub fn in_stock(&self) -> bool {
        self.stock != Some(0)
    }

    /// Case-insensitive substring match against name and description.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, description: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            price: 100.0,
            description: description.to_string(),
            image_path: "/img/1.png".to_string(),
            sizes: None,
            stock: None,
            average_rating: None,
            review_count: None,
            vendor: None,
        }
    }

    #[test]
    fn matches_is_case_insensitive_over_name_and_description() {
        let shirt = product("Denim Shirt", "Classic blue denim");
        assert!(shirt.matches("denim"));
        assert!(shirt.matches("SHIRT"));
        assert!(shirt.matches("blue DENIM"));
        assert!(!shirt.matches("trousers"));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(product("Anything", "at all").matches(""));
    }

    #[test]
    fn size_options_trims_and_drops_blanks() {
        let mut shirt = product("Shirt", "");
        shirt.sizes = Some("S, M ,L,,".to_string());
        assert_eq!(shirt.size_options(), vec!["S", "M", "L"]);
        assert!(shirt.has_sizes());

        shirt.sizes = Some("  ".to_string());
        assert!(!shirt.has_sizes());
    }

    #[test]
    fn only_explicit_zero_stock_blocks_purchase() {
        let mut shirt = product("Shirt", "");
        assert!(shirt.in_stock());
        shirt.stock = Some(2);
        assert!(shirt.in_stock());
        shirt.stock = Some(0);
        assert!(!shirt.in_stock());
    }
}
