use serde::{Deserialize, Serialize};

use super::user::User;

/// Lowest rating a review may carry.
pub const MIN_RATING: u8 = 1;
/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

pub fn rating_in_range(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Represents a product review. Written at most once per (user, product)
/// pair; there is no edit or retract operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(rename = "user")]
    pub author: User,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_one_through_five() {
        assert!(!rating_in_range(0));
        assert!(rating_in_range(1));
        assert!(rating_in_range(5));
        assert!(!rating_in_range(6));
    }
}
