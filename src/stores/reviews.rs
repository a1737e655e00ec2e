use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, ApiError};
use crate::domain::{rating_in_range, Review};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("rating {0} is outside 1..=5")]
    RatingOutOfRange(u8),
    #[error("not eligible to review this product")]
    NotEligible,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Review state for one product: the review list plus the server-determined
/// eligibility flag gating the "write review" action.
pub struct ReviewPanel {
    client: ApiClient,
    product_id: u64,
    reviews: Vec<Review>,
    can_review: bool,
    generation: u64,
}

impl ReviewPanel {
    pub fn new(client: ApiClient, product_id: u64) -> Self {
        Self {
            client,
            product_id,
            reviews: Vec::new(),
            can_review: false,
            generation: 0,
        }
    }

    #[instrument(skip(self), fields(product_id = self.product_id))]
    pub async fn load(&mut self) -> Result<(), ReviewError> {
        let generation = self.begin_load();
        let reviews = self.client.product_reviews(self.product_id).await?;
        let can_review = self.client.can_review(self.product_id).await?;
        self.apply(generation, reviews, can_review);
        Ok(())
    }

    /// Stamps a new request generation. Responses carrying an older stamp
    /// are discarded by [`ReviewPanel::apply`]; the two fetches behind a
    /// load land together or not at all.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply(&mut self, generation: u64, reviews: Vec<Review>, can_review: bool) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale review load"
            );
            return;
        }
        self.reviews = reviews;
        self.can_review = can_review;
    }

    /// Posts the review once. On success the eligibility flag flips false
    /// locally (one review per purchase) and the list is reloaded.
    #[instrument(skip(self, comment), fields(product_id = self.product_id))]
    pub async fn submit(&mut self, rating: u8, comment: Option<&str>) -> Result<(), ReviewError> {
        if !rating_in_range(rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }
        if !self.can_review {
            return Err(ReviewError::NotEligible);
        }
        self.client
            .submit_review(self.product_id, rating, comment)
            .await?;
        let generation = self.begin_load();
        let reviews = self.client.product_reviews(self.product_id).await?;
        self.apply(generation, reviews, false);
        info!(rating, "Review submitted");
        Ok(())
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn can_review(&self) -> bool {
        self.can_review
    }
}
