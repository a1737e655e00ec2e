use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::api::{ApiClient, ApiError};
use crate::domain::{clamp_quantity, CartLine, CartTotals};

#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Cart state: the full in-memory line list, replaced wholesale from the
/// backend on every load. No incremental patching, no optimistic updates;
/// every mutation is update-then-reload.
pub struct CartStore {
    client: ApiClient,
    lines: Vec<CartLine>,
    generation: u64,
}

impl CartStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            lines: Vec::new(),
            generation: 0,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), CartError> {
        let generation = self.begin_load();
        let lines = self.client.cart().await?;
        self.apply_lines(generation, lines);
        Ok(())
    }

    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply_lines(&mut self, generation: u64, lines: Vec<CartLine>) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale cart load"
            );
            return;
        }
        self.lines = lines;
    }

    /// Sends the new quantity/size then reloads the whole cart. Quantity is
    /// clamped into [1, 10] before anything goes on the wire.
    #[instrument(skip(self))]
    pub async fn edit_line(
        &mut self,
        line_id: u64,
        quantity: u32,
        size: Option<String>,
    ) -> Result<(), CartError> {
        let quantity = clamp_quantity(quantity);
        self.client
            .update_cart_line(line_id, quantity, size.as_deref())
            .await?;
        self.load().await
    }

    /// Deletes the line then reloads.
    #[instrument(skip(self))]
    pub async fn remove_line(&mut self, line_id: u64) -> Result<(), CartError> {
        self.client.remove_cart_line(line_id).await?;
        self.load().await
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Derived, never stored. Logs when the independently rounded tax and
    /// total disagree so the known quirk stays visible in the field.
    pub fn totals(&self) -> CartTotals {
        let totals = CartTotals::from_lines(&self.lines);
        if totals.rounding_divergence() != 0.0 {
            warn!(
                subtotal = totals.subtotal,
                tax = totals.tax,
                total = totals.total,
                "Independently rounded tax and total diverge"
            );
        }
        totals
    }
}
