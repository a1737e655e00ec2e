use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{ApiClient, ApiError};
use crate::domain::{Order, OrderStatus, StatusFilter};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order not found: {0}")]
    NotFound(u64),
    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Per-status counts recomputed from the in-memory set on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderSummary {
    pub total: usize,
    pub pending: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

pub(crate) fn summarize(orders: &[Order]) -> OrderSummary {
    OrderSummary {
        total: orders.len(),
        pending: count(orders, OrderStatus::Pending),
        delivered: count(orders, OrderStatus::Delivered),
        cancelled: count(orders, OrderStatus::Cancelled),
    }
}

fn count(orders: &[Order], status: OrderStatus) -> usize {
    orders.iter().filter(|order| order.status == status).count()
}

pub(crate) fn filter_orders(orders: &[Order], filter: StatusFilter) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| filter.admits(order.status))
        .collect()
}

/// Customer order history: one full fetch, filtered in memory. Switching
/// the filter never refetches.
pub struct OrdersStore {
    client: ApiClient,
    orders: Vec<Order>,
    filter: StatusFilter,
    generation: u64,
}

impl OrdersStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            orders: Vec::new(),
            filter: StatusFilter::All,
            generation: 0,
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), OrderError> {
        let generation = self.begin_load();
        let orders = self.client.orders().await?;
        self.apply_orders(generation, orders);
        Ok(())
    }

    pub(crate) fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn apply_orders(&mut self, generation: u64, orders: Vec<Order>) {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "Discarding stale order load"
            );
            return;
        }
        self.orders = orders;
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn filtered(&self) -> Vec<&Order> {
        filter_orders(&self.orders, self.filter)
    }

    pub fn summary(&self) -> OrderSummary {
        summarize(&self.orders)
    }
}
