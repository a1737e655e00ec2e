use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::domain::{Order, OrderStatus, StatusFilter};

use super::orders::{filter_orders, summarize, OrderError, OrderSummary};

/// Vendor order view: same load/filter contract as the customer view but
/// scoped server-side to the vendor's own products, plus status updates.
///
/// Status updates go through the explicit lifecycle machine: `Pending` may
/// become `Delivered` or `Cancelled`, terminal states are final. An invalid
/// transition is rejected locally without touching the network.
pub struct VendorOrdersStore {
    client: ApiClient,
    orders: Vec<Order>,
    filter: StatusFilter,
    generation: u64,
}

impl VendorOrdersStore {
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
        let orders = self.client.vendor_orders().await?;
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
                "Discarding stale vendor order load"
            );
            return;
        }
        self.orders = orders;
    }

    /// Moves an order along the lifecycle machine, then reloads the full
    /// list (no optimistic update).
    #[instrument(skip(self))]
    pub async fn update_status(
        &mut self,
        order_id: u64,
        new_status: OrderStatus,
    ) -> Result<(), OrderError> {
        let current = self
            .orders
            .iter()
            .find(|order| order.id == order_id)
            .ok_or(OrderError::NotFound(order_id))?
            .status;
        if !current.can_transition_to(new_status) {
            return Err(OrderError::InvalidTransition {
                from: current,
                to: new_status,
            });
        }
        self.client.update_order_status(order_id, new_status).await?;
        info!(order_id, status = new_status.as_str(), "Order status updated");
        self.load().await
    }

    /// Statuses the given order may still move to. Empty for terminal
    /// orders; views use this to disable invalid options.
    pub fn allowed_transitions(&self, order_id: u64) -> Vec<OrderStatus> {
        let Some(order) = self.orders.iter().find(|order| order.id == order_id) else {
            return Vec::new();
        };
        [
            OrderStatus::Pending,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .filter(|next| order.status.can_transition_to(*next))
        .collect()
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
