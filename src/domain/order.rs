use serde::{Deserialize, Serialize};

use super::product::Product;

/// Lifecycle state of an order.
///
/// The legacy UI allowed any status to be set from any status; this client
/// enforces a real machine instead: `Pending` may move to either terminal
/// state, and terminal states have no outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending => next != OrderStatus::Pending,
            OrderStatus::Delivered | OrderStatus::Cancelled => false,
        }
    }

    /// Wire name used in the status-update query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

/// Represents a placed order: one product snapshot at its checkout-time
/// price, owned by the purchasing user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub product: Product,
    #[serde(rename = "price")]
    pub unit_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "orderDate")]
    pub order_date: String,
    pub status: OrderStatus,
}

/// In-memory filter applied to a loaded order list. Switching filter never
/// refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Delivered,
    Cancelled,
}

impl StatusFilter {
    pub fn admits(self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == OrderStatus::Pending,
            StatusFilter::Delivered => status == OrderStatus::Delivered,
            StatusFilter::Cancelled => status == OrderStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reaches_both_terminal_states() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn terminal_states_have_no_outgoing_edges() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn filter_admits_matching_statuses_only() {
        assert!(StatusFilter::All.admits(OrderStatus::Cancelled));
        assert!(StatusFilter::Pending.admits(OrderStatus::Pending));
        assert!(!StatusFilter::Pending.admits(OrderStatus::Delivered));
        assert!(StatusFilter::Delivered.admits(OrderStatus::Delivered));
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, serde_json::json!(status.as_str()));
            let back: OrderStatus = serde_json::from_value(wire).unwrap();
            assert_eq!(back, status);
        }
    }
}
