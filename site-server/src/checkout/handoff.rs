//! Order Handoff Store
//!
//! Confirmed orders are not persisted; they wait here, keyed by cart
//! session, until the confirmation view collects them. Read-once: a
//! second fetch for the same session finds nothing.

use dashmap::DashMap;
use shared::models::Order;

#[derive(Default)]
pub struct OrderHandoff {
    orders: DashMap<String, Order>,
}

impl OrderHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park an order for the session, replacing any uncollected one.
    pub fn put(&self, session_id: &str, order: Order) {
        self.orders.insert(session_id.to_string(), order);
    }

    /// Collect and discard the parked order, if any.
    pub fn take(&self, session_id: &str) -> Option<Order> {
        self.orders.remove(session_id).map(|(_, order)| order)
    }
}
