//! Order and OrderItem Models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// `Placed` is the initial state; `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Placed,
    Cancelled,
    Completed,
}

/// Order model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub cust_id: i64,
    /// Derived at creation from the item lines; immutable afterwards
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order line item
///
/// `price` is the unit price captured when the order was created, independent
/// of later product price changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: i64,
    pub prod_id: i64,
    pub quantity: i64,
    pub price: Decimal,
}

/// Full order view: the order row plus its customer and item snapshots
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: super::Customer,
    pub items: Vec<OrderItem>,
}
