//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(PaymentMethod::Cash),
            "Card" => Ok(PaymentMethod::Card),
            "UPI" => Ok(PaymentMethod::Upi),
            other => Err(format!(
                "invalid payment method '{other}' (expected Cash, Card or UPI)"
            )),
        }
    }
}

/// Payment model, one-to-one with an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: i64,
    pub amount: Decimal,
    pub status: PaymentStatus,
    /// Set only when the payment transitions to `Paid`
    pub method: Option<PaymentMethod>,
}
