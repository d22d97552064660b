//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub cust_id: i64,
    pub name: String,
    /// Unique across customers
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
}

/// Partial update; only phone and city are mutable after creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub phone: Option<String>,
    pub city: Option<String>,
}
