//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub prod_id: i64,
    pub name: String,
    /// Stock-keeping unit, unique across the catalog
    pub sku: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: Option<i64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub category: Option<String>,
}
