//! Report Service
//!
//! Read-only aggregations over the existing data. Rows are fetched whole and
//! reduced here; the store only ever sees the same point queries the rest of
//! the application issues.

use crate::db::repository::{CustomerRepository, OrderRepository, ProductRepository};
use crate::utils::{AppError, AppResult};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Customers fetched per report run
const CUSTOMER_LIMIT: i64 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    pub product: String,
    pub quantity_sold: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerOrders {
    pub customer: String,
    pub orders_count: usize,
}

#[derive(Clone)]
pub struct ReportService {
    orders: OrderRepository,
    products: ProductRepository,
    customers: CustomerRepository,
}

impl ReportService {
    pub fn new(
        orders: OrderRepository,
        products: ProductRepository,
        customers: CustomerRepository,
    ) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    /// Products ranked by total quantity sold, descending
    pub async fn top_selling_products(&self, top_n: usize) -> AppResult<Vec<ProductSales>> {
        let items = self.orders.all_items().await?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for item in items {
            *counts.entry(item.prod_id).or_insert(0) += item.quantity;
        }

        let mut ranked: Vec<(i64, i64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);

        let mut result = Vec::with_capacity(ranked.len());
        for (prod_id, quantity_sold) in ranked {
            let product = self
                .products
                .find_by_id(prod_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Product not found: {prod_id}")))?;
            result.push(ProductSales {
                product: product.name,
                quantity_sold,
            });
        }

        Ok(result)
    }

    /// Revenue from orders created in the trailing 30 days, any status
    pub async fn total_revenue_last_month(&self) -> AppResult<Decimal> {
        let cutoff = Utc::now() - Duration::days(30);
        let total = self
            .orders
            .all_orders()
            .await?
            .into_iter()
            .filter(|order| order.created_at >= cutoff)
            .map(|order| order.total_amount)
            .sum();
        Ok(total)
    }

    /// Order count per customer
    pub async fn orders_by_customer(&self) -> AppResult<Vec<CustomerOrders>> {
        let customers = self.customers.list(CUSTOMER_LIMIT).await?;

        let mut result = Vec::with_capacity(customers.len());
        for customer in customers {
            let orders = self.orders.list_by_customer(customer.cust_id).await?;
            result.push(CustomerOrders {
                customer: customer.name,
                orders_count: orders.len(),
            });
        }

        Ok(result)
    }

    /// Customers with strictly more than `min_orders` orders
    pub async fn frequent_customers(&self, min_orders: usize) -> AppResult<Vec<CustomerOrders>> {
        let counts = self.orders_by_customer().await?;
        Ok(counts
            .into_iter()
            .filter(|entry| entry.orders_count > min_orders)
            .collect())
    }
}
