//! Payment Repository
//!
//! One payment row per order; `payments.order_id` carries a UNIQUE index.

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation};
use crate::db::models::{Payment, PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PAYMENT_TABLE: &str = "payments";

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a `Pending` row for the order
    pub async fn create_pending(&self, order_id: i64, amount: Decimal) -> RepoResult<Payment> {
        let payment = Payment {
            order_id,
            amount,
            status: PaymentStatus::Pending,
            method: None,
        };

        let created: Option<Payment> = self
            .base
            .db()
            .create(PAYMENT_TABLE)
            .content(payment)
            .await
            .map_err(|e| {
                map_unique_violation(e, &format!("Payment already exists for order {order_id}"))
            })?;

        created.ok_or_else(|| RepoError::Database("Failed to create payment".to_string()))
    }

    pub async fn find_by_order(&self, order_id: i64) -> RepoResult<Option<Payment>> {
        let rows: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payments WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Set the status, and the method when one is supplied
    pub async fn update_status(
        &self,
        order_id: i64,
        status: PaymentStatus,
        method: Option<PaymentMethod>,
    ) -> RepoResult<Option<Payment>> {
        let query_str = if method.is_some() {
            "UPDATE payments SET status = $status, method = $method WHERE order_id = $order_id RETURN AFTER"
        } else {
            "UPDATE payments SET status = $status WHERE order_id = $order_id RETURN AFTER"
        };

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("order_id", order_id))
            .bind(("status", status));

        if let Some(m) = method {
            query = query.bind(("method", m));
        }

        let rows: Vec<Payment> = query.await?.take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list_by_status(&self, status: PaymentStatus) -> RepoResult<Vec<Payment>> {
        let rows: Vec<Payment> = self
            .base
            .db()
            .query("SELECT * FROM payments WHERE status = $status ORDER BY order_id ASC")
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
