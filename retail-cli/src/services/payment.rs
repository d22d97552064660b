//! Payment Service
//!
//! Payment status transitions tied to order completion. A pending row is
//! never created implicitly — callers create one explicitly after placing
//! the order, then process it.

use crate::db::models::{Payment, PaymentMethod, PaymentStatus};
use crate::db::repository::PaymentRepository;
use crate::services::OrderService;
use crate::utils::{AppError, AppResult};
use rust_decimal::Decimal;

#[derive(Clone)]
pub struct PaymentService {
    repo: PaymentRepository,
    orders: OrderService,
}

impl PaymentService {
    pub fn new(repo: PaymentRepository, orders: OrderService) -> Self {
        Self { repo, orders }
    }

    /// Insert a `Pending` payment row for the order
    pub async fn create_pending(&self, order_id: i64, amount: Decimal) -> AppResult<Payment> {
        let payment = self.repo.create_pending(order_id, amount).await?;
        tracing::info!(order_id, amount = %payment.amount, "Pending payment created");
        Ok(payment)
    }

    /// Mark the payment `Paid` with the given method, then complete the
    /// order. The two writes are not atomic: if completion fails the payment
    /// stays `Paid`.
    pub async fn process(&self, order_id: i64, method: PaymentMethod) -> AppResult<Payment> {
        let payment = self
            .repo
            .find_by_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment record not found".to_string()))?;
        if payment.status != PaymentStatus::Pending {
            return Err(AppError::InvalidState(
                "Payment already processed".to_string(),
            ));
        }

        self.repo
            .update_status(order_id, PaymentStatus::Paid, Some(method))
            .await?;

        self.orders.complete_order(order_id).await?;
        tracing::info!(order_id, method = ?method, "Payment processed");

        self.repo
            .find_by_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment record not found".to_string()))
    }

    /// Set the payment `Refunded`. The current status is not checked.
    pub async fn refund(&self, order_id: i64) -> AppResult<Payment> {
        self.repo
            .find_by_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment record not found".to_string()))?;

        let refunded = self
            .repo
            .update_status(order_id, PaymentStatus::Refunded, None)
            .await?
            .ok_or_else(|| AppError::NotFound("Payment record not found".to_string()))?;
        tracing::info!(order_id, "Payment refunded");
        Ok(refunded)
    }

    pub async fn list_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>> {
        Ok(self.repo.list_by_status(status).await?)
    }
}
