//! Order Repository
//!
//! Covers both the orders table and its order_items lines, as one unit of
//! data access.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderItem, OrderStatus};
use chrono::Utc;
use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "orders";
const ORDER_ITEM_TABLE: &str = "order_items";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ------------------ Orders ------------------

    /// Insert a new order row with status `Placed`
    pub async fn create_order(&self, cust_id: i64, total_amount: Decimal) -> RepoResult<Order> {
        let order_id = self.base.next_id(ORDER_TABLE).await?;
        let order = Order {
            order_id,
            cust_id,
            total_amount,
            status: OrderStatus::Placed,
            created_at: Utc::now(),
        };

        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;

        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, order_id: i64) -> RepoResult<Option<Order>> {
        let rows: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn update_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let rows: Vec<Order> = self
            .base
            .db()
            .query("UPDATE orders SET status = $status WHERE order_id = $order_id RETURN AFTER")
            .bind(("order_id", order_id))
            .bind(("status", status))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list_by_customer(&self, cust_id: i64) -> RepoResult<Vec<Order>> {
        let rows: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE cust_id = $cust_id ORDER BY order_id ASC")
            .bind(("cust_id", cust_id))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Every order row; reporting input
    pub async fn all_orders(&self) -> RepoResult<Vec<Order>> {
        let rows: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY order_id ASC")
            .await?
            .take(0)?;
        Ok(rows)
    }

    // ------------------ Order Items ------------------

    /// Insert one item line snapshotting the unit price passed in
    pub async fn create_item(
        &self,
        order_id: i64,
        prod_id: i64,
        quantity: i64,
        price: Decimal,
    ) -> RepoResult<OrderItem> {
        let item = OrderItem {
            order_id,
            prod_id,
            quantity,
            price,
        };

        let created: Option<OrderItem> = self
            .base
            .db()
            .create(ORDER_ITEM_TABLE)
            .content(item)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create order item".to_string()))
    }

    pub async fn items_for_order(&self, order_id: i64) -> RepoResult<Vec<OrderItem>> {
        let rows: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_items WHERE order_id = $order_id")
            .bind(("order_id", order_id))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Every item line; reporting input
    pub async fn all_items(&self) -> RepoResult<Vec<OrderItem>> {
        let rows: Vec<OrderItem> = self
            .base
            .db()
            .query("SELECT * FROM order_items")
            .await?
            .take(0)?;
        Ok(rows)
    }
}
