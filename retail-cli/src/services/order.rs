//! Order Service
//!
//! Order lifecycle: placement, cancellation, completion. An order is
//! `Placed` at creation and can move exactly once, to `Cancelled` or to
//! `Completed`.

use crate::db::models::{Order, OrderDetails, OrderStatus, ProductUpdate};
use crate::db::repository::OrderRepository;
use crate::services::{CustomerService, ProductService};
use crate::utils::{AppError, AppResult};
use rust_decimal::Decimal;

/// One requested order line: a product and a quantity
#[derive(Debug, Clone, Copy)]
pub struct ItemRequest {
    pub prod_id: i64,
    pub quantity: i64,
}

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    customers: CustomerService,
    products: ProductService,
}

impl OrderService {
    pub fn new(
        repo: OrderRepository,
        customers: CustomerService,
        products: ProductService,
    ) -> Self {
        Self {
            repo,
            customers,
            products,
        }
    }

    /// Place an order for `cust_id`.
    ///
    /// Every line is validated (product exists, stock covers the quantity)
    /// and the order priced before the first write. The writes that follow —
    /// order row, per-line stock deduction, per-line item snapshot — are
    /// independent store calls with no enclosing transaction; a failure
    /// partway through leaves the earlier writes in place.
    pub async fn create_order(
        &self,
        cust_id: i64,
        items: &[ItemRequest],
    ) -> AppResult<OrderDetails> {
        self.customers.get_by_id(cust_id).await?;

        let mut total_amount = Decimal::ZERO;
        for item in items {
            if item.quantity <= 0 {
                return Err(AppError::Validation(
                    "Quantity must be greater than 0".to_string(),
                ));
            }
            let product = self.products.get_by_id(item.prod_id).await?;
            if product.stock < item.quantity {
                return Err(AppError::InsufficientStock {
                    name: product.name,
                    available: product.stock,
                });
            }
            total_amount += product.price * Decimal::from(item.quantity);
        }

        let order = self.repo.create_order(cust_id, total_amount).await?;

        for item in items {
            let product = self.products.get_by_id(item.prod_id).await?;
            self.products
                .update(
                    item.prod_id,
                    ProductUpdate {
                        stock: Some(product.stock - item.quantity),
                        ..Default::default()
                    },
                )
                .await?;
            self.repo
                .create_item(order.order_id, item.prod_id, item.quantity, product.price)
                .await?;
        }

        tracing::info!(
            order_id = order.order_id,
            cust_id,
            total = %order.total_amount,
            "Order placed"
        );

        self.get_order_details(order.order_id).await
    }

    /// Fetch the order with its customer and item snapshots
    pub async fn get_order_details(&self, order_id: i64) -> AppResult<OrderDetails> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found: {order_id}")))?;
        let customer = self.customers.get_by_id(order.cust_id).await?;
        let items = self.repo.items_for_order(order_id).await?;

        Ok(OrderDetails {
            order,
            customer,
            items,
        })
    }

    /// Cancel a `Placed` order, restoring the stock of every line
    pub async fn cancel_order(&self, order_id: i64) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found: {order_id}")))?;
        if order.status != OrderStatus::Placed {
            return Err(AppError::InvalidState(
                "Only orders with status PLACED can be cancelled".to_string(),
            ));
        }

        for item in self.repo.items_for_order(order_id).await? {
            let product = self.products.get_by_id(item.prod_id).await?;
            self.products
                .update(
                    item.prod_id,
                    ProductUpdate {
                        stock: Some(product.stock + item.quantity),
                        ..Default::default()
                    },
                )
                .await?;
        }

        let order = self
            .repo
            .update_status(order_id, OrderStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found: {order_id}")))?;
        tracing::info!(order_id, "Order cancelled");
        Ok(order)
    }

    /// Complete a `Placed` order; stock is unaffected
    pub async fn complete_order(&self, order_id: i64) -> AppResult<Order> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found: {order_id}")))?;
        if order.status != OrderStatus::Placed {
            return Err(AppError::InvalidState(
                "Only orders with status PLACED can be completed".to_string(),
            ));
        }

        let order = self
            .repo
            .update_status(order_id, OrderStatus::Completed)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order not found: {order_id}")))?;
        tracing::info!(order_id, "Order completed");
        Ok(order)
    }

    /// Orders for one customer; an unknown customer yields an empty list
    pub async fn list_by_customer(&self, cust_id: i64) -> AppResult<Vec<Order>> {
        Ok(self.repo.list_by_customer(cust_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CustomerCreate, ProductCreate};
    use crate::services::testing;

    async fn seed_customer(state: &crate::core::AppState) -> i64 {
        state
            .customers
            .add(CustomerCreate {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                phone: "1".to_string(),
                city: None,
            })
            .await
            .unwrap()
            .cust_id
    }

    async fn seed_product(
        state: &crate::core::AppState,
        sku: &str,
        price: i64,
        stock: i64,
    ) -> i64 {
        state
            .products
            .add(ProductCreate {
                name: format!("Product {sku}"),
                sku: sku.to_string(),
                price: Decimal::from(price),
                stock: Some(stock),
                category: None,
            })
            .await
            .unwrap()
            .prod_id
    }

    // ========== Placement ==========

    #[tokio::test]
    async fn placement_prices_deducts_and_snapshots() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let details = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();

        assert_eq!(details.order.total_amount, Decimal::from(20));
        assert_eq!(details.order.status, OrderStatus::Placed);
        assert_eq!(details.customer.cust_id, cust_id);
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].quantity, 2);
        assert_eq!(details.items[0].price, Decimal::from(10));

        let product = state.products.get_by_id(prod_id).await.unwrap();
        assert_eq!(product.stock, 3);
    }

    #[tokio::test]
    async fn placement_with_unknown_customer_is_not_found() {
        let (_tmp, state) = testing::state().await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let err = state
            .orders
            .create_order(
                77,
                &[ItemRequest {
                    prod_id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // No deduction happened
        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn insufficient_stock_names_product_and_availability() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 2).await;

        let err = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 3,
                }],
            )
            .await
            .unwrap_err();

        match err {
            AppError::InsufficientStock { name, available } => {
                assert_eq!(name, "Product S1");
                assert_eq!(available, 2);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 2);
        assert!(state.orders.list_by_customer(cust_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_runs_before_any_mutation() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let plenty = seed_product(&state, "S1", 10, 50).await;
        let scarce = seed_product(&state, "S2", 5, 1).await;

        // Second line fails, so the first line's stock must stay untouched
        let err = state
            .orders
            .create_order(
                cust_id,
                &[
                    ItemRequest {
                        prod_id: plenty,
                        quantity: 10,
                    },
                    ItemRequest {
                        prod_id: scarce,
                        quantity: 2,
                    },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock { .. }));

        assert_eq!(state.products.get_by_id(plenty).await.unwrap().stock, 50);
        assert_eq!(state.products.get_by_id(scarce).await.unwrap().stock, 1);
        assert!(state.orders.list_by_customer(cust_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let err = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 0,
                }],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn total_is_immune_to_later_price_changes() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let details = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        let order_id = details.order.order_id;

        state
            .products
            .update(
                prod_id,
                ProductUpdate {
                    price: Some(Decimal::from(99)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let reread = state.orders.get_order_details(order_id).await.unwrap();
        assert_eq!(reread.order.total_amount, Decimal::from(20));
        assert_eq!(reread.items[0].price, Decimal::from(10));
    }

    // ========== Cancellation / completion ==========

    #[tokio::test]
    async fn cancel_restores_stock_and_is_terminal() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let details = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        let order_id = details.order.order_id;
        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 3);

        let cancelled = state.orders.cancel_order(order_id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 5);

        // Terminal: neither cancel nor complete may run again
        let err = state.orders.cancel_order(order_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        let err = state.orders.complete_order(order_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        // And the stock was not restored twice
        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 5);
    }

    #[tokio::test]
    async fn complete_leaves_stock_alone_and_is_terminal() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let details = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        let order_id = details.order.order_id;

        let completed = state.orders.complete_order(order_id).await.unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
        assert_eq!(state.products.get_by_id(prod_id).await.unwrap().stock, 3);

        let err = state.orders.cancel_order(order_id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        let current = state.orders.get_order_details(order_id).await.unwrap();
        assert_eq!(current.order.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let (_tmp, state) = testing::state().await;

        assert!(matches!(
            state.orders.get_order_details(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            state.orders.cancel_order(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            state.orders.complete_order(404).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn listing_orders_for_unknown_customer_is_empty() {
        let (_tmp, state) = testing::state().await;
        assert!(state.orders.list_by_customer(9000).await.unwrap().is_empty());
    }

    // ========== Cross-entity rule ==========

    #[tokio::test]
    async fn customer_with_orders_cannot_be_deleted() {
        let (_tmp, state) = testing::state().await;
        let cust_id = seed_customer(&state).await;
        let prod_id = seed_product(&state, "S1", 10, 5).await;

        let details = state
            .orders
            .create_order(
                cust_id,
                &[ItemRequest {
                    prod_id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap();

        let err = state.customers.delete(cust_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // Any status blocks deletion, terminal ones included
        state
            .orders
            .cancel_order(details.order.order_id)
            .await
            .unwrap();
        let err = state.customers.delete(cust_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
