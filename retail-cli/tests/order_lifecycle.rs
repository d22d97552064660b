//! End-to-end order/payment lifecycle over a throwaway store.

use retail_cli::db::models::{
    CustomerCreate, OrderStatus, PaymentMethod, PaymentStatus, ProductCreate,
};
use retail_cli::services::ItemRequest;
use retail_cli::{AppError, AppState, DbService};
use rust_decimal::Decimal;

async fn fresh_state() -> (tempfile::TempDir, AppState) {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::open(tmp.path().to_str().unwrap()).await.unwrap();
    (tmp, AppState::with_db(db))
}

#[tokio::test]
async fn place_pay_and_complete() {
    let (_tmp, state) = fresh_state().await;

    let customer = state
        .customers
        .add(CustomerCreate {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: "1".to_string(),
            city: None,
        })
        .await
        .unwrap();

    let product = state
        .products
        .add(ProductCreate {
            name: "Widget".to_string(),
            sku: "S1".to_string(),
            price: Decimal::from(10),
            stock: Some(5),
            category: None,
        })
        .await
        .unwrap();

    // Place: total 20, stock 5 -> 3, status PLACED
    let details = state
        .orders
        .create_order(
            customer.cust_id,
            &[ItemRequest {
                prod_id: product.prod_id,
                quantity: 2,
            }],
        )
        .await
        .unwrap();
    let order_id = details.order.order_id;

    assert_eq!(details.order.total_amount, Decimal::from(20));
    assert_eq!(details.order.status, OrderStatus::Placed);
    assert_eq!(
        state.products.get_by_id(product.prod_id).await.unwrap().stock,
        3
    );

    // Processing before any pending row exists fails
    let err = state
        .payments
        .process(order_id, PaymentMethod::Card)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Explicit pending row, then process: payment PAID, order COMPLETED
    state
        .payments
        .create_pending(order_id, details.order.total_amount)
        .await
        .unwrap();
    let paid = state
        .payments
        .process(order_id, PaymentMethod::Card)
        .await
        .unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);
    assert_eq!(paid.method, Some(PaymentMethod::Card));
    assert_eq!(paid.amount, Decimal::from(20));

    let completed = state.orders.get_order_details(order_id).await.unwrap();
    assert_eq!(completed.order.status, OrderStatus::Completed);

    // Completed is terminal
    let err = state.orders.cancel_order(order_id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(
        state
            .orders
            .get_order_details(order_id)
            .await
            .unwrap()
            .order
            .status,
        OrderStatus::Completed
    );

    // Stock stays deducted after completion
    assert_eq!(
        state.products.get_by_id(product.prod_id).await.unwrap().stock,
        3
    );
}

#[tokio::test]
async fn cancel_restores_stock_and_refund_follows() {
    let (_tmp, state) = fresh_state().await;

    let customer = state
        .customers
        .add(CustomerCreate {
            name: "B".to_string(),
            email: "b@x.com".to_string(),
            phone: "2".to_string(),
            city: None,
        })
        .await
        .unwrap();
    let product = state
        .products
        .add(ProductCreate {
            name: "Widget".to_string(),
            sku: "S2".to_string(),
            price: Decimal::from(4),
            stock: Some(10),
            category: None,
        })
        .await
        .unwrap();

    let details = state
        .orders
        .create_order(
            customer.cust_id,
            &[ItemRequest {
                prod_id: product.prod_id,
                quantity: 3,
            }],
        )
        .await
        .unwrap();
    let order_id = details.order.order_id;
    state
        .payments
        .create_pending(order_id, details.order.total_amount)
        .await
        .unwrap();

    // Cancel then refund, the CLI's cancellation sequence
    let cancelled = state.orders.cancel_order(order_id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        state.products.get_by_id(product.prod_id).await.unwrap().stock,
        10
    );

    let refunded = state.payments.refund(order_id).await.unwrap();
    assert_eq!(refunded.status, PaymentStatus::Refunded);

    // The customer still cannot be deleted; the cancelled order remains
    let err = state.customers.delete(customer.cust_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
