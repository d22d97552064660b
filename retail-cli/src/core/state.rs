//! Application state
//!
//! Holds one instance of every service. Collaborators are passed in through
//! constructors; nothing reaches for ambient globals.

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    CustomerRepository, OrderRepository, PaymentRepository, ProductRepository,
};
use crate::services::{
    CustomerService, OrderService, PaymentService, ProductService, ReportService,
};
use crate::utils::AppError;

/// Application state — one service instance per domain
#[derive(Clone)]
pub struct AppState {
    pub db: DbService,
    pub products: ProductService,
    pub customers: CustomerService,
    pub orders: OrderService,
    pub payments: PaymentService,
    pub reports: ReportService,
}

impl AppState {
    /// Open the store configured in `config` and wire up the services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::open(&config.data_dir).await?;
        Ok(Self::with_db(db))
    }

    /// Wire services over an already-open store
    pub fn with_db(db: DbService) -> Self {
        let product_repo = ProductRepository::new(db.handle());
        let customer_repo = CustomerRepository::new(db.handle());
        let order_repo = OrderRepository::new(db.handle());
        let payment_repo = PaymentRepository::new(db.handle());

        let products = ProductService::new(product_repo.clone());
        let customers = CustomerService::new(customer_repo.clone(), order_repo.clone());
        let orders = OrderService::new(order_repo.clone(), customers.clone(), products.clone());
        let payments = PaymentService::new(payment_repo, orders.clone());
        let reports = ReportService::new(order_repo, product_repo, customer_repo);

        Self {
            db,
            products,
            customers,
            orders,
            payments,
            reports,
        }
    }
}
