//! Database Module
//!
//! Owns the embedded SurrealDB handle and applies the table definitions at
//! startup.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "retail";
const DATABASE: &str = "retail";

/// Database service — owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the store under `data_dir` and apply definitions
    pub async fn open(data_dir: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(data_dir)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!(path = %data_dir, "Database opened");

        Ok(Self { db })
    }

    /// Cheap clone of the underlying handle for repository construction
    pub fn handle(&self) -> Surreal<Db> {
        self.db.clone()
    }
}

/// Idempotent table definitions. Tables stay schemaless; uniqueness is
/// enforced by index so a racing insert cannot slip past the service-level
/// pre-checks.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    let statements = [
        "DEFINE INDEX IF NOT EXISTS idx_products_sku ON TABLE products COLUMNS sku UNIQUE",
        "DEFINE INDEX IF NOT EXISTS idx_customers_email ON TABLE customers COLUMNS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS idx_payments_order ON TABLE payments COLUMNS order_id UNIQUE",
    ];

    for statement in statements {
        db.query(statement)
            .await
            .map_err(|e| AppError::Database(format!("Failed to apply definition: {e}")))?;
    }

    Ok(())
}
