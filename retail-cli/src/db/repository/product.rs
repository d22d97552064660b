//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation};
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "products";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a new product row
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let prod_id = self.base.next_id(PRODUCT_TABLE).await?;
        let sku = data.sku.clone();
        let product = Product {
            prod_id,
            name: data.name,
            sku: data.sku,
            price: data.price,
            stock: data.stock.unwrap_or(0),
            category: data.category,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await
            .map_err(|e| map_unique_violation(e, &format!("SKU already exists: {sku}")))?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn find_by_id(&self, prod_id: i64) -> RepoResult<Option<Product>> {
        let rows: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM products WHERE prod_id = $prod_id LIMIT 1")
            .bind(("prod_id", prod_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_sku(&self, sku: &str) -> RepoResult<Option<Product>> {
        let rows: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM products WHERE sku = $sku LIMIT 1")
            .bind(("sku", sku.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Update only the supplied fields, returning the row after the write
    pub async fn update(&self, prod_id: i64, data: ProductUpdate) -> RepoResult<Option<Product>> {
        let mut set_parts: Vec<&str> = Vec::new();

        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.sku.is_some() {
            set_parts.push("sku = $sku");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }

        if set_parts.is_empty() {
            return self.find_by_id(prod_id).await;
        }

        let query_str = format!(
            "UPDATE {PRODUCT_TABLE} SET {} WHERE prod_id = $prod_id RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self.base.db().query(query_str).bind(("prod_id", prod_id));

        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.sku {
            query = query.bind(("sku", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", v));
        }

        let rows: Vec<Product> = query
            .await
            .map_err(|e| map_unique_violation(e, "SKU already exists"))?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Hard delete, returning the row as it was before the delete
    pub async fn delete(&self, prod_id: i64) -> RepoResult<Option<Product>> {
        let rows: Vec<Product> = self
            .base
            .db()
            .query("DELETE products WHERE prod_id = $prod_id RETURN BEFORE")
            .bind(("prod_id", prod_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    /// All products in insertion order
    pub async fn list(&self, limit: i64) -> RepoResult<Vec<Product>> {
        let rows: Vec<Product> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {PRODUCT_TABLE} ORDER BY prod_id ASC LIMIT {limit}"
            ))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
