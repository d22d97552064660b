//! Product Service
//!
//! Field-level invariants (positive price, unique SKU) ahead of the
//! repository calls.

use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};
use rust_decimal::Decimal;

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository) -> Self {
        Self { repo }
    }

    /// Create a product; nothing is persisted when validation fails
    pub async fn add(&self, data: ProductCreate) -> AppResult<Product> {
        if data.price <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Price must be greater than 0".to_string(),
            ));
        }
        if self.repo.find_by_sku(&data.sku).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "SKU already exists: {}",
                data.sku
            )));
        }

        let product = self.repo.create(data).await?;
        tracing::info!(prod_id = product.prod_id, sku = %product.sku, "Product created");
        Ok(product)
    }

    /// Apply only the supplied fields
    pub async fn update(&self, prod_id: i64, data: ProductUpdate) -> AppResult<Product> {
        if data.price.is_some_and(|price| price <= Decimal::ZERO) {
            return Err(AppError::Validation(
                "Price must be greater than 0".to_string(),
            ));
        }

        self.repo
            .find_by_id(prod_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not found: {prod_id}")))?;

        self.repo
            .update(prod_id, data)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not found: {prod_id}")))
    }

    /// Remove the product, returning the prior row. Existing order items
    /// referencing it are not checked.
    pub async fn delete(&self, prod_id: i64) -> AppResult<Product> {
        let deleted = self
            .repo
            .delete(prod_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not found: {prod_id}")))?;
        tracing::info!(prod_id, "Product deleted");
        Ok(deleted)
    }

    pub async fn get_by_id(&self, prod_id: i64) -> AppResult<Product> {
        self.repo
            .find_by_id(prod_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not found: {prod_id}")))
    }

    pub async fn list(&self, limit: i64) -> AppResult<Vec<Product>> {
        Ok(self.repo.list(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;

    fn sample(name: &str, sku: &str, price: i64, stock: i64) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            sku: sku.to_string(),
            price: Decimal::from(price),
            stock: Some(stock),
            category: None,
        }
    }

    #[tokio::test]
    async fn add_rejects_non_positive_price() {
        let (_tmp, state) = testing::state().await;

        let zero = ProductCreate {
            price: Decimal::ZERO,
            ..sample("Mug", "MUG-1", 1, 0)
        };
        let err = state.products.add(zero).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let negative = ProductCreate {
            price: Decimal::from(-5),
            ..sample("Mug", "MUG-1", 1, 0)
        };
        let err = state.products.add(negative).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Nothing was persisted
        assert!(state.products.list(100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_sku_is_rejected_and_store_unchanged() {
        let (_tmp, state) = testing::state().await;

        state.products.add(sample("Mug", "MUG-1", 10, 5)).await.unwrap();
        let err = state
            .products
            .add(sample("Other mug", "MUG-1", 12, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let all = state.products.list(100).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Mug");
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let (_tmp, state) = testing::state().await;

        let created = state
            .products
            .add(sample("Mug", "MUG-1", 10, 5))
            .await
            .unwrap();

        let updated = state
            .products
            .update(
                created.prod_id,
                ProductUpdate {
                    stock: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock, 9);
        assert_eq!(updated.name, "Mug");
        assert_eq!(updated.price, Decimal::from(10));
    }

    #[tokio::test]
    async fn update_rejects_non_positive_price() {
        let (_tmp, state) = testing::state().await;

        let created = state
            .products
            .add(sample("Mug", "MUG-1", 10, 5))
            .await
            .unwrap();

        let err = state
            .products
            .update(
                created.prod_id,
                ProductUpdate {
                    price: Some(Decimal::ZERO),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Price untouched
        let current = state.products.get_by_id(created.prod_id).await.unwrap();
        assert_eq!(current.price, Decimal::from(10));
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let (_tmp, state) = testing::state().await;

        let err = state
            .products
            .update(
                99,
                ProductUpdate {
                    stock: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_returns_prior_row() {
        let (_tmp, state) = testing::state().await;

        let created = state
            .products
            .add(sample("Mug", "MUG-1", 10, 5))
            .await
            .unwrap();

        let deleted = state.products.delete(created.prod_id).await.unwrap();
        assert_eq!(deleted.sku, "MUG-1");
        assert_eq!(deleted.stock, 5);

        let err = state.products.get_by_id(created.prod_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = state.products.delete(created.prod_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_is_insertion_ordered() {
        let (_tmp, state) = testing::state().await;

        state.products.add(sample("A", "SKU-A", 1, 0)).await.unwrap();
        state.products.add(sample("B", "SKU-B", 2, 0)).await.unwrap();
        state.products.add(sample("C", "SKU-C", 3, 0)).await.unwrap();

        let all = state.products.list(100).await.unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        let limited = state.products.list(2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }
}
