//! Customer Service

use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use crate::db::repository::{CustomerRepository, OrderRepository};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    orders: OrderRepository,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, orders: OrderRepository) -> Self {
        Self { repo, orders }
    }

    pub async fn add(&self, data: CustomerCreate) -> AppResult<Customer> {
        if self.repo.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Email already exists: {}",
                data.email
            )));
        }

        let customer = self.repo.create(data).await?;
        tracing::info!(cust_id = customer.cust_id, "Customer created");
        Ok(customer)
    }

    /// Partial update; only phone and city can change
    pub async fn update(&self, cust_id: i64, data: CustomerUpdate) -> AppResult<Customer> {
        self.repo
            .find_by_id(cust_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found: {cust_id}")))?;

        self.repo
            .update(cust_id, data)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found: {cust_id}")))
    }

    /// Remove the customer. Fails while any order, in any status, still
    /// references them.
    pub async fn delete(&self, cust_id: i64) -> AppResult<Customer> {
        let existing = self
            .repo
            .find_by_id(cust_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found: {cust_id}")))?;

        if !self.orders.list_by_customer(cust_id).await?.is_empty() {
            return Err(AppError::Conflict(
                "Cannot delete customer with existing orders".to_string(),
            ));
        }

        self.repo.delete(cust_id).await?;
        tracing::info!(cust_id, "Customer deleted");
        Ok(existing)
    }

    pub async fn get_by_id(&self, cust_id: i64) -> AppResult<Customer> {
        self.repo
            .find_by_id(cust_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer not found: {cust_id}")))
    }

    pub async fn list(&self, limit: i64) -> AppResult<Vec<Customer>> {
        Ok(self.repo.list(limit).await?)
    }

    /// Exact-match filter with AND semantics; no filter returns everyone
    pub async fn search(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> AppResult<Vec<Customer>> {
        Ok(self.repo.search(email, city).await?)
    }
}
