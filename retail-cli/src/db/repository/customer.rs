//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, map_unique_violation};
use crate::db::models::{Customer, CustomerCreate, CustomerUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CUSTOMER_TABLE: &str = "customers";

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, data: CustomerCreate) -> RepoResult<Customer> {
        let cust_id = self.base.next_id(CUSTOMER_TABLE).await?;
        let email = data.email.clone();
        let customer = Customer {
            cust_id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            city: data.city,
        };

        let created: Option<Customer> = self
            .base
            .db()
            .create(CUSTOMER_TABLE)
            .content(customer)
            .await
            .map_err(|e| map_unique_violation(e, &format!("Email already exists: {email}")))?;

        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    pub async fn find_by_id(&self, cust_id: i64) -> RepoResult<Option<Customer>> {
        let rows: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customers WHERE cust_id = $cust_id LIMIT 1")
            .bind(("cust_id", cust_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let rows: Vec<Customer> = self
            .base
            .db()
            .query("SELECT * FROM customers WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn update(&self, cust_id: i64, data: CustomerUpdate) -> RepoResult<Option<Customer>> {
        let mut set_parts: Vec<&str> = Vec::new();

        if data.phone.is_some() {
            set_parts.push("phone = $phone");
        }
        if data.city.is_some() {
            set_parts.push("city = $city");
        }

        if set_parts.is_empty() {
            return self.find_by_id(cust_id).await;
        }

        let query_str = format!(
            "UPDATE {CUSTOMER_TABLE} SET {} WHERE cust_id = $cust_id RETURN AFTER",
            set_parts.join(", ")
        );

        let mut query = self.base.db().query(query_str).bind(("cust_id", cust_id));

        if let Some(v) = data.phone {
            query = query.bind(("phone", v));
        }
        if let Some(v) = data.city {
            query = query.bind(("city", v));
        }

        let rows: Vec<Customer> = query.await?.take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, cust_id: i64) -> RepoResult<Option<Customer>> {
        let rows: Vec<Customer> = self
            .base
            .db()
            .query("DELETE customers WHERE cust_id = $cust_id RETURN BEFORE")
            .bind(("cust_id", cust_id))
            .await?
            .take(0)?;
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self, limit: i64) -> RepoResult<Vec<Customer>> {
        let rows: Vec<Customer> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM {CUSTOMER_TABLE} ORDER BY cust_id ASC LIMIT {limit}"
            ))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Exact-match filter; both filters present means AND, neither means all
    pub async fn search(
        &self,
        email: Option<&str>,
        city: Option<&str>,
    ) -> RepoResult<Vec<Customer>> {
        let mut conditions: Vec<&str> = Vec::new();

        if email.is_some() {
            conditions.push("email = $email");
        }
        if city.is_some() {
            conditions.push("city = $city");
        }

        let query_str = if conditions.is_empty() {
            format!("SELECT * FROM {CUSTOMER_TABLE} ORDER BY cust_id ASC")
        } else {
            format!(
                "SELECT * FROM {CUSTOMER_TABLE} WHERE {} ORDER BY cust_id ASC",
                conditions.join(" AND ")
            )
        };

        let mut query = self.base.db().query(query_str);

        if let Some(v) = email {
            query = query.bind(("email", v.to_string()));
        }
        if let Some(v) = city {
            query = query.bind(("city", v.to_string()));
        }

        let rows: Vec<Customer> = query.await?.take(0)?;
        Ok(rows)
    }
}
