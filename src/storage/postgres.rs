//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresInvoiceStore`, implementing both [`InvoiceRepository`]
//! and [`InvoiceQueries`] over a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag.
//!
//! # Schema
//!
//! ```text
//! customers (id UUID PK, name, email, image_url)
//! invoices  (id UUID PK, customer_id UUID, amount BIGINT cents, status, date DATE)
//! ```
//!
//! Ids cross the API as strings. Every value is bound as a statement
//! parameter; text ids are cast with `::uuid` inside the statement.

use crate::core::model::{
    Customer, InvoiceForm, InvoiceRow, InvoiceStatus, InvoiceUpdate, NewInvoice, cents_to_dollars,
};
use crate::core::service::{InvoiceQueries, InvoiceRepository};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS customers (
            id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            image_url VARCHAR(255) NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create customers table: {}", e))?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
            customer_id UUID NOT NULL,
            amount BIGINT NOT NULL,
            status VARCHAR(255) NOT NULL,
            date DATE NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create invoices table: {}", e))?;

    Ok(())
}

/// Connect a pool with at most `max_connections` connections
pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .context("Failed to connect to PostgreSQL")
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn parse_status(raw: &str) -> Result<InvoiceStatus> {
    raw.parse().map_err(|e: String| anyhow!(e))
}

// ---------------------------------------------------------------------------
// PostgresInvoiceStore
// ---------------------------------------------------------------------------

/// Invoice store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let pool = invoices::storage::postgres::connect("postgres://localhost/dashboard", 5).await?;
/// invoices::storage::postgres::ensure_schema(&pool).await?;
/// let store = PostgresInvoiceStore::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct PostgresInvoiceStore {
    pool: PgPool,
}

impl PostgresInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a customer, keeping its id. Customers are owned elsewhere; this
    /// exists for seeding and tests.
    pub async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            "INSERT INTO customers (id, name, email, image_url)
             VALUES ($1::uuid, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert customer: {}", e))?;
        Ok(())
    }

    /// Stored date of an invoice
    pub async fn invoice_date(&self, id: &str) -> Result<Option<NaiveDate>> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let date: Option<NaiveDate> = sqlx::query_scalar("SELECT date FROM invoices WHERE id = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to fetch invoice date: {}", e))?;
        Ok(date)
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String> {
        let id: String = sqlx::query_scalar(
            "INSERT INTO invoices (customer_id, amount, status, date)
             VALUES ($1::uuid, $2, $3, $4)
             RETURNING id::text",
        )
        .bind(&invoice.customer_id)
        .bind(invoice.amount_in_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to insert invoice: {}", e))?;

        Ok(id)
    }

    async fn update(&self, update: InvoiceUpdate) -> Result<()> {
        sqlx::query(
            "UPDATE invoices
             SET customer_id = $1::uuid, amount = $2, status = $3
             WHERE id = $4::uuid",
        )
        .bind(&update.customer_id)
        .bind(update.amount_in_cents)
        .bind(update.status.as_str())
        .bind(&update.id)
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to update invoice: {}", e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM invoices WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to delete invoice: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl InvoiceQueries for PostgresInvoiceStore {
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>> {
        // A malformed id cannot name a row
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row: Option<(String, String, i64, String)> = sqlx::query_as(
            "SELECT id::text, customer_id::text, amount, status
             FROM invoices
             WHERE id = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch invoice: {}", e))?;

        row.map(|(id, customer_id, amount, status)| {
            Ok(InvoiceForm {
                id,
                customer_id,
                amount: cents_to_dollars(amount),
                status: parse_status(&status)?,
            })
        })
        .transpose()
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT id::text, name, email, image_url
             FROM customers
             ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch customers: {}", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, name, email, image_url)| Customer {
                id,
                name,
                email,
                image_url,
            })
            .collect())
    }

    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRow>> {
        let rows: Vec<(String, String, String, String, i64, String, NaiveDate)> = sqlx::query_as(
            "SELECT invoices.id::text, invoices.customer_id::text, customers.name,
                    customers.email, invoices.amount, invoices.status, invoices.date
             FROM invoices
             JOIN customers ON invoices.customer_id = customers.id
             ORDER BY invoices.date DESC, invoices.id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to fetch invoices: {}", e))?;

        rows.into_iter()
            .map(|(id, customer_id, name, email, amount, status, date)| {
                Ok(InvoiceRow {
                    id,
                    customer_id,
                    name,
                    email,
                    amount,
                    status: parse_status(&status)?,
                    date,
                })
            })
            .collect()
    }
}
