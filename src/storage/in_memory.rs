//! In-memory invoice store for tests and local development

use crate::core::model::{
    Customer, Invoice, InvoiceForm, InvoiceRow, InvoiceStatus, InvoiceUpdate, NewInvoice,
};
use crate::core::service::{InvoiceQueries, InvoiceRepository};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory store implementing both the write and read side
///
/// Uses RwLock for thread-safe access. Writes behave like their SQL
/// counterparts: updating or deleting an unknown id affects nothing and is
/// not an error.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a handful of customers and invoices
    pub fn seeded() -> Self {
        let store = Self::new();
        let customers = [
            ("d6e15727-9fe1-4961-8c5b-ea44a9bd81aa", "Evil Rabbit", "evil@rabbit.com"),
            ("3958dc9e-712f-4377-85e9-fec4b6a6442a", "Delba de Oliveira", "delba@oliveira.com"),
            ("3958dc9e-742f-4377-85e9-fec4b6a6442a", "Lee Robinson", "lee@robinson.com"),
            ("76d65c26-f784-44a2-ac19-586678f7c2f2", "Michael Novotny", "michael@novotny.com"),
        ];
        for (id, name, email) in customers {
            store.add_customer(Customer {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                image_url: format!("/customers/{}.png", name.to_lowercase().replace(' ', "-")),
            });
        }

        let invoices = [
            (customers[0].0, 15795, InvoiceStatus::Pending, (2022, 12, 6)),
            (customers[1].0, 20348, InvoiceStatus::Pending, (2022, 11, 14)),
            (customers[3].0, 3040, InvoiceStatus::Paid, (2022, 10, 29)),
            (customers[2].0, 44800, InvoiceStatus::Paid, (2023, 9, 10)),
        ];
        for (customer_id, amount, status, (y, m, d)) in invoices {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                store.put_invoice(Invoice {
                    id: Uuid::new_v4().to_string(),
                    customer_id: customer_id.to_string(),
                    amount,
                    status,
                    date,
                });
            }
        }
        store
    }

    pub fn add_customer(&self, customer: Customer) {
        self.customers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(customer);
    }

    /// Insert or replace a complete invoice row
    pub fn put_invoice(&self, invoice: Invoice) {
        self.invoices
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(invoice.id.clone(), invoice);
    }

    pub fn get(&self, id: &str) -> Option<Invoice> {
        self.invoices
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.invoices
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = Uuid::new_v4().to_string();
        invoices.insert(
            id.clone(),
            Invoice {
                id: id.clone(),
                customer_id: invoice.customer_id,
                amount: invoice.amount_in_cents,
                status: invoice.status,
                date: invoice.date,
            },
        );

        Ok(id)
    }

    async fn update(&self, update: InvoiceUpdate) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if let Some(invoice) = invoices.get_mut(&update.id) {
            invoice.customer_id = update.customer_id;
            invoice.amount = update.amount_in_cents;
            invoice.status = update.status;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        invoices.remove(id);

        Ok(())
    }
}

#[async_trait]
impl InvoiceQueries for InMemoryInvoiceStore {
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).map(InvoiceForm::from))
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        let customers = self
            .customers
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut customers = customers.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRow>> {
        let customers: HashMap<String, Customer> = self
            .fetch_customers()
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        // Inner join: invoices whose customer is unknown are not listed
        let mut rows: Vec<InvoiceRow> = invoices
            .values()
            .filter_map(|invoice| {
                customers.get(&invoice.customer_id).map(|customer| InvoiceRow {
                    id: invoice.id.clone(),
                    customer_id: invoice.customer_id.clone(),
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    amount: invoice.amount,
                    status: invoice.status,
                    date: invoice.date,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        Ok(rows)
    }
}
