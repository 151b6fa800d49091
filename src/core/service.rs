//! Service traits at the persistence boundary
//!
//! The dashboard never owns durable state. Writes go through
//! [`InvoiceRepository`], reads through [`InvoiceQueries`], and both are
//! implemented by each storage backend. Sign-in is delegated to a
//! [`CredentialVerifier`].

use crate::core::error::SignInError;
use crate::core::model::{Customer, InvoiceForm, InvoiceRow, InvoiceUpdate, NewInvoice};
use crate::core::validation::FormPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Single-statement writes against the invoices table
///
/// Every value is bound as a parameter by implementations; none is
/// interpolated into statement text.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice, returning the id assigned by the store
    async fn insert(&self, invoice: NewInvoice) -> Result<String>;

    /// Rewrite customer, amount and status of the invoice with `update.id`
    ///
    /// The stored date is left as it is.
    async fn update(&self, update: InvoiceUpdate) -> Result<()>;

    /// Delete the invoice with the given id
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Read-side data access used by the pages
#[async_trait]
pub trait InvoiceQueries: Send + Sync {
    /// Fetch the edit-form view of one invoice
    async fn fetch_invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>>;

    /// All customers, ordered by name
    async fn fetch_customers(&self) -> Result<Vec<Customer>>;

    /// All invoices joined with their customer, newest first
    async fn fetch_invoices(&self) -> Result<Vec<InvoiceRow>>;
}

/// Both sides of a backend, as held by the server state
pub trait InvoiceStore: InvoiceRepository + InvoiceQueries {}

impl<T: InvoiceRepository + InvoiceQueries> InvoiceStore for T {}

/// Checks submitted sign-in credentials
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Accept or refuse `credentials`, the submitted login form as-is
    ///
    /// Refused credentials are [`SignInError::CredentialsRejected`]; every
    /// other failure is a provider fault.
    async fn sign_in(&self, credentials: &FormPayload) -> std::result::Result<(), SignInError>;
}
