//! Core module containing the domain types, traits and validation

pub mod error;
pub mod events;
pub mod model;
pub mod service;
pub mod validation;

pub use error::{DashboardError, FieldErrors, PersistenceError, SignInError, ValidationError};
pub use events::{CacheEvent, CacheInvalidator, EventBus};
pub use model::{
    Customer, INVOICES_PATH, Invoice, InvoiceForm, InvoiceRow, InvoiceStatus, MAX_AMOUNT,
};
pub use service::{CredentialVerifier, InvoiceQueries, InvoiceRepository, InvoiceStore};
