//! # Invoice Dashboard
//!
//! Server-side form actions and pages for the invoices section of a billing
//! dashboard.
//!
//! ## Features
//!
//! - **Schema Validation**: one canonical invoice schema with create, update
//!   and delete projections, collecting every field error at once
//! - **Form Actions**: create, update and delete return an [`ActionOutcome`]
//!   value; the HTTP layer turns it into a redirect or a 422 form state
//! - **Cache Revalidation**: mutations evict the rendered invoice listing and
//!   broadcast a [`CacheEvent`](core::events::CacheEvent)
//! - **Edit Page**: breadcrumbs plus a pre-filled form, or a 404 page when the
//!   invoice is absent
//! - **Sign-in**: `POST /login` checks credentials through a
//!   [`CredentialVerifier`](core::service::CredentialVerifier) and answers
//!   `CredentialSignin` when they are refused
//! - **Pluggable Storage**: in-memory store by default, PostgreSQL behind the
//!   `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryInvoiceStore::seeded())
//!         .with_config(AppConfig::load(None)?)
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```
//!
//! [`ActionOutcome`]: actions::ActionOutcome

pub mod actions;
pub mod config;
pub mod core;
pub mod pages;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CacheEvent, CacheInvalidator, CredentialVerifier, Customer, DashboardError, EventBus,
        FieldErrors, INVOICES_PATH, Invoice, InvoiceForm, InvoiceQueries, InvoiceRepository,
        InvoiceRow, InvoiceStatus, InvoiceStore, PersistenceError, SignInError, ValidationError,
    };
    pub use crate::core::validation::{FormPayload, InvoiceSchema};

    // === Actions ===
    pub use crate::actions::{ActionOutcome, AuthActions, FormState, InvoiceActions};

    // === Pages ===
    pub use crate::pages::{EditInvoicePage, PageCache, PageState, Templates};

    // === Storage ===
    pub use crate::storage::{ConfiguredCredentials, InMemoryInvoiceStore};
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
