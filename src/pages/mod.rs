//! Server-rendered pages of the invoices section

pub mod cache;
pub mod edit;
pub mod listing;
pub mod templates;

pub use cache::{CacheStamp, PageCache};
pub use edit::{Breadcrumb, EditInvoicePage, edit_invoice_page};
pub use listing::{InvoicesPage, invoices_page};
pub use templates::Templates;

use crate::core::model::INVOICES_PATH;
use crate::core::service::InvoiceQueries;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tera::Context;

/// Read-side state shared by the page handlers
#[derive(Clone)]
pub struct PageState {
    pub queries: Arc<dyn InvoiceQueries>,
    pub templates: Arc<Templates>,
    pub cache: Arc<PageCache>,
}

impl PageState {
    /// 404 page for an absent `entity`
    pub fn not_found(&self, entity: &str) -> Response {
        let mut ctx = Context::new();
        ctx.insert("entity", entity);
        ctx.insert("back_href", INVOICES_PATH);

        match self.templates.render(Templates::NOT_FOUND, &ctx) {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => e.into_response(),
        }
    }
}
