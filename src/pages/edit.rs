//! Edit-invoice page

use super::{PageState, Templates};
use crate::core::error::{DashboardError, PersistenceError};
use crate::core::model::{Customer, INVOICES_PATH, InvoiceForm, InvoiceStatus};
use crate::core::service::InvoiceQueries;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::Context;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// Everything the edit form is rendered from
#[derive(Debug, Clone, Serialize)]
pub struct EditInvoicePage {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub invoice: InvoiceForm,
    pub customers: Vec<Customer>,
}

impl EditInvoicePage {
    /// Fetch the invoice and the customer list concurrently.
    ///
    /// An absent invoice is [`DashboardError::NotFound`].
    pub async fn load(queries: &dyn InvoiceQueries, id: &str) -> Result<Self, DashboardError> {
        let (invoice, customers) =
            futures::try_join!(queries.fetch_invoice_by_id(id), queries.fetch_customers())
                .map_err(|e| PersistenceError::new("fetch", &e))?;

        let invoice = invoice.ok_or_else(|| DashboardError::not_found("invoice", id))?;

        Ok(Self {
            breadcrumbs: breadcrumbs(id),
            invoice,
            customers,
        })
    }

    /// URL the form posts to
    pub fn action(&self) -> String {
        edit_href(&self.invoice.id)
    }

    pub fn render(&self, templates: &Templates) -> Result<String, DashboardError> {
        let statuses: Vec<&str> = InvoiceStatus::ALL.iter().map(|s| s.as_str()).collect();

        let mut ctx = Context::new();
        ctx.insert("breadcrumbs", &self.breadcrumbs);
        ctx.insert("invoice", &self.invoice);
        ctx.insert("customers", &self.customers);
        ctx.insert("statuses", &statuses);
        ctx.insert("action", &self.action());
        ctx.insert("cancel_href", INVOICES_PATH);
        templates.render(Templates::EDIT_INVOICE, &ctx)
    }
}

fn edit_href(id: &str) -> String {
    format!("{}/{}/edit", INVOICES_PATH, id)
}

/// Invoices → Edit Invoice, with the edit page marked active
pub fn breadcrumbs(id: &str) -> Vec<Breadcrumb> {
    vec![
        Breadcrumb {
            label: "Invoices".to_string(),
            href: INVOICES_PATH.to_string(),
            active: false,
        },
        Breadcrumb {
            label: "Edit Invoice".to_string(),
            href: edit_href(id),
            active: true,
        },
    ]
}

/// GET /dashboard/invoices/{id}/edit
pub async fn edit_invoice_page(
    State(pages): State<PageState>,
    Path(id): Path<String>,
) -> Response {
    let rendered = match EditInvoicePage::load(pages.queries.as_ref(), &id).await {
        Ok(page) => page.render(&pages.templates),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(DashboardError::NotFound { entity_type, id }) => {
            tracing::debug!(%id, "edit page for missing invoice");
            pages.not_found(&entity_type)
        }
        Err(e) => e.into_response(),
    }
}
