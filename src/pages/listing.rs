//! Invoice listing page, served from the page cache

use super::{PageState, Templates};
use crate::core::error::{DashboardError, PersistenceError};
use crate::core::model::{INVOICES_PATH, InvoiceRow};
use crate::core::service::InvoiceQueries;
use axum::extract::State;
use axum::http::HeaderName;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::Context;

/// `hit` when the page came from the cache, `miss` when it was rendered
pub const CACHE_STATUS_HEADER: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Clone, Serialize)]
struct ListingRow {
    #[serde(flatten)]
    row: InvoiceRow,
    amount_display: String,
}

/// All invoices, newest first
#[derive(Debug, Clone, Serialize)]
pub struct InvoicesPage {
    rows: Vec<ListingRow>,
}

impl InvoicesPage {
    pub async fn load(queries: &dyn InvoiceQueries) -> Result<Self, DashboardError> {
        let rows = queries
            .fetch_invoices()
            .await
            .map_err(|e| PersistenceError::new("fetch", &e))?;

        Ok(Self {
            rows: rows
                .into_iter()
                .map(|row| ListingRow {
                    amount_display: format_currency(row.amount),
                    row,
                })
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, templates: &Templates) -> Result<String, DashboardError> {
        let mut ctx = Context::new();
        ctx.insert("rows", &self.rows);
        templates.render(Templates::INVOICE_LIST, &ctx)
    }
}

/// `12345` cents → `$123.45`
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

/// GET /dashboard/invoices
pub async fn invoices_page(State(pages): State<PageState>) -> Response {
    if let Some(html) = pages.cache.get(INVOICES_PATH) {
        return ([(CACHE_STATUS_HEADER, "hit")], Html(html)).into_response();
    }

    let stamp = pages.cache.stamp(INVOICES_PATH);
    let rendered = match InvoicesPage::load(pages.queries.as_ref()).await {
        Ok(page) => page.render(&pages.templates),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(html) => {
            pages.cache.store(INVOICES_PATH, html.clone(), stamp);
            ([(CACHE_STATUS_HEADER, "miss")], Html(html)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(4999), "$49.99");
        assert_eq!(format_currency(100), "$1.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(-250), "-$2.50");
    }
}
