//! Route table of the invoices section

use super::host::AppState;
use crate::actions::{authenticate, create_invoice, delete_invoice, update_invoice};
use crate::core::model::INVOICES_PATH;
use crate::pages::{edit_invoice_page, invoices_page};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Build the dashboard routes
///
/// - GET  /health - Liveness check
/// - GET  /dashboard/invoices - Invoice listing (cached)
/// - POST /dashboard/invoices/create - Create action
/// - GET  /dashboard/invoices/{id}/edit - Edit page
/// - POST /dashboard/invoices/{id}/edit - Update action
/// - POST /dashboard/invoices/{id}/delete - Delete action
/// - POST /login - Sign-in action
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(INVOICES_PATH, get(invoices_page))
        .route("/dashboard/invoices/create", post(create_invoice))
        .route(
            "/dashboard/invoices/{id}/edit",
            get(edit_invoice_page).post(update_invoice),
        )
        .route("/dashboard/invoices/{id}/delete", post(delete_invoice))
        .route("/login", post(authenticate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-dashboard"
    }))
}
