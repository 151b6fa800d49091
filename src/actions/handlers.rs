//! HTTP handlers for the form actions

use super::{ActionOutcome, AuthActions, InvoiceActions};
use crate::core::error::DashboardError;
use crate::core::validation::FormPayload;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

/// Header carrying the message of a caught store fault on a redirect
pub const ACTION_MESSAGE_HEADER: HeaderName = HeaderName::from_static("x-action-message");

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect { location, message } => {
                let mut response = Redirect::to(location).into_response();
                if let Some(value) = message.and_then(|m| HeaderValue::from_str(&m).ok()) {
                    response.headers_mut().insert(ACTION_MESSAGE_HEADER, value);
                }
                response
            }
            ActionOutcome::Rejected(state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(state)).into_response()
            }
        }
    }
}

/// POST /dashboard/invoices/create
pub async fn create_invoice(
    State(actions): State<InvoiceActions>,
    form: FormPayload,
) -> ActionOutcome {
    actions.create_invoice(&form).await
}

/// POST /dashboard/invoices/{id}/edit
///
/// The path id is bound into the form, overriding any submitted `id`.
pub async fn update_invoice(
    State(actions): State<InvoiceActions>,
    Path(id): Path<String>,
    form: FormPayload,
) -> Result<ActionOutcome, DashboardError> {
    actions.update_invoice(&form.with("id", id)).await
}

/// POST /dashboard/invoices/{id}/delete
pub async fn delete_invoice(
    State(actions): State<InvoiceActions>,
    Path(id): Path<String>,
    form: FormPayload,
) -> Result<ActionOutcome, DashboardError> {
    actions.delete_invoice(&form.with("id", id)).await
}

/// POST /login
pub async fn authenticate(
    State(auth): State<AuthActions>,
    form: FormPayload,
) -> Result<ActionOutcome, DashboardError> {
    auth.authenticate(&form).await
}
