//! Form actions for invoices, plus the sign-in action
//!
//! Each action extracts its fields from a [`FormPayload`], validates them with
//! the matching [`InvoiceSchema`] projection, runs one statement through the
//! [`InvoiceRepository`], revalidates the invoice listing and hands back an
//! [`ActionOutcome`]. The outcome is a value: producing it never transfers
//! control, so a caught store fault is logged and carried on the redirect
//! instead of being dropped by it.

pub mod auth;
pub mod handlers;

use crate::core::error::{DashboardError, FieldErrors, PersistenceError};
use crate::core::events::CacheInvalidator;
use crate::core::model::{INVOICES_PATH, InvoiceUpdate, NewInvoice, dollars_to_cents, today};
use crate::core::service::InvoiceRepository;
use crate::core::validation::{
    CreateInvoiceInput, DeleteInvoiceInput, FormPayload, InvoiceSchema, UpdateInvoiceInput,
};
use serde::Serialize;
use std::sync::Arc;

pub use auth::{AuthActions, CREDENTIAL_SIGNIN};
pub use handlers::{authenticate, create_invoice, delete_invoice, update_invoice};

/// Summary attached to a rejected create
pub const CREATE_REJECTED_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";

/// Fault raised by the delete action while it is disabled
pub const DELETE_DISABLED_MESSAGE: &str = "Failed to Delete Invoice";

/// State handed back to the form when an action does not redirect
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub message: Option<String>,
}

/// What the caller should do once an action has run
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Transfer control to `location`. `message` reports a caught store fault.
    Redirect {
        location: &'static str,
        message: Option<String>,
    },
    /// Input was refused; re-render the form with this state
    Rejected(FormState),
}

impl ActionOutcome {
    fn to_listing(message: Option<String>) -> Self {
        ActionOutcome::Redirect {
            location: INVOICES_PATH,
            message,
        }
    }

    fn rejected(errors: FieldErrors, message: &str) -> Self {
        ActionOutcome::Rejected(FormState {
            errors: Some(errors),
            message: Some(message.to_string()),
        })
    }
}

/// The create, update and delete actions bound to their collaborators
#[derive(Clone)]
pub struct InvoiceActions {
    repository: Arc<dyn InvoiceRepository>,
    invalidator: Arc<dyn CacheInvalidator>,
    delete_enabled: bool,
}

impl InvoiceActions {
    pub fn new(
        repository: Arc<dyn InvoiceRepository>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        Self {
            repository,
            invalidator,
            delete_enabled: false,
        }
    }

    /// Switch the delete action from its disabled state to a real delete
    pub fn with_delete_enabled(mut self, enabled: bool) -> Self {
        self.delete_enabled = enabled;
        self
    }

    pub fn delete_enabled(&self) -> bool {
        self.delete_enabled
    }

    /// Create an invoice from `customerId`, `amount` and `status`.
    ///
    /// Invalid input is returned as [`ActionOutcome::Rejected`] without
    /// touching the store. Once the insert has been attempted the listing is
    /// revalidated and the outcome is always a redirect, carrying the database
    /// error message if the insert failed.
    pub async fn create_invoice(&self, form: &FormPayload) -> ActionOutcome {
        let parsed = InvoiceSchema::create().safe_parse(form).and_then(|fields| {
            CreateInvoiceInput::try_from(&fields).map_err(|e| e.field_errors())
        });

        let input = match parsed {
            Ok(input) => input,
            Err(errors) => {
                tracing::warn!(fields = ?errors.keys().collect::<Vec<_>>(), "create invoice rejected");
                return ActionOutcome::rejected(errors, CREATE_REJECTED_MESSAGE);
            }
        };

        let invoice = NewInvoice {
            customer_id: input.customer_id,
            amount_in_cents: dollars_to_cents(input.amount),
            status: input.status,
            date: today(),
        };

        let message = match self.repository.insert(invoice).await {
            Ok(id) => {
                tracing::info!(invoice_id = %id, "invoice created");
                None
            }
            Err(e) => Some(self.persistence_failed("create", &e)),
        };

        self.invalidator.revalidate_path(INVOICES_PATH);
        ActionOutcome::to_listing(message)
    }

    /// Update customer, amount and status of the invoice named by `id`.
    ///
    /// Malformed input is a fault returned to the caller. The listing is only
    /// revalidated when the statement succeeds; the outcome is a redirect
    /// either way.
    pub async fn update_invoice(&self, form: &FormPayload) -> Result<ActionOutcome, DashboardError> {
        let fields = InvoiceSchema::update().parse(form)?;
        let input = UpdateInvoiceInput::try_from(&fields)?;

        let update = InvoiceUpdate {
            id: input.id,
            customer_id: input.customer_id,
            amount_in_cents: dollars_to_cents(input.amount),
            status: input.status,
        };
        let id = update.id.clone();

        let message = match self.repository.update(update).await {
            Ok(()) => {
                tracing::info!(invoice_id = %id, "invoice updated");
                self.invalidator.revalidate_path(INVOICES_PATH);
                None
            }
            Err(e) => Some(self.persistence_failed("update", &e)),
        };

        Ok(ActionOutcome::to_listing(message))
    }

    /// Delete the invoice named by `id`.
    ///
    /// While deletion is disabled this faults before validating anything and
    /// never reaches the store.
    pub async fn delete_invoice(&self, form: &FormPayload) -> Result<ActionOutcome, DashboardError> {
        if !self.delete_enabled {
            tracing::warn!("delete invoice called while disabled");
            return Err(DashboardError::Disabled {
                operation: "delete".to_string(),
                message: DELETE_DISABLED_MESSAGE.to_string(),
            });
        }

        let fields = InvoiceSchema::delete().parse(form)?;
        let DeleteInvoiceInput { id } = DeleteInvoiceInput::try_from(&fields)?;

        let message = match self.repository.delete(&id).await {
            Ok(()) => {
                tracing::info!(invoice_id = %id, "invoice deleted");
                self.invalidator.revalidate_path(INVOICES_PATH);
                None
            }
            Err(e) => Some(self.persistence_failed("delete", &e)),
        };

        Ok(ActionOutcome::to_listing(message))
    }

    fn persistence_failed(&self, operation: &'static str, source: &anyhow::Error) -> String {
        let err = PersistenceError::new(operation, source);
        tracing::error!(operation, error = %err.message, "invoice store fault");
        err.user_message()
    }
}
