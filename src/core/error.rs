//! Typed error handling for the invoice dashboard
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed, missing or out-of-range form input
//! - [`PersistenceError`]: any fault raised by the invoice store
//! - [`ConfigError`]: configuration parsing and validation
//! - `NotFound`: an absent entity on a read path
//! - `Disabled`: an operation that is switched off and always faults
//! - [`SignInError`]: refused credentials, or a sign-in provider fault
//!
//! Persistence faults keep their internal detail for the logs only; the HTTP
//! body carries the generic user-facing message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;

/// Field name → ordered validation messages, fields in schema order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// The main error type of the dashboard
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store faults
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Entity absent on read
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Operation switched off; always faults
    #[error("{message}")]
    Disabled { operation: String, message: String },

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Sign-in provider fault other than refused credentials
    #[error("Sign-in failed: {0:#}")]
    SignIn(anyhow::Error),

    /// Template rendering failed
    #[error("Failed to render '{template}': {message}")]
    Render { template: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        DashboardError::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Disabled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::SignIn(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Persistence(_) => "DATABASE_ERROR",
            DashboardError::NotFound { .. } => "NOT_FOUND",
            DashboardError::Disabled { .. } => "OPERATION_DISABLED",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::SignIn(_) => "SIGN_IN_ERROR",
            DashboardError::Render { .. } => "RENDER_ERROR",
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            DashboardError::Persistence(e) => e.user_message(),
            DashboardError::Render { .. } => "Failed to render page.".to_string(),
            DashboardError::SignIn(_) => "Something went wrong.".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "errors": errors }))
            }
            DashboardError::NotFound { entity_type, id } => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id,
            })),
            DashboardError::Disabled { operation, .. } => {
                Some(serde_json::json!({ "operation": operation }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        match self.status_code() {
            status if status.is_server_error() => {
                tracing::error!(code = self.error_code(), error = %self, "request failed");
            }
            _ => {
                tracing::debug!(code = self.error_code(), error = %self, "request rejected");
            }
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// One or more fields failed their rules
    #[error("Invalid fields: {}", field_list(.0))]
    FieldErrors(FieldErrors),

    /// The request body could not be read as a form
    #[error("Malformed form payload: {0}")]
    MalformedPayload(String),
}

fn field_list(errors: &FieldErrors) -> String {
    errors.keys().cloned().collect::<Vec<_>>().join(", ")
}

impl ValidationError {
    /// Field errors carried by this error (empty for payload errors)
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ValidationError::FieldErrors(errors) => errors.clone(),
            ValidationError::MalformedPayload(_) => FieldErrors::new(),
        }
    }
}

// =============================================================================
// Persistence Errors
// =============================================================================

/// A store fault for one invoice operation
///
/// `message` holds the underlying fault and is only ever logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to {operation} invoice: {message}")]
pub struct PersistenceError {
    pub operation: &'static str,
    pub message: String,
}

impl PersistenceError {
    pub fn new(operation: &'static str, source: &anyhow::Error) -> Self {
        Self {
            operation,
            message: format!("{:#}", source),
        }
    }

    /// Generic message shown to the user
    pub fn user_message(&self) -> String {
        format!("Database Error: Failed to {} invoice.", self.operation)
    }
}

// =============================================================================
// Sign-in Errors
// =============================================================================

/// Outcome of a refused sign-in attempt
#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    /// The submitted credentials do not match an account
    #[error("CredentialsSignin")]
    CredentialsRejected,

    /// Anything else that went wrong while signing in
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    /// YAML did not parse into the configuration shape
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range or an environment override is malformed
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_errors() -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.insert(
            "amount".to_string(),
            vec!["Number must be greater than 0".to_string()],
        );
        errors.insert(
            "status".to_string(),
            vec!["Please select an invoice status.".to_string()],
        );
        errors
    }

    #[test]
    fn test_validation_error_display_lists_fields_in_order() {
        let err = ValidationError::FieldErrors(amount_errors());
        assert_eq!(err.to_string(), "Invalid fields: amount, status");
    }

    #[test]
    fn test_validation_error_returns_400() {
        let err = DashboardError::from(ValidationError::FieldErrors(amount_errors()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validation_error_details_carry_field_map() {
        let err = DashboardError::from(ValidationError::FieldErrors(amount_errors()));
        let response = err.to_response();
        let details = response.details.unwrap();
        assert_eq!(
            details["errors"]["amount"][0],
            "Number must be greater than 0"
        );
    }

    #[test]
    fn test_persistence_error_hides_internal_detail() {
        let source = anyhow::anyhow!("connection refused (os error 111)");
        let err = DashboardError::from(PersistenceError::new("create", &source));
        let response = err.to_response();
        assert_eq!(response.message, "Database Error: Failed to create invoice.");
        assert!(!response.message.contains("refused"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_persistence_error_keeps_detail_for_logs() {
        let source = anyhow::anyhow!("deadlock detected");
        let err = PersistenceError::new("update", &source);
        assert!(err.to_string().contains("deadlock detected"));
        assert_eq!(err.user_message(), "Database Error: Failed to update invoice.");
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = DashboardError::not_found("invoice", "abc");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "invoice with id 'abc' not found");
    }

    #[test]
    fn test_disabled_returns_500_with_message() {
        let err = DashboardError::Disabled {
            operation: "delete".to_string(),
            message: "Failed to Delete Invoice".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_response().message, "Failed to Delete Invoice");
        assert_eq!(err.error_code(), "OPERATION_DISABLED");
    }

    #[test]
    fn test_sign_in_fault_hides_provider_detail() {
        let err = DashboardError::SignIn(anyhow::anyhow!("identity provider timed out"));
        let response = err.to_response();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.code, "SIGN_IN_ERROR");
        assert_eq!(response.message, "Something went wrong.");
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_sign_in_error_from_anyhow_is_provider_fault() {
        let err: SignInError = anyhow::anyhow!("connection refused").into();
        assert!(matches!(err, SignInError::Provider(_)));
        assert_eq!(SignInError::CredentialsRejected.to_string(), "CredentialsSignin");
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = DashboardError::not_found("invoice", "x").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
