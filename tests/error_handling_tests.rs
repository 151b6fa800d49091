//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses never leak store internals
//! - Error conversions work correctly

use axum::http::StatusCode;
use axum::response::IntoResponse;
use invoices::core::error::ConfigError;
use invoices::prelude::*;

fn field_errors(field: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.to_string()]);
    errors
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_field_errors_return_400() {
        let err = DashboardError::from(ValidationError::FieldErrors(field_errors(
            "amount",
            "Number must be greater than 0",
        )));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_malformed_payload_returns_400() {
        let err = DashboardError::from(ValidationError::MalformedPayload("bad body".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_returns_404() {
        let err = DashboardError::not_found("invoice", "abc");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_persistence_returns_500() {
        let err = DashboardError::from(PersistenceError::new(
            "update",
            &anyhow::anyhow!("connection reset"),
        ));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_disabled_returns_500() {
        let err = DashboardError::Disabled {
            operation: "delete".to_string(),
            message: "Failed to Delete Invoice".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_uses_status_code() {
        let response = DashboardError::not_found("invoice", "abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_persistence_message_is_generic() {
        let err = DashboardError::from(PersistenceError::new(
            "create",
            &anyhow::anyhow!("duplicate key value violates unique constraint"),
        ));
        let body = err.to_response();

        assert_eq!(body.code, "DATABASE_ERROR");
        assert_eq!(body.message, "Database Error: Failed to create invoice.");
        assert!(!body.message.contains("duplicate key"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_field_errors_are_in_details() {
        let err = DashboardError::from(ValidationError::FieldErrors(field_errors(
            "customerId",
            "Customer ID expected.",
        )));
        let body = err.to_response();

        assert_eq!(body.code, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["errors"]["customerId"][0], "Customer ID expected.");
    }

    #[test]
    fn test_not_found_details_name_the_entity() {
        let body = DashboardError::not_found("invoice", "abc").to_response();
        let details = body.details.unwrap();
        assert_eq!(details["entity_type"], "invoice");
        assert_eq!(details["id"], "abc");
    }

    #[test]
    fn test_disabled_message_is_shown() {
        let body = DashboardError::Disabled {
            operation: "delete".to_string(),
            message: "Failed to Delete Invoice".to_string(),
        }
        .to_response();
        assert_eq!(body.code, "OPERATION_DISABLED");
        assert_eq!(body.message, "Failed to Delete Invoice");
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: DashboardError = ConfigError::Parse("bad yaml".to_string()).into();
        assert!(matches!(err, DashboardError::Config(_)));
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_question_mark_propagates_validation() {
        fn parse() -> Result<(), DashboardError> {
            Err(ValidationError::MalformedPayload("truncated".to_string()))?
        }
        assert!(matches!(parse(), Err(DashboardError::Validation(_))));
    }

    #[test]
    fn test_dashboard_error_into_anyhow() {
        let err: anyhow::Error = DashboardError::not_found("invoice", "abc").into();
        assert!(err.to_string().contains("abc"));
    }
}
