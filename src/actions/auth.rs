//! Sign-in form action

use super::{ActionOutcome, FormState};
use crate::core::error::{DashboardError, SignInError};
use crate::core::service::CredentialVerifier;
use crate::core::validation::FormPayload;
use std::sync::Arc;

/// Form state message for refused credentials
pub const CREDENTIAL_SIGNIN: &str = "CredentialSignin";

/// The authenticate action bound to its verifier
#[derive(Clone)]
pub struct AuthActions {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthActions {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    /// Sign in with every submitted field as the credentials.
    ///
    /// Refused credentials come back as a rejected form state carrying
    /// [`CREDENTIAL_SIGNIN`]. Any other verifier failure is returned as a
    /// fault.
    pub async fn authenticate(&self, form: &FormPayload) -> Result<ActionOutcome, DashboardError> {
        match self.verifier.sign_in(form).await {
            Ok(()) => {
                tracing::info!("signed in");
                Ok(ActionOutcome::to_listing(None))
            }
            Err(SignInError::CredentialsRejected) => {
                tracing::warn!("sign-in refused");
                Ok(ActionOutcome::Rejected(FormState {
                    errors: None,
                    message: Some(CREDENTIAL_SIGNIN.to_string()),
                }))
            }
            Err(SignInError::Provider(e)) => Err(DashboardError::SignIn(e)),
        }
    }
}
