//! Credential verifier backed by the configured account list

use crate::config::AuthConfig;
use crate::core::error::SignInError;
use crate::core::service::CredentialVerifier;
use crate::core::validation::FormPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Hex SHA-256 digest of a password, as stored in `auth.users`
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Accounts keyed by email, each holding a password digest
///
/// The default value holds no accounts and refuses everyone.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredCredentials {
    accounts: HashMap<String, [u8; 32]>,
}

impl ConfiguredCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let mut credentials = Self::new();
        for user in &config.users {
            let bytes = hex::decode(&user.password_sha256)
                .with_context(|| format!("password digest of '{}' is not hex", user.email))?;
            let digest: [u8; 32] = bytes.try_into().map_err(|_| {
                anyhow::anyhow!("password digest of '{}' is not 32 bytes", user.email)
            })?;
            credentials.accounts.insert(user.email.clone(), digest);
        }
        Ok(credentials)
    }

    /// Add an account from its clear-text password
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        self.accounts
            .insert(email.to_string(), Sha256::digest(password.as_bytes()).into());
        self
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for ConfiguredCredentials {
    async fn sign_in(&self, credentials: &FormPayload) -> Result<(), SignInError> {
        let (Some(email), Some(password)) = (credentials.get("email"), credentials.get("password"))
        else {
            return Err(SignInError::CredentialsRejected);
        };

        let expected = self
            .accounts
            .get(email)
            .ok_or(SignInError::CredentialsRejected)?;
        let actual: [u8; 32] = Sha256::digest(password.as_bytes()).into();

        if &actual == expected {
            Ok(())
        } else {
            Err(SignInError::CredentialsRejected)
        }
    }
}
