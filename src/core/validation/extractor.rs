//! Axum extractor for submitted forms
//!
//! [`FormPayload`] reads an `application/x-www-form-urlencoded` body into a
//! plain key/value map. Nothing is validated here: the action decides which
//! schema projection to apply and whether failures are data or faults.

use crate::core::error::{DashboardError, ValidationError};
use axum::Form;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;

/// Raw form submission, looked up by fixed key names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload(HashMap<String, String>);

impl FormPayload {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set a field, replacing any submitted value (used to bind path params)
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S> FromRequest<S> for FormPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<HashMap<String, String>>::from_request(req, state).await {
            Ok(Form(fields)) => Ok(FormPayload(fields)),
            Err(rejection) => Err(DashboardError::from(ValidationError::MalformedPayload(
                rejection.body_text(),
            ))
            .into_response()),
        }
    }
}
