//! Application state shared by every route
//!
//! `AppState` holds the write side ([`InvoiceActions`]), the read side
//! ([`PageState`]) and sign-in ([`AuthActions`]). Handlers extract only the
//! part they need through `FromRef`.

use crate::actions::{AuthActions, InvoiceActions};
use crate::core::events::{CacheInvalidator, EventBus};
use crate::core::service::{CredentialVerifier, InvoiceQueries, InvoiceRepository};
use crate::pages::{PageCache, PageState, Templates};
use crate::storage::ConfiguredCredentials;
use anyhow::Result;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub actions: InvoiceActions,
    pub pages: PageState,
    pub auth: AuthActions,
}

impl AppState {
    /// Wire the actions and pages to one page cache
    ///
    /// The actions revalidate through the same cache the pages read from, so
    /// a mutation evicts the listing before the redirect is answered. Sign-in
    /// starts with no accounts; see [`with_credential_verifier`](Self::with_credential_verifier).
    pub fn from_components(
        repository: Arc<dyn InvoiceRepository>,
        queries: Arc<dyn InvoiceQueries>,
        event_bus: Option<EventBus>,
        delete_enabled: bool,
    ) -> Result<Self> {
        let cache = match event_bus {
            Some(bus) => PageCache::new().with_event_bus(bus),
            None => PageCache::new(),
        };
        let cache = Arc::new(cache);
        let invalidator: Arc<dyn CacheInvalidator> = cache.clone();

        let pages = PageState {
            queries,
            templates: Arc::new(Templates::new()?),
            cache,
        };
        let actions =
            InvoiceActions::new(repository, invalidator).with_delete_enabled(delete_enabled);

        let auth = AuthActions::new(Arc::new(ConfiguredCredentials::new()));

        Ok(Self {
            actions,
            pages,
            auth,
        })
    }

    pub fn with_credential_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.auth = AuthActions::new(verifier);
        self
    }

    pub fn event_bus(&self) -> Option<&EventBus> {
        self.pages.cache.event_bus()
    }
}
