//! Shared HTTP test suite for invoice store backends.
//!
//! Each backend test binary provides a factory producing a store that already
//! holds [`customers()`], then invokes [`invoice_http_tests!`]:
//!
//! ```text
//! axum_test::TestServer
//!     └─ Router (ServerBuilder::build)
//!         ├─ GET  /dashboard/invoices             → listing (cached)
//!         ├─ POST /dashboard/invoices/create      → create action
//!         ├─ GET  /dashboard/invoices/{id}/edit   → edit page
//!         ├─ POST /dashboard/invoices/{id}/edit   → update action
//!         └─ POST /dashboard/invoices/{id}/delete → delete action
//! ```

#![allow(dead_code)]

use invoices::prelude::*;

pub const DELBA_ID: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
pub const LEE_ID: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";

/// Customers every backend under test must hold
pub fn customers() -> Vec<Customer> {
    vec![
        Customer {
            id: DELBA_ID.to_string(),
            name: "Delba de Oliveira".to_string(),
            email: "delba@oliveira.com".to_string(),
            image_url: "/customers/delba-de-oliveira.png".to_string(),
        },
        Customer {
            id: LEE_ID.to_string(),
            name: "Lee Robinson".to_string(),
            email: "lee@robinson.com".to_string(),
            image_url: "/customers/lee-robinson.png".to_string(),
        },
    ]
}

/// Generate the HTTP test suite for a store backend.
///
/// `$store_factory` must produce an `impl InvoiceStore + 'static` holding the
/// harness customers.
#[macro_export]
macro_rules! invoice_http_tests {
    ($store_factory:expr) => {
        mod invoice_http_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use invoices::actions::handlers::ACTION_MESSAGE_HEADER;
            use invoices::config::AppConfig;
            use invoices::pages::listing::CACHE_STATUS_HEADER;
            use invoices::prelude::*;
            use std::sync::Arc;
            use store_harness::{DELBA_ID, LEE_ID};

            struct Harness {
                server: TestServer,
                queries: Arc<dyn InvoiceQueries>,
            }

            async fn make_harness(delete_enabled: bool) -> Harness {
                let store = Arc::new($store_factory);
                let queries: Arc<dyn InvoiceQueries> = store.clone();

                let mut config = AppConfig::default();
                config.actions.delete_enabled = delete_enabled;

                let router = ServerBuilder::new()
                    .with_shared_store(store)
                    .with_config(config)
                    .build()
                    .unwrap();

                Harness {
                    server: TestServer::new(router).unwrap(),
                    queries,
                }
            }

            /// Create one invoice through the action and return its id
            async fn create(h: &Harness, customer_id: &str, amount: &str, status: &str) -> String {
                let before: Vec<String> = h
                    .queries
                    .fetch_invoices()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|row| row.id)
                    .collect();

                h.server
                    .post("/dashboard/invoices/create")
                    .form(&[("customerId", customer_id), ("amount", amount), ("status", status)])
                    .await
                    .assert_status(StatusCode::SEE_OTHER);

                h.queries
                    .fetch_invoices()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|row| row.id)
                    .find(|id| !before.contains(id))
                    .expect("created invoice should be listed")
            }

            fn location(response: &axum_test::TestResponse) -> String {
                response
                    .headers()
                    .get("location")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }

            // ==============================================================
            // Create
            // ==============================================================

            #[tokio::test]
            async fn test_create_redirects_to_listing() {
                let h = make_harness(false).await;

                let response = h
                    .server
                    .post("/dashboard/invoices/create")
                    .form(&[("customerId", LEE_ID), ("amount", "49.99"), ("status", "paid")])
                    .await;

                response.assert_status(StatusCode::SEE_OTHER);
                assert_eq!(location(&response), INVOICES_PATH);
                assert!(response.headers().get(ACTION_MESSAGE_HEADER).is_none());
            }

            #[tokio::test]
            async fn test_create_stores_cents_and_today() {
                let h = make_harness(false).await;
                let id = create(&h, LEE_ID, "49.99", "paid").await;

                let rows = h.queries.fetch_invoices().await.unwrap();
                let row = rows.iter().find(|row| row.id == id).unwrap();
                assert_eq!(row.amount, 4999);
                assert_eq!(row.status, InvoiceStatus::Paid);
                assert_eq!(row.customer_id, LEE_ID);
                assert_eq!(row.name, "Lee Robinson");
                assert_eq!(row.date, chrono::Utc::now().date_naive());
            }

            #[tokio::test]
            async fn test_create_missing_fields_returns_form_state() {
                let h = make_harness(false).await;
                let before = h.queries.fetch_invoices().await.unwrap().len();

                let response = h
                    .server
                    .post("/dashboard/invoices/create")
                    .form(&[("amount", "")])
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: serde_json::Value = response.json();
                assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
                assert!(body["errors"]["customerId"].is_array());
                assert!(body["errors"]["amount"].is_array());
                assert!(body["errors"]["status"].is_array());

                assert_eq!(h.queries.fetch_invoices().await.unwrap().len(), before);
            }

            #[tokio::test]
            async fn test_create_rejects_non_positive_amount() {
                let h = make_harness(false).await;

                let response = h
                    .server
                    .post("/dashboard/invoices/create")
                    .form(&[("customerId", LEE_ID), ("amount", "0"), ("status", "pending")])
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: serde_json::Value = response.json();
                assert_eq!(body["errors"]["amount"][0], "Number must be greater than 0");
                assert!(body["errors"].get("customerId").is_none());
            }

            #[tokio::test]
            async fn test_create_rejects_unknown_status() {
                let h = make_harness(false).await;

                let response = h
                    .server
                    .post("/dashboard/invoices/create")
                    .form(&[("customerId", LEE_ID), ("amount", "10"), ("status", "overdue")])
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: serde_json::Value = response.json();
                assert_eq!(body["errors"]["status"][0], "Please select an invoice status.");
            }

            // ==============================================================
            // Listing cache
            // ==============================================================

            #[tokio::test]
            async fn test_listing_served_from_cache_until_action() {
                let h = make_harness(false).await;

                let first = h.server.get(INVOICES_PATH).await;
                first.assert_status_ok();
                assert_eq!(first.headers()[CACHE_STATUS_HEADER], "miss");

                let second = h.server.get(INVOICES_PATH).await;
                assert_eq!(second.headers()[CACHE_STATUS_HEADER], "hit");
                assert_eq!(first.text(), second.text());

                create(&h, DELBA_ID, "12.50", "pending").await;

                let third = h.server.get(INVOICES_PATH).await;
                assert_eq!(third.headers()[CACHE_STATUS_HEADER], "miss");
                assert!(third.text().contains("$12.50"));
            }

            // ==============================================================
            // Edit page
            // ==============================================================

            #[tokio::test]
            async fn test_edit_page_prefills_form() {
                let h = make_harness(false).await;
                let id = create(&h, DELBA_ID, "20", "paid").await;

                let response = h.server.get(&format!("/dashboard/invoices/{}/edit", id)).await;

                response.assert_status_ok();
                let html = response.text();
                assert!(html.contains("Edit Invoice"));
                assert!(html.contains(&format!("value=\"{}\" selected", DELBA_ID)));
                assert!(html.contains("value=\"paid\" checked"));
                assert!(html.contains("Lee Robinson"));
            }

            #[tokio::test]
            async fn test_edit_page_for_missing_invoice_is_404() {
                let h = make_harness(false).await;

                let response = h
                    .server
                    .get("/dashboard/invoices/2f1b6f0e-0000-4000-8000-000000000000/edit")
                    .await;

                response.assert_status(StatusCode::NOT_FOUND);
                let html = response.text();
                assert!(html.contains("404 Not Found"));
                assert!(!html.contains("<form"));
            }

            // ==============================================================
            // Update
            // ==============================================================

            #[tokio::test]
            async fn test_update_changes_fields_and_keeps_date() {
                let h = make_harness(false).await;
                let id = create(&h, DELBA_ID, "20", "pending").await;
                let rows = h.queries.fetch_invoices().await.unwrap();
                let date = rows.iter().find(|row| row.id == id).unwrap().date;

                let response = h
                    .server
                    .post(&format!("/dashboard/invoices/{}/edit", id))
                    .form(&[("customerId", LEE_ID), ("amount", "75.25"), ("status", "paid")])
                    .await;

                response.assert_status(StatusCode::SEE_OTHER);
                assert_eq!(location(&response), INVOICES_PATH);

                let form = h.queries.fetch_invoice_by_id(&id).await.unwrap().unwrap();
                assert_eq!(form.customer_id, LEE_ID);
                assert_eq!(form.amount, 75.25);
                assert_eq!(form.status, InvoiceStatus::Paid);

                let rows = h.queries.fetch_invoices().await.unwrap();
                assert_eq!(rows.iter().find(|row| row.id == id).unwrap().date, date);
            }

            #[tokio::test]
            async fn test_update_with_invalid_fields_is_rejected() {
                let h = make_harness(false).await;
                let id = create(&h, DELBA_ID, "20", "pending").await;

                let response = h
                    .server
                    .post(&format!("/dashboard/invoices/{}/edit", id))
                    .form(&[("customerId", ""), ("amount", "abc"), ("status", "paid")])
                    .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: serde_json::Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert!(body["details"]["errors"]["customerId"].is_array());
                assert!(body["details"]["errors"]["amount"].is_array());

                let form = h.queries.fetch_invoice_by_id(&id).await.unwrap().unwrap();
                assert_eq!(form.customer_id, DELBA_ID);
            }

            // ==============================================================
            // Delete
            // ==============================================================

            #[tokio::test]
            async fn test_delete_disabled_faults_and_keeps_invoice() {
                let h = make_harness(false).await;
                let id = create(&h, DELBA_ID, "20", "pending").await;

                let response = h
                    .server
                    .post(&format!("/dashboard/invoices/{}/delete", id))
                    .form(&[("id", id.as_str())])
                    .await;

                response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
                let body: serde_json::Value = response.json();
                assert_eq!(body["code"], "OPERATION_DISABLED");
                assert!(body["message"].as_str().unwrap().contains("Failed to Delete Invoice"));

                assert!(h.queries.fetch_invoice_by_id(&id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_delete_enabled_removes_only_that_invoice() {
                let h = make_harness(true).await;
                let keep = create(&h, DELBA_ID, "20", "pending").await;
                let gone = create(&h, LEE_ID, "30", "paid").await;

                let response = h
                    .server
                    .post(&format!("/dashboard/invoices/{}/delete", gone))
                    .form(&[("id", gone.as_str())])
                    .await;

                response.assert_status(StatusCode::SEE_OTHER);
                assert_eq!(location(&response), INVOICES_PATH);
                assert!(h.queries.fetch_invoice_by_id(&gone).await.unwrap().is_none());
                assert!(h.queries.fetch_invoice_by_id(&keep).await.unwrap().is_some());
            }

            // ==============================================================
            // Health
            // ==============================================================

            #[tokio::test]
            async fn test_health() {
                let h = make_harness(false).await;
                let response = h.server.get("/health").await;
                response.assert_status_ok();
                let body: serde_json::Value = response.json();
                assert_eq!(body["status"], "ok");
            }
        }
    };
}
