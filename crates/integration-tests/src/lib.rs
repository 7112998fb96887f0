//! End-to-end tests for Maru Gallery.
//!
//! # Running Tests
//!
//! The tests in `tests/` exercise running servers and are ignored by
//! default. To run them:
//!
//! ```bash
//! # Start the database and both servers, then:
//! cargo run -p maru-cli -- migrate
//! cargo run -p maru-cli -- seed
//! cargo test -p maru-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `STOREFRONT_TEST_URL` - storefront base URL (default http://localhost:3000)
//! - `ADMIN_TEST_URL` - dashboard base URL (default http://localhost:3001)
//! - `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD` - admin credentials for
//!   the curation tests

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the dashboard API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_TEST_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store for session tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log into the dashboard with the configured admin credentials.
///
/// # Panics
///
/// Panics if credentials are missing or the login request fails.
pub async fn admin_client() -> Client {
    let email = std::env::var("ADMIN_TEST_EMAIL").expect("ADMIN_TEST_EMAIL must be set");
    let password = std::env::var("ADMIN_TEST_PASSWORD").expect("ADMIN_TEST_PASSWORD must be set");

    let client = client();
    let resp = client
        .post(format!("{}/api/auth/login", admin_base_url()))
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to reach the dashboard");
    assert!(
        resp.status().is_success(),
        "admin login failed: {}",
        resp.status()
    );

    client
}
