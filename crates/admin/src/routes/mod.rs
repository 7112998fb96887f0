//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (verifies database)
//!
//! # Auth
//! POST /api/auth/login              - Staff login (admin or approved partner)
//! POST /api/auth/logout             - Logout
//! GET  /api/auth/me                 - Current staff member
//!
//! # Dashboard
//! GET  /api/dashboard               - Moderation/work queue counts
//!
//! # Artworks (staff; partners see only their own)
//! GET    /api/artworks              - Management listing (filters + cursor)
//! POST   /api/artworks              - Create (enters moderation)
//! GET    /api/artworks/export       - Spreadsheet export (admin)
//! POST   /api/artworks/import       - Spreadsheet import (admin)
//! GET    /api/artworks/{id}         - Detail
//! PUT    /api/artworks/{id}         - Update (returns to moderation)
//! DELETE /api/artworks/{id}         - Delete
//! POST   /api/artworks/{id}/approve - Approve (admin, notifies owner)
//! POST   /api/artworks/{id}/reject  - Reject (admin, notifies owner)
//! POST   /api/artworks/{id}/curate  - Toggle curated flag (admin)
//! POST   /api/artworks/{id}/sold    - Set sold flag (admin)
//! POST   /api/artworks/featured     - Replace the featured set (admin)
//!
//! # Users (admin)
//! GET    /api/users                 - List (optional role filter)
//! POST   /api/users                 - Create staff/partner account
//! GET    /api/users/{id}            - Detail
//! POST   /api/users/{id}/approve    - Approve partner
//! POST   /api/users/{id}/reject     - Reject partner
//! POST   /api/users/{id}/role       - Change role
//! DELETE /api/users/{id}            - Delete
//! POST   /api/users/{id}/spotlight  - Spotlight this artist (unsets others)
//! POST   /api/users/spotlight/clear - Clear the spotlight
//! PUT    /api/profile               - Update own profile (staff)
//!
//! # Orders (admin)
//! GET  /api/orders                  - List (optional status filter)
//! GET  /api/orders/{id}             - Detail
//! POST /api/orders/{id}/status      - Set status (notifies purchaser)
//!
//! # Subscriptions (admin)
//! GET  /api/subscriptions           - List (optional status filter)
//! POST /api/subscriptions/{id}/activate - Activate (starts billing period)
//! POST /api/subscriptions/{id}/renew    - Advance billing period
//! POST /api/subscriptions/{id}/status   - Pause / cancel / expire
//!
//! # Inquiries (admin)
//! GET  /api/inquiries               - List (optional status filter)
//! POST /api/inquiries/{id}/status   - Set handling status
//!
//! # Notifications (staff)
//! GET  /api/notifications           - Own notifications
//! POST /api/notifications/{id}/read - Mark one read
//! POST /api/notifications/read-all  - Mark all read
//!
//! # Settings (admin)
//! GET    /api/settings              - All settings
//! PUT    /api/settings/{key}        - Set one key
//! DELETE /api/settings/{key}        - Delete one key
//!
//! # Images (staff)
//! POST   /api/images                - Upload (re-encoded to WebP)
//! DELETE /api/images                - Delete by stored path
//! ```

pub mod artworks;
pub mod auth;
pub mod dashboard;
pub mod images;
pub mod inquiries;
pub mod notifications;
pub mod orders;
pub mod settings;
pub mod subscriptions;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the artwork routes router.
pub fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(artworks::list).post(artworks::create))
        .route("/export", get(artworks::export))
        .route("/import", post(artworks::import))
        .route("/featured", post(artworks::set_featured))
        .route(
            "/{id}",
            get(artworks::show)
                .put(artworks::update)
                .delete(artworks::remove),
        )
        .route("/{id}/approve", post(artworks::approve))
        .route("/{id}/reject", post(artworks::reject))
        .route("/{id}/curate", post(artworks::curate))
        .route("/{id}/sold", post(artworks::set_sold))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/spotlight/clear", post(users::clear_spotlight))
        .route("/{id}", get(users::show).delete(users::remove))
        .route("/{id}/approve", post(users::approve))
        .route("/{id}/reject", post(users::reject))
        .route("/{id}/role", post(users::update_role))
        .route("/{id}/spotlight", post(users::spotlight))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::set_status))
}

/// Create the subscription routes router.
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(subscriptions::list))
        .route("/{id}/activate", post(subscriptions::activate))
        .route("/{id}/renew", post(subscriptions::renew))
        .route("/{id}/status", post(subscriptions::set_status))
}

/// Create the inquiry routes router.
pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::list))
        .route("/{id}/status", post(inquiries::set_status))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/read-all", post(notifications::mark_all_read))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::list))
        .route("/{key}", put(settings::set).delete(settings::remove))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/dashboard", get(dashboard::summary))
        .route("/api/profile", put(users::update_own_profile))
        .nest("/api/artworks", artwork_routes())
        .nest("/api/users", user_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/subscriptions", subscription_routes())
        .nest("/api/inquiries", inquiry_routes())
        .nest("/api/notifications", notification_routes())
        .nest("/api/settings", settings_routes())
        .route(
            "/api/images",
            post(images::upload).delete(images::remove),
        )
}
