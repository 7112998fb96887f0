//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (verifies database)
//!
//! # Gallery
//! GET  /api/home                   - Home highlights (spotlight/featured/curated)
//! GET  /api/settings               - Public site settings
//! GET  /api/artworks               - Gallery listing (filters + cursor pagination)
//! GET  /api/artworks/{id}          - Artwork detail
//! GET  /api/artists                - Artist partners
//! GET  /api/artists/{id}           - Artist profile with artworks
//!
//! # Editorial
//! GET  /api/journal                - Journal entries
//! GET  /api/journal/{slug}         - Journal entry detail
//! GET  /api/pages/{slug}           - Static page (visit, about, ...)
//!
//! # Inquiries (rate limited)
//! POST /api/inquiries              - Submit an inquiry
//!
//! # Auth (rate limited)
//! POST /api/auth/register          - Create a customer account
//! POST /api/auth/login             - Login
//! POST /api/auth/logout            - Logout
//!
//! # Account (requires auth)
//! GET  /api/account                        - Profile + unread notification count
//! GET  /api/account/orders                 - Order history
//! GET  /api/account/subscriptions          - Rental history
//! GET  /api/account/notifications          - Notifications
//! POST /api/account/notifications/{id}/read - Mark one notification read
//! POST /api/account/notifications/read-all  - Mark all notifications read
//!
//! # Wishlist (requires auth)
//! GET  /api/wishlist               - Wishlisted artworks
//! POST /api/wishlist/{id}/toggle   - Toggle wishlist membership
//!
//! # Purchase / rental (requires auth)
//! POST /api/orders                 - Create an order
//! POST /api/subscriptions          - Request an artwork rental
//! ```

pub mod account;
pub mod artists;
pub mod auth;
pub mod gallery;
pub mod home;
pub mod inquiries;
pub mod journal;
pub mod orders;
pub mod subscriptions;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route_layer(rate_limit::auth_rate_limiter())
}

/// Create the gallery routes router.
pub fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list))
        .route("/{id}", get(gallery::show))
}

/// Create the artist routes router.
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(artists::list))
        .route("/{id}", get(artists::show))
}

/// Create the journal routes router.
pub fn journal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(journal::list))
        .route("/{slug}", get(journal::show))
}

/// Create the inquiry routes router.
pub fn inquiry_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(inquiries::create))
        .route_layer(rate_limit::inquiry_rate_limiter())
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::list))
        .route("/{id}/toggle", post(wishlist::toggle))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::show))
        .route("/orders", get(orders::list_own))
        .route("/subscriptions", get(subscriptions::list_own))
        .route("/notifications", get(account::notifications))
        .route(
            "/notifications/{id}/read",
            post(account::mark_notification_read),
        )
        .route(
            "/notifications/read-all",
            post(account::mark_all_notifications_read),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/home", get(home::home))
        .route("/api/settings", get(home::site_settings))
        .nest("/api/artworks", gallery_routes())
        .nest("/api/artists", artist_routes())
        .nest("/api/journal", journal_routes())
        .route("/api/pages/{slug}", get(journal::page))
        .nest("/api/inquiries", inquiry_routes())
        .nest("/api/auth", auth_routes())
        .nest("/api/account", account_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/orders", post(orders::create))
        .route("/api/subscriptions", post(subscriptions::create))
}
