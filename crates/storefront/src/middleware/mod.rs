//! HTTP middleware: sessions, auth extractors, rate limiting, request IDs.

pub mod auth;
pub mod rate_limit;
pub mod request_id;
pub mod session;

pub use session::create_session_layer;
