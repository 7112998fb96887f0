//! HTTP middleware: sessions and staff auth extractors.

pub mod auth;
pub mod session;

pub use session::create_session_layer;
