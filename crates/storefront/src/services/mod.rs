//! Service layer: authentication and outbound email.

pub mod auth;
pub mod mailer;
