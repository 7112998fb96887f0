//! SMTP mailer for staff alerts.
//!
//! When SMTP is configured, new inquiries additionally produce a plain-text
//! email to the gallery desk. Delivery is best-effort; failures are logged
//! and never fail the triggering action.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::db::inquiries::Inquiry;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address in configuration.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
}

/// Mailer for transactional staff email.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    alert_to: Mailbox,
}

impl Mailer {
    /// Create a mailer from SMTP configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay cannot be constructed or an address is
    /// malformed.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailerError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        let from = parse_mailbox(&config.from_address)?;
        let alert_to = parse_mailbox(&config.alert_address)?;

        Ok(Self {
            transport,
            from,
            alert_to,
        })
    }

    /// Email the gallery desk about a new inquiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built or sent.
    pub async fn send_inquiry_alert(&self, inquiry: &Inquiry) -> Result<(), MailerError> {
        let subject = format!("[Maru] New {:?} inquiry from {}", inquiry.kind, inquiry.name);
        let artwork_line = inquiry
            .artwork_id
            .map_or(String::new(), |id| format!("Artwork: #{id}\n"));
        let body = format!(
            "Name: {}\nEmail: {}\nPhone: {}\n{}\n{}\n",
            inquiry.name,
            inquiry.email,
            inquiry.phone.as_deref().unwrap_or("-"),
            artwork_line,
            inquiry.message,
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.alert_to.clone())
            .subject(subject)
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Parse a configured address into a mailbox.
fn parse_mailbox(address: &str) -> Result<Mailbox, MailerError> {
    address
        .parse()
        .map_err(|_| MailerError::InvalidAddress(address.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mailbox() {
        assert!(parse_mailbox("desk@marugallery.kr").is_ok());
        assert!(parse_mailbox("Gallery Desk <desk@marugallery.kr>").is_ok());
        assert!(parse_mailbox("not an address").is_err());
    }
}
