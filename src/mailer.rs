//! Outbound email dispatch
//!
//! The [`Mailer`] trait is the narrow seam to mail transport; the bundled
//! implementation sends over async SMTP. Delivery is awaited but never rolls
//! back state already committed by the caller.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// An outbound email.
#[derive(Debug, Clone)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: Option<String>,
}

/// Email transport abstraction.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<(), MailerError>;
}

/// SMTP mailer running on the tokio executor.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>) -> Self {
        Self { transport }
    }

    pub fn builder(hostname: &str) -> SmtpMailerBuilder {
        SmtpMailerBuilder {
            hostname: hostname.to_string(),
            port: None,
            credentials: None,
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_email(&self, email: Email) -> Result<(), MailerError> {
        let message = build_message(email)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

pub struct SmtpMailerBuilder {
    hostname: String,
    port: Option<u16>,
    credentials: Option<Credentials>,
}

impl SmtpMailerBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username.to_string(), password.to_string()));
        self
    }

    /// Build a STARTTLS relay transport.
    pub fn build(self) -> Result<SmtpMailer, MailerError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.hostname)?;

        if let Some(port) = self.port {
            builder = builder.port(port);
        }

        if let Some(credentials) = self.credentials {
            builder = builder.credentials(credentials);
        }

        Ok(SmtpMailer::new(builder.build()))
    }
}

fn build_message(email: Email) -> Result<Message, MailerError> {
    let builder = Message::builder()
        .from(email.from.parse()?)
        .to(email.to.parse()?)
        .subject(email.subject);

    let message = if let Some(text) = email.text_body {
        builder.multipart(
            MultiPart::alternative()
                .singlepart(SinglePart::plain(text))
                .singlepart(SinglePart::html(email.html_body)),
        )?
    } else {
        builder.singlepart(SinglePart::html(email.html_body))?
    };

    Ok(message)
}

/// The password-reset email sent by the forgot-password flow.
pub struct PasswordResetEmail;

impl PasswordResetEmail {
    pub fn build(from: &str, to: &str, reset_link: &str) -> Email {
        let html_body = format!(
            "<h2>Password Reset Request</h2>\n\
             <p>Click the link below to reset your password:</p>\n\
             <a href=\"{reset_link}\" target=\"_blank\">{reset_link}</a>\n\
             <p>If you didn't request this, please ignore this email.</p>"
        );
        let text_body = format!(
            "Password reset requested. Open this link to choose a new password: {reset_link}\n\
             If you didn't request this, please ignore this email."
        );

        Email {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Reset Password Link".to_string(),
            html_body,
            text_body: Some(text_body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_message() {
        let email = Email {
            from: "noreply@example.com".to_string(),
            to: "jane@x.com".to_string(),
            subject: "Test Subject".to_string(),
            html_body: "<h1>Hello</h1>".to_string(),
            text_body: Some("Hello".to_string()),
        };

        assert!(build_message(email).is_ok());
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let email = Email {
            from: "not an address".to_string(),
            to: "jane@x.com".to_string(),
            subject: "Test Subject".to_string(),
            html_body: "<h1>Hello</h1>".to_string(),
            text_body: None,
        };

        assert!(matches!(
            build_message(email),
            Err(MailerError::Address(_))
        ));
    }

    #[test]
    fn test_password_reset_email_contains_link() {
        let email = PasswordResetEmail::build(
            "noreply@example.com",
            "jane@x.com",
            "https://app.example.com/reset/tok123",
        );

        assert_eq!(email.subject, "Reset Password Link");
        assert!(email.html_body.contains("https://app.example.com/reset/tok123"));
        assert!(email.text_body.unwrap().contains("/reset/tok123"));
    }

    #[tokio::test]
    async fn test_smtp_builder() {
        let mailer = SmtpMailer::builder("smtp.example.com")
            .port(587)
            .credentials("noreply@example.com", "password")
            .build();

        assert!(mailer.is_ok());
    }
}
