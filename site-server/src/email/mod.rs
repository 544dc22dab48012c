//! Contact Email Client
//!
//! Thin wrapper around an async SMTP transport. When no SMTP host is
//! configured the client runs disabled: submissions are accepted and
//! logged, never sent, so local development needs no mail server.

use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::SmtpConfig;
use crate::utils::{AppError, AppResult};

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Trim every field and lowercase the email before forwarding.
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

pub struct EmailClient {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    sender: String,
    recipient: String,
}

impl EmailClient {
    /// Build from config; missing host means disabled mode.
    pub fn from_config(config: &SmtpConfig) -> Self {
        let Some(host) = config.host.as_deref() else {
            info!(target: "email", "SMTP_HOST not set, email client disabled");
            return Self::disabled();
        };

        let transport = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
            Ok(builder) => {
                let mut builder = builder.port(config.port);
                if let (Some(user), Some(password)) = (&config.user, &config.password) {
                    builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
                }
                Some(builder.build())
            }
            Err(e) => {
                warn!(target: "email", error = %e, "Invalid SMTP host, email client disabled");
                None
            }
        };

        Self {
            transport,
            sender: config
                .sender
                .clone()
                .unwrap_or_else(|| "no-reply@example.com".to_string()),
            recipient: config.recipient.clone(),
        }
    }

    /// Disabled client: accepts and logs, sends nothing.
    pub fn disabled() -> Self {
        Self {
            transport: None,
            sender: "no-reply@example.com".to_string(),
            recipient: "info@example.com".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Forward a contact form submission to the configured recipient.
    /// Reply-To is set to the customer so staff can answer directly.
    pub async fn send_contact(&self, contact: &ContactMessage) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            info!(
                target: "email",
                from = %contact.email,
                subject = %contact.subject,
                "Email disabled, contact message logged only"
            );
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| AppError::internal(format!("Invalid sender address: {e}")))?,
            )
            .reply_to(
                contact
                    .email
                    .parse()
                    .map_err(|e| AppError::validation(format!("Invalid email address: {e}")))?,
            )
            .to(self
                .recipient
                .parse()
                .map_err(|e| AppError::internal(format!("Invalid recipient address: {e}")))?)
            .subject(format!("Contact Form: {}", contact.subject))
            .multipart(MultiPart::alternative_plain_html(
                plain_body(contact),
                html_body(contact),
            ))
            .map_err(|e| AppError::internal(format!("Failed to build email: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("Failed to send email: {e}")))?;

        info!(target: "email", from = %contact.email, "Contact email sent");
        Ok(())
    }
}

fn plain_body(contact: &ContactMessage) -> String {
    format!(
        "New contact form submission\n\nName: {}\nEmail: {}\nSubject: {}\n\n{}\n",
        contact.full_name, contact.email, contact.subject, contact.message
    )
}

fn html_body(contact: &ContactMessage) -> String {
    format!(
        "<h2>New contact form submission</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <hr><p>{}</p>",
        escape_html(&contact.full_name),
        escape_html(&contact.email),
        escape_html(&contact.subject),
        escape_html(&contact.message)
    )
}

/// Form fields end up inside markup; neutralize anything HTML-active.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
