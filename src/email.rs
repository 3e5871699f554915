//! Email notifications using lettre

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use tracing::info;

use crate::config::EmailConfig;

/// SMTP wrapper for the contact-form notifications
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
    admin_email: String,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_email,
                "Email service initialized with authentication and TLS"
            );
            // SmtpTransport::relay() uses STARTTLS by default, appropriate
            // for most SMTP servers on port 587
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_email.clone(),
            admin_email: config.admin_email.clone(),
            skip_sending: false,
        })
    }

    /// Create a mock email service for testing (skips actual SMTP)
    pub fn new_mock(config: &EmailConfig) -> Self {
        let mailer = SmtpTransport::builder_dangerous("localhost")
            .port(1025)
            .build();

        Self {
            mailer,
            from: config.from_email.clone(),
            admin_email: config.admin_email.clone(),
            skip_sending: true,
        }
    }

    fn send(&self, to: &str, subject: &str, body: String) -> anyhow::Result<()> {
        if self.skip_sending {
            info!(to = %to, subject = %subject, "Skipping email send (mock mode)");
            return Ok(());
        }

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.mailer.send(&message)?;
        Ok(())
    }

    /// Notify the admin of a new contact message and confirm receipt to
    /// the sender. Failures are logged, never surfaced to the request.
    pub fn send_contact_emails(&self, name: &str, email: &str, subject: &str, message: &str) {
        let admin_body = format!(
            "New contact message\n\nFrom: {name} <{email}>\nSubject: {subject}\n\n{message}"
        );
        if let Err(e) = self.send(
            &self.admin_email,
            &format!("[platebook contact] {subject}"),
            admin_body,
        ) {
            tracing::warn!("Failed to send admin contact email: {:?}", e);
        }

        let confirmation_body = format!(
            "Hi {name},\n\nThanks for reaching out. We received your message and \
             will get back to you soon.\n\nYour message:\n{message}\n\n- the platebook team"
        );
        if let Err(e) = self.send(email, "We received your message", confirmation_body) {
            tracing::warn!("Failed to send contact confirmation email: {:?}", e);
        }
    }
}
