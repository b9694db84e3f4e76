use super::{Mail, Mailer, NewsletterError};
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Implicit-TLS submission port.
const SMTPS_PORT: u16 = 465;

/// SMTP delivery over implicit TLS.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a pooled transport for `host`.
    ///
    /// Must be called inside a Tokio runtime: the connection pool spawns its
    /// maintenance task on construction.
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .with_context(|| format!("Invalid SMTP host: {}", host))?
            .port(SMTPS_PORT)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();

        Ok(Self { transport })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NewsletterError> {
    address.parse().map_err(|e: lettre::address::AddressError| NewsletterError::Address {
        address: address.to_string(),
        message: e.to_string(),
    })
}

/// Convert a [`Mail`] into a plain-text RFC 5322 message.
fn build_message(mail: Mail) -> Result<Message, NewsletterError> {
    Message::builder()
        .from(mailbox(&mail.from)?)
        .to(mailbox(&mail.to)?)
        .subject(mail.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(mail.text)
        .map_err(|e| NewsletterError::Mail(e.to_string()))
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: Mail) -> Result<(), NewsletterError> {
        let message = build_message(mail)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NewsletterError::Mail(e.to_string()))?;

        Ok(())
    }
}
