//! Newsletter sign-up: validate the address, record it in the key-value
//! store, then mail the subscriber and the site owner.
//!
//! Storage and mail delivery are capabilities (`KvStore`, `Mailer`); the
//! concrete HTTP key-value client and SMTP transport live in submodules.

mod kv;
mod mail;

pub use kv::KvClient;
pub use mail::SmtpMailer;

use crate::config::Config;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{error, info};

/// Source tag stored with every subscription record.
pub const SUBSCRIPTION_SOURCE: &str = "web.utility.email";

const INVALID_EMAIL: &str = "Invalid email";
const STORAGE_CONFIG_ERROR: &str = "Server configuration error regarding data storage.";
const MAIL_CONFIG_ERROR: &str = "Server configuration error regarding email services.";
const PROCESSING_ERROR: &str = "An error occurred while processing your subscription.";

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error("key-value store request failed: {message}")]
    Storage { status: Option<u16>, message: String },

    #[error("invalid mail address '{address}': {message}")]
    Address { address: String, message: String },

    #[error("mail delivery failed: {0}")]
    Mail(String),
}

impl NewsletterError {
    /// Network errors and 5xx responses from the store may be retried.
    pub fn is_transient(&self) -> bool {
        match self {
            NewsletterError::Storage { status: None, .. } => true,
            NewsletterError::Storage {
                status: Some(code), ..
            } => *code >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubscriptionResponse {
    fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            error: Some(message.to_string()),
        }
    }

    /// The request itself was at fault (as opposed to the server).
    pub fn is_rejected_input(&self) -> bool {
        self.error.as_deref() == Some(INVALID_EMAIL)
    }
}

/// Plain-text mail handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Key-value storage capability.
pub trait KvStore: Send + Sync {
    fn create(
        &self,
        bucket: &str,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), NewsletterError>> + Send;
}

/// Mail delivery capability.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: Mail) -> impl Future<Output = Result<(), NewsletterError>> + Send;
}

/// A store together with the bucket subscriptions are written to.
pub struct StorageTarget<K> {
    pub store: K,
    pub bucket: String,
}

/// A mailer together with the address that receives sign-up notifications.
pub struct MailTarget<M> {
    pub mailer: M,
    pub notification_email: String,
}

/// Sender addresses for outgoing mail.
#[derive(Debug, Clone)]
pub struct MailSenders {
    pub confirmation_from: String,
    pub notification_from: String,
}

impl MailSenders {
    pub fn from_config(config: &Config) -> Self {
        Self {
            confirmation_from: config.mail_from.clone(),
            notification_from: config.mail_notify_from.clone(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+$").expect("static email pattern")
    })
}

/// Loose syntactic check used before anything is stored.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email_pattern().is_match(email)
}

/// Mail sent to the new subscriber.
pub fn confirmation_mail(from: &str, subscriber: &str) -> Mail {
    Mail {
        from: from.to_string(),
        to: subscriber.to_string(),
        subject: "Thanks for subscribing!".to_string(),
        text: "You're now on our list. Welcome to the future.".to_string(),
    }
}

/// Mail sent to the site owner about a new subscriber.
pub fn notification_mail(from: &str, admin: &str, subscriber: &str) -> Mail {
    Mail {
        from: from.to_string(),
        to: admin.to_string(),
        subject: format!("{} subscribed to Other Dev's Website", subscriber),
        text: format!(
            "The email address {} has subscribed via the website utility.",
            subscriber
        ),
    }
}

/// Handles newsletter sign-ups.
///
/// Storage or mail configuration may be absent; that is reported per
/// request instead of preventing start-up.
pub struct NewsletterService<K, M> {
    storage: Option<StorageTarget<K>>,
    mail: Option<MailTarget<M>>,
    senders: MailSenders,
}

impl NewsletterService<KvClient, SmtpMailer> {
    /// Build the HTTP store and SMTP transport from whatever is configured.
    ///
    /// Settings that are missing or unusable leave that target unset; the
    /// handler then reports the configuration error per request.
    pub fn from_config(config: &Config) -> Self {
        let storage = match (&config.storage_client, &config.storage_bucket) {
            (Some(endpoint), Some(bucket)) => {
                match KvClient::new(endpoint, config.storage_api_key.as_deref()) {
                    Ok(store) => Some(StorageTarget {
                        store,
                        bucket: bucket.clone(),
                    }),
                    Err(e) => {
                        error!("Unusable KV store configuration: {:#}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let mail = match (
            &config.smtp_host,
            &config.smtp_username,
            &config.smtp_password,
            &config.notification_email,
        ) {
            (Some(host), Some(username), Some(password), Some(notify)) => {
                match SmtpMailer::new(host, username, password) {
                    Ok(mailer) => Some(MailTarget {
                        mailer,
                        notification_email: notify.clone(),
                    }),
                    Err(e) => {
                        error!("Unusable SMTP configuration: {:#}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        Self::new(storage, mail, MailSenders::from_config(config))
    }
}

impl<K: KvStore, M: Mailer> NewsletterService<K, M> {
    pub fn new(
        storage: Option<StorageTarget<K>>,
        mail: Option<MailTarget<M>>,
        senders: MailSenders,
    ) -> Self {
        Self {
            storage,
            mail,
            senders,
        }
    }

    /// Validate, store and confirm a subscription. Never fails outright:
    /// problems are logged and reported in the response.
    pub async fn handle_subscription(&self, request: &SubscriptionRequest) -> SubscriptionResponse {
        let email = request.email.as_str();
        if !is_valid_email(email) {
            return SubscriptionResponse::failed(INVALID_EMAIL);
        }

        let Some(storage) = &self.storage else {
            error!("Missing KV store environment variables (STORAGE_CLIENT or KABEERCLOUD_BUCKET)");
            return SubscriptionResponse::failed(STORAGE_CONFIG_ERROR);
        };

        let Some(mail) = &self.mail else {
            error!(
                "Missing SMTP environment variables (SMTP_HOST, SMTP_USERNAME, SMTP_PASSWORD, or NOTIFICATION_EMAIL)"
            );
            return SubscriptionResponse::failed(MAIL_CONFIG_ERROR);
        };

        match self.subscribe(email, storage, mail).await {
            Ok(()) => {
                info!("New newsletter subscriber recorded");
                SubscriptionResponse::succeeded()
            }
            Err(e) => {
                error!("Error during newsletter subscription process: {}", e);
                SubscriptionResponse::failed(PROCESSING_ERROR)
            }
        }
    }

    async fn subscribe(
        &self,
        email: &str,
        storage: &StorageTarget<K>,
        mail: &MailTarget<M>,
    ) -> Result<(), NewsletterError> {
        let record = serde_json::json!({
            "subscribed": true,
            "source": SUBSCRIPTION_SOURCE,
        })
        .to_string();

        storage.store.create(&storage.bucket, email, &record).await?;

        mail.mailer
            .send(confirmation_mail(&self.senders.confirmation_from, email))
            .await?;

        mail.mailer
            .send(notification_mail(
                &self.senders.notification_from,
                &mail.notification_email,
                email,
            ))
            .await?;

        Ok(())
    }
}
