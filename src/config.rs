use anyhow::{bail, Context, Result};

/// Where locale datasets are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceKind {
    /// `<DATA_DIR>/<locale>/<dataset>.json`
    Fs,
    /// `<CONTENT_BASE_URL>/<locale>/<dataset>.json`
    Http,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Content
    pub data_source: DataSourceKind,
    pub data_dir: String,
    pub content_base_url: Option<String>,

    // Site
    pub site_base_url: String,
    pub port: u16,

    // Newsletter storage (key-value store)
    pub storage_client: Option<String>,
    pub storage_bucket: Option<String>,
    pub storage_api_key: Option<String>,

    // Newsletter mail (SMTP)
    pub smtp_host: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub notification_email: Option<String>,
    pub mail_from: String,
    pub mail_notify_from: String,
}

/// Unset and empty variables are both treated as missing.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_source = match optional_var("DATA_SOURCE").as_deref() {
            None | Some("fs") => DataSourceKind::Fs,
            Some("http") => DataSourceKind::Http,
            Some(other) => bail!("Invalid DATA_SOURCE '{}': expected 'fs' or 'http'", other),
        };

        let content_base_url = optional_var("CONTENT_BASE_URL");
        if data_source == DataSourceKind::Http && content_base_url.is_none() {
            bail!("CONTENT_BASE_URL not set (required when DATA_SOURCE=http)");
        }

        let port = match optional_var("PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid PORT: {}", value))?,
            None => 8080,
        };

        Ok(Self {
            data_source,
            data_dir: optional_var("DATA_DIR").unwrap_or_else(|| "data".to_string()),
            content_base_url,

            site_base_url: optional_var("SITE_BASE_URL")
                .unwrap_or_else(|| "https://otherdev.com".to_string()),
            port,

            storage_client: optional_var("STORAGE_CLIENT"),
            storage_bucket: optional_var("KABEERCLOUD_BUCKET"),
            storage_api_key: optional_var("STORAGE_API_KEY"),

            smtp_host: optional_var("SMTP_HOST"),
            smtp_username: optional_var("SMTP_USERNAME"),
            smtp_password: optional_var("SMTP_PASSWORD"),
            notification_email: optional_var("NOTIFICATION_EMAIL"),
            mail_from: optional_var("MAIL_FROM")
                .unwrap_or_else(|| "Kabeer from Other Dev <kabeer@otherdev.com>".to_string()),
            mail_notify_from: optional_var("MAIL_NOTIFY_FROM")
                .unwrap_or_else(|| "Kabeer from Other Dev <noreply@otherdev.com>".to_string()),
        })
    }
}
