//! Export binary - dumps every statically generated route with its data
//!
//! Prints one JSON document listing, for each enabled locale, the published
//! project and service pages and the metadata of the known top-level pages.
//! Useful for checking a content change before deploying it.
//!
//! Usage:
//!   cargo run --bin export                 # Print to stdout
//!   cargo run --bin export -- out.json     # Write to a file
//!
//! Optional environment variables:
//! - DATA_SOURCE (fs or http, defaults to fs)
//! - DATA_DIR (defaults to data)
//! - CONTENT_BASE_URL (required when DATA_SOURCE=http)
//! - SITE_BASE_URL (defaults to https://otherdev.com)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use site_content::config::Config;
use site_content::content::{ContentSource, LocaleDataLoader};
use site_content::i18n::Locale;
use site_content::models::KNOWN_PAGES;
use site_content::projects::{ProjectPath, ProjectResolver, ServicePath};
use site_content::seo::{PageMeta, PageMetaBuilder};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleExport {
    locale: Locale,
    native_name: &'static str,
    projects: Vec<ProjectPath>,
    services: Vec<ServicePath>,
    pages: BTreeMap<&'static str, PageMeta>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    generated_at: DateTime<Utc>,
    locales: Vec<LocaleExport>,
}

async fn export_locale(
    loader: &LocaleDataLoader<ContentSource>,
    locale: Locale,
    base_url: &str,
) -> LocaleExport {
    let resolver = ProjectResolver::new(loader);
    let builder = PageMetaBuilder::new(loader);

    let (projects, services, metas) = futures::join!(
        resolver.list_published_slugs(locale),
        resolver.list_published_services(locale),
        join_all(
            KNOWN_PAGES
                .iter()
                .map(|page| builder.build_page_meta(page, locale, base_url))
        ),
    );

    let mut pages = BTreeMap::new();
    for (page, meta) in KNOWN_PAGES.iter().zip(metas) {
        match meta {
            Some(meta) => {
                pages.insert(*page, meta);
            }
            None => warn!("[{}] No metadata for page '{}'", locale, page),
        }
    }

    info!(
        "[{}] {} projects, {} services, {} pages",
        locale,
        projects.len(),
        services.len(),
        pages.len()
    );

    LocaleExport {
        locale,
        native_name: locale.config().map(|config| config.native_name).unwrap_or_default(),
        projects,
        services,
        pages,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_content=info".parse()?)
                .add_directive("export=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let loader = LocaleDataLoader::new(ContentSource::from_config(&config)?);

    let locales = join_all(
        Locale::all_enabled()
            .into_iter()
            .map(|locale| export_locale(&loader, locale, &config.site_base_url)),
    )
    .await;

    let export = Export {
        generated_at: Utc::now(),
        locales,
    };
    let json = serde_json::to_string_pretty(&export)?;

    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path))?;
            info!("Export written to {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
