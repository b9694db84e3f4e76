//! Publishable catalog entries (projects and services) and their slugs.
//!
//! An entry is reachable under `/<slug>` only when its `hasPage` flag is set.
//! Slugs are derived from titles on every call. Two published entries whose
//! titles sanitize to the same slug are not disambiguated: lookups return the
//! first one in dataset order.

use crate::content::{DataSource, Dataset, LocaleDataLoader};
use crate::error::ContentError;
use crate::i18n::Locale;
use crate::models::{Project, Service};
use crate::slug::sanitize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// A catalog entry type that can get its own page.
pub trait Publishable: DeserializeOwned {
    /// Dataset the entries are stored in.
    const DATASET: Dataset;
    /// Human-readable kind used in diagnostics.
    const KIND: &'static str;

    fn title(&self) -> &str;
    fn has_page(&self) -> bool;
}

impl Publishable for Project {
    const DATASET: Dataset = Dataset::Projects;
    const KIND: &'static str = "project";

    fn title(&self) -> &str {
        &self.title
    }

    fn has_page(&self) -> bool {
        self.has_page
    }
}

impl Publishable for Service {
    const DATASET: Dataset = Dataset::Services;
    const KIND: &'static str = "service";

    fn title(&self) -> &str {
        &self.title
    }

    fn has_page(&self) -> bool {
        self.has_page
    }
}

/// A published project and the path segment it is served under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPath {
    pub slug: String,
    pub project: Project,
}

/// A published service and the path segment it is served under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePath {
    pub slug: String,
    pub service: Service,
}

/// Slug listing and lookup over the locale datasets.
pub struct ProjectResolver<'a, S> {
    loader: &'a LocaleDataLoader<S>,
}

impl<'a, S: DataSource> ProjectResolver<'a, S> {
    pub fn new(loader: &'a LocaleDataLoader<S>) -> Self {
        Self { loader }
    }

    /// Every project with a page, paired with its slug, in dataset order.
    ///
    /// Returns an empty list when the data cannot be loaded.
    pub async fn list_published_slugs(&self, locale: Locale) -> Vec<ProjectPath> {
        self.list_published::<Project>(locale)
            .await
            .into_iter()
            .map(|(slug, project)| ProjectPath { slug, project })
            .collect()
    }

    /// The first published project whose title sanitizes to `slug`.
    pub async fn resolve_by_slug(&self, slug: &str, locale: Locale) -> Option<Project> {
        self.resolve::<Project>(slug, locale).await
    }

    pub async fn list_published_services(&self, locale: Locale) -> Vec<ServicePath> {
        self.list_published::<Service>(locale)
            .await
            .into_iter()
            .map(|(slug, service)| ServicePath { slug, service })
            .collect()
    }

    pub async fn resolve_service_by_slug(&self, slug: &str, locale: Locale) -> Option<Service> {
        self.resolve::<Service>(slug, locale).await
    }

    async fn list_published<T: Publishable>(&self, locale: Locale) -> Vec<(String, T)> {
        let entries = match self.load_entries::<T>(locale).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("No {} data found for locale {}: {}", T::KIND, locale, e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| entry.has_page())
            .map(|entry| (sanitize(entry.title()), entry))
            .collect()
    }

    async fn resolve<T: Publishable>(&self, slug: &str, locale: Locale) -> Option<T> {
        if slug.is_empty() {
            warn!("Cannot resolve {}: slug parameter is empty", T::KIND);
            return None;
        }

        match self.find_published::<T>(slug, locale).await {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    async fn find_published<T: Publishable>(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<T, ContentError> {
        self.load_entries::<T>(locale)
            .await?
            .into_iter()
            .filter(|entry| entry.has_page())
            .find(|entry| sanitize(entry.title()) == slug)
            .ok_or_else(|| ContentError::NotFound {
                kind: T::KIND,
                key: slug.to_string(),
                locale,
            })
    }

    /// Load the dataset, treating an empty list like missing data.
    async fn load_entries<T: Publishable>(&self, locale: Locale) -> Result<Vec<T>, ContentError> {
        let entries: Vec<T> = self.loader.load(locale, T::DATASET).await?;
        if entries.is_empty() {
            return Err(ContentError::DataUnavailable {
                locale,
                dataset: T::DATASET,
            });
        }
        Ok(entries)
    }
}
