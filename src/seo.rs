//! Page metadata (title, Open Graph, Twitter Card, canonical link) built from
//! the per-locale SEO document.

use crate::content::{DataSource, Dataset, LocaleDataLoader};
use crate::error::ContentError;
use crate::i18n::Locale;
use crate::models::{SeoData, SeoPageDetail};
use serde::Serialize;
use tracing::{error, warn};
use url::Url;

/// Metadata for one page, ready to be written into `<head>`.
///
/// Image URLs are always absolute.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image_alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_image_alt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

impl PageMeta {
    /// Field mapping from a page's SEO copy.
    ///
    /// The Twitter description is the generic description, not the page's
    /// dedicated `twitterDescription`.
    fn from_detail(detail: &SeoPageDetail, image: Option<String>) -> Self {
        let og_description = detail
            .og_description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&detail.description)
            .to_string();

        Self {
            title: detail.title.clone(),
            description: detail.description.clone(),
            keywords: detail.keywords.clone(),

            og_title: Some(detail.title.clone()),
            og_description: Some(og_description),
            og_image: image.clone(),
            og_image_alt: detail.image_alt.clone(),

            twitter_title: Some(detail.title.clone()),
            twitter_description: Some(detail.description.clone()),
            twitter_image: image,
            twitter_image_alt: detail.image_alt.clone(),

            canonical_url: None,
        }
    }
}

/// Builds [`PageMeta`] records from the SEO dataset.
pub struct PageMetaBuilder<'a, S> {
    loader: &'a LocaleDataLoader<S>,
}

impl<'a, S: DataSource> PageMetaBuilder<'a, S> {
    pub fn new(loader: &'a LocaleDataLoader<S>) -> Self {
        Self { loader }
    }

    /// Metadata for `page_name` in `locale`, with images resolved against
    /// `base_url`.
    ///
    /// Returns `None` when the SEO data or the page entry is missing. URL
    /// problems only leave the affected fields unset.
    pub async fn build_page_meta(
        &self,
        page_name: &str,
        locale: Locale,
        base_url: &str,
    ) -> Option<PageMeta> {
        match self.try_build_page_meta(page_name, locale, base_url).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("No page metadata: {}", e);
                None
            }
        }
    }

    /// Like [`build_page_meta`](Self::build_page_meta), reporting why no
    /// record was produced.
    pub async fn try_build_page_meta(
        &self,
        page_name: &str,
        locale: Locale,
        base_url: &str,
    ) -> Result<PageMeta, ContentError> {
        let seo: SeoData = self.loader.load(locale, Dataset::Seo).await?;

        let pages = seo.pages.as_ref().ok_or(ContentError::DataUnavailable {
            locale,
            dataset: Dataset::Seo,
        })?;

        let detail = pages.get(page_name).ok_or_else(|| ContentError::NotFound {
            kind: "page",
            key: page_name.to_string(),
            locale,
        })?;

        let image = detail
            .image
            .as_deref()
            .filter(|image| !image.is_empty())
            .and_then(|image| {
                let path = image.strip_prefix('/').unwrap_or(image);
                join_url(base_url, path)
                    .map_err(|e| error!("Error creating absolute image URL: {}", e))
                    .ok()
            });

        let mut meta = PageMeta::from_detail(detail, image);

        if let Some(site_url) = seo.site.as_ref().and_then(|site| site.url.as_deref()) {
            match join_url(site_url, page_path(page_name)) {
                Ok(canonical) => meta.canonical_url = Some(canonical),
                Err(e) => error!("Error creating canonical URL: {}", e),
            }
        }

        Ok(meta)
    }
}

/// Path of a page relative to the site root; `index` is the root itself.
fn page_path(page_name: &str) -> &str {
    if page_name == "index" {
        ""
    } else {
        page_name.strip_prefix('/').unwrap_or(page_name)
    }
}

/// Resolve `path` against `base`, treating `base` as a directory.
fn join_url(base: &str, path: &str) -> Result<String, ContentError> {
    let directory = format!("{}/", base.trim_end_matches('/'));

    Url::parse(&directory)
        .and_then(|base| base.join(path))
        .map(String::from)
        .map_err(|source| ContentError::UrlConstruction {
            base: base.to_string(),
            path: path.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SourceError;
    use serde_json::{json, Value};
    use std::path::PathBuf;

    struct SeoSource {
        english: Option<Value>,
    }

    impl DataSource for SeoSource {
        async fn fetch(&self, locale: Locale, dataset: Dataset) -> Result<Value, SourceError> {
            match (&self.english, locale, dataset) {
                (Some(doc), Locale::ENGLISH, Dataset::Seo) => Ok(doc.clone()),
                _ => Err(SourceError::Io {
                    path: PathBuf::from(dataset.file_name()),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                }),
            }
        }
    }

    fn seo_document(site_url: Option<&str>) -> Value {
        let mut doc = json!({
            "pages": {
                "index": {
                    "title": "Other Dev",
                    "description": "Digital studio",
                    "ogDescription": "",
                    "twitterDescription": "Dedicated twitter copy",
                    "image": "/og.png",
                    "imageAlt": "Studio logo",
                    "keywords": "studio, web"
                },
                "about": {
                    "title": "About",
                    "description": "Who we are",
                    "ogDescription": "Meet the team",
                    "twitterDescription": "Ignored",
                    "image": "images/about.png",
                    "imageAlt": "Team photo",
                    "keywords": "team"
                },
                "work": {
                    "title": "Work",
                    "description": "Selected projects"
                }
            }
        });
        if let Some(url) = site_url {
            doc["site"] = json!({"name": "Other Dev", "url": url});
        }
        doc
    }

    fn loader(doc: Option<Value>) -> LocaleDataLoader<SeoSource> {
        LocaleDataLoader::new(SeoSource { english: doc })
    }

    #[tokio::test]
    async fn test_index_canonical_is_site_root() {
        let loader = loader(Some(seo_document(Some("https://example.com"))));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("index", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap();

        assert_eq!(meta.canonical_url.as_deref(), Some("https://example.com/"));
    }

    #[tokio::test]
    async fn test_about_canonical_joins_page_name() {
        let loader = loader(Some(seo_document(Some("https://example.com"))));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("about", Locale::ENGLISH, "https://example.com/")
            .await
            .unwrap();

        assert_eq!(meta.canonical_url.as_deref(), Some("https://example.com/about"));
    }

    #[tokio::test]
    async fn test_image_is_absolute_for_both_cards() {
        let loader = loader(Some(seo_document(None)));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("index", Locale::ENGLISH, "https://cdn.example.com")
            .await
            .unwrap();

        assert_eq!(meta.og_image.as_deref(), Some("https://cdn.example.com/og.png"));
        assert_eq!(meta.twitter_image, meta.og_image);
        assert_eq!(meta.og_image_alt.as_deref(), Some("Studio logo"));
        assert_eq!(meta.twitter_image_alt.as_deref(), Some("Studio logo"));
    }

    #[tokio::test]
    async fn test_relative_image_without_slash() {
        let loader = loader(Some(seo_document(None)));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("about", Locale::ENGLISH, "https://example.com/assets")
            .await
            .unwrap();

        assert_eq!(
            meta.og_image.as_deref(),
            Some("https://example.com/assets/images/about.png")
        );
    }

    #[tokio::test]
    async fn test_description_mapping() {
        let loader = loader(Some(seo_document(None)));
        let builder = PageMetaBuilder::new(&loader);

        let index = builder
            .build_page_meta("index", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap();
        assert_eq!(index.title, "Other Dev");
        assert_eq!(index.og_title.as_deref(), Some("Other Dev"));
        assert_eq!(index.twitter_title.as_deref(), Some("Other Dev"));
        assert_eq!(index.keywords.as_deref(), Some("studio, web"));
        // empty ogDescription falls back to description
        assert_eq!(index.og_description.as_deref(), Some("Digital studio"));
        // dedicated twitterDescription is not used
        assert_eq!(index.twitter_description.as_deref(), Some("Digital studio"));

        let about = builder
            .build_page_meta("about", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap();
        assert_eq!(about.og_description.as_deref(), Some("Meet the team"));
        assert_eq!(about.twitter_description.as_deref(), Some("Who we are"));
    }

    #[tokio::test]
    async fn test_missing_optional_fields() {
        let loader = loader(Some(seo_document(None)));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("work", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap();

        assert_eq!(meta.og_description.as_deref(), Some("Selected projects"));
        assert!(meta.og_image.is_none());
        assert!(meta.twitter_image.is_none());
        assert!(meta.keywords.is_none());
        assert!(meta.canonical_url.is_none());
    }

    #[tokio::test]
    async fn test_unknown_page_is_not_found() {
        let loader = loader(Some(seo_document(Some("https://example.com"))));
        let builder = PageMetaBuilder::new(&loader);

        assert!(builder
            .build_page_meta("pricing", Locale::ENGLISH, "https://example.com")
            .await
            .is_none());

        let err = builder
            .try_build_page_meta("pricing", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::NotFound { kind: "page", .. }));
    }

    #[tokio::test]
    async fn test_unavailable_data_is_not_found() {
        let loader = loader(None);
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("index", Locale::SPANISH, "https://example.com")
            .await;

        assert!(meta.is_none());
    }

    #[tokio::test]
    async fn test_missing_pages_map_is_not_found() {
        let loader = loader(Some(json!({"site": {"name": "x", "url": "https://example.com"}})));
        let result = PageMetaBuilder::new(&loader)
            .try_build_page_meta("index", Locale::ENGLISH, "https://example.com")
            .await;

        assert!(matches!(result, Err(ContentError::DataUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_spanish_falls_back_to_english_seo() {
        let loader = loader(Some(seo_document(Some("https://example.com"))));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("about", Locale::SPANISH, "https://example.com")
            .await
            .unwrap();

        assert_eq!(meta.title, "About");
    }

    #[tokio::test]
    async fn test_malformed_base_url_only_drops_images() {
        let loader = loader(Some(seo_document(Some("https://example.com"))));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("index", Locale::ENGLISH, "not a url")
            .await
            .unwrap();

        assert!(meta.og_image.is_none());
        assert!(meta.twitter_image.is_none());
        assert_eq!(meta.canonical_url.as_deref(), Some("https://example.com/"));
        assert_eq!(meta.title, "Other Dev");
    }

    #[tokio::test]
    async fn test_malformed_site_url_only_drops_canonical() {
        let loader = loader(Some(seo_document(Some("::nope::"))));
        let meta = PageMetaBuilder::new(&loader)
            .build_page_meta("about", Locale::ENGLISH, "https://example.com")
            .await
            .unwrap();

        assert!(meta.canonical_url.is_none());
        assert_eq!(meta.og_image.as_deref(), Some("https://example.com/images/about.png"));
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("index"), "");
        assert_eq!(page_path("about"), "about");
        assert_eq!(page_path("/work"), "work");
    }

    #[test]
    fn test_join_url_normalizes_trailing_slashes() {
        assert_eq!(join_url("https://example.com//", "a").unwrap(), "https://example.com/a");
        assert_eq!(join_url("https://example.com", "").unwrap(), "https://example.com/");
    }

    #[test]
    fn test_page_meta_serializes_camel_case_without_unset_fields() {
        let meta = PageMeta {
            title: "T".into(),
            description: "D".into(),
            og_title: Some("T".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(value["ogTitle"], "T");
        assert!(value.get("canonicalUrl").is_none());
        assert!(value.get("keywords").is_none());
    }
}
