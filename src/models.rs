//! Content documents as they are stored per locale.
//!
//! Field names follow the camelCase JSON documents the site is authored in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==================== Projects ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSection {
    pub heading: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Detail page content for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub excerpt: String,
    #[serde(default)]
    pub split_sections: Vec<PageSection>,
    #[serde(default)]
    pub upper_slideshow: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_cover: Option<String>,
}

/// A portfolio entry. Only entries with `has_page` get a public URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub has_page: bool,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ProjectPage>,
}

// ==================== Services ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    pub name: String,
    pub price: f64,
    /// Billing unit, e.g. "project"
    pub interval: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePage {
    pub excerpt: String,
    #[serde(default)]
    pub split_sections: Vec<PageSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonial: Option<Testimonial>,
}

/// An offered service; published the same way as projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub has_page: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub starting_price: f64,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub process_steps: Vec<ProcessStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_tiers: Option<Vec<PricingTier>>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ServicePage>,
}

// ==================== SEO ====================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSite {
    #[serde(default)]
    pub name: String,
    /// Canonical base URL of the site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub sitemap: String,
    /// Business listing link
    #[serde(default)]
    pub gmb_link: String,
    #[serde(default)]
    pub robots: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Per-page SEO copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoPageDetail {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    /// Relative (`/og.png`) or absolute image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwitterProfile {
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub card: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoSocial {
    #[serde(default)]
    pub twitter: TwitterProfile,
    #[serde(default)]
    pub profiles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessContact {
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub email: String,
    /// e.g. "Customer Service"
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBusiness {
    /// e.g. "LocalBusiness"
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub contact: BusinessContact,
    #[serde(default)]
    pub area_served: Vec<String>,
    #[serde(default)]
    pub available_language: Vec<String>,
    /// e.g. "Mo-Su 00:00-23:59"
    #[serde(default)]
    pub opening_hours: String,
}

/// The per-locale SEO document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SeoSite>,
    /// Keyed by page identifier (`index`, `about`, `work`, `expertise`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<BTreeMap<String, SeoPageDetail>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<SeoSocial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<SeoBusiness>,
}

/// Page identifiers every locale's SEO document is expected to describe.
pub const KNOWN_PAGES: [&str; 4] = ["index", "about", "work", "expertise"];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_deserializes_camel_case() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "title": "Café & Co.",
            "company": "Café Co",
            "hasPage": true,
            "year": "2024",
            "description": "Brand refresh",
            "imageSrc": "/images/cafe.jpg",
            "coverImageAlt": "Storefront",
            "page": {
                "excerpt": "A neighbourhood café",
                "splitSections": [
                    {"heading": "Brief", "content": "...", "tags": ["branding"]}
                ],
                "upperSlideshow": ["/a.jpg", "/b.jpg"],
                "testimonial": {"content": "Great", "author": "Owner"}
            }
        }))
        .unwrap();

        assert!(project.has_page);
        assert_eq!(project.image_src, "/images/cafe.jpg");
        assert_eq!(project.cover_image_alt.as_deref(), Some("Storefront"));
        let page = project.page.unwrap();
        assert_eq!(page.upper_slideshow.len(), 2);
        assert_eq!(page.split_sections[0].tags.as_ref().unwrap()[0], "branding");
        assert!(page.second_cover.is_none());
    }

    #[test]
    fn test_project_missing_has_page_defaults_to_false() {
        let project: Project =
            serde_json::from_value(json!({"id": "p2", "title": "Draft"})).unwrap();
        assert!(!project.has_page);
    }

    #[test]
    fn test_project_serializes_without_unset_optionals() {
        let project: Project =
            serde_json::from_value(json!({"id": "p3", "title": "T", "hasPage": true})).unwrap();
        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(value["hasPage"], true);
        assert!(value.get("coverImage").is_none());
        assert!(value.get("page").is_none());
    }

    #[test]
    fn test_service_deserializes() {
        let service: Service = serde_json::from_value(json!({
            "id": "s1",
            "title": "Web Development",
            "hasPage": true,
            "category": "engineering",
            "startingPrice": 1500,
            "benefits": ["Fast"],
            "processSteps": [{"title": "Discover", "description": "Workshops"}],
            "pricingTiers": [{"name": "Basic", "price": 1500, "interval": "project", "features": []}],
            "coverImage": "/services/web.jpg"
        }))
        .unwrap();

        assert_eq!(service.starting_price, 1500.0);
        assert_eq!(service.process_steps[0].title, "Discover");
        assert_eq!(service.pricing_tiers.unwrap()[0].interval, "project");
    }

    #[test]
    fn test_seo_data_deserializes() {
        let seo: SeoData = serde_json::from_value(json!({
            "site": {"name": "Studio", "url": "https://example.com", "robots": "index,follow"},
            "pages": {
                "index": {"title": "Home", "description": "Welcome", "image": "/og.png"}
            },
            "social": {"twitter": {"handle": "@studio", "card": "summary_large_image"}, "profiles": []},
            "business": {
                "type": "LocalBusiness",
                "contact": {"telephone": "+1", "email": "hi@example.com", "type": "Customer Service"},
                "areaServed": ["PK"],
                "availableLanguage": ["en", "es"],
                "openingHours": "Mo-Su 00:00-23:59"
            }
        }))
        .unwrap();

        assert_eq!(seo.site.unwrap().url.as_deref(), Some("https://example.com"));
        assert_eq!(seo.pages.unwrap()["index"].image.as_deref(), Some("/og.png"));
        let business = seo.business.unwrap();
        assert_eq!(business.kind, "LocalBusiness");
        assert_eq!(business.contact.kind, "Customer Service");
        assert_eq!(seo.social.unwrap().twitter.card, "summary_large_image");
    }

    #[test]
    fn test_seo_data_without_pages() {
        let seo: SeoData = serde_json::from_value(json!({"site": {"name": "S"}})).unwrap();
        assert!(seo.pages.is_none());
    }
}
