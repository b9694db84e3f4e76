//! HTTP surface over the content pipeline and the newsletter handler.

use crate::config::Config;
use crate::content::{ContentSource, LocaleDataLoader};
use crate::i18n::Locale;
use crate::models::{Project, Service};
use crate::newsletter::{
    KvClient, NewsletterService, SmtpMailer, SubscriptionRequest, SubscriptionResponse,
};
use crate::projects::{ProjectPath, ProjectResolver, ServicePath};
use crate::seo::{PageMeta, PageMetaBuilder};
use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub struct AppState {
    pub loader: LocaleDataLoader<ContentSource>,
    /// Base URL relative image paths are resolved against
    pub site_base_url: String,
    pub newsletter: NewsletterService<KvClient, SmtpMailer>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = ContentSource::from_config(config)?;

        Ok(Self {
            loader: LocaleDataLoader::new(source),
            site_base_url: config.site_base_url.clone(),
            newsletter: NewsletterService::from_config(config),
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/newsletter", post(subscribe))
        .route("/api/:locale/meta/:page", get(page_meta))
        .route("/api/:locale/projects", get(list_projects))
        .route("/api/:locale/projects/:slug", get(project_by_slug))
        .route("/api/:locale/services", get(list_services))
        .route("/api/:locale/services/:slug", get(service_by_slug))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_locale(code: &str) -> Result<Locale, StatusCode> {
    Locale::from_code(code).map_err(|e| {
        debug!("Rejected locale: {}", e);
        StatusCode::NOT_FOUND
    })
}

async fn health() -> &'static str {
    "OK"
}

async fn page_meta(
    State(state): State<Arc<AppState>>,
    Path((locale, page)): Path<(String, String)>,
) -> Result<Json<PageMeta>, StatusCode> {
    let locale = parse_locale(&locale)?;

    PageMetaBuilder::new(&state.loader)
        .build_page_meta(&page, locale, &state.site_base_url)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_projects(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> Result<Json<Vec<ProjectPath>>, StatusCode> {
    let locale = parse_locale(&locale)?;
    let paths = ProjectResolver::new(&state.loader)
        .list_published_slugs(locale)
        .await;
    Ok(Json(paths))
}

async fn project_by_slug(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<Project>, StatusCode> {
    let locale = parse_locale(&locale)?;

    ProjectResolver::new(&state.loader)
        .resolve_by_slug(&slug, locale)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_services(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
) -> Result<Json<Vec<ServicePath>>, StatusCode> {
    let locale = parse_locale(&locale)?;
    let paths = ProjectResolver::new(&state.loader)
        .list_published_services(locale)
        .await;
    Ok(Json(paths))
}

async fn service_by_slug(
    State(state): State<Arc<AppState>>,
    Path((locale, slug)): Path<(String, String)>,
) -> Result<Json<Service>, StatusCode> {
    let locale = parse_locale(&locale)?;

    ProjectResolver::new(&state.loader)
        .resolve_service_by_slug(&slug, locale)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubscriptionRequest>,
) -> (StatusCode, Json<SubscriptionResponse>) {
    let response = state.newsletter.handle_subscription(&request).await;

    let status = if response.success {
        StatusCode::OK
    } else if response.is_rejected_input() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(response))
}
