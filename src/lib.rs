// Library exports for the site content service and its binaries

pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod models;
pub mod newsletter;
pub mod projects;
pub mod retry;
pub mod seo;
pub mod server;
pub mod slug;
pub mod transition;
