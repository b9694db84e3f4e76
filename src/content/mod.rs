//! Locale-keyed content datasets and their loading.

mod loader;
mod source;

pub use loader::LocaleDataLoader;
pub use source::{ContentSource, DataSource, FsDataSource, HttpDataSource, SourceError};

use serde::Serialize;
use std::fmt;

/// The closed set of per-locale documents the site reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Projects,
    Seo,
    Services,
}

impl Dataset {
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Projects => "projects",
            Dataset::Seo => "seo",
            Dataset::Services => "services",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
