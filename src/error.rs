use crate::content::Dataset;
use crate::i18n::Locale;
use thiserror::Error;

/// Failures of the content pipeline.
///
/// None of these reach callers of the project resolver or the page
/// metadata builder: they are logged and turned into empty listings,
/// `None`, or unset optional fields.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The dataset could not be loaded, even from the default locale.
    #[error("{dataset} data unavailable for locale '{locale}'")]
    DataUnavailable { locale: Locale, dataset: Dataset },

    /// A page identifier or slug has no match.
    #[error("no {kind} '{key}' for locale '{locale}'")]
    NotFound {
        kind: &'static str,
        key: String,
        locale: Locale,
    },

    /// A base or site URL could not be combined with a path.
    #[error("cannot build URL from base '{base}' and path '{path}': {source}")]
    UrlConstruction {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_message() {
        let err = ContentError::DataUnavailable {
            locale: Locale::SPANISH,
            dataset: Dataset::Seo,
        };
        assert_eq!(err.to_string(), "seo data unavailable for locale 'es'");
    }

    #[test]
    fn test_not_found_message() {
        let err = ContentError::NotFound {
            kind: "project",
            key: "missing-slug".to_string(),
            locale: Locale::ENGLISH,
        };
        assert_eq!(err.to_string(), "no project 'missing-slug' for locale 'en'");
    }
}
