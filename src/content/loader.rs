use crate::content::{DataSource, Dataset, SourceError};
use crate::error::ContentError;
use crate::i18n::Locale;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

/// Resolves `(locale, dataset)` to a typed bundle, falling back to the
/// default locale once when the requested locale cannot be loaded.
///
/// Nothing is cached: every call goes back to the data source, and calls
/// share no mutable state.
#[derive(Debug, Clone)]
pub struct LocaleDataLoader<S> {
    source: S,
}

impl<S: DataSource> LocaleDataLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load and deserialize `dataset` for `locale`.
    ///
    /// A fetch failure and a document that does not deserialize into `T`
    /// are both load failures. A failure for a non-default locale is retried
    /// once against the default locale; otherwise the result is
    /// [`ContentError::DataUnavailable`].
    pub async fn load<T: DeserializeOwned>(
        &self,
        locale: Locale,
        dataset: Dataset,
    ) -> Result<T, ContentError> {
        let primary_err = match self.load_once(locale, dataset).await {
            Ok(bundle) => return Ok(bundle),
            Err(e) => e,
        };

        error!(
            "Error loading {} data for locale {}: {}",
            dataset, locale, primary_err
        );

        if locale.is_default() {
            return Err(ContentError::DataUnavailable { locale, dataset });
        }

        let default = Locale::default_locale();

        warn!(
            "Attempting to load {} data for default locale '{}' as fallback",
            dataset, default
        );

        match self.load_once(default, dataset).await {
            Ok(bundle) => Ok(bundle),
            Err(fallback_err) => {
                error!(
                    "Error loading fallback {} data for locale '{}': {}",
                    dataset, default, fallback_err
                );
                Err(ContentError::DataUnavailable { locale, dataset })
            }
        }
    }

    async fn load_once<T: DeserializeOwned>(
        &self,
        locale: Locale,
        dataset: Dataset,
    ) -> Result<T, SourceError> {
        let document = self.source.fetch(locale, dataset).await?;

        serde_json::from_value(document).map_err(|source| SourceError::Parse {
            origin: format!("{}/{}", locale, dataset.file_name()),
            source,
        })
    }
}
