use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::error::{ErrorKind, ServiceError};
use super::language::{AUTO_DETECT, LanguageCatalog, LanguagePair};

/// Text format sent with every request. HTML is not supported.
pub const FORMAT_PLAIN: &str = "plain";

/// An API key. Never empty; never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Rejects empty and whitespace-only keys with `InvalidCredential`.
    pub fn new(key: impl Into<String>) -> Result<Self, ServiceError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ServiceError::new(ErrorKind::InvalidCredential));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Everything needed to construct a backend.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub api_key: Option<String>,
    /// Overrides the backend's default base URL.
    pub endpoint: Option<String>,
    /// Transport timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// A single translation to perform.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    /// `None` or [`AUTO_DETECT`] detects the source language first.
    pub source: Option<String>,
    pub target: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
            target: target.into(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A translated text and the direction the service used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub direction: String,
}

/// A remote translation service.
///
/// Implementations supply the network operations and their allow-lists; the
/// auto/manual flows are shared. Every failure is raised as a
/// [`ServiceError`].
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Registry name, e.g. `"yandex"`.
    fn name(&self) -> &'static str;

    fn catalog(&self) -> &LanguageCatalog;

    async fn detect_language(&self, text: &str) -> Result<String, ServiceError>;

    /// Translates `text` along a `"source-target"` direction.
    async fn translate(&self, text: &str, direction: &str) -> Result<Translation, ServiceError>;

    /// Directions the live service currently offers.
    async fn fetch_directions(&self) -> Result<Vec<String>, ServiceError>;

    /// Local check; performs no network call.
    fn validate_pair(&self, source: &str, target: &str) -> Result<(), ServiceError> {
        self.catalog().validate(source, target)
    }

    /// Source languages the live service offers, sorted and deduplicated.
    async fn remote_languages(&self) -> Result<Vec<String>, ServiceError> {
        let mut languages: Vec<String> = self
            .fetch_directions()
            .await?
            .iter()
            .filter_map(|direction| LanguagePair::parse(direction))
            .map(|pair| pair.source)
            .collect();
        languages.sort_unstable();
        languages.dedup();
        Ok(languages)
    }

    async fn translate_auto(&self, text: &str, target: &str) -> Result<Translation, ServiceError> {
        let detected = self.detect_language(text).await?;
        tracing::debug!(backend = self.name(), %detected, "detected source language");
        self.validate_pair(&detected, target)?;
        let pair = LanguagePair::new(detected, target);
        self.translate(text, &pair.direction()).await
    }

    /// Skips detection unless `source` is [`AUTO_DETECT`].
    async fn translate_manual(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, ServiceError> {
        if source == AUTO_DETECT {
            return self.translate_auto(text, target).await;
        }
        self.validate_pair(source, target)?;
        let pair = LanguagePair::new(source, target);
        self.translate(text, &pair.direction()).await
    }

    async fn execute(&self, request: &TranslationRequest) -> Result<Translation, ServiceError> {
        match request.source.as_deref() {
            Some(source) => {
                self.translate_manual(&request.text, source, &request.target)
                    .await
            }
            None => self.translate_auto(&request.text, &request.target).await,
        }
    }
}
