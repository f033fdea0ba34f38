use std::collections::BTreeMap;

use anyhow::{Result, bail};

use super::backend::{BackendConfig, TranslationBackend};
use super::error::ServiceError;
use super::language::LanguageCatalog;
use super::yandex::{YandexClient, yandex_catalog};

pub const DEFAULT_BACKEND: &str = "yandex";

pub type BackendConstructor =
    fn(&BackendConfig) -> Result<Box<dyn TranslationBackend>, ServiceError>;

/// Builds a backend's allow-lists without credentials.
pub type CatalogConstructor = fn() -> LanguageCatalog;

#[derive(Clone, Copy)]
struct Entry {
    create: BackendConstructor,
    catalog: CatalogConstructor,
}

/// Maps backend names to constructors.
pub struct BackendRegistry {
    entries: BTreeMap<&'static str, Entry>,
}

impl BackendRegistry {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// A registry with every built-in backend.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(DEFAULT_BACKEND, yandex, yandex_catalog);
        registry
    }

    /// Adds or replaces a backend.
    pub fn register(
        &mut self,
        name: &'static str,
        create: BackendConstructor,
        catalog: CatalogConstructor,
    ) {
        self.entries.insert(name, Entry { create, catalog });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn create(&self, name: &str, config: &BackendConfig) -> Result<Box<dyn TranslationBackend>> {
        let entry = self.entry(name)?;
        Ok((entry.create)(config)?)
    }

    /// The backend's local allow-lists; needs no API key.
    pub fn catalog(&self, name: &str) -> Result<LanguageCatalog> {
        Ok((self.entry(name)?.catalog)())
    }

    /// Fails with the list of available backends when `name` is unknown.
    pub fn ensure_known(&self, name: &str) -> Result<()> {
        self.entry(name).map(|_| ())
    }

    fn entry(&self, name: &str) -> Result<Entry> {
        let Some(entry) = self.entries.get(name) else {
            bail!(
                "Unknown backend: '{name}'\n\n\
                 Available backends: {}",
                self.names().join(", ")
            );
        };
        Ok(*entry)
    }
}

fn yandex(config: &BackendConfig) -> Result<Box<dyn TranslationBackend>, ServiceError> {
    Ok(Box::new(YandexClient::from_config(config)?))
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
