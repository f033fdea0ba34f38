//! Language codes, translation directions and local allow-lists.

use std::collections::HashSet;
use std::fmt;

use super::error::{ErrorKind, ServiceError};

/// Source language sentinel meaning "detect before translating".
pub const AUTO_DETECT: &str = "auto";

/// An ordered source/target pair.
///
/// Rendered as the backend's direction key, `"source-target"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Parses a direction key such as `"en-es"`.
    pub fn parse(direction: &str) -> Option<Self> {
        let (source, target) = direction.split_once('-')?;
        if source.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self::new(source, target))
    }

    pub fn direction(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

/// The languages and directions a backend is known to support.
///
/// Built once from constant tables when a client is constructed and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    names: &'static [(&'static str, &'static str)],
    languages: HashSet<&'static str>,
    directions: HashSet<&'static str>,
}

impl LanguageCatalog {
    pub fn new(
        names: &'static [(&'static str, &'static str)],
        directions: &'static [&'static str],
    ) -> Self {
        Self {
            names,
            languages: names.iter().map(|(code, _)| *code).collect(),
            directions: directions.iter().copied().collect(),
        }
    }

    pub fn supports_language(&self, code: &str) -> bool {
        self.languages.contains(code)
    }

    pub fn supports_direction(&self, direction: &str) -> bool {
        self.directions.contains(direction)
    }

    /// Language codes with their English names, in table order.
    pub const fn languages(&self) -> &'static [(&'static str, &'static str)] {
        self.names
    }

    pub fn language_name(&self, code: &str) -> Option<&'static str> {
        self.names
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, name)| *name)
    }

    /// Targets reachable from `source`, sorted.
    pub fn targets_for(&self, source: &str) -> Vec<&'static str> {
        let mut targets: Vec<_> = self
            .directions
            .iter()
            .filter_map(|direction| {
                let (from, to) = direction.split_once('-')?;
                (from == source).then_some(to)
            })
            .collect();
        targets.sort_unstable();
        targets
    }

    /// Checks a pair against the allow-lists without touching the network.
    ///
    /// Same-language is reported first, then an unknown target, then an
    /// unsupported direction.
    pub fn validate(&self, source: &str, target: &str) -> Result<(), ServiceError> {
        let pair = LanguagePair::new(source, target);

        if source == target {
            return Err(ServiceError::with_detail(
                ErrorKind::SameLanguageError,
                pair.direction(),
            ));
        }
        if !self.supports_language(target) {
            return Err(ServiceError::with_detail(
                ErrorKind::LanguageNotAvailable,
                target,
            ));
        }
        if !self.supports_direction(&pair.direction()) {
            return Err(ServiceError::with_detail(
                ErrorKind::TranslationNotAvailable,
                pair.direction(),
            ));
        }
        Ok(())
    }
}
