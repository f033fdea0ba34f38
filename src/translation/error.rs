//! Typed errors raised by translation backends.
//!
//! Every failure a backend can report, whether it came back from the service
//! or was detected locally, is a [`ServiceError`]: an [`ErrorKind`] that maps
//! one-to-one onto the service's numeric status codes, plus an optional
//! detail string (the offending language, direction, or service message).

use std::fmt;

use thiserror::Error;

/// Status code the service uses for success.
pub const STATUS_OK: u16 = 200;

/// Error kinds, one per status code class reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401: API key missing or rejected.
    InvalidCredential,
    /// 402: API key blocked by the service.
    CredentialBlocked,
    /// 403: daily request quota reached.
    RequestLimitExceeded,
    /// 404: daily character quota reached.
    CharacterLimitExceeded,
    /// 405: translation direction not offered.
    TranslationNotAvailable,
    /// 406: source and target language are the same.
    SameLanguageError,
    /// 413: text exceeds the service limit.
    TextTooLong,
    /// 422: text could not be processed.
    TextNotProcessable,
    /// 501: detection returned no usable language.
    LanguageNotSupported,
    /// 503: service unreachable.
    ServiceUnavailable,
    /// 505: target language not offered.
    LanguageNotAvailable,
    /// Any status code outside the table above.
    Unrecognized(u16),
}

impl ErrorKind {
    const TABLE: [(u16, Self); 11] = [
        (401, Self::InvalidCredential),
        (402, Self::CredentialBlocked),
        (403, Self::RequestLimitExceeded),
        (404, Self::CharacterLimitExceeded),
        (405, Self::TranslationNotAvailable),
        (406, Self::SameLanguageError),
        (413, Self::TextTooLong),
        (422, Self::TextNotProcessable),
        (501, Self::LanguageNotSupported),
        (503, Self::ServiceUnavailable),
        (505, Self::LanguageNotAvailable),
    ];

    /// Maps a status code onto its kind. Codes outside the table become
    /// [`ErrorKind::Unrecognized`].
    pub fn from_code(code: u16) -> Self {
        Self::lookup(code).unwrap_or(Self::Unrecognized(code))
    }

    /// Like [`ErrorKind::from_code`], but `None` for codes outside the table.
    pub fn lookup(code: u16) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, kind)| *kind)
    }

    /// The numeric status code for this kind.
    pub const fn code(self) -> u16 {
        match self {
            Self::InvalidCredential => 401,
            Self::CredentialBlocked => 402,
            Self::RequestLimitExceeded => 403,
            Self::CharacterLimitExceeded => 404,
            Self::TranslationNotAvailable => 405,
            Self::SameLanguageError => 406,
            Self::TextTooLong => 413,
            Self::TextNotProcessable => 422,
            Self::LanguageNotSupported => 501,
            Self::ServiceUnavailable => 503,
            Self::LanguageNotAvailable => 505,
            Self::Unrecognized(code) => code,
        }
    }

    /// The symbolic name printed to users, e.g. `ERR_KEY_INVALID`.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::InvalidCredential => "ERR_KEY_INVALID",
            Self::CredentialBlocked => "ERR_KEY_BLOCKED",
            Self::RequestLimitExceeded => "ERR_DAILY_REQ_LIMIT_EXCEEDED",
            Self::CharacterLimitExceeded => "ERR_DAILY_CHAR_LIMIT_EXCEEDED",
            Self::TranslationNotAvailable => "ERR_TRANSLATION_NOT_AVAILABLE",
            Self::SameLanguageError => "ERR_SAME_LANGUAGE_SOURCE_AND_TARGET",
            Self::TextTooLong => "ERR_TEXT_TOO_LONG",
            Self::TextNotProcessable => "ERR_TEXT_NOT_PROCESSABLE",
            Self::LanguageNotSupported => "ERR_LANG_NOT_SUPPORTED",
            Self::ServiceUnavailable => "ERR_SERVICE_NOT_AVAILABLE",
            Self::LanguageNotAvailable => "ERR_LANGUAGE_NOT_AVAILABLE",
            Self::Unrecognized(_) => "ERR_UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(code) => write!(f, "{} ({code})", self.symbol()),
            _ => f.write_str(self.symbol()),
        }
    }
}

/// A failure reported by a translation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", detail_suffix(.detail.as_deref()))]
pub struct ServiceError {
    kind: ErrorKind,
    detail: Option<String>,
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(" -> {d}")).unwrap_or_default()
}

impl ServiceError {
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    /// Builds the error for a non-success status code from the service.
    pub fn from_code(code: u16, message: Option<String>) -> Self {
        Self {
            kind: ErrorKind::from_code(code),
            detail: message.filter(|m| !m.is_empty()),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn code(&self) -> u16 {
        self.kind.code()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl From<ErrorKind> for ServiceError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
