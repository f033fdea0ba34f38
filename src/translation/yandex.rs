//! Yandex Translate API v1.5 backend.

use async_trait::async_trait;
use serde::Deserialize;

use super::backend::{BackendConfig, Credential, FORMAT_PLAIN, Translation, TranslationBackend};
use super::error::{ErrorKind, STATUS_OK, ServiceError};
use super::language::LanguageCatalog;
use super::transport::{HttpTransport, RawResponse, Transport};

pub const DEFAULT_BASE_URL: &str = "https://translate.yandex.net/api/v1.5/tr.json";

/// API endpoints under the versioned base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Langs,
    Detect,
    Translate,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Langs => "getLangs",
            Self::Detect => "detect",
            Self::Translate => "translate",
        }
    }
}

/// Languages Yandex accepts as translation targets.
pub const YANDEX_LANGUAGES: &[(&str, &str)] = &[
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("it", "Italian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
];

/// Directions Yandex translates.
#[rustfmt::skip]
pub const YANDEX_DIRECTIONS: &[&str] = &[
    "az-ru",
    "be-bg", "be-cs", "be-de", "be-en", "be-es", "be-fr", "be-it", "be-pl",
    "be-ro", "be-ru", "be-sr", "be-tr",
    "bg-be", "bg-ru", "bg-uk",
    "ca-en", "ca-ru",
    "cs-be", "cs-en", "cs-ru", "cs-uk",
    "da-en", "da-ru",
    "de-be", "de-en", "de-es", "de-fr", "de-it", "de-ru", "de-tr", "de-uk",
    "el-en", "el-ru",
    "en-be", "en-ca", "en-cs", "en-da", "en-de", "en-el", "en-es", "en-et",
    "en-fi", "en-fr", "en-hu", "en-it", "en-lt", "en-lv", "en-mk", "en-nl",
    "en-no", "en-pt", "en-ru", "en-sk", "en-sl", "en-sq", "en-sv", "en-tr",
    "en-uk",
    "es-be", "es-de", "es-en", "es-ru", "es-uk",
    "et-en", "et-ru",
    "fi-en", "fi-ru",
    "fr-be", "fr-de", "fr-en", "fr-ru", "fr-uk",
    "hr-ru",
    "hu-en", "hu-ru",
    "hy-ru",
    "it-be", "it-de", "it-en", "it-ru", "it-uk",
    "lt-en", "lt-ru",
    "lv-en", "lv-ru",
    "mk-en", "mk-ru",
    "nl-en", "nl-ru",
    "no-en", "no-ru",
    "pl-be", "pl-ru", "pl-uk",
    "pt-en", "pt-ru",
    "ro-be", "ro-ru", "ro-uk",
    "ru-az", "ru-be", "ru-bg", "ru-ca", "ru-cs", "ru-da", "ru-de", "ru-el",
    "ru-en", "ru-es", "ru-et", "ru-fi", "ru-fr", "ru-hr", "ru-hu", "ru-hy",
    "ru-it", "ru-lt", "ru-lv", "ru-mk", "ru-nl", "ru-no", "ru-pl", "ru-pt",
    "ru-ro", "ru-sk", "ru-sl", "ru-sq", "ru-sr", "ru-sv", "ru-tr", "ru-uk",
    "sk-en", "sk-ru",
    "sl-en", "sl-ru",
    "sq-en", "sq-ru",
    "sr-be", "sr-ru", "sr-uk",
    "sv-en", "sv-ru",
    "tr-be", "tr-de", "tr-en", "tr-ru", "tr-uk",
    "uk-bg", "uk-cs", "uk-de", "uk-en", "uk-es", "uk-fr", "uk-it", "uk-pl",
    "uk-ro", "uk-ru", "uk-sr", "uk-tr",
];

/// Fields shared by every response: an optional status `code` (absent
/// means success) and an optional error `message`.
#[derive(Debug, Deserialize)]
struct Status {
    code: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LangsResponse {
    #[serde(flatten)]
    status: Status,
    #[serde(default)]
    dirs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(flatten)]
    status: Status,
    lang: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(flatten)]
    status: Status,
    #[serde(default)]
    text: Vec<String>,
    lang: Option<String>,
}

trait WithStatus {
    fn status(&self) -> &Status;
}

macro_rules! impl_with_status {
    ($($ty:ty),*) => {
        $(impl WithStatus for $ty {
            fn status(&self) -> &Status {
                &self.status
            }
        })*
    };
}

impl_with_status!(LangsResponse, DetectResponse, TranslateResponse);

/// Turns a raw exchange into a typed payload or the matching error.
///
/// An unparseable body is `TextNotProcessable`, unless the HTTP status is
/// itself a known service code. A parsed `code` other than 200 wins over
/// everything else.
fn decode<R>(raw: &RawResponse) -> Result<R, ServiceError>
where
    R: for<'de> Deserialize<'de> + WithStatus,
{
    let payload: R = serde_json::from_str(&raw.body).map_err(|e| {
        tracing::debug!(status = raw.status, error = %e, "unparseable response body");
        ErrorKind::lookup(raw.status).map_or_else(
            || ServiceError::with_detail(ErrorKind::TextNotProcessable, e.to_string()),
            ServiceError::new,
        )
    })?;

    let status = payload.status();
    let code = status.code.unwrap_or(STATUS_OK);
    if code != STATUS_OK {
        return Err(ServiceError::from_code(code, status.message.clone()));
    }
    Ok(payload)
}

/// Languages and directions accepted by the Yandex API, usable without a key.
pub fn yandex_catalog() -> LanguageCatalog {
    LanguageCatalog::new(YANDEX_LANGUAGES, YANDEX_DIRECTIONS)
}

/// Client for the Yandex Translate API.
pub struct YandexClient<T = HttpTransport> {
    credential: Credential,
    base_url: String,
    transport: T,
    catalog: LanguageCatalog,
}

impl YandexClient<HttpTransport> {
    pub fn new(credential: &str) -> Result<Self, ServiceError> {
        Self::from_config(&BackendConfig {
            api_key: Some(credential.to_string()),
            ..BackendConfig::default()
        })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ServiceError> {
        let credential = Credential::new(config.api_key.clone().unwrap_or_default())?;
        let transport = HttpTransport::new(config.timeout).map_err(|e| {
            ServiceError::with_detail(ErrorKind::ServiceUnavailable, e.to_string())
        })?;
        let base_url = config.endpoint.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Ok(Self::with_transport(credential, transport, base_url))
    }
}

impl<T: Transport> YandexClient<T> {
    pub fn with_transport(credential: Credential, transport: T, base_url: &str) -> Self {
        Self {
            credential,
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            catalog: yandex_catalog(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    async fn post(&self, endpoint: Endpoint, form: &[(&str, &str)]) -> Result<RawResponse, ServiceError> {
        let url = self.url(endpoint);
        self.transport
            .post_form(&url, form)
            .await
            .map_err(|e| ServiceError::with_detail(ErrorKind::ServiceUnavailable, e.to_string()))
    }
}

#[async_trait]
impl<T: Transport> TranslationBackend for YandexClient<T> {
    fn name(&self) -> &'static str {
        "yandex"
    }

    fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    async fn detect_language(&self, text: &str) -> Result<String, ServiceError> {
        let form = [
            ("text", text),
            ("format", FORMAT_PLAIN),
            ("key", self.credential.expose()),
        ];
        let raw = self.post(Endpoint::Detect, &form).await?;
        let response: DetectResponse = decode(&raw)?;

        response
            .lang
            .filter(|lang| !lang.is_empty())
            .ok_or_else(|| ServiceError::new(ErrorKind::LanguageNotSupported))
    }

    async fn translate(&self, text: &str, direction: &str) -> Result<Translation, ServiceError> {
        let form = [
            ("text", text),
            ("format", FORMAT_PLAIN),
            ("lang", direction),
            ("key", self.credential.expose()),
        ];
        let raw = self.post(Endpoint::Translate, &form).await?;
        let response: TranslateResponse = decode(&raw)?;

        // Only the first segment is used
        let text = response.text.into_iter().next().ok_or_else(|| {
            ServiceError::with_detail(ErrorKind::TextNotProcessable, "empty translation")
        })?;
        Ok(Translation {
            text,
            direction: response.lang.unwrap_or_else(|| direction.to_string()),
        })
    }

    async fn fetch_directions(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.url(Endpoint::Langs);
        let raw = self
            .transport
            .get(&url, &[("key", self.credential.expose())])
            .await
            .map_err(|e| ServiceError::with_detail(ErrorKind::ServiceUnavailable, e.to_string()))?;
        let response: LangsResponse = decode(&raw)?;
        Ok(response.dirs)
    }
}
