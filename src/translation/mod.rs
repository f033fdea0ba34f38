mod backend;
mod error;
mod language;
mod registry;
mod transport;
mod yandex;

pub use backend::{
    BackendConfig, Credential, FORMAT_PLAIN, Translation, TranslationBackend, TranslationRequest,
};
pub use error::{ErrorKind, STATUS_OK, ServiceError};
pub use language::{AUTO_DETECT, LanguageCatalog, LanguagePair};
pub use registry::{BackendConstructor, BackendRegistry, CatalogConstructor, DEFAULT_BACKEND};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
pub use yandex::{
    DEFAULT_BASE_URL, Endpoint, YANDEX_DIRECTIONS, YANDEX_LANGUAGES, YandexClient, yandex_catalog,
};
