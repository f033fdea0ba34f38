#![allow(clippy::unwrap_used)]
//! Backend contract tests against a scripted transport.
//!
//! No test here touches the network: every exchange is answered by
//! `StubTransport`, which also records the endpoints that were hit.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use babelclip::translation::{
    Credential, ErrorKind, RawResponse, TranslationBackend, TranslationRequest, Transport,
    TransportError, YandexClient,
};

#[derive(Default)]
struct StubTransport {
    responses: HashMap<&'static str, RawResponse>,
    fail_connect: bool,
    calls: Mutex<Vec<String>>,
    forms: Mutex<Vec<Vec<(String, String)>>>,
}

impl StubTransport {
    fn with(mut self, endpoint: &'static str, body: &str) -> Self {
        self.responses.insert(endpoint, RawResponse::ok(body));
        self
    }

    fn with_status(mut self, endpoint: &'static str, status: u16, body: &str) -> Self {
        self.responses.insert(endpoint, RawResponse::new(status, body));
        self
    }

    fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    fn answer(&self, url: &str, params: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let endpoint = url.rsplit('/').next().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(endpoint.clone());
        self.forms.lock().unwrap().push(
            params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );

        if self.fail_connect {
            return Err(TransportError::Other("connection refused".to_string()));
        }
        self.responses
            .get(endpoint.as_str())
            .cloned()
            .ok_or_else(|| TransportError::Other(format!("no stub for {endpoint}")))
    }
}

#[async_trait]
impl Transport for &StubTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        self.answer(url, query)
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<RawResponse, TransportError> {
        self.answer(url, form)
    }
}

fn client(stub: &StubTransport) -> YandexClient<&StubTransport> {
    YandexClient::with_transport(
        Credential::new("test-key").unwrap(),
        stub,
        "http://stub.local/api/v1.5/tr.json",
    )
}

fn calls(stub: &StubTransport) -> Vec<String> {
    stub.calls.lock().unwrap().clone()
}

#[tokio::test]
async fn test_translate_returns_first_segment() {
    let stub = StubTransport::default().with(
        "translate",
        r#"{"code":200,"lang":"en-es","text":["Hola"]}"#,
    );

    let translation = client(&stub).translate("Hello", "en-es").await.unwrap();

    assert_eq!(translation.text, "Hola");
    assert_eq!(translation.direction, "en-es");
}

#[tokio::test]
async fn test_translate_sends_form_fields() {
    let stub = StubTransport::default().with("translate", r#"{"code":200,"text":["Hola"]}"#);

    client(&stub).translate("Hello", "en-es").await.unwrap();

    let forms = stub.forms.lock().unwrap();
    let form: HashMap<_, _> = forms[0].iter().cloned().collect();
    assert_eq!(form["text"], "Hello");
    assert_eq!(form["format"], "plain");
    assert_eq!(form["lang"], "en-es");
    assert_eq!(form["key"], "test-key");
}

#[tokio::test]
async fn test_translate_keeps_only_first_of_many_segments() {
    let stub = StubTransport::default().with(
        "translate",
        r#"{"code":200,"lang":"en-de","text":["Hallo","Welt"]}"#,
    );

    let translation = client(&stub).translate("Hello world", "en-de").await.unwrap();
    assert_eq!(translation.text, "Hallo");
}

#[tokio::test]
async fn test_translate_empty_segments_is_not_processable() {
    let stub = StubTransport::default().with("translate", r#"{"code":200,"text":[]}"#);

    let err = client(&stub).translate("Hello", "en-es").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TextNotProcessable);
}

#[tokio::test]
async fn test_detect_language() {
    let stub = StubTransport::default().with("detect", r#"{"lang":"en","code":200}"#);

    let lang = client(&stub).detect_language("Hello world!").await.unwrap();
    assert_eq!(lang, "en");
}

#[tokio::test]
async fn test_detect_without_lang_is_not_supported() {
    let stub = StubTransport::default().with("detect", r#"{"code":200}"#);

    let err = client(&stub).detect_language("???").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LanguageNotSupported);

    let stub = StubTransport::default().with("detect", r#"{"code":200,"lang":""}"#);
    let err = client(&stub).detect_language("???").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LanguageNotSupported);
}

#[tokio::test]
async fn test_detect_malformed_payload_is_not_processable() {
    let stub = StubTransport::default().with("detect", "not json at all");

    let err = client(&stub).detect_language("Hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TextNotProcessable);
}

#[tokio::test]
async fn test_service_code_503_is_unavailable_everywhere() {
    let stub = StubTransport::default()
        .with("detect", r#"{"code":503}"#)
        .with("translate", r#"{"code":503}"#)
        .with("getLangs", r#"{"code":503}"#);
    let client = client(&stub);

    let detect = client.detect_language("Hello").await.unwrap_err();
    let translate = client.translate("Hello", "en-es").await.unwrap_err();
    let langs = client.fetch_directions().await.unwrap_err();

    assert_eq!(detect.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(translate.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(langs.kind(), ErrorKind::ServiceUnavailable);
}

#[tokio::test]
async fn test_connection_failure_is_unavailable_everywhere() {
    let stub = StubTransport::unreachable();
    let client = client(&stub);

    let detect = client.detect_language("Hello").await.unwrap_err();
    let translate = client.translate("Hello", "en-es").await.unwrap_err();

    assert_eq!(detect.kind(), ErrorKind::ServiceUnavailable);
    assert_eq!(translate.kind(), ErrorKind::ServiceUnavailable);
}

#[tokio::test]
async fn test_service_codes_map_to_kinds() {
    let cases = [
        (401, ErrorKind::InvalidCredential),
        (402, ErrorKind::CredentialBlocked),
        (403, ErrorKind::RequestLimitExceeded),
        (404, ErrorKind::CharacterLimitExceeded),
        (413, ErrorKind::TextTooLong),
        (422, ErrorKind::TextNotProcessable),
        (501, ErrorKind::LanguageNotSupported),
        (599, ErrorKind::Unrecognized(599)),
    ];

    for (code, kind) in cases {
        let body = format!(r#"{{"code":{code},"message":"service says no"}}"#);
        let stub = StubTransport::default().with_status("translate", code, &body);

        let err = client(&stub).translate("Hello", "en-es").await.unwrap_err();

        assert_eq!(err.kind(), kind, "code {code}");
        assert_eq!(err.detail(), Some("service says no"));
    }
}

#[tokio::test]
async fn test_same_language_fails_without_network() {
    let stub = StubTransport::default();

    let err = client(&stub).validate_pair("en", "en").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SameLanguageError);
    assert_eq!(err.detail(), Some("en-en"));

    let err = client(&stub)
        .translate_manual("Hello", "en", "en")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SameLanguageError);
    assert!(calls(&stub).is_empty());
}

#[tokio::test]
async fn test_unavailable_target_fails_without_network() {
    let stub = StubTransport::default();

    let err = client(&stub)
        .translate_manual("Hello", "en", "xx")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LanguageNotAvailable);
    assert_eq!(err.detail(), Some("xx"));
    assert!(calls(&stub).is_empty());
}

#[tokio::test]
async fn test_unavailable_direction_fails_without_network() {
    // both languages exist, but Spanish -> Finnish is not offered
    let stub = StubTransport::default();

    let err = client(&stub)
        .translate_manual("Hola", "es", "fi")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TranslationNotAvailable);
    assert_eq!(err.detail(), Some("es-fi"));
    assert!(calls(&stub).is_empty());
}

#[tokio::test]
async fn test_translate_auto_detects_then_translates() {
    let stub = StubTransport::default()
        .with("detect", r#"{"lang":"en","code":200}"#)
        .with("translate", r#"{"code":200,"lang":"en-es","text":["Hola"]}"#);

    let translation = client(&stub).translate_auto("Hello", "es").await.unwrap();

    assert_eq!(translation.text, "Hola");
    assert_eq!(calls(&stub), vec!["detect", "translate"]);
}

#[tokio::test]
async fn test_translate_auto_validates_detected_language() {
    let stub = StubTransport::default()
        .with("detect", r#"{"lang":"es","code":200}"#)
        .with("translate", r#"{"code":200,"text":["unused"]}"#);

    let err = client(&stub).translate_auto("Hola", "es").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SameLanguageError);
    assert_eq!(err.detail(), Some("es-es"));
    assert_eq!(calls(&stub), vec!["detect"]);
}

#[tokio::test]
async fn test_translate_manual_skips_detection() {
    let stub = StubTransport::default().with(
        "translate",
        r#"{"code":200,"lang":"ru-en","text":["Hello"]}"#,
    );

    let translation = client(&stub)
        .translate_manual("Привет", "ru", "en")
        .await
        .unwrap();

    assert_eq!(translation.text, "Hello");
    assert_eq!(calls(&stub), vec!["translate"]);
}

#[tokio::test]
async fn test_manual_auto_matches_translate_auto() {
    let stub = StubTransport::default()
        .with("detect", r#"{"lang":"en","code":200}"#)
        .with("translate", r#"{"code":200,"lang":"en-es","text":["Hola"]}"#);
    let client = client(&stub);

    let auto = client.translate_auto("Hello", "es").await.unwrap();
    let manual = client.translate_manual("Hello", "auto", "es").await.unwrap();

    assert_eq!(auto, manual);
    assert_eq!(
        calls(&stub),
        vec!["detect", "translate", "detect", "translate"]
    );
}

#[tokio::test]
async fn test_execute_dispatches_on_source() {
    let stub = StubTransport::default()
        .with("detect", r#"{"lang":"en"}"#)
        .with("translate", r#"{"text":["Hola"]}"#);
    let client = client(&stub);

    let auto = client
        .execute(&TranslationRequest::new("Hello", "es"))
        .await
        .unwrap();
    assert_eq!(auto.text, "Hola");
    assert_eq!(calls(&stub), vec!["detect", "translate"]);

    let manual = client
        .execute(&TranslationRequest::new("Hello", "es").with_source("en"))
        .await
        .unwrap();
    assert_eq!(manual.text, "Hola");
    assert_eq!(calls(&stub), vec!["detect", "translate", "translate"]);
}

#[tokio::test]
async fn test_remote_languages_from_directions() {
    let stub = StubTransport::default().with(
        "getLangs",
        r#"{"dirs":["en-ru","ru-en","en-de","uk-ru"]}"#,
    );
    let client = client(&stub);

    assert_eq!(
        client.fetch_directions().await.unwrap(),
        vec!["en-ru", "ru-en", "en-de", "uk-ru"]
    );
    assert_eq!(
        client.remote_languages().await.unwrap(),
        vec!["en", "ru", "uk"]
    );
}

#[tokio::test]
async fn test_blocked_key_on_get_langs() {
    let stub = StubTransport::default().with_status(
        "getLangs",
        403,
        r#"{"code":402,"message":"API key is blocked"}"#,
    );

    let err = client(&stub).fetch_directions().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CredentialBlocked);
    assert_eq!(err.to_string(), "ERR_KEY_BLOCKED -> API key is blocked");
}
