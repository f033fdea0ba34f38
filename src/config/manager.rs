use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fs::atomic_write;
use crate::input::InputSource;
use crate::paths;
use crate::present::OutputMode;
use crate::translation::{BackendConfig, DEFAULT_BACKEND};

pub const DEFAULT_LANGUAGE: &str = "en";

/// File name inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Per-backend settings under `"backend"` in settings.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// API key stored directly in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl BackendSettings {
    /// Gets the API key, preferring the environment variable over the file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// The settings file.
///
/// Every field is optional on disk; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    /// Backend used when `--backend` is not given. Default `yandex`.
    #[serde(rename = "default_backend", default = "default_backend")]
    pub backend: String,
    /// Per-backend credentials and endpoints.
    #[serde(rename = "backend", default)]
    pub backends: BTreeMap<String, BackendSettings>,
    /// Target language. Default `en`.
    #[serde(rename = "default_language", default = "default_language")]
    pub language: String,
    /// Default `clipboard`.
    #[serde(rename = "default_input", default)]
    pub input: InputSource,
    /// Default `notify`.
    #[serde(rename = "default_output", default)]
    pub output: OutputMode,
    /// Copy the translation back to the clipboard. Default `false`.
    #[serde(rename = "default_exchange", default)]
    pub exchange: bool,
    /// Transport timeout in seconds. Default: none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            backends: BTreeMap::new(),
            language: default_language(),
            input: InputSource::default(),
            output: OutputMode::default(),
            exchange: false,
            request_timeout_secs: None,
        }
    }
}

impl SettingsFile {
    pub fn backend_settings(&self, name: &str) -> BackendSettings {
        self.backends.get(name).cloned().unwrap_or_default()
    }

    /// Folds CLI values into the stored settings, as `--save-config` does.
    pub fn apply(&mut self, options: &ResolveOptions) {
        if let Some(backend) = &options.backend {
            self.backend.clone_from(backend);
        }
        if let Some(api_key) = &options.api_key {
            self.backends
                .entry(self.backend.clone())
                .or_default()
                .api_key = Some(api_key.clone());
        }
        if let Some(target) = &options.target_lang {
            self.language.clone_from(target);
        }
        if let Some(input) = options.input {
            self.input = input;
        }
        if let Some(output) = options.output {
            self.output = output;
        }
        if options.exchange {
            self.exchange = true;
        }
        if let Some(timeout) = options.timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
    }
}

/// Settings after merging CLI arguments over the settings file.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub backend: String,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    /// `None` means detect.
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub input: InputSource,
    pub output: OutputMode,
    pub exchange: bool,
    pub timeout: Option<Duration>,
}

impl ResolvedSettings {
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            api_key: self.api_key.clone(),
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
        }
    }
}

/// CLI overrides; each takes precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub api_key: Option<String>,
    pub backend: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub input: Option<InputSource>,
    pub output: Option<OutputMode>,
    /// A flag: it can turn exchange on but never off.
    pub exchange: bool,
    pub timeout_secs: Option<u64>,
}

/// Resolves settings by merging CLI options over the settings file.
///
/// The API key is looked up for the resolved backend: `--api-key` first,
/// then the backend's `api_key_env` variable, then its stored `api_key`.
pub fn resolve_settings(options: &ResolveOptions, file: &SettingsFile) -> ResolvedSettings {
    let backend = options.backend.clone().unwrap_or_else(|| file.backend.clone());
    let backend_settings = file.backend_settings(&backend);

    let api_key = options
        .api_key
        .clone()
        .or_else(|| backend_settings.get_api_key());

    ResolvedSettings {
        api_key,
        endpoint: backend_settings.endpoint,
        source_lang: options.source_lang.clone(),
        target_lang: options
            .target_lang
            .clone()
            .unwrap_or_else(|| file.language.clone()),
        input: options.input.unwrap_or(file.input),
        output: options.output.unwrap_or(file.output),
        exchange: options.exchange || file.exchange,
        timeout: options
            .timeout_secs
            .or(file.request_timeout_secs)
            .map(Duration::from_secs),
        backend,
    }
}

/// Loads and saves the settings file.
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    /// Settings stored at `$XDG_CONFIG_HOME/babelclip/settings.json`
    /// or `~/.config/babelclip/settings.json`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            settings_path: paths::config_dir()?.join(SETTINGS_FILE_NAME),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: path.into(),
        }
    }

    /// `--config-file` if given, the default location otherwise.
    pub fn from_override(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(Self::new, |p| Ok(Self::with_path(p)))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn load(&self) -> Result<SettingsFile> {
        let contents = fs::read_to_string(&self.settings_path).with_context(|| {
            format!(
                "Failed to read settings file: {}",
                self.settings_path.display()
            )
        })?;

        serde_json::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse settings file: {}",
                self.settings_path.display()
            )
        })
    }

    /// Defaults when the file does not exist; any other failure is an error.
    pub fn load_or_default(&self) -> Result<SettingsFile> {
        match fs::metadata(&self.settings_path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.settings_path.display(),
                    "no settings file, using defaults"
                );
                Ok(SettingsFile::default())
            }
            _ => self.load(),
        }
    }

    pub fn save(&self, settings: &SettingsFile) -> Result<()> {
        if let Some(parent) = self.settings_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        atomic_write(&self.settings_path, &contents).with_context(|| {
            format!(
                "Failed to write settings file: {}",
                self.settings_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> SettingsManager {
        SettingsManager::with_path(temp_dir.path().join("settings.json"))
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut backends = BTreeMap::new();
        backends.insert(
            "yandex".to_string(),
            BackendSettings {
                api_key: Some("trnsl.key".to_string()),
                ..BackendSettings::default()
            },
        );
        let settings = SettingsFile {
            backend: "yandex".to_string(),
            backends,
            language: "es".to_string(),
            input: InputSource::Selection,
            output: OutputMode::Stdout,
            exchange: true,
            request_timeout_secs: Some(10),
        };

        manager.save(&settings).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::with_path(temp_dir.path().join("nested/dir/settings.json"));

        manager.save(&SettingsFile::default()).unwrap();

        assert!(manager.settings_path().exists());
    }

    #[test]
    fn test_load_nonexistent_settings() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default().unwrap(), SettingsFile::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.settings_path(), "{ not json").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_reads_legacy_file_layout() {
        let json = r#"{
            "babelPY": "Config settings file",
            "default_backend": "yandex",
            "backend": {
                "yandex": {"api_key": "abc"},
                "microsoft": {"api_key": ""},
                "google": {"api_key": ""}
            },
            "default_language": "de",
            "default_input": "selection",
            "default_output": "dialog",
            "default_exchange": true
        }"#;

        let settings: SettingsFile = serde_json::from_str(json).unwrap();

        assert_eq!(settings.language, "de");
        assert_eq!(settings.input, InputSource::Selection);
        assert_eq!(settings.output, OutputMode::Dialog);
        assert!(settings.exchange);
        assert_eq!(
            settings.backend_settings("yandex").get_api_key(),
            Some("abc".to_string())
        );
        // empty stored keys count as missing
        assert_eq!(settings.backend_settings("google").get_api_key(), None);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: SettingsFile = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SettingsFile::default());
        assert_eq!(settings.backend, "yandex");
        assert_eq!(settings.language, "en");
        assert_eq!(settings.input, InputSource::Clipboard);
        assert_eq!(settings.output, OutputMode::Notify);
        assert!(!settings.exchange);
    }

    #[test]
    #[serial]
    fn test_backend_get_api_key_from_env() {
        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::set_var("BABELCLIP_TEST_API_KEY", "env-key");
        }

        let backend = BackendSettings {
            api_key: Some("file-key".to_string()),
            api_key_env: Some("BABELCLIP_TEST_API_KEY".to_string()),
            endpoint: None,
        };
        assert_eq!(backend.get_api_key(), Some("env-key".to_string()));

        // SAFETY: serialized with other env-mutating tests
        unsafe {
            std::env::remove_var("BABELCLIP_TEST_API_KEY");
        }
        assert_eq!(backend.get_api_key(), Some("file-key".to_string()));
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = SettingsFile::default();
        let options = ResolveOptions {
            api_key: Some("new-key".to_string()),
            target_lang: Some("ru".to_string()),
            output: Some(OutputMode::Stdout),
            exchange: true,
            ..ResolveOptions::default()
        };

        settings.apply(&options);

        assert_eq!(settings.language, "ru");
        assert_eq!(settings.output, OutputMode::Stdout);
        assert_eq!(settings.input, InputSource::Clipboard);
        assert!(settings.exchange);
        assert_eq!(
            settings.backend_settings("yandex").api_key.as_deref(),
            Some("new-key")
        );
    }

    #[test]
    fn test_apply_does_not_clear_exchange() {
        let mut settings = SettingsFile {
            exchange: true,
            ..SettingsFile::default()
        };
        settings.apply(&ResolveOptions::default());
        assert!(settings.exchange);
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = resolve_settings(&ResolveOptions::default(), &SettingsFile::default());

        assert_eq!(resolved.backend, "yandex");
        assert_eq!(resolved.target_lang, "en");
        assert!(resolved.source_lang.is_none());
        assert!(resolved.api_key.is_none());
        assert!(resolved.timeout.is_none());
    }

    #[test]
    fn test_resolve_backend_config() {
        let mut file = SettingsFile::default();
        file.backends.insert(
            "yandex".to_string(),
            BackendSettings {
                api_key: Some("k".to_string()),
                api_key_env: None,
                endpoint: Some("http://localhost:1234".to_string()),
            },
        );
        file.request_timeout_secs = Some(3);

        let config = resolve_settings(&ResolveOptions::default(), &file).backend_config();

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:1234"));
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }
}
