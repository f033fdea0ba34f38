mod manager;

pub use manager::{
    BackendSettings, DEFAULT_LANGUAGE, ResolveOptions, ResolvedSettings, SETTINGS_FILE_NAME,
    SettingsFile, SettingsManager, resolve_settings,
};
