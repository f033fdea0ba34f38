//! `--save-config` handler.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{ResolveOptions, SettingsManager};
use crate::translation::BackendRegistry;
use crate::ui::Style;

/// Merges the given CLI values into the settings file and writes it back.
///
/// Returns the path that was written. An unknown `--backend` is rejected
/// and nothing is saved.
pub fn save_config(config_file: Option<&Path>, options: &ResolveOptions) -> Result<PathBuf> {
    if let Some(backend) = &options.backend {
        BackendRegistry::with_defaults().ensure_known(backend)?;
    }

    let manager = SettingsManager::from_override(config_file)?;
    let mut settings = manager.load_or_default()?;
    settings.apply(options);
    manager.save(&settings)?;

    crate::status!(
        "{} Settings successfully saved at: {}",
        Style::success("✓"),
        Style::secondary(manager.settings_path().display())
    );
    Ok(manager.settings_path().to_path_buf())
}
