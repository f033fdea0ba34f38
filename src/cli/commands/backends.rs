//! Backend listing command handler.

use anyhow::Result;
use std::path::Path;

use crate::config::SettingsManager;
use crate::translation::BackendRegistry;
use crate::ui::Style;

/// Prints the registered backends, marking the configured default and
/// whether an API key is available for each.
pub fn print_backends(config_file: Option<&Path>) -> Result<()> {
    let manager = SettingsManager::from_override(config_file)?;
    let settings = manager.load_or_default()?;
    let registry = BackendRegistry::with_defaults();

    println!("{}", Style::header("Available backends"));
    for name in registry.names() {
        let marker = if settings.backend == name {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        let key = if settings.backend_settings(name).get_api_key().is_some() {
            Style::success("api key set")
        } else {
            Style::secondary("no api key")
        };
        println!("  {}{marker}  {key}", Style::value(name));
    }

    if !registry.contains(&settings.backend) {
        crate::warn!(
            "Configured backend '{}' is not available",
            settings.backend
        );
    }
    Ok(())
}
