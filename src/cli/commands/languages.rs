//! Language listing command handler.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{ResolveOptions, SettingsManager, resolve_settings};
use crate::translation::{BackendRegistry, LanguageCatalog};
use crate::ui::{Spinner, Style};

/// Prints the languages the resolved backend accepts.
///
/// With `remote`, asks the service for its live direction list (needs an API
/// key); otherwise prints the built-in allow-list.
pub async fn print_languages(
    config_file: Option<&Path>,
    options: &ResolveOptions,
    remote: bool,
) -> Result<()> {
    let manager = SettingsManager::from_override(config_file)?;
    let settings = resolve_settings(options, &manager.load_or_default()?);
    let registry = BackendRegistry::with_defaults();
    let catalog = registry.catalog(&settings.backend)?;

    if !remote {
        print_catalog(&settings.backend, &catalog);
        return Ok(());
    }

    let backend = registry.create(&settings.backend, &settings.backend_config())?;
    let spinner = Spinner::new("Fetching languages...");
    let result = backend.remote_languages().await;
    spinner.stop();

    let codes = result.context("Failed to fetch languages from the service")?;
    println!(
        "{}",
        Style::header(format!("Languages reported by {}", backend.name()))
    );
    for code in &codes {
        let name = catalog.language_name(code).unwrap_or("");
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
    Ok(())
}

fn print_catalog(backend: &str, catalog: &LanguageCatalog) {
    println!(
        "{}",
        Style::header(format!("Supported language codes ({backend})"))
    );
    for (code, name) in catalog.languages() {
        let targets = catalog.targets_for(code).len();
        println!(
            "  {:5} {:12} {}",
            Style::code(code),
            Style::value(name),
            Style::secondary(format!("{targets} targets"))
        );
    }
}
