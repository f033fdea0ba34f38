//! Configure command handler for editing default settings.

use anyhow::Result;
use inquire::{Confirm, Select};
use std::fmt::Display;
use std::path::Path;

use crate::config::{SettingsFile, SettingsManager};
use crate::input::InputSource;
use crate::present::OutputMode;
use crate::translation::{BackendRegistry, LanguageCatalog};
use crate::ui::{Style, handle_prompt_cancellation};

const INPUTS: [InputSource; 3] = [
    InputSource::Clipboard,
    InputSource::Selection,
    InputSource::Stdin,
];

const OUTPUTS: [OutputMode; 4] = [
    OutputMode::Notify,
    OutputMode::Dialog,
    OutputMode::Stdout,
    OutputMode::Silent,
];

/// Runs the configure command to edit default settings.
///
/// Lets the user pick the default backend, target language, input source,
/// output mode and exchange flag. API keys are left untouched.
pub fn run_configure(config_file: Option<&Path>) -> Result<()> {
    handle_prompt_cancellation(|| run_configure_inner(config_file))
}

fn run_configure_inner(config_file: Option<&Path>) -> Result<()> {
    let manager = SettingsManager::from_override(config_file)?;
    let mut settings = manager.load_or_default()?;
    let registry = BackendRegistry::with_defaults();

    print_current_defaults(&settings);

    let backends = registry.names();
    let backend = select_from("Default backend:", &backends, &settings.backend.as_str())?;
    settings.backend = backend.to_string();

    let catalog = registry.catalog(&settings.backend)?;
    settings.language = select_target_language(&catalog, &settings.language)?;
    settings.input = select_from("Default input:", &INPUTS, &settings.input)?;
    settings.output = select_from("Default output:", &OUTPUTS, &settings.output)?;
    settings.exchange = Confirm::new("Copy translations back to the clipboard?")
        .with_default(settings.exchange)
        .prompt()?;

    manager.save(&settings)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.settings_path().display())
    );

    Ok(())
}

fn print_current_defaults(settings: &SettingsFile) {
    println!("{}", Style::header("Current defaults"));
    println!("  {}   {}", Style::label("backend"), Style::value(&settings.backend));
    println!("  {}  {}", Style::label("language"), Style::value(&settings.language));
    println!("  {}     {}", Style::label("input"), Style::value(settings.input));
    println!("  {}    {}", Style::label("output"), Style::value(settings.output));
    println!("  {}  {}", Style::label("exchange"), Style::value(settings.exchange));
    println!();
}

fn select_from<T>(message: &str, options: &[T], current: &T) -> Result<T>
where
    T: Clone + Display + PartialEq,
{
    let default_index = options.iter().position(|o| o == current).unwrap_or(0);

    let selection = Select::new(message, options.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_target_language(catalog: &LanguageCatalog, current: &str) -> Result<String> {
    let languages = catalog.languages();
    let options: Vec<String> = languages
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_index = languages
        .iter()
        .position(|(code, _)| *code == current)
        .unwrap_or(0);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(code.to_string())
}
