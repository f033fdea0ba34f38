use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::config::{ResolveOptions, ResolvedSettings, SettingsManager, resolve_settings};
use crate::input::{ClipboardWriter, InputReader, SystemClipboard, SystemInput};
use crate::present::{Delivery, Presenter, presenter_for};
use crate::translation::{BackendRegistry, Translation, TranslationBackend, TranslationRequest};
use crate::ui::Spinner;

/// Application name shown in notifications and dialog titles.
pub const APP_ID: &str = "babelclip";

pub struct TranslateOptions {
    pub config_file: Option<PathBuf>,
    pub message: Option<String>,
    pub resolve: ResolveOptions,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let manager = SettingsManager::from_override(options.config_file.as_deref())?;
    let settings = resolve_settings(&options.resolve, &manager.load_or_default()?);
    tracing::debug!(
        backend = %settings.backend,
        input = %settings.input,
        output = %settings.output,
        "resolved settings"
    );

    let backend = BackendRegistry::with_defaults()
        .create(&settings.backend, &settings.backend_config())
        .context("Failed to set up the translation backend")?;

    let source_text = InputReader::read(options.message.as_deref(), settings.input, &SystemInput)?;
    if source_text.trim().is_empty() {
        let origin = empty_input_origin(options.message.is_some(), &settings);
        bail!("Nothing to translate: {origin}");
    }

    let translation = translate_text(backend.as_ref(), &settings, &source_text).await?;

    let presenter = presenter_for(settings.output);
    let clipboard = settings.exchange.then_some(&SystemClipboard as &dyn ClipboardWriter);
    deliver(
        &settings,
        &source_text,
        &translation,
        presenter.as_ref(),
        clipboard,
    )
}

async fn translate_text(
    backend: &dyn TranslationBackend,
    settings: &ResolvedSettings,
    source_text: &str,
) -> Result<Translation> {
    let mut request = TranslationRequest::new(source_text, settings.target_lang.as_str());
    if let Some(source) = &settings.source_lang {
        request = request.with_source(source.as_str());
    }

    let spinner = Spinner::new("Translating...");
    let result = backend.execute(&request).await;
    spinner.stop();

    let translation = result.context("Translation request failed")?;
    tracing::info!(direction = %translation.direction, "translated");
    Ok(translation)
}

fn empty_input_origin(from_message: bool, settings: &ResolvedSettings) -> String {
    if from_message {
        "the message is empty".to_string()
    } else {
        format!("the {} is empty", settings.input)
    }
}

/// Copies to the clipboard before presenting, so a failing presenter does
/// not lose the exchange.
fn deliver(
    settings: &ResolvedSettings,
    source_text: &str,
    translation: &Translation,
    presenter: &dyn Presenter,
    clipboard: Option<&dyn ClipboardWriter>,
) -> Result<()> {
    if let Some(clipboard) = clipboard {
        clipboard.push(&translation.text)?;
        crate::status!("Translation copied to clipboard");
    }

    presenter.present(&Delivery {
        app_id: APP_ID,
        source_text,
        translated_text: &translation.text,
        target_language: &settings.target_lang,
    })
}
