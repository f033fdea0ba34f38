use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Read};

use super::clipboard::SystemClipboard;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Where the text to translate comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    #[default]
    Clipboard,
    /// The primary selection (X11/Wayland).
    Selection,
    Stdin,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Clipboard => "clipboard",
            Self::Selection => "selection",
            Self::Stdin => "stdin",
        })
    }
}

/// Pulls raw text from an input source.
pub trait InputProvider {
    fn pull(&self, source: InputSource) -> Result<String>;
}

/// Reads the real clipboard, selection and stdin.
pub struct SystemInput;

impl InputProvider for SystemInput {
    fn pull(&self, source: InputSource) -> Result<String> {
        match source {
            InputSource::Clipboard => SystemClipboard::read(),
            InputSource::Selection => SystemClipboard::read_selection(),
            InputSource::Stdin => read_stdin(),
        }
    }
}

pub struct InputReader;

impl InputReader {
    /// An explicit `message` wins over the configured source.
    pub fn read(
        message: Option<&str>,
        source: InputSource,
        provider: &dyn InputProvider,
    ) -> Result<String> {
        let text = match message {
            Some(message) => message.to_string(),
            None => provider.pull(source)?,
        };

        if text.len() > MAX_INPUT_SIZE {
            bail!(
                "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).",
                text.len() as f64 / 1024.0 / 1024.0
            );
        }

        Ok(text)
    }
}

#[allow(clippy::significant_drop_tightening)]
fn read_stdin() -> Result<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 8192];
    let mut stdin = io::stdin().lock();

    loop {
        let bytes_read = stdin
            .read(&mut chunk)
            .context("Failed to read from stdin")?;

        if bytes_read == 0 {
            break;
        }

        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.len() > MAX_INPUT_SIZE {
            bail!(
                "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).",
                buffer.len() as f64 / 1024.0 / 1024.0
            );
        }
    }

    String::from_utf8(buffer).context("Input is not valid UTF-8")
}
