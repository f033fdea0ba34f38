//! Clipboard helper started by `--exchange`.

use anyhow::{Context, Result};
use std::io;

use crate::input::SystemClipboard;

/// Reads the translation from stdin and keeps serving it as the clipboard
/// contents until another application takes over.
pub fn run_serve_clipboard() -> Result<()> {
    let text = io::read_to_string(io::stdin().lock())
        .context("Failed to read clipboard text from stdin")?;
    SystemClipboard::serve(&text)
}
