//! Subcommand implementations.

/// Backend listing command handler.
pub mod backends;

/// Configure command handler.
pub mod configure;

/// Language listing command handler.
pub mod languages;

/// `--save-config` handler.
pub mod save_config;

/// Clipboard helper process.
pub mod serve_clipboard;

/// Translation command handler.
pub mod translate;
