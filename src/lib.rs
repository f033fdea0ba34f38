//! # babelclip - Clipboard Translation CLI
//!
//! `babelclip` translates the clipboard, the primary selection, stdin or a
//! message through an online translation service and shows the result on
//! stdout, as a desktop notification or in a dialog.
//!
//! ## Features
//!
//! - **Automatic detection**: The source language is detected unless given
//! - **Local validation**: Unsupported pairs fail before any request is made
//! - **Typed service errors**: Every API status code maps to an [`ErrorKind`]
//! - **Pluggable backends**: Yandex Translate ships built in
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate the clipboard into the default language
//! babelclip
//!
//! # Translate a message into Spanish on stdout
//! babelclip -m "Good morning" -t es -o stdout
//!
//! # Store an API key and defaults
//! babelclip -a trnsl.1.1.xxx -t de --save-config
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/babelclip/settings.json`:
//!
//! ```json
//! {
//!   "default_backend": "yandex",
//!   "backend": { "yandex": { "api_key": "trnsl.1.1.xxx" } },
//!   "default_language": "de",
//!   "default_input": "clipboard",
//!   "default_output": "notify",
//!   "default_exchange": false
//! }
//! ```
//!
//! [`ErrorKind`]: translation::ErrorKind

/// Command-line interface definitions and handlers.
pub mod cli;

/// Settings file management and resolution.
pub mod config;

/// File system utilities.
pub mod fs;

/// Text sources: clipboard, selection, stdin.
pub mod input;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Delivery of translations: stdout, notification, dialog.
pub mod present;

/// Translation backends and the Yandex client.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
