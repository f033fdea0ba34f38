//! XDG-style location of the settings directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "babelclip";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/babelclip` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/babelclip` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}
