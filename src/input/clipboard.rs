//! System clipboard access through `arboard`.
//!
//! On Linux the process that sets the clipboard has to keep serving it, so
//! writes are handed to a detached `babelclip serve-clipboard` helper that
//! outlives the current run.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Hidden subcommand run by the clipboard helper.
pub const SERVE_CLIPBOARD_COMMAND: &str = "serve-clipboard";

/// Writes the translation back to the clipboard.
pub trait ClipboardWriter {
    fn push(&self, text: &str) -> Result<()>;
}

pub struct SystemClipboard;

impl SystemClipboard {
    pub fn read() -> Result<String> {
        let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
        clipboard
            .get_text()
            .context("Failed to read text from clipboard")
    }

    #[cfg(target_os = "linux")]
    pub fn read_selection() -> Result<String> {
        use arboard::{GetExtLinux, LinuxClipboardKind};

        let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
        clipboard
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
            .context("Failed to read the primary selection")
    }

    #[cfg(not(target_os = "linux"))]
    pub fn read_selection() -> Result<String> {
        anyhow::bail!(
            "Reading the selection is only supported on Linux.\n\n\
             Use '--input clipboard' instead."
        )
    }
}

impl SystemClipboard {
    /// Sets the clipboard and blocks until another application replaces it.
    #[cfg(target_os = "linux")]
    pub fn serve(text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
        clipboard
            .set()
            .wait()
            .text(text.to_owned())
            .context("Failed to copy translation to clipboard")
    }

    #[cfg(not(target_os = "linux"))]
    pub fn serve(text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to access system clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to copy translation to clipboard")
    }
}

#[cfg(target_os = "linux")]
fn helper_command(exe: &std::path::Path) -> std::process::Command {
    use std::os::unix::process::CommandExt;
    use std::process::{Command, Stdio};

    let mut command = Command::new(exe);
    command
        .arg(SERVE_CLIPBOARD_COMMAND)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0);
    command
}

impl ClipboardWriter for SystemClipboard {
    // the helper is never waited on; it must outlive this process
    #[cfg(target_os = "linux")]
    #[allow(clippy::zombie_processes)]
    fn push(&self, text: &str) -> Result<()> {
        use std::io::Write;

        let exe = std::env::current_exe().context("Failed to locate the babelclip executable")?;
        let mut child = helper_command(&exe)
            .spawn()
            .context("Failed to start the clipboard helper")?;

        let mut stdin = child
            .stdin
            .take()
            .context("Clipboard helper has no stdin")?;
        stdin
            .write_all(text.as_bytes())
            .context("Failed to hand the translation to the clipboard helper")?;
        drop(stdin);

        tracing::debug!(pid = child.id(), "clipboard helper started");
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    fn push(&self, text: &str) -> Result<()> {
        Self::serve(text)
    }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use std::path::Path;
    use std::process::Stdio;

    #[test]
    fn test_helper_runs_hidden_subcommand() {
        let command = helper_command(Path::new("/usr/bin/babelclip"));

        assert_eq!(command.get_program(), "/usr/bin/babelclip");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec![SERVE_CLIPBOARD_COMMAND]);
    }

    #[test]
    fn test_helper_spawns_in_own_process_group() {
        let mut command = helper_command(Path::new("true"));
        command.stdin(Stdio::null());
        let status = command.status();
        assert!(status.is_ok_and(|s| s.success()));
    }
}
