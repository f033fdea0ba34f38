//! Delivery of a finished translation: stdout, desktop notification, or a
//! dialog window.
//!
//! Notifications and dialogs go through `notify-send` and `zenity`, so they
//! need a Linux desktop session. macOS is refused up front.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, ExitStatus};

/// Where the translation goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Stdout,
    #[default]
    Notify,
    Dialog,
    /// Print nothing (useful with `--exchange`).
    #[value(name = "none")]
    #[serde(rename = "none")]
    Silent,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Notify => "notify",
            Self::Dialog => "dialog",
            Self::Silent => "none",
        })
    }
}

/// What a presenter shows.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    pub app_id: &'a str,
    pub source_text: &'a str,
    pub translated_text: &'a str,
    pub target_language: &'a str,
}

impl Delivery<'_> {
    pub fn title(&self) -> String {
        format!("Translated to: {}", self.target_language)
    }
}

pub trait Presenter {
    fn present(&self, delivery: &Delivery<'_>) -> Result<()>;
}

pub struct StdoutPresenter;

impl Presenter for StdoutPresenter {
    fn present(&self, delivery: &Delivery<'_>) -> Result<()> {
        write_translation(&mut io::stdout().lock(), delivery)
    }
}

fn write_translation(out: &mut impl Write, delivery: &Delivery<'_>) -> Result<()> {
    writeln!(out, "{}", delivery.translated_text)?;
    out.flush()?;
    Ok(())
}

pub struct NotifyPresenter;

impl NotifyPresenter {
    fn args(delivery: &Delivery<'_>) -> Vec<String> {
        vec![
            "--app-name".to_string(),
            delivery.app_id.to_string(),
            delivery.title(),
            delivery.translated_text.to_string(),
        ]
    }
}

impl Presenter for NotifyPresenter {
    fn present(&self, delivery: &Delivery<'_>) -> Result<()> {
        run_desktop_tool("notify-send", &Self::args(delivery), &[0])
    }
}

pub struct DialogPresenter;

impl DialogPresenter {
    fn args(delivery: &Delivery<'_>) -> Vec<String> {
        vec![
            "--info".to_string(),
            "--no-markup".to_string(),
            "--title".to_string(),
            format!("{} - {}", delivery.app_id, delivery.title()),
            "--text".to_string(),
            format!("{}\n\n{}", delivery.source_text, delivery.translated_text),
        ]
    }
}

impl Presenter for DialogPresenter {
    fn present(&self, delivery: &Delivery<'_>) -> Result<()> {
        // zenity exits 1 when the window is closed instead of confirmed
        run_desktop_tool("zenity", &Self::args(delivery), &[0, 1])
    }
}

pub struct SilentPresenter;

impl Presenter for SilentPresenter {
    fn present(&self, _delivery: &Delivery<'_>) -> Result<()> {
        Ok(())
    }
}

fn run_desktop_tool(program: &str, args: &[String], accepted: &[i32]) -> Result<()> {
    if cfg!(target_os = "macos") {
        bail!("Notifications and dialogs are only supported on Linux. Use '--output stdout'.");
    }

    tracing::debug!(program, "launching desktop tool");
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run '{program}'. Is it installed?"))?;

    check_exit(program, status, accepted)
}

fn check_exit(program: &str, status: ExitStatus, accepted: &[i32]) -> Result<()> {
    match status.code() {
        Some(code) if accepted.contains(&code) => Ok(()),
        _ => bail!("'{program}' exited with {status}"),
    }
}

pub fn presenter_for(mode: OutputMode) -> Box<dyn Presenter> {
    match mode {
        OutputMode::Stdout => Box::new(StdoutPresenter),
        OutputMode::Notify => Box::new(NotifyPresenter),
        OutputMode::Dialog => Box::new(DialogPresenter),
        OutputMode::Silent => Box::new(SilentPresenter),
    }
}
