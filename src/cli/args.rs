use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolveOptions;
use crate::input::InputSource;
use crate::present::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "babelclip")]
#[command(about = "Translate the clipboard, the selection or a message")]
#[command(version)]
pub struct Args {
    /// API key for the selected backend
    #[arg(short = 'a', long, global = true)]
    pub api_key: Option<String>,

    /// Translation backend (default: yandex)
    #[arg(short = 'b', long, global = true)]
    pub backend: Option<String>,

    /// Settings file to load and save
    #[arg(short = 'c', long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Source language code (skips auto detection)
    #[arg(short = 's', long)]
    pub source_lang: Option<String>,

    /// Target language code (overrides settings)
    #[arg(short = 't', long)]
    pub target_lang: Option<String>,

    /// Text to translate (overrides clipboard and selection)
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// Where the text is taken from
    #[arg(short = 'i', long, value_enum)]
    pub input: Option<InputSource>,

    /// Where the translation goes
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputMode>,

    /// Also copy the translation to the clipboard
    #[arg(short = 'x', long)]
    pub exchange: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Save the given options to the settings file and exit
    #[arg(long)]
    pub save_config: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More diagnostic logging (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            api_key: self.api_key.clone(),
            backend: self.backend.clone(),
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            input: self.input,
            output: self.output,
            exchange: self.exchange,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List supported language codes
    Languages {
        /// Ask the service for its live list of directions
        #[arg(long)]
        remote: bool,
    },
    /// List available translation backends
    Backends,
    /// Interactively edit the default settings
    Configure,
    /// Holds clipboard text read from stdin until another application
    /// replaces it
    #[command(name = "serve-clipboard", hide = true)]
    ServeClipboard,
}
