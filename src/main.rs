use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use babelclip::cli::commands::{
    backends, configure, languages, save_config, serve_clipboard, translate,
};
use babelclip::cli::{Args, Command};
use babelclip::logging;
use babelclip::output::{self, OutputConfig};
use babelclip::ui::Style;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    logging::init(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("[Error]"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let options = args.resolve_options();
    let config_file = args.config_file.as_deref();

    match args.command {
        Some(Command::Languages { remote }) => {
            languages::print_languages(config_file, &options, remote).await?;
        }
        Some(Command::Backends) => {
            backends::print_backends(config_file)?;
        }
        Some(Command::Configure) => {
            configure::run_configure(config_file)?;
        }
        Some(Command::ServeClipboard) => {
            serve_clipboard::run_serve_clipboard()?;
        }
        None if args.save_config => {
            save_config::save_config(config_file, &options)?;
        }
        None => {
            let options = translate::TranslateOptions {
                config_file: args.config_file.clone(),
                message: args.message.clone(),
                resolve: options,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
