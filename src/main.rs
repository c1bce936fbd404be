//! LingoClip CLI entry point

use std::process::ExitCode;

use clap::Parser;

use lingo_clip::cli::{
    app::{load_merged_config, print_languages, run_oneshot, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_daemon_command,
    presenter::Presenter,
    DaemonOptions, TranslateOptions,
};
use lingo_clip::domain::config::AppConfig;
use lingo_clip::domain::translation::{Language, SourceLanguage};
use lingo_clip::infrastructure::{OcrEnginePreference, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Daemon { action }) => {
            if let Err(e) = handle_daemon_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Languages) => {
            print_languages(&presenter);
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_key: None, // API key comes from env/file only
        ocr_api_key: None,
        target_lang: cli.to.clone(),
        clipboard: if cli.copy { Some(true) } else { None },
        notify: if cli.notify { Some(true) } else { None },
        ocr_engine: cli.ocr_engine.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse target language
    let target = match config.target_lang.as_ref() {
        Some(s) => match s.parse::<Language>() {
            Ok(lang) => lang,
            Err(e) => {
                presenter.error(&format!("Invalid target language: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Language::default(),
    };

    // Parse source language (CLI only, defaults to auto-detect)
    let source = match cli.from.as_ref() {
        Some(s) => match s.parse::<SourceLanguage>() {
            Ok(lang) => lang,
            Err(e) => {
                presenter.error(&format!("Invalid source language: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => SourceLanguage::Auto,
    };

    // Parse OCR engine preference
    let ocr_engine = match config
        .ocr_engine
        .as_deref()
        .map(str::parse::<OcrEnginePreference>)
    {
        Some(Ok(preference)) => preference,
        Some(Err(e)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => OcrEnginePreference::Auto,
    };

    // Route to appropriate handler
    if cli.daemon {
        let options = DaemonOptions {
            target,
            source,
            clipboard: config.clipboard_or_default(),
            notify: config.notify_or_default(),
            ocr_engine,
        };

        run_daemon(options).await
    } else {
        let options = TranslateOptions {
            text: cli.text.clone(),
            image: cli.image.clone(),
            ocr_only: cli.ocr_only,
            target,
            source,
            context: cli.context.clone(),
            clipboard: config.clipboard_or_default(),
            notify: config.notify_or_default(),
            ocr_engine,
        };

        run_oneshot(options).await
    }
}
