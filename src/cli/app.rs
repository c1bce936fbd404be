//! Main app runner for one-shot mode

use std::env;
use std::path::Path;
use std::process::ExitCode;

use crate::application::ports::{Clipboard, ClipboardError, ConfigStore};
use crate::application::{ExtractInput, ExtractTextUseCase, TranslateInput, TranslateTextUseCase};
use crate::domain::config::AppConfig;
use crate::domain::ocr::ImageData;
use crate::domain::translation::{TranslationRequest, ALL_LANGUAGES};
use crate::infrastructure::{
    create_ocr_engine, ArboardClipboard, GeminiTranslator, NotifyRustNotifier, OcrEnginePreference,
    XdgConfigStore,
};

use super::args::TranslateOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the one-shot translation
pub async fn run_oneshot(options: TranslateOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Resolve input text: explicit argument, image file, or clipboard
    let (text, from_ocr) = if let Some(path) = options.image.clone() {
        match extract_from_file(&path, &options, &mut presenter).await {
            Ok(text) => (text, true),
            Err(e) => {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else if let Some(text) = options.text.clone() {
        (text, false)
    } else {
        match read_clipboard_input(&options, &mut presenter).await {
            Ok(resolved) => resolved,
            Err(e) => {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    // OCR-only mode prints the extracted text and stops
    if options.ocr_only {
        if !from_ocr {
            presenter.error("Nothing to read: --ocr-only needs an image file or a clipboard image");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        presenter.output(&text);
        if options.clipboard {
            copy_to_clipboard(&text, &presenter).await;
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    // Load API key from config or environment
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters and use case
    let translator = GeminiTranslator::new(api_key);
    let clipboard = ArboardClipboard::new();
    let notifier = NotifyRustNotifier::new();
    let use_case = TranslateTextUseCase::new(translator, clipboard, notifier);

    let mut request = TranslationRequest::new(text, options.target).with_source(options.source);
    if let Some(context) = options.context.clone() {
        request = request.with_context(context);
    }

    let input = TranslateInput {
        request,
        enable_clipboard: options.clipboard,
        enable_notify: options.notify,
    };

    presenter.start_spinner(&format!("Translating to {}...", options.target.label()));

    match use_case.execute(input).await {
        Ok(output) => {
            match output.detected_source {
                Some(language) => presenter.spinner_success(&format!(
                    "Translated from {} to {}",
                    language.label(),
                    options.target.label()
                )),
                None => presenter.spinner_success(&format!(
                    "Translated to {}",
                    options.target.label()
                )),
            }

            // Output translation to stdout
            presenter.output(&output.text);

            if output.clipboard_copied {
                presenter.info("Copied to clipboard");
            }

            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail("Translation failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the supported language table
pub fn print_languages(presenter: &Presenter) {
    for language in ALL_LANGUAGES {
        presenter.key_value(language.code(), language.label());
    }
}

/// Read an image file and run it through the configured OCR engine
async fn extract_from_file(
    path: &Path,
    options: &TranslateOptions,
    presenter: &mut Presenter,
) -> Result<String, String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let image = ImageData::from_bytes(bytes)
        .ok_or_else(|| format!("{} is not a supported image format", path.display()))?;

    run_ocr(image, options.ocr_engine, options.notify, presenter).await
}

/// Read translation input from the clipboard. An image on the clipboard
/// takes precedence over text and is routed through OCR.
async fn read_clipboard_input(
    options: &TranslateOptions,
    presenter: &mut Presenter,
) -> Result<(String, bool), String> {
    let clipboard = ArboardClipboard::new();

    match clipboard.read_image().await {
        Ok(image) => {
            let text = run_ocr(image, options.ocr_engine, options.notify, presenter).await?;
            Ok((text, true))
        }
        Err(ClipboardError::NoImage) => match clipboard.read_text().await {
            Ok(text) => Ok((text, false)),
            Err(ClipboardError::Empty) => Err("Clipboard is empty".to_string()),
            Err(e) => Err(e.to_string()),
        },
        Err(e) => Err(e.to_string()),
    }
}

/// Run OCR on an image using the preferred engine
async fn run_ocr(
    image: ImageData,
    preference: OcrEnginePreference,
    notify: bool,
    presenter: &mut Presenter,
) -> Result<String, String> {
    let gemini_key = lookup_api_key().await;
    let vision_key = lookup_ocr_api_key().await;

    let (engine, kind) =
        create_ocr_engine(preference, gemini_key.as_deref(), vision_key.as_deref())
            .await
            .map_err(|e| e.to_string())?;

    presenter.start_spinner(&format!("Reading image ({})...", kind));

    let use_case = ExtractTextUseCase::new(engine, NotifyRustNotifier::new());
    match use_case
        .execute(ExtractInput {
            image,
            enable_notify: notify,
        })
        .await
    {
        Ok(output) => {
            presenter.spinner_success(&format!("Text extracted ({})", output.image_size));
            Ok(output.text)
        }
        Err(e) => {
            presenter.spinner_fail("OCR failed");
            Err(e.to_string())
        }
    }
}

/// Copy text to the clipboard, reporting failures without aborting
async fn copy_to_clipboard(text: &str, presenter: &Presenter) {
    let clipboard = ArboardClipboard::new();
    match clipboard.copy(text).await {
        Ok(()) => presenter.info("Copied to clipboard"),
        Err(e) => presenter.warn(&format!("Clipboard copy failed: {}", e)),
    }
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    lookup_api_key().await.ok_or_else(|| {
        "Missing API key. Set GEMINI_API_KEY environment variable or run 'lingo-clip config set api_key <key>'".to_string()
    })
}

/// Look up the Gemini API key without failing when absent
pub async fn lookup_api_key() -> Option<String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    config.api_key.filter(|k| !k.is_empty())
}

/// Look up the Cloud Vision API key without failing when absent
pub async fn lookup_ocr_api_key() -> Option<String> {
    if let Ok(key) = env::var("VISION_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }

    let store = XdgConfigStore::new();
    let config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    config.ocr_api_key.filter(|k| !k.is_empty())
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        api_key: env::var("GEMINI_API_KEY").ok().filter(|s| !s.is_empty()),
        ocr_api_key: env::var("VISION_API_KEY").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
