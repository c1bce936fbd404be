//! Translate text use case

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;

use crate::domain::translation::{Language, SourceLanguage, TranslationRequest};

use super::ports::{
    Clipboard, ClipboardError, NotificationIcon, Notifier, TranslateApiError, Translator,
};

/// Errors from the translate use case
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Nothing to translate")]
    EmptyText,

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslateApiError),

    #[error("Missing API key. Set GEMINI_API_KEY or configure via 'lingo-clip config set api_key <key>'")]
    MissingApiKey,
}

/// Input parameters for the translate use case
#[derive(Debug, Clone)]
pub struct TranslateInput {
    /// The translation request
    pub request: TranslationRequest,
    /// Whether to copy the result to the clipboard
    pub enable_clipboard: bool,
    /// Whether to show notifications
    pub enable_notify: bool,
}

/// Observable phases of a translation request, in the order they occur.
/// The detecting phase is skipped when the source language is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatePhase {
    Detecting,
    Translating,
}

/// Output from the translate use case
#[derive(Debug, Clone)]
pub struct TranslateOutput {
    /// The translated text
    pub text: String,
    /// Source language resolved by detection (None when it was given or
    /// detection failed)
    pub detected_source: Option<Language>,
    /// Whether clipboard copy succeeded (if enabled)
    pub clipboard_copied: bool,
}

/// Translate text use case.
///
/// Resolves an ambiguous source language with a preliminary detection
/// request, translates, and performs the optional output actions.
pub struct TranslateTextUseCase<T, C, N>
where
    T: Translator + 'static,
    C: Clipboard,
    N: Notifier,
{
    translator: Arc<T>,
    clipboard: C,
    notifier: N,
    // At most one detection request is tracked; issuing a new one
    // aborts the previous.
    detection: Mutex<Option<AbortHandle>>,
}

impl<T, C, N> TranslateTextUseCase<T, C, N>
where
    T: Translator + 'static,
    C: Clipboard,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(translator: T, clipboard: C, notifier: N) -> Self {
        Self {
            translator: Arc::new(translator),
            clipboard,
            notifier,
            detection: Mutex::new(None),
        }
    }

    /// Abort the tracked in-flight detection request, if any
    pub async fn cancel_detection(&self) {
        if let Some(handle) = self.detection.lock().await.take() {
            handle.abort();
        }
    }

    /// Run a language-detection request in its own task, replacing (and
    /// aborting) any previously tracked detection.
    async fn detect_source(&self, text: &str) -> Result<Language, TranslateApiError> {
        let translator = Arc::clone(&self.translator);
        let text = text.to_owned();
        let task = tokio::spawn(async move { translator.detect_language(&text).await });

        {
            let mut tracked = self.detection.lock().await;
            if let Some(previous) = tracked.replace(task.abort_handle()) {
                previous.abort();
            }
        }

        match task.await {
            Ok(result) => result,
            Err(join_err) if join_err.is_cancelled() => Err(TranslateApiError::DetectionFailed),
            Err(join_err) => Err(TranslateApiError::RequestFailed(join_err.to_string())),
        }
    }

    /// Execute the translation workflow
    pub async fn execute(&self, input: TranslateInput) -> Result<TranslateOutput, TranslateError> {
        self.execute_observed(input, |_| {}).await
    }

    /// Execute the translation workflow, reporting each phase as it is
    /// entered. Used by the daemon to keep its session state in step
    /// with the request.
    pub async fn execute_observed<F>(
        &self,
        input: TranslateInput,
        on_phase: F,
    ) -> Result<TranslateOutput, TranslateError>
    where
        F: Fn(TranslatePhase),
    {
        let mut request = input.request;

        if request.is_empty() {
            return Err(TranslateError::EmptyText);
        }

        // Resolve ambiguous source with a preliminary detection request.
        // Detection failure is not fatal: the prompt works without a
        // named source language.
        let mut detected_source = None;
        if request.source.is_auto() {
            on_phase(TranslatePhase::Detecting);
            if let Ok(language) = self.detect_source(&request.text).await {
                request.source = SourceLanguage::Known(language);
                detected_source = Some(language);
            }
        }

        on_phase(TranslatePhase::Translating);

        if input.enable_notify {
            let _ = self
                .notifier
                .notify(
                    "LingoClip",
                    &format!("Translating to {}...", request.target.label()),
                    NotificationIcon::Processing,
                )
                .await;
        }

        let text = self.translator.translate(&request).await?;

        // Auto-copy is non-fatal
        let clipboard_copied = if input.enable_clipboard {
            match self.clipboard.copy(&text).await {
                Ok(()) => true,
                Err(ClipboardError::ClipboardUnavailable(_)) => {
                    eprintln!("Warning: clipboard unavailable, skipping copy");
                    false
                }
                Err(e) => {
                    eprintln!("Warning: clipboard copy failed: {}", e);
                    false
                }
            }
        } else {
            false
        };

        if input.enable_notify {
            let _ = self
                .notifier
                .notify("LingoClip", &text, NotificationIcon::Success)
                .await;
        }

        Ok(TranslateOutput {
            text,
            detected_source,
            clipboard_copied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use crate::domain::ocr::ImageData;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockTranslator {
        detections: AtomicUsize,
    }

    impl MockTranslator {
        fn new() -> Self {
            Self {
                detections: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Translator for MockTranslator {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<String, TranslateApiError> {
            Ok(format!("[{}] translated", request.source))
        }

        async fn detect_language(&self, _text: &str) -> Result<Language, TranslateApiError> {
            self.detections.fetch_add(1, Ordering::SeqCst);
            Ok(Language::Spanish)
        }
    }

    struct FailingDetector;

    #[async_trait]
    impl Translator for FailingDetector {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<String, TranslateApiError> {
            Ok(format!("[{}] translated", request.source))
        }

        async fn detect_language(&self, _text: &str) -> Result<Language, TranslateApiError> {
            Err(TranslateApiError::DetectionFailed)
        }
    }

    struct MockClipboard;

    #[async_trait]
    impl Clipboard for MockClipboard {
        async fn copy(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }

        async fn read_text(&self) -> Result<String, ClipboardError> {
            Ok("clipboard text".to_string())
        }

        async fn read_image(&self) -> Result<ImageData, ClipboardError> {
            Err(ClipboardError::NoImage)
        }
    }

    struct MockNotifier;

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            _message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    fn input(request: TranslationRequest) -> TranslateInput {
        TranslateInput {
            request,
            enable_clipboard: false,
            enable_notify: false,
        }
    }

    #[tokio::test]
    async fn execute_detects_auto_source() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);

        let output = use_case
            .execute(input(TranslationRequest::new("hola", Language::English)))
            .await
            .unwrap();

        assert_eq!(output.detected_source, Some(Language::Spanish));
        assert_eq!(output.text, "[es] translated");
    }

    #[tokio::test]
    async fn execute_skips_detection_for_known_source() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);

        let request = TranslationRequest::new("bonjour", Language::English)
            .with_source(SourceLanguage::Known(Language::French));
        let output = use_case.execute(input(request)).await.unwrap();

        assert!(output.detected_source.is_none());
        assert_eq!(output.text, "[fr] translated");
        assert_eq!(use_case.translator.detections.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn detection_failure_is_not_fatal() {
        let use_case = TranslateTextUseCase::new(FailingDetector, MockClipboard, MockNotifier);

        let output = use_case
            .execute(input(TranslationRequest::new("hola", Language::English)))
            .await
            .unwrap();

        assert!(output.detected_source.is_none());
        assert_eq!(output.text, "[auto] translated");
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);

        let result = use_case
            .execute(input(TranslationRequest::new("   ", Language::English)))
            .await;

        assert!(matches!(result, Err(TranslateError::EmptyText)));
    }

    #[tokio::test]
    async fn execute_with_clipboard_enabled() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);

        let output = use_case
            .execute(TranslateInput {
                request: TranslationRequest::new("hola", Language::English),
                enable_clipboard: true,
                enable_notify: false,
            })
            .await
            .unwrap();

        assert!(output.clipboard_copied);
    }

    #[tokio::test]
    async fn cancel_detection_with_none_tracked_is_noop() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);
        use_case.cancel_detection().await;
    }

    #[tokio::test]
    async fn phases_are_reported_in_order_for_auto_source() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);
        let phases = std::sync::Mutex::new(Vec::new());

        use_case
            .execute_observed(
                input(TranslationRequest::new("hola", Language::English)),
                |phase| phases.lock().unwrap().push(phase),
            )
            .await
            .unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec![TranslatePhase::Detecting, TranslatePhase::Translating]
        );
    }

    #[tokio::test]
    async fn detecting_phase_is_skipped_for_known_source() {
        let use_case =
            TranslateTextUseCase::new(MockTranslator::new(), MockClipboard, MockNotifier);
        let phases = std::sync::Mutex::new(Vec::new());

        let request = TranslationRequest::new("bonjour", Language::English)
            .with_source(SourceLanguage::Known(Language::French));
        use_case
            .execute_observed(input(request), |phase| phases.lock().unwrap().push(phase))
            .await
            .unwrap();

        assert_eq!(*phases.lock().unwrap(), vec![TranslatePhase::Translating]);
    }

    /// Counts drops of a pending detection future, i.e. aborts
    struct DropTally(Arc<AtomicUsize>);

    impl Drop for DropTally {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// First detection parks forever; later ones answer immediately
    struct GatedDetector {
        calls: AtomicUsize,
        aborted: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for GatedDetector {
        async fn translate(
            &self,
            request: &TranslationRequest,
        ) -> Result<String, TranslateApiError> {
            Ok(format!("[{}] translated", request.source))
        }

        async fn detect_language(&self, _text: &str) -> Result<Language, TranslateApiError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                let _tally = DropTally(Arc::clone(&self.aborted));
                return std::future::pending().await;
            }
            Ok(Language::Spanish)
        }
    }

    #[tokio::test]
    async fn new_detection_aborts_the_previous_one() {
        let aborted = Arc::new(AtomicUsize::new(0));
        let use_case = Arc::new(TranslateTextUseCase::new(
            GatedDetector {
                calls: AtomicUsize::new(0),
                aborted: Arc::clone(&aborted),
            },
            MockClipboard,
            MockNotifier,
        ));

        // First request parks inside its detection
        let first = tokio::spawn({
            let use_case = Arc::clone(&use_case);
            async move {
                use_case
                    .execute(input(TranslationRequest::new("hola", Language::English)))
                    .await
            }
        });
        while use_case.translator.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(aborted.load(Ordering::SeqCst), 0);

        // Second request replaces the tracked detection, aborting the first
        let second = use_case
            .execute(input(TranslationRequest::new("hallo", Language::English)))
            .await
            .unwrap();
        assert_eq!(second.detected_source, Some(Language::Spanish));

        // The first request survives its aborted detection and falls
        // back to translating without a named source
        let first_output = tokio::time::timeout(std::time::Duration::from_secs(5), first)
            .await
            .expect("first request should complete once its detection is aborted")
            .unwrap()
            .unwrap();
        assert!(first_output.detected_source.is_none());
        assert_eq!(first_output.text, "[auto] translated");

        assert_eq!(aborted.load(Ordering::SeqCst), 1);
        assert_eq!(use_case.translator.calls.load(Ordering::SeqCst), 2);
    }
}
