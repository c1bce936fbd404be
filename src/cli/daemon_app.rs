//! Daemon app runner

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::application::ports::{Clipboard, ClipboardError, NotificationIcon, Notifier};
use crate::application::{
    ExtractInput, ExtractTextUseCase, TranslateInput, TranslateOutput, TranslatePhase,
    TranslateTextUseCase,
};
use crate::domain::daemon::{DaemonSession, DaemonState};
use crate::domain::ocr::ImageData;
use crate::domain::translation::TranslationRequest;
use crate::infrastructure::{
    create_ocr_engine, ArboardClipboard, GeminiTranslator, NotifyRustNotifier,
};

use super::app::{get_api_key, lookup_api_key, lookup_ocr_api_key, EXIT_ERROR, EXIT_SUCCESS};
use super::args::DaemonOptions;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{DaemonSignal, DaemonSignalHandler};
use super::socket::{DaemonSocketServer, SocketPath};

type DaemonUseCase = TranslateTextUseCase<GeminiTranslator, ArboardClipboard, NotifyRustNotifier>;
type Translation = JoinHandle<Result<TranslateOutput, String>>;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    // Load API key
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters and use case
    let translator = GeminiTranslator::new(api_key);
    let use_case = Arc::new(TranslateTextUseCase::new(
        translator,
        ArboardClipboard::new(),
        NotifyRustNotifier::new(),
    ));

    // Setup signal handler (returns handler + sender for socket server)
    let (mut signals, signal_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Setup socket server
    let socket_path = SocketPath::new();
    let mut socket_server = DaemonSocketServer::new(socket_path.clone());

    if let Err(e) = socket_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Session state shared with the socket server for status queries
    let session = Arc::new(Mutex::new(DaemonSession::new()));
    let session_for_socket = Arc::clone(&session);

    // Spawn socket server task
    tokio::spawn(async move {
        let _ = socket_server
            .run(signal_tx, move || {
                // Use std::sync::Mutex - safe because lock is very brief
                session_for_socket
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .state()
            })
            .await;
    });

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | SIGINT: exit",
        std::process::id(),
        socket_path.path().display()
    ));

    // Main signal loop
    let result = daemon_loop(&use_case, &mut signals, &presenter, &session, &options).await;

    // Cleanup (socket server Drop will clean up socket file)
    let _ = pid_file.release();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Events the daemon loop reacts to
enum LoopEvent {
    Signal(Option<DaemonSignal>),
    Finished(Result<Result<TranslateOutput, String>, tokio::task::JoinError>),
}

async fn daemon_loop(
    use_case: &Arc<DaemonUseCase>,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    session: &Arc<Mutex<DaemonSession>>,
    options: &DaemonOptions,
) -> bool {
    let mut running: Option<Translation> = None;

    loop {
        let event = match running.as_mut() {
            Some(task) => tokio::select! {
                sig = signals.recv() => LoopEvent::Signal(sig),
                result = task => LoopEvent::Finished(result),
            },
            None => LoopEvent::Signal(signals.recv().await),
        };

        match event {
            LoopEvent::Finished(result) => {
                running = None;
                finish_session(session);
                match result {
                    Ok(Ok(output)) => {
                        presenter.output(&output.text);
                        if output.clipboard_copied {
                            presenter.info("Copied to clipboard");
                        }
                        presenter.daemon_status("Idle");
                    }
                    Ok(Err(e)) => {
                        presenter.error(&e);
                        if options.notify {
                            let notifier = NotifyRustNotifier::new();
                            let _ = notifier
                                .notify("LingoClip", &e, NotificationIcon::Error)
                                .await;
                        }
                        presenter.daemon_status("Idle (error)");
                    }
                    Err(join_err) if join_err.is_cancelled() => {
                        presenter.daemon_status("Request cancelled");
                    }
                    Err(join_err) => {
                        presenter.error(&format!("Translation task failed: {}", join_err));
                        presenter.daemon_status("Idle (error)");
                    }
                }
            }
            LoopEvent::Signal(Some(DaemonSignal::Translate)) => {
                if running.is_some() {
                    presenter.warn("Request already in flight, please wait");
                    continue;
                }
                begin_session(session, options.source.is_auto());
                presenter.daemon_status("Translating clipboard...");
                let task = tokio::spawn(translate_clipboard(
                    Arc::clone(use_case),
                    options.clone(),
                    Arc::clone(session),
                ));
                running = Some(task);
            }
            LoopEvent::Signal(Some(DaemonSignal::Cancel)) => match running.take() {
                Some(task) => {
                    task.abort();
                    use_case.cancel_detection().await;
                    finish_session(session);
                    presenter.daemon_status("Request cancelled");
                }
                None => presenter.warn("Nothing in flight, nothing to cancel"),
            },
            LoopEvent::Signal(Some(DaemonSignal::Shutdown)) => {
                if let Some(task) = running.take() {
                    task.abort();
                    use_case.cancel_detection().await;
                }
                presenter.daemon_status("Shutting down...");
                return true;
            }
            LoopEvent::Signal(None) => {
                // Channel closed
                return false;
            }
        }
    }
}

/// Mark the session busy. Requests with an auto source start in the
/// detecting state, known sources go straight to translating.
fn begin_session(session: &Arc<Mutex<DaemonSession>>, auto_source: bool) {
    let mut guard = session.lock().unwrap_or_else(|e| e.into_inner());
    let _ = if auto_source {
        guard.start_detection()
    } else {
        guard.start_translation()
    };
}

/// Advance the session as the use case moves through its phases, so
/// `daemon status` reports translating once detection has finished.
/// Transitions the session already made (known-source requests begin
/// in translating) are rejected by the state machine and ignored.
fn apply_phase(session: &Arc<Mutex<DaemonSession>>, phase: TranslatePhase) {
    let mut guard = session.lock().unwrap_or_else(|e| e.into_inner());
    let _ = match phase {
        TranslatePhase::Detecting => guard.start_detection(),
        TranslatePhase::Translating => guard.start_translation(),
    };
}

/// Return the session to idle from whichever busy state it is in
fn finish_session(session: &Arc<Mutex<DaemonSession>>) {
    let mut guard = session.lock().unwrap_or_else(|e| e.into_inner());
    let _ = match guard.state() {
        DaemonState::Translating => guard.complete(),
        DaemonState::Detecting => guard.cancel(),
        DaemonState::Idle => Ok(()),
    };
}

/// Translate whatever is on the clipboard. Images are routed through
/// OCR first.
async fn translate_clipboard(
    use_case: Arc<DaemonUseCase>,
    options: DaemonOptions,
    session: Arc<Mutex<DaemonSession>>,
) -> Result<TranslateOutput, String> {
    let clipboard = ArboardClipboard::new();

    let text = match clipboard.read_image().await {
        Ok(image) => extract_text(image, &options).await?,
        Err(ClipboardError::NoImage) => match clipboard.read_text().await {
            Ok(text) => text,
            Err(ClipboardError::Empty) => return Err("Clipboard is empty".to_string()),
            Err(e) => return Err(e.to_string()),
        },
        Err(e) => return Err(e.to_string()),
    };

    let request = TranslationRequest::new(text, options.target).with_source(options.source);

    use_case
        .execute_observed(
            TranslateInput {
                request,
                enable_clipboard: options.clipboard,
                enable_notify: options.notify,
            },
            move |phase| apply_phase(&session, phase),
        )
        .await
        .map_err(|e| e.to_string())
}

/// Run a clipboard image through the configured OCR engine
async fn extract_text(image: ImageData, options: &DaemonOptions) -> Result<String, String> {
    let gemini_key = lookup_api_key().await;
    let vision_key = lookup_ocr_api_key().await;

    let (engine, _kind) = create_ocr_engine(
        options.ocr_engine,
        gemini_key.as_deref(),
        vision_key.as_deref(),
    )
    .await
    .map_err(|e| e.to_string())?;

    let extract = ExtractTextUseCase::new(engine, NotifyRustNotifier::new());
    extract
        .execute(ExtractInput {
            image,
            enable_notify: options.notify,
        })
        .await
        .map(|output| output.text)
        .map_err(|e| e.to_string())
}
