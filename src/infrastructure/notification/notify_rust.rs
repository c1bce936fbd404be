//! Desktop notification adapter using notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

const DEFAULT_APP_NAME: &str = "LingoClip";

/// How long a notification stays on screen. Translation results should
/// outlive the transient progress toasts.
const RESULT_TIMEOUT_MS: u32 = 8_000;
const STATUS_TIMEOUT_MS: u32 = 3_000;

pub struct NotifyRustNotifier {
    app_name: String,
}

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
        }
    }

    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

fn timeout_for(icon: NotificationIcon) -> Timeout {
    match icon {
        NotificationIcon::Success | NotificationIcon::Error => {
            Timeout::Milliseconds(RESULT_TIMEOUT_MS)
        }
        NotificationIcon::Info | NotificationIcon::Warning | NotificationIcon::Processing => {
            Timeout::Milliseconds(STATUS_TIMEOUT_MS)
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn urgency_for(icon: NotificationIcon) -> notify_rust::Urgency {
    use notify_rust::Urgency;

    match icon {
        NotificationIcon::Error => Urgency::Critical,
        NotificationIcon::Info | NotificationIcon::Success | NotificationIcon::Warning => {
            Urgency::Normal
        }
        NotificationIcon::Processing => Urgency::Low,
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();

        // Showing a notification can block on the session bus
        tokio::task::spawn_blocking(move || {
            let mut notification = Notification::new();
            notification
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon(icon.icon_name())
                .timeout(timeout_for(icon));

            #[cfg(all(unix, not(target_os = "macos")))]
            notification.urgency(urgency_for(icon));

            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_name() {
        let notifier = NotifyRustNotifier::default();
        assert_eq!(notifier.app_name, DEFAULT_APP_NAME);
    }

    #[test]
    fn custom_app_name() {
        let notifier = NotifyRustNotifier::with_app_name("TestApp");
        assert_eq!(notifier.app_name, "TestApp");
    }

    #[test]
    fn results_stay_longer_than_status_toasts() {
        assert_eq!(
            timeout_for(NotificationIcon::Success),
            Timeout::Milliseconds(RESULT_TIMEOUT_MS)
        );
        assert_eq!(
            timeout_for(NotificationIcon::Error),
            Timeout::Milliseconds(RESULT_TIMEOUT_MS)
        );
        assert_eq!(
            timeout_for(NotificationIcon::Processing),
            Timeout::Milliseconds(STATUS_TIMEOUT_MS)
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn errors_are_critical_and_progress_is_low() {
        use notify_rust::Urgency;

        assert_eq!(urgency_for(NotificationIcon::Error), Urgency::Critical);
        assert_eq!(urgency_for(NotificationIcon::Processing), Urgency::Low);
        assert_eq!(urgency_for(NotificationIcon::Success), Urgency::Normal);
    }
}
