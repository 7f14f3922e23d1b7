//! Notifier that writes user-facing messages to the log

use backoffice_core::Notifier;
use backoffice_domain::NotificationLevel;
use tracing::{error, info, warn};

/// Forwards notifications to `tracing` at the matching level.
///
/// Used by headless consumers and as the gateway's default notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(target: "backoffice::notify", level = %level, "{message}");
            }
            NotificationLevel::Warning => {
                warn!(target: "backoffice::notify", level = %level, "{message}");
            }
            NotificationLevel::Error => {
                error!(target: "backoffice::notify", level = %level, "{message}");
            }
        }
    }
}
