//! Port interfaces for user-visible side effects
//!
//! Implementations must be fire-and-forget: they never fail and never block
//! the caller on the front end.

use backoffice_domain::NotificationLevel;

/// Surface a message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    fn info(&self, message: &str) {
        self.notify(NotificationLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.notify(NotificationLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// Move the front end to another route (e.g. the login screen).
pub trait SessionNavigator: Send + Sync {
    fn navigate(&self, route: &str);
}
