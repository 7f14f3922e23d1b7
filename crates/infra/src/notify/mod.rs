//! Notifier implementations

pub mod center;
pub mod tracing_notifier;

pub use center::NotificationCenter;
pub use tracing_notifier::TracingNotifier;
