//! Notifier port: user-facing messages.

use homedash_domain::notification::Notification;

/// Fire-and-forget sink for [`Notification`]s.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier> Notifier for std::sync::Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}
