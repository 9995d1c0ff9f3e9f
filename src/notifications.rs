use serde_json::Value;

use crate::error::NotifyError;

/// Push notification delivery, abstracted behind a one-method collaborator so
/// the broadcast job doesn't depend on any particular push provider (FCM or
/// otherwise). Mirrors the original's "send to user id with title/body/data"
/// shape exactly: the core never retries a failed send, it only logs it.
pub trait PushNotifier: Send + Sync {
    fn send_to_user(&self, user_id: &str, title: &str, body: &str, data: &Value) -> Result<(), NotifyError>;
}

/// Logs the notification instead of sending it, for tests and the demo
/// binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingNotifier;

impl PushNotifier for LoggingNotifier {
    fn send_to_user(&self, user_id: &str, title: &str, body: &str, data: &Value) -> Result<(), NotifyError> {
        log::info!("push notification (not actually sent) to {user_id}: {title} - {body} {data}");
        Ok(())
    }
}
