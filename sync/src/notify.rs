//! Transient user notifications (toasts).
//!
//! `Notifier` is a clonable handle over an unbounded channel; the consumer
//! end renders the messages. Emission never blocks, and once the receiver is
//! gone (no UI listening) it becomes a no-op.

use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(NotificationKind::Error, message.into());
    }

    fn emit(&self, kind: NotificationKind, message: String) {
        tracing::debug!(?kind, %message, "notification");
        let _ = self.tx.send(Notification { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notifications_arrive_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.success("Activity created successfully");
        notifier.error("An error occurred");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, NotificationKind::Success);
        assert_eq!(first.message, "Activity created successfully");

        let second = rx.recv().await.unwrap();
        assert_eq!(second.kind, NotificationKind::Error);
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.success("nobody listening");
    }
}
