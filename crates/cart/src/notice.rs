//! Transient user notifications.

use std::sync::{Mutex, PoisonError};

/// A short message shown to the shopper after a cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A new line was added.
    Added { title: String },

    /// An add merged into an existing line.
    AddedMore { title: String, quantity: u32 },

    Removed,

    Cleared,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Added { title } => write!(f, "Added {title} to your cart"),
            Notice::AddedMore { title, quantity } => {
                write!(f, "Added {quantity} more {title} to your cart")
            }
            Notice::Removed => write!(f, "Item removed from your cart"),
            Notice::Cleared => write!(f, "Cart cleared"),
        }
    }
}

/// Fire-and-forget sink for notices, such as a toast surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::info!(notice = %notice, "cart notice");
    }
}

/// Discards notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: &Notice) {}
}

/// Keeps every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the most recent notice.
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        let added = Notice::Added {
            title: "Classic Tee".to_string(),
        };
        assert_eq!(added.to_string(), "Added Classic Tee to your cart");

        let more = Notice::AddedMore {
            title: "Classic Tee".to_string(),
            quantity: 2,
        };
        assert_eq!(more.to_string(), "Added 2 more Classic Tee to your cart");

        assert_eq!(Notice::Removed.to_string(), "Item removed from your cart");
        assert_eq!(Notice::Cleared.to_string(), "Cart cleared");
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&Notice::Removed);
        notifier.notify(&Notice::Cleared);

        assert_eq!(notifier.notices(), vec![Notice::Removed, Notice::Cleared]);
        assert_eq!(notifier.last(), Some(Notice::Cleared));
    }
}
