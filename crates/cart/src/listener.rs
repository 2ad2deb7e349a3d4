//! Subscriptions to cart changes.

use crate::{CartEvent, CartLine};

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription({})", self.0)
    }
}

/// Receives every change made to a cart.
///
/// Listeners are called synchronously after the change is persisted and
/// with no cart lock held, so a listener may read the store again.
pub trait CartListener: Send + Sync {
    /// Handles a change. `lines` is the cart state after the change.
    fn on_cart_change(&self, event: &CartEvent, lines: &[CartLine]);
}

impl<F> CartListener for F
where
    F: Fn(&CartEvent, &[CartLine]) + Send + Sync,
{
    fn on_cart_change(&self, event: &CartEvent, lines: &[CartLine]) {
        self(event, lines)
    }
}
