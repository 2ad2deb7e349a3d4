//! Cart summary read model, updated from cart events.

use std::sync::{Arc, PoisonError, RwLock};

use catalog::Money;

use crate::store::totals;
use crate::{CartEvent, CartLine, CartListener};

/// Totals shown in a header badge or mini-cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    pub item_count: u64,
    pub subtotal: Money,
    pub line_count: usize,
    /// Number of events applied since creation.
    pub events_seen: u64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// Keeps a [`CartSummary`] up to date by applying each [`CartEvent`] as a
/// delta instead of rescanning the cart.
///
/// Subscribe it to a store with `store.subscribe(Arc::new(view.clone()))`.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct CartSummaryView {
    state: Arc<RwLock<CartSummary>>,
}

impl CartSummaryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view seeded from existing lines.
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let view = Self::new();
        view.rebuild(lines);
        view
    }

    /// Returns the current summary.
    pub fn summary(&self) -> CartSummary {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Recomputes the totals from scratch.
    pub fn rebuild(&self, lines: &[CartLine]) {
        let (item_count, subtotal) = totals(lines);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.item_count = item_count;
        state.subtotal = subtotal;
        state.line_count = lines.len();
    }

    /// Applies one event.
    pub fn apply(&self, event: &CartEvent, lines: &[CartLine]) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        match event {
            CartEvent::LineAdded {
                quantity,
                unit_price,
                ..
            } => {
                state.item_count += u64::from(*quantity);
                state.subtotal += unit_price.multiply(*quantity);
                state.line_count += 1;
            }
            CartEvent::QuantityIncreased {
                old_quantity,
                new_quantity,
                unit_price,
                ..
            }
            | CartEvent::QuantityUpdated {
                old_quantity,
                new_quantity,
                unit_price,
                ..
            } => {
                state.item_count = (state.item_count + u64::from(*new_quantity))
                    .saturating_sub(u64::from(*old_quantity));
                state.subtotal += unit_price.multiply(*new_quantity);
                state.subtotal -= unit_price.multiply(*old_quantity);
            }
            CartEvent::LineRemoved {
                quantity,
                unit_price,
                ..
            } => {
                state.item_count = state.item_count.saturating_sub(u64::from(*quantity));
                state.subtotal -= unit_price.multiply(*quantity);
                state.line_count = state.line_count.saturating_sub(1);
            }
            CartEvent::Cleared { .. } => {
                state.item_count = 0;
                state.subtotal = Money::zero();
                state.line_count = 0;
            }
            CartEvent::Reloaded { .. } => {
                let (item_count, subtotal) = totals(lines);
                state.item_count = item_count;
                state.subtotal = subtotal;
                state.line_count = lines.len();
            }
        }

        state.events_seen += 1;
    }
}

impl CartListener for CartSummaryView {
    fn on_cart_change(&self, event: &CartEvent, lines: &[CartLine]) {
        self.apply(event, lines);
    }
}
