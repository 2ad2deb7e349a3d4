//! Cart change events delivered to subscribers.

use catalog::Money;
use common::LineIdentity;
use serde::{Deserialize, Serialize};

/// Something that happened to the cart.
///
/// One event is published per effective mutation, after the new state has
/// been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was appended.
    LineAdded {
        identity: LineIdentity,
        quantity: u32,
        unit_price: Money,
    },

    /// An add merged into an existing line.
    QuantityIncreased {
        identity: LineIdentity,
        old_quantity: u32,
        new_quantity: u32,
        unit_price: Money,
    },

    /// A line's quantity was set to a new value.
    QuantityUpdated {
        identity: LineIdentity,
        old_quantity: u32,
        new_quantity: u32,
        unit_price: Money,
    },

    /// A line was removed.
    LineRemoved {
        identity: LineIdentity,
        quantity: u32,
        unit_price: Money,
    },

    /// Every line was removed.
    Cleared { removed_lines: usize },

    /// Lines were replaced by what the storage slot currently holds.
    Reloaded { line_count: usize },
}

impl CartEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "LineAdded",
            CartEvent::QuantityIncreased { .. } => "QuantityIncreased",
            CartEvent::QuantityUpdated { .. } => "QuantityUpdated",
            CartEvent::LineRemoved { .. } => "LineRemoved",
            CartEvent::Cleared { .. } => "Cleared",
            CartEvent::Reloaded { .. } => "Reloaded",
        }
    }

    /// The line this event is about, if it concerns a single line.
    pub fn identity(&self) -> Option<&LineIdentity> {
        match self {
            CartEvent::LineAdded { identity, .. }
            | CartEvent::QuantityIncreased { identity, .. }
            | CartEvent::QuantityUpdated { identity, .. }
            | CartEvent::LineRemoved { identity, .. } => Some(identity),
            CartEvent::Cleared { .. } | CartEvent::Reloaded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let identity = LineIdentity::product("p1");
        let added = CartEvent::LineAdded {
            identity: identity.clone(),
            quantity: 1,
            unit_price: Money::from_cents(100),
        };
        assert_eq!(added.event_type(), "LineAdded");
        assert_eq!(added.identity(), Some(&identity));

        let cleared = CartEvent::Cleared { removed_lines: 3 };
        assert_eq!(cleared.event_type(), "Cleared");
        assert!(cleared.identity().is_none());
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = CartEvent::Reloaded { line_count: 2 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Reloaded");
        assert_eq!(json["data"]["line_count"], 2);

        let restored: CartEvent = serde_json::from_value(json).unwrap();
        assert_eq!(restored, event);
    }
}
