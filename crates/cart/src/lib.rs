//! Shopping cart state for the storefront.
//!
//! This crate provides the cart core:
//! - [`CartStore`], the single source of truth for the in-progress order,
//!   with merge-by-identity semantics and derived totals
//! - Durable persistence of the full line list after every mutation
//! - [`CartListener`] subscriptions notified with a [`CartEvent`] per change
//! - [`CartSummaryView`], an incrementally maintained read model
//! - [`Notifier`] for transient user-facing messages

pub mod config;
pub mod error;
pub mod events;
pub mod line;
pub mod listener;
pub mod notice;
pub mod policy;
pub mod store;
pub mod view;

pub use catalog::{Money, Product, ProductVariant};
pub use common::{LineIdentity, ProductId, VariantId};
pub use config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use events::CartEvent;
pub use line::{CartLine, LineOptions, Quantity};
pub use listener::{CartListener, SubscriptionId};
pub use notice::{Notice, Notifier, NullNotifier, RecordingNotifier, TracingNotifier};
pub use policy::MatchPolicy;
pub use store::{CartStore, CartStoreBuilder};
pub use view::{CartSummary, CartSummaryView};
