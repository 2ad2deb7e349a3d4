//! The cart store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use catalog::{Money, Product};
use common::{LineIdentity, ProductId, VariantId};
use kv_store::{KeyValueStore, PersistedCart};

use crate::listener::{CartListener, SubscriptionId};
use crate::{
    CartConfig, CartError, CartEvent, CartLine, LineOptions, MatchPolicy, Notice, Notifier,
    Quantity, TracingNotifier,
};

/// Sum of quantities and sum of line totals.
pub(crate) fn totals(lines: &[CartLine]) -> (u64, Money) {
    let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();
    let subtotal = lines.iter().map(CartLine::line_total).sum();
    (item_count, subtotal)
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    storage: Arc<dyn KeyValueStore>,
    config: CartConfig,
    notifier: Arc<dyn Notifier>,
}

impl CartStoreBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: CartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.config.match_policy = policy;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Builds the store, hydrating it from the configured storage slot.
    pub fn open(self) -> CartStore {
        let lines = hydrate(self.storage.as_ref(), &self.config.storage_key);
        tracing::debug!(
            key = %self.config.storage_key,
            lines = lines.len(),
            policy = %self.config.match_policy,
            "cart opened"
        );

        CartStore {
            lines: RwLock::new(lines),
            storage: self.storage,
            storage_key: self.config.storage_key,
            policy: self.config.match_policy,
            notifier: self.notifier,
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }
}

/// Single source of truth for the shopper's in-progress selection.
///
/// Holds an ordered list of [`CartLine`]s in which no two lines share a
/// [`LineIdentity`]. Every mutation writes the full list to the storage
/// slot, then sends a [`Notice`] to the notifier and a [`CartEvent`] to
/// each subscriber. Item count and subtotal are always derived from the
/// lines, never stored.
///
/// Construct one store per session and share it (e.g. behind an `Arc`).
/// All operations take `&self` and complete synchronously.
pub struct CartStore {
    lines: RwLock<Vec<CartLine>>,
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
    policy: MatchPolicy,
    notifier: Arc<dyn Notifier>,
    listeners: Mutex<Vec<(SubscriptionId, Arc<dyn CartListener>)>>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("policy", &self.policy)
            .field("line_count", &self.line_count())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Starts building a store on top of `storage`.
    pub fn builder(storage: Arc<dyn KeyValueStore>) -> CartStoreBuilder {
        CartStoreBuilder {
            storage,
            config: CartConfig::default(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Opens a store with the default configuration.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::builder(storage).open()
    }

    fn read_lines(&self) -> RwLockReadGuard<'_, Vec<CartLine>> {
        self.lines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lines(&self) -> RwLockWriteGuard<'_, Vec<CartLine>> {
        self.lines.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// Query methods
impl CartStore {
    /// Returns a copy of the current lines, in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.read_lines().clone()
    }

    /// Returns the line with exactly this identity.
    pub fn get_line(&self, identity: &LineIdentity) -> Option<CartLine> {
        self.read_lines()
            .iter()
            .find(|l| l.has_identity(identity))
            .cloned()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.read_lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_lines().is_empty()
    }

    /// Returns the sum of all line quantities.
    pub fn item_count(&self) -> u64 {
        totals(&self.read_lines()).0
    }

    /// Returns the sum of unit price times quantity over all lines.
    ///
    /// Uses the price captured when each line was added.
    pub fn subtotal(&self) -> Money {
        totals(&self.read_lines()).1
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn match_policy(&self) -> MatchPolicy {
        self.policy
    }
}

// Command methods
impl CartStore {
    /// Adds one unit of `product` without a variant.
    pub fn add_product(&self, product: &Product) -> CartLine {
        self.add_line(product, Quantity::ONE, LineOptions::new())
    }

    /// Adds `quantity` units of `product`.
    ///
    /// If a line with the same product and variant exists, its quantity is
    /// increased and its product snapshot kept; otherwise a new line is
    /// appended. Returns the resulting line.
    #[tracing::instrument(
        skip(self, product, options),
        fields(product_id = %product.id, variant_id = ?options.variant_id, quantity = quantity.get())
    )]
    pub fn add_line(&self, product: &Product, quantity: Quantity, options: LineOptions) -> CartLine {
        let identity = LineIdentity::new(product.id.clone(), options.variant_id.clone());
        let mut lines = self.write_lines();

        let (line, event, notice) = match lines.iter().position(|l| l.has_identity(&identity)) {
            Some(idx) => {
                let existing = &mut lines[idx];
                let old_quantity = existing.quantity;
                existing.quantity = old_quantity.saturating_add(quantity.get());
                if existing.size.is_none() {
                    existing.size = options.size;
                }
                if existing.color.is_none() {
                    existing.color = options.color;
                }

                let event = CartEvent::QuantityIncreased {
                    identity,
                    old_quantity,
                    new_quantity: existing.quantity,
                    unit_price: existing.unit_price(),
                };
                let notice = Notice::AddedMore {
                    title: existing.title().to_string(),
                    quantity: quantity.get(),
                };
                (existing.clone(), event, notice)
            }
            None => {
                let line = CartLine::new(product.clone(), quantity, options);
                lines.push(line.clone());

                let event = CartEvent::LineAdded {
                    identity,
                    quantity: line.quantity,
                    unit_price: line.unit_price(),
                };
                let notice = Notice::Added {
                    title: line.title().to_string(),
                };
                (line, event, notice)
            }
        };

        self.commit(lines, event, Some(notice));
        line
    }

    /// Removes the first line targeted by `(product_id, variant_id)` under
    /// the store's match policy.
    ///
    /// Returns the removed line, or None (and changes nothing) if no line
    /// matched.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_line(
        &self,
        product_id: &ProductId,
        variant_id: Option<&VariantId>,
    ) -> Option<CartLine> {
        let mut lines = self.write_lines();

        let Some(idx) = lines
            .iter()
            .position(|l| self.policy.matches(l, product_id, variant_id))
        else {
            tracing::debug!("no matching line to remove");
            return None;
        };

        let removed = lines.remove(idx);
        let event = CartEvent::LineRemoved {
            identity: removed.identity(),
            quantity: removed.quantity,
            unit_price: removed.unit_price(),
        };

        self.commit(lines, event, Some(Notice::Removed));
        Some(removed)
    }

    /// Sets the quantity of the line targeted by `(product_id, variant_id)`.
    ///
    /// A quantity of zero or less removes the line instead. Quantities above
    /// `u32::MAX` are clamped. Returns true if the cart changed.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub fn update_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
        variant_id: Option<&VariantId>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_line(product_id, variant_id).is_some();
        }
        let new_quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut lines = self.write_lines();
        let Some(line) = lines
            .iter_mut()
            .find(|l| self.policy.matches(l, product_id, variant_id))
        else {
            tracing::debug!("no matching line to update");
            return false;
        };

        let old_quantity = line.quantity;
        if old_quantity == new_quantity {
            return false;
        }
        line.quantity = new_quantity;

        let event = CartEvent::QuantityUpdated {
            identity: line.identity(),
            old_quantity,
            new_quantity,
            unit_price: line.unit_price(),
        };

        self.commit(lines, event, None);
        true
    }

    /// Removes every line.
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) {
        let mut lines = self.write_lines();
        let removed_lines = lines.len();
        lines.clear();

        self.commit(lines, CartEvent::Cleared { removed_lines }, Some(Notice::Cleared));
    }

    /// Replaces the in-memory lines with what the storage slot holds now.
    ///
    /// Used to pick up writes made by another store on the same slot, such
    /// as a second tab. Returns the number of lines loaded.
    #[tracing::instrument(skip(self))]
    pub fn reload(&self) -> usize {
        let fresh = hydrate(self.storage.as_ref(), &self.storage_key);
        let line_count = fresh.len();

        let snapshot = {
            let mut lines = self.write_lines();
            *lines = fresh;
            lines.clone()
        };

        self.finish(&CartEvent::Reloaded { line_count }, &snapshot, None);
        line_count
    }

    /// Writes the current lines to storage, reporting failure.
    ///
    /// Mutations already save on their own and only log write failures;
    /// this lets a host check that the cart is durable.
    pub fn save(&self) -> Result<(), CartError> {
        let lines = self.read_lines();
        self.write_slot(&lines)?;
        Ok(())
    }
}

// Subscriptions
impl CartStore {
    /// Registers a listener called after every change.
    pub fn subscribe(&self, listener: Arc<dyn CartListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Registers a closure as a listener.
    pub fn subscribe_fn<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&CartEvent, &[CartLine]) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(f))
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// Persistence and publication
impl CartStore {
    fn write_slot(&self, lines: &[CartLine]) -> kv_store::Result<()> {
        let raw = PersistedCart::new(lines.iter().collect::<Vec<_>>()).encode()?;
        self.storage.set(&self.storage_key, raw)
    }

    /// Persists under the write lock, then notifies with the lock released.
    fn commit(
        &self,
        lines: RwLockWriteGuard<'_, Vec<CartLine>>,
        event: CartEvent,
        notice: Option<Notice>,
    ) {
        if let Err(e) = self.write_slot(&lines) {
            metrics::counter!("cart_persist_failures").increment(1);
            tracing::error!(error = %e, key = %self.storage_key, "failed to persist cart");
        }
        let snapshot = lines.clone();
        drop(lines);

        self.finish(&event, &snapshot, notice);
    }

    fn finish(&self, event: &CartEvent, lines: &[CartLine], notice: Option<Notice>) {
        match event {
            CartEvent::LineAdded { .. } | CartEvent::QuantityIncreased { .. } => {
                metrics::counter!("cart_lines_added").increment(1);
            }
            CartEvent::QuantityUpdated { .. } => {
                metrics::counter!("cart_quantity_updates").increment(1);
            }
            CartEvent::LineRemoved { .. } => {
                metrics::counter!("cart_lines_removed").increment(1);
            }
            CartEvent::Cleared { .. } => {
                metrics::counter!("cart_cleared").increment(1);
            }
            CartEvent::Reloaded { .. } => {}
        }
        let (item_count, subtotal) = totals(lines);
        metrics::gauge!("cart_item_count").set(item_count as f64);
        tracing::debug!(
            event_type = event.event_type(),
            item_count,
            subtotal = %subtotal,
            "cart changed"
        );

        if let Some(notice) = notice {
            self.notifier.notify(&notice);
        }

        let listeners: Vec<Arc<dyn CartListener>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener.on_cart_change(event, lines);
        }
    }
}

/// Reads the saved cart from `key`.
///
/// A missing, unreadable or corrupt value yields an empty cart.
fn hydrate(storage: &dyn KeyValueStore, key: &str) -> Vec<CartLine> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            metrics::counter!("cart_hydration_failures").increment(1);
            tracing::warn!(error = %e, key, "could not read saved cart, starting empty");
            return Vec::new();
        }
    };

    match PersistedCart::<CartLine>::decode(&raw) {
        Ok(envelope) => normalize(envelope.into_lines()),
        Err(e) => {
            metrics::counter!("cart_hydration_failures").increment(1);
            tracing::warn!(error = %e, key, "discarding unreadable saved cart");
            Vec::new()
        }
    }
}

/// Drops empty lines and merges lines sharing an identity, keeping the
/// position of the first occurrence.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let original = lines.len();
    let mut normalized: Vec<CartLine> = Vec::with_capacity(original);

    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        let identity = line.identity();
        match normalized.iter().position(|l| l.has_identity(&identity)) {
            Some(idx) => {
                let existing = &mut normalized[idx];
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => normalized.push(line),
        }
    }

    if normalized.len() != original {
        tracing::debug!(
            original,
            normalized = normalized.len(),
            "normalized saved cart lines"
        );
    }
    normalized
}
