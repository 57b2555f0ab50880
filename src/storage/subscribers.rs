//! Change subscriptions
//!
//! A per-period callback registry shared by the store implementations. Stores
//! call [`SubscriberRegistry::notify`] after releasing their own locks, so a
//! callback may read from the store it is subscribed to.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::PeriodKey;

/// Callback invoked with the latest snapshot
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Entry<T: ?Sized> {
    id: u64,
    callback: Callback<T>,
}

struct Registry<T: ?Sized> {
    next_id: u64,
    by_period: HashMap<PeriodKey, Vec<Entry<T>>>,
}

/// Registry of subscribers keyed by period
pub struct SubscriberRegistry<T: ?Sized> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T: ?Sized + 'static> SubscriberRegistry<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 0,
                by_period: HashMap::new(),
            })),
        }
    }

    /// Register a callback for a period
    pub fn add(&self, period: PeriodKey, callback: Callback<T>) -> BudgetResult<Subscription> {
        let mut registry = self.inner.lock().map_err(lock_error)?;
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .by_period
            .entry(period)
            .or_default()
            .push(Entry { id, callback });
        debug!(%period, id, "subscriber added");

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut registry) = inner.lock() {
                    if let Some(entries) = registry.by_period.get_mut(&period) {
                        entries.retain(|entry| entry.id != id);
                        if entries.is_empty() {
                            registry.by_period.remove(&period);
                        }
                    }
                    debug!(%period, id, "subscriber removed");
                }
            }
        }))
    }

    /// Deliver a snapshot to every subscriber of a period
    pub fn notify(&self, period: &PeriodKey, value: &T) -> BudgetResult<()> {
        let callbacks: Vec<Callback<T>> = {
            let registry = self.inner.lock().map_err(lock_error)?;
            registry
                .by_period
                .get(period)
                .map(|entries| entries.iter().map(|e| Arc::clone(&e.callback)).collect())
                .unwrap_or_default()
        };

        for callback in callbacks {
            callback(value);
        }
        Ok(())
    }

    /// Number of live subscribers for a period
    pub fn count(&self, period: &PeriodKey) -> usize {
        self.inner
            .lock()
            .map(|registry| registry.by_period.get(period).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl<T: ?Sized + 'static> Default for SubscriberRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> BudgetError {
    BudgetError::Storage(format!("Failed to acquire subscriber lock: {}", e))
}

/// Handle to a live subscription
///
/// Delivery stops on [`Subscription::unsubscribe`] or when the handle is
/// dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
