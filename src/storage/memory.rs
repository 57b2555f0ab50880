//! In-process store
//!
//! Backs the dashboard in tests and keeps the same notification semantics as
//! the file store: every mutation is one locked operation and subscribers see
//! the snapshot taken inside it.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    ExpenseId, ExpenseTransaction, MetadataPatch, PeriodKey, PeriodMetadata, ValidExpense,
};

use super::subscribers::{Callback, SubscriberRegistry, Subscription};
use super::{sort_by_date, MetadataStore, TransactionStore};

/// Memory-backed implementation of both stores
#[derive(Default)]
pub struct MemoryStore {
    metadata: RwLock<HashMap<PeriodKey, PeriodMetadata>>,
    expenses: RwLock<HashMap<PeriodKey, Vec<ExpenseTransaction>>>,
    metadata_subscribers: SubscriberRegistry<PeriodMetadata>,
    expense_subscribers: SubscriberRegistry<[ExpenseTransaction]>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a period's record wholesale, bypassing merge semantics
    ///
    /// Lets callers seed records that were produced elsewhere, including ones
    /// carrying non-finite values.
    pub fn insert_metadata(&self, period: PeriodKey, metadata: PeriodMetadata) -> BudgetResult<()> {
        self.metadata
            .write()
            .map_err(|e| lock_error("write", e))?
            .insert(period, metadata);
        self.metadata_subscribers.notify(&period, &metadata)
    }

    /// Live subscriptions on a period across both stores
    pub fn subscriber_count(&self, period: &PeriodKey) -> usize {
        self.metadata_subscribers.count(period) + self.expense_subscribers.count(period)
    }

    fn snapshot(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>> {
        let expenses = self.expenses.read().map_err(|e| lock_error("read", e))?;
        Ok(expenses.get(period).map(|log| sorted_snapshot(log)).unwrap_or_default())
    }
}

fn sorted_snapshot(log: &[ExpenseTransaction]) -> Vec<ExpenseTransaction> {
    let mut snapshot = log.to_vec();
    sort_by_date(&mut snapshot);
    snapshot
}

fn lock_error<E: std::fmt::Display>(kind: &str, e: E) -> BudgetError {
    BudgetError::Storage(format!("Failed to acquire {} lock: {}", kind, e))
}

impl MetadataStore for MemoryStore {
    fn read(&self, period: &PeriodKey) -> BudgetResult<Option<PeriodMetadata>> {
        let metadata = self.metadata.read().map_err(|e| lock_error("read", e))?;
        Ok(metadata.get(period).copied())
    }

    fn write(&self, period: &PeriodKey, patch: &MetadataPatch) -> BudgetResult<()> {
        let updated = {
            let mut metadata = self.metadata.write().map_err(|e| lock_error("write", e))?;
            let record = metadata.entry(*period).or_default();
            record.merge(patch);
            *record
        };
        debug!(%period, ?patch, "metadata merged");
        self.metadata_subscribers.notify(period, &updated)
    }

    fn subscribe(
        &self,
        period: &PeriodKey,
        on_change: Callback<PeriodMetadata>,
    ) -> BudgetResult<Subscription> {
        let subscription = self.metadata_subscribers.add(*period, on_change.clone())?;
        if let Some(current) = MetadataStore::read(self, period)? {
            on_change(&current);
        }
        Ok(subscription)
    }
}

impl TransactionStore for MemoryStore {
    fn append(&self, period: &PeriodKey, expense: ValidExpense) -> BudgetResult<ExpenseId> {
        let expense = ExpenseTransaction::from_valid(expense);
        let id = expense.id;
        let snapshot = {
            let mut expenses = self.expenses.write().map_err(|e| lock_error("write", e))?;
            let log = expenses.entry(*period).or_default();
            log.push(expense);
            sorted_snapshot(log)
        };
        debug!(%period, %id, "expense appended");

        self.expense_subscribers.notify(period, snapshot.as_slice())?;
        Ok(id)
    }

    fn delete(&self, period: &PeriodKey, id: ExpenseId) -> BudgetResult<()> {
        let snapshot = {
            let mut expenses = self.expenses.write().map_err(|e| lock_error("write", e))?;
            let log = expenses
                .get_mut(period)
                .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))?;
            let before = log.len();
            log.retain(|e| e.id != id);
            if log.len() == before {
                return Err(BudgetError::expense_not_found(id.to_string()));
            }
            sorted_snapshot(log)
        };
        debug!(%period, %id, "expense deleted");

        self.expense_subscribers.notify(period, snapshot.as_slice())
    }

    fn list(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>> {
        self.snapshot(period)
    }

    fn subscribe(
        &self,
        period: &PeriodKey,
        on_change: Callback<[ExpenseTransaction]>,
    ) -> BudgetResult<Subscription> {
        let subscription = self.expense_subscribers.add(*period, on_change.clone())?;
        let snapshot = self.snapshot(period)?;
        on_change(snapshot.as_slice());
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewExpense, Participant};
    use std::sync::{Arc, Mutex};

    fn jan() -> PeriodKey {
        PeriodKey::new(2026, 1).unwrap()
    }

    fn valid(category: &str, amount: f64, date: &str) -> ValidExpense {
        NewExpense::new(category, "item", amount, Participant::Primary)
            .on(date)
            .validate("2026-01-01")
            .unwrap()
    }

    #[test]
    fn test_metadata_merge_write() {
        let store = MemoryStore::new();
        assert!(MetadataStore::read(&store, &jan()).unwrap().is_none());

        store
            .write(&jan(), &MetadataPatch::new().income_primary(2000.0))
            .unwrap();
        store
            .write(&jan(), &MetadataPatch::new().savings_target(300.0))
            .unwrap();

        let meta = MetadataStore::read(&store, &jan()).unwrap().unwrap();
        assert_eq!(meta.income_primary, 2000.0);
        assert_eq!(meta.savings_target, 300.0);
    }

    #[test]
    fn test_list_is_date_ordered() {
        let store = MemoryStore::new();
        store.append(&jan(), valid("b", 1.0, "2026-01-20")).unwrap();
        store.append(&jan(), valid("a", 2.0, "2026-01-05")).unwrap();
        store.append(&jan(), valid("c", 3.0, "2026-01-20")).unwrap();

        let categories: Vec<_> = store
            .list(&jan())
            .unwrap()
            .into_iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(categories, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_periods_are_isolated() {
        let store = MemoryStore::new();
        // A February date recorded under January stays in January
        store.append(&jan(), valid("ocio", 5.0, "2026-02-14")).unwrap();

        assert_eq!(store.list(&jan()).unwrap().len(), 1);
        assert!(store.list(&jan().next()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete(&jan(), ExpenseId::new()).unwrap_err();
        assert!(err.is_not_found());

        let id = store.append(&jan(), valid("ocio", 5.0, "")).unwrap();
        assert!(store.delete(&jan(), ExpenseId::new()).unwrap_err().is_not_found());
        store.delete(&jan(), id).unwrap();
        assert!(store.list(&jan()).unwrap().is_empty());
    }

    #[test]
    fn test_subscriptions_deliver_snapshots() {
        let store = MemoryStore::new();
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let incomes = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&sizes);
        let tx_sub = TransactionStore::subscribe(
            &store,
            &jan(),
            Arc::new(move |snapshot: &[ExpenseTransaction]| {
                sink.lock().unwrap().push(snapshot.len());
            }),
        )
        .unwrap();

        let sink = Arc::clone(&incomes);
        let meta_sub = MetadataStore::subscribe(
            &store,
            &jan(),
            Arc::new(move |meta: &PeriodMetadata| {
                sink.lock().unwrap().push(meta.income_primary);
            }),
        )
        .unwrap();

        let id = store.append(&jan(), valid("ocio", 5.0, "")).unwrap();
        store
            .write(&jan(), &MetadataPatch::new().income_primary(10.0))
            .unwrap();
        store.delete(&jan(), id).unwrap();

        // initial empty list, append, delete; no initial metadata record
        assert_eq!(*sizes.lock().unwrap(), vec![0, 1, 0]);
        assert_eq!(*incomes.lock().unwrap(), vec![10.0]);

        tx_sub.unsubscribe();
        meta_sub.unsubscribe();
        store.append(&jan(), valid("ocio", 5.0, "")).unwrap();
        assert_eq!(sizes.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_concurrent_appends_each_deliver_their_own_snapshot() {
        let store = MemoryStore::new();
        let sizes = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&sizes);
        let _sub = TransactionStore::subscribe(
            &store,
            &jan(),
            Arc::new(move |snapshot: &[ExpenseTransaction]| {
                sink.lock().unwrap().push(snapshot.len());
            }),
        )
        .unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..5 {
                        store.append(&jan(), valid("ocio", 1.0, "")).unwrap();
                    }
                });
            }
        });

        let mut sizes = sizes.lock().unwrap().clone();
        sizes.sort_unstable();
        assert_eq!(sizes, (0..=40).collect::<Vec<usize>>());
    }
}
