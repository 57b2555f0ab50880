//! JSON file store
//!
//! Layout: `<data>/<budget_id>/<yyyy-mm>/meta.json` and `transactions.json`.
//! Each mutation rewrites one file atomically under the store's write lock, so
//! a merge-write is never observed half applied. Subscribers live in this
//! process only.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    ExpenseId, ExpenseTransaction, MetadataPatch, PeriodKey, PeriodMetadata, ValidExpense,
};

use super::file_io::{read_json, read_json_optional, write_json_atomic};
use super::subscribers::{Callback, SubscriberRegistry, Subscription};
use super::{sort_by_date, MetadataStore, TransactionStore};

/// Serializable expense log of one period
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseTransaction>,
}

/// File-backed implementation of both stores
pub struct JsonStore {
    paths: BudgetPaths,
    budget_id: String,
    write_lock: Mutex<()>,
    metadata_subscribers: SubscriberRegistry<PeriodMetadata>,
    expense_subscribers: SubscriberRegistry<[ExpenseTransaction]>,
}

impl JsonStore {
    /// A budget id names a single directory under the data dir
    pub fn check_budget_id(budget_id: &str) -> BudgetResult<()> {
        if matches!(budget_id.trim(), "" | "." | "..") || budget_id.contains(['/', '\\']) {
            return Err(BudgetError::Config(format!(
                "Invalid budget id: '{}'",
                budget_id
            )));
        }
        Ok(())
    }

    /// Open the store for one budget, creating the data directory
    pub fn open(paths: BudgetPaths, budget_id: impl Into<String>) -> BudgetResult<Self> {
        let budget_id = budget_id.into();
        Self::check_budget_id(&budget_id)?;
        paths.ensure_directories()?;
        info!(base = %paths.base_dir().display(), %budget_id, "opened budget store");

        Ok(Self {
            paths,
            budget_id,
            write_lock: Mutex::new(()),
            metadata_subscribers: SubscriberRegistry::new(),
            expense_subscribers: SubscriberRegistry::new(),
        })
    }

    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    fn metadata_file(&self, period: &PeriodKey) -> PathBuf {
        self.paths
            .period_dir(&self.budget_id, period)
            .join("meta.json")
    }

    fn expenses_file(&self, period: &PeriodKey) -> PathBuf {
        self.paths
            .period_dir(&self.budget_id, period)
            .join("transactions.json")
    }

    fn lock(&self) -> BudgetResult<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn load_expenses(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>> {
        let data: ExpenseData = read_json(self.expenses_file(period))?;
        let mut expenses = data.expenses;
        sort_by_date(&mut expenses);
        Ok(expenses)
    }

    fn save_expenses(&self, period: &PeriodKey, expenses: Vec<ExpenseTransaction>) -> BudgetResult<()> {
        write_json_atomic(self.expenses_file(period), &ExpenseData { expenses })
    }

    /// Periods of this budget that have any stored data, oldest first
    pub fn periods(&self) -> BudgetResult<Vec<PeriodKey>> {
        let budget_dir = self.paths.data_dir().join(&self.budget_id);
        if !budget_dir.exists() {
            return Ok(Vec::new());
        }

        let mut periods: Vec<PeriodKey> = std::fs::read_dir(&budget_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| PeriodKey::parse(&entry.file_name().to_string_lossy()).ok())
            .collect();
        periods.sort();
        Ok(periods)
    }
}

impl MetadataStore for JsonStore {
    fn read(&self, period: &PeriodKey) -> BudgetResult<Option<PeriodMetadata>> {
        read_json_optional(self.metadata_file(period))
    }

    fn write(&self, period: &PeriodKey, patch: &MetadataPatch) -> BudgetResult<()> {
        let updated = {
            let _guard = self.lock()?;
            let current: PeriodMetadata =
                read_json_optional(self.metadata_file(period))?.unwrap_or_default();
            let updated = current.merged(patch);
            write_json_atomic(self.metadata_file(period), &updated)?;
            updated
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

impl TransactionStore for JsonStore {
    fn append(&self, period: &PeriodKey, expense: ValidExpense) -> BudgetResult<ExpenseId> {
        let expense = ExpenseTransaction::from_valid(expense);
        let id = expense.id;
        let snapshot = {
            let _guard = self.lock()?;
            let mut expenses = self.load_expenses(period)?;
            expenses.push(expense);
            sort_by_date(&mut expenses);
            self.save_expenses(period, expenses.clone())?;
            expenses
        };
        debug!(%period, %id, "expense appended");
        self.expense_subscribers.notify(period, snapshot.as_slice())?;
        Ok(id)
    }

    fn delete(&self, period: &PeriodKey, id: ExpenseId) -> BudgetResult<()> {
        let snapshot = {
            let _guard = self.lock()?;
            let mut expenses = self.load_expenses(period)?;
            let before = expenses.len();
            expenses.retain(|e| e.id != id);
            if expenses.len() == before {
                return Err(BudgetError::expense_not_found(id.to_string()));
            }
            self.save_expenses(period, expenses.clone())?;
            expenses
        };
        debug!(%period, %id, "expense deleted");
        self.expense_subscribers.notify(period, snapshot.as_slice())
    }

    fn list(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>> {
        self.load_expenses(period)
    }

    fn subscribe(
        &self,
        period: &PeriodKey,
        on_change: Callback<[ExpenseTransaction]>,
    ) -> BudgetResult<Subscription> {
        let subscription = self.expense_subscribers.add(*period, on_change.clone())?;
        let snapshot = self.load_expenses(period)?;
        on_change(snapshot.as_slice());
        Ok(subscription)
    }
}
