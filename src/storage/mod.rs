//! Storage layer for duo-budget
//!
//! Two collaborator interfaces partition everything by period:
//!
//! - [`MetadataStore`]: one mutable record per period, merge-written.
//! - [`TransactionStore`]: the append/delete expense log of a period.
//!
//! Both push the full current snapshot to subscribers on every change.
//! [`MemoryStore`] keeps everything in process; [`JsonStore`] persists one
//! directory per period with atomic file writes.

pub mod file_io;
pub mod json;
pub mod memory;
pub mod subscribers;

pub use file_io::{read_json, read_json_optional, write_json_atomic};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use subscribers::{Callback, SubscriberRegistry, Subscription};

use crate::error::BudgetResult;
use crate::models::{ExpenseId, ExpenseTransaction, MetadataPatch, PeriodKey, PeriodMetadata, ValidExpense};

/// Holds the metadata record of each period
pub trait MetadataStore: Send + Sync {
    /// The stored record, or `None` if the period has none yet
    fn read(&self, period: &PeriodKey) -> BudgetResult<Option<PeriodMetadata>>;

    /// Merge `patch` into the period's record (creating it if absent) in a
    /// single write
    fn write(&self, period: &PeriodKey, patch: &MetadataPatch) -> BudgetResult<()>;

    /// Receive the record now (if it exists) and after every change
    fn subscribe(
        &self,
        period: &PeriodKey,
        on_change: Callback<PeriodMetadata>,
    ) -> BudgetResult<Subscription>;
}

/// Holds the expense log of each period
pub trait TransactionStore: Send + Sync {
    /// Append a validated expense, returning its new ID
    fn append(&self, period: &PeriodKey, expense: ValidExpense) -> BudgetResult<ExpenseId>;

    /// Remove an expense; unknown IDs are a `NotFound` error
    fn delete(&self, period: &PeriodKey, id: ExpenseId) -> BudgetResult<()>;

    /// Current expenses ordered by date ascending
    fn list(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>>;

    /// Receive the ordered expense list now and after every change
    fn subscribe(
        &self,
        period: &PeriodKey,
        on_change: Callback<[ExpenseTransaction]>,
    ) -> BudgetResult<Subscription>;
}

/// A backend providing both stores
pub trait BudgetStore: MetadataStore + TransactionStore {}

impl<T: MetadataStore + TransactionStore> BudgetStore for T {}

/// Order a snapshot by date ascending; ties keep insertion order
pub(crate) fn sort_by_date(expenses: &mut [ExpenseTransaction]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date));
}
