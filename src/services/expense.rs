//! Expense service
//!
//! The write path for expenses: validation and normalization happen here,
//! before anything reaches a store.

use tracing::{info, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseId, ExpenseTransaction, NewExpense, PeriodKey};
use crate::storage::TransactionStore;

/// Service for recording and removing expenses
pub struct ExpenseService<'a> {
    store: &'a dyn TransactionStore,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self { store }
    }

    /// Validate and record an expense in a period
    ///
    /// An empty date becomes the first day of the period. Rejected input is
    /// never written.
    pub fn add(&self, period: &PeriodKey, input: NewExpense) -> BudgetResult<ExpenseId> {
        let valid = input.validate(&period.first_day()).map_err(|e| {
            warn!(%period, error = %e, "expense rejected");
            BudgetError::Validation(e.to_string())
        })?;

        let (category, amount) = (valid.get().category.clone(), valid.get().amount);
        let id = self.store.append(period, valid)?;
        info!(%period, %id, %category, amount, "expense recorded");
        Ok(id)
    }

    /// Remove an expense by ID
    pub fn delete(&self, period: &PeriodKey, id: ExpenseId) -> BudgetResult<()> {
        self.store.delete(period, id)?;
        info!(%period, %id, "expense removed");
        Ok(())
    }

    /// Remove an expense by a user-typed reference (short ID, UUID or prefix)
    pub fn delete_by_reference(
        &self,
        period: &PeriodKey,
        reference: &str,
    ) -> BudgetResult<ExpenseTransaction> {
        let expense = self.resolve(period, reference)?;
        self.delete(period, expense.id)?;
        Ok(expense)
    }

    /// Find the single expense a reference points at
    pub fn resolve(&self, period: &PeriodKey, reference: &str) -> BudgetResult<ExpenseTransaction> {
        let mut matches: Vec<ExpenseTransaction> = self
            .store
            .list(period)?
            .into_iter()
            .filter(|e| e.id.matches_reference(reference))
            .collect();

        match matches.len() {
            0 => Err(BudgetError::expense_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(BudgetError::Validation(format!(
                "Reference '{}' is ambiguous ({} expenses match)",
                reference, n
            ))),
        }
    }

    /// Expenses of a period ordered by date
    pub fn list(&self, period: &PeriodKey) -> BudgetResult<Vec<ExpenseTransaction>> {
        self.store.list(period)
    }
}
