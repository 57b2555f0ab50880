//! Dashboard state
//!
//! Holds the explicit UI state (period, filter choices, selected category)
//! and the latest snapshot pushed by each store. The two subscriptions are
//! independent, so the view is always recomputed from whatever pair of
//! snapshots is current; one may be a notification behind the other.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseTransaction, MetadataPatch, PeriodKey, PeriodMetadata};
use crate::reports::{
    AggregationEngine, CategoryGroup, CategoryShare, Distribution, FilterEngine, FilterSpec,
    TotalsView,
};
use crate::storage::{BudgetStore, MetadataStore, Subscription, TransactionStore};

/// User-controlled view state
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub period: PeriodKey,
    pub filter: FilterSpec,
    /// Category expanded into its concepts
    pub selected_category: Option<String>,
}

impl DashboardState {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            filter: FilterSpec::all(),
            selected_category: None,
        }
    }
}

/// Everything a frontend renders for the current state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub period: PeriodKey,
    pub totals: TotalsView,
    /// Expenses passing the filter, date ordered
    pub filtered: Vec<ExpenseTransaction>,
    /// Distribution of the filtered expenses
    pub distribution: Vec<CategoryShare>,
    /// Filter choices, from the unfiltered expenses
    pub categories: Vec<String>,
    pub selected: Option<CategoryGroup>,
}

#[derive(Debug)]
struct Snapshots {
    period: PeriodKey,
    metadata: Option<PeriodMetadata>,
    expenses: Vec<ExpenseTransaction>,
    deliveries: u64,
}

impl Snapshots {
    fn empty(period: PeriodKey) -> Self {
        Self {
            period,
            metadata: None,
            expenses: Vec::new(),
            deliveries: 0,
        }
    }
}

/// Live dashboard over one period of a store
///
/// Dropping it ends both subscriptions.
pub struct Dashboard {
    store: Arc<dyn BudgetStore>,
    state: DashboardState,
    snapshots: Arc<RwLock<Snapshots>>,
    subscriptions: Vec<Subscription>,
}

impl Dashboard {
    /// Subscribe to the state's period, creating its metadata record if absent
    pub fn attach(store: Arc<dyn BudgetStore>, state: DashboardState) -> BudgetResult<Self> {
        let snapshots = Arc::new(RwLock::new(Snapshots::empty(state.period)));
        let mut dashboard = Self {
            store,
            state,
            snapshots,
            subscriptions: Vec::new(),
        };
        dashboard.subscribe()?;
        Ok(dashboard)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Move to another period; subscriptions follow
    pub fn set_period(&mut self, period: PeriodKey) -> BudgetResult<()> {
        if period == self.state.period {
            return Ok(());
        }
        self.subscriptions.clear();
        self.state.period = period;
        self.state.selected_category = None;
        *self.snapshots.write().map_err(lock_error)? = Snapshots::empty(period);
        self.subscribe()
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.state.filter = filter;
    }

    pub fn select_category(&mut self, category: Option<String>) {
        self.state.selected_category = category;
    }

    /// Number of snapshots received for the current period
    pub fn deliveries(&self) -> u64 {
        self.snapshots.read().map(|s| s.deliveries).unwrap_or(0)
    }

    /// Recompute the view from the latest snapshots
    pub fn view(&self) -> BudgetResult<DashboardView> {
        let snapshots = self.snapshots.read().map_err(lock_error)?;
        let metadata = snapshots.metadata.unwrap_or_default();
        let expenses = snapshots.expenses.as_slice();

        let totals = AggregationEngine::compute(&metadata, expenses);
        let filtered = FilterEngine::apply(expenses, &self.state.filter);
        let distribution = Distribution::from_transactions(&filtered);
        let selected = self
            .state
            .selected_category
            .as_deref()
            .and_then(|c| totals.category(c))
            .cloned();

        Ok(DashboardView {
            period: self.state.period,
            categories: FilterEngine::categories(expenses),
            totals,
            filtered,
            distribution,
            selected,
        })
    }

    fn subscribe(&mut self) -> BudgetResult<()> {
        let period = self.state.period;
        let store = self.store.as_ref();

        if MetadataStore::read(store, &period)?.is_none() {
            MetadataStore::write(store, &period, &MetadataPatch::full(&PeriodMetadata::zeroed()))?;
            debug!(%period, "created default metadata");
        }

        let sink = Arc::clone(&self.snapshots);
        let metadata_sub = MetadataStore::subscribe(
            store,
            &period,
            Arc::new(move |metadata: &PeriodMetadata| {
                if let Ok(mut snapshots) = sink.write() {
                    // late delivery for a period we already left
                    if snapshots.period == period {
                        snapshots.metadata = Some(*metadata);
                        snapshots.deliveries += 1;
                    }
                }
            }),
        )?;

        let sink = Arc::clone(&self.snapshots);
        let expense_sub = TransactionStore::subscribe(
            store,
            &period,
            Arc::new(move |expenses: &[ExpenseTransaction]| {
                if let Ok(mut snapshots) = sink.write() {
                    if snapshots.period == period {
                        snapshots.expenses = expenses.to_vec();
                        snapshots.deliveries += 1;
                    }
                }
            }),
        )?;

        self.subscriptions = vec![metadata_sub, expense_sub];
        debug!(%period, "dashboard attached");
        Ok(())
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> BudgetError {
    BudgetError::Storage(format!("Failed to acquire dashboard lock: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewExpense, Participant};
    use crate::services::ExpenseService;
    use crate::storage::MemoryStore;

    fn jan() -> PeriodKey {
        PeriodKey::new(2026, 1).unwrap()
    }

    fn add(store: &MemoryStore, period: &PeriodKey, category: &str, concept: &str, amount: f64) {
        ExpenseService::new(store)
            .add(
                period,
                NewExpense::new(category, concept, amount, Participant::Primary),
            )
            .unwrap();
    }

    #[test]
    fn test_attach_initializes_metadata() {
        let store = Arc::new(MemoryStore::new());
        let dashboard = Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();

        assert_eq!(
            MetadataStore::read(store.as_ref(), &jan()).unwrap(),
            Some(PeriodMetadata::zeroed())
        );
        let view = dashboard.view().unwrap();
        assert_eq!(view.totals.total_income, 0.0);
        assert!(view.filtered.is_empty());
    }

    #[test]
    fn test_view_follows_store_changes() {
        let store = Arc::new(MemoryStore::new());
        let dashboard = Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();

        MetadataStore::write(
            store.as_ref(),
            &jan(),
            &MetadataPatch::new()
                .income_primary(2000.0)
                .income_secondary(1500.0)
                .savings_target(300.0)
                .savings_goal(500.0),
        )
        .unwrap();
        add(&store, &jan(), "comida", "supermercado", 50.0);
        add(&store, &jan(), "ocio", "cervezas", 20.0);
        add(&store, &jan(), "comida", "supermercado", 30.0);

        let view = dashboard.view().unwrap();
        assert_eq!(view.totals.total_income, 3500.0);
        assert_eq!(view.totals.total_expenses, 100.0);
        assert_eq!(view.totals.final_balance, 3100.0);
        assert_eq!(view.categories, vec!["comida", "ocio"]);
        assert_eq!(view.distribution[0].category, "comida");
        assert_eq!(view.distribution[0].total, 80.0);
    }

    #[test]
    fn test_partial_staleness_recomputes_from_latest_pair() {
        let store = Arc::new(MemoryStore::new());
        add(&store, &jan(), "comida", "pan", 10.0);
        let dashboard = Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();

        // only the metadata side changes; the expense snapshot stays as it was
        MetadataStore::write(
            store.as_ref(),
            &jan(),
            &MetadataPatch::new().income_primary(100.0),
        )
        .unwrap();

        let view = dashboard.view().unwrap();
        assert_eq!(view.totals.total_income, 100.0);
        assert_eq!(view.totals.total_expenses, 10.0);
        assert_eq!(view.totals.final_balance, 90.0);
    }

    #[test]
    fn test_filter_and_selection() {
        let store = Arc::new(MemoryStore::new());
        add(&store, &jan(), "comida", "pan", 10.0);
        add(&store, &jan(), "ocio", "cine", 12.0);
        add(&store, &jan(), "comida", "fruta", 8.0);

        let mut dashboard =
            Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();
        dashboard.set_filter(FilterSpec::all().search("CIN"));
        dashboard.select_category(Some("comida".to_string()));

        let view = dashboard.view().unwrap();
        assert_eq!(view.filtered.len(), 1);
        assert_eq!(view.distribution.len(), 1);
        assert_eq!(view.distribution[0].category, "ocio");
        // totals always cover the whole period
        assert_eq!(view.totals.total_expenses, 30.0);

        let selected = view.selected.unwrap();
        assert_eq!(selected.total, 18.0);
        assert_eq!(selected.by_concept.len(), 2);
    }

    #[test]
    fn test_changing_period_resubscribes() {
        let store = Arc::new(MemoryStore::new());
        add(&store, &jan(), "comida", "pan", 10.0);
        add(&store, &jan().next(), "ocio", "cine", 12.0);

        let mut dashboard =
            Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();
        assert_eq!(store.subscriber_count(&jan()), 2);

        dashboard.set_period(jan().next()).unwrap();
        assert_eq!(store.subscriber_count(&jan()), 0);
        assert_eq!(store.subscriber_count(&jan().next()), 2);

        add(&store, &jan(), "comida", "fruta", 99.0);
        let view = dashboard.view().unwrap();
        assert_eq!(view.period, jan().next());
        assert_eq!(view.totals.total_expenses, 12.0);
    }

    #[test]
    fn test_non_finite_metadata_reads_as_zero() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_metadata(
                jan(),
                PeriodMetadata {
                    income_primary: f64::NAN,
                    income_secondary: 1000.0,
                    savings_goal: f64::INFINITY,
                    ..PeriodMetadata::default()
                },
            )
            .unwrap();

        let dashboard = Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();
        let view = dashboard.view().unwrap();
        assert_eq!(view.totals.total_income, 1000.0);
        assert!(!view.totals.savings_progress.has_goal());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let store = Arc::new(MemoryStore::new());
        let dashboard = Dashboard::attach(store.clone(), DashboardState::new(jan())).unwrap();
        let before = dashboard.deliveries();
        assert!(before >= 2);

        add(&store, &jan(), "comida", "pan", 10.0);
        assert_eq!(dashboard.deliveries(), before + 1);

        drop(dashboard);
        assert_eq!(store.subscriber_count(&jan()), 0);
        add(&store, &jan(), "comida", "pan", 10.0);
    }
}
