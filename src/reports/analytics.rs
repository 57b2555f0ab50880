//! Expense analytics
//!
//! Filtering for the analysis view and the per-category distribution that
//! feeds both the proportion and the comparison charts.

use std::fmt;

use serde::Serialize;

use crate::models::{normalize_label, ExpenseTransaction, Participant};

/// A constraint that can be switched off with "all"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Filter choices of the analysis view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterSpec {
    pub category: Selection<String>,
    pub participant: Selection<Participant>,
    pub search: String,
}

impl FilterSpec {
    /// The identity filter
    pub fn all() -> Self {
        Self::default()
    }

    /// Build from user-facing strings where "all" (or nothing) disables a
    /// constraint
    pub fn from_choices(
        category: Option<&str>,
        participant: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self, String> {
        let category = match category.map(str::trim) {
            None | Some("") => Selection::All,
            Some(c) if c.eq_ignore_ascii_case("all") => Selection::All,
            Some(c) => Selection::Only(normalize_label(c)),
        };
        let participant = match participant.map(str::trim) {
            None | Some("") => Selection::All,
            Some(p) if p.eq_ignore_ascii_case("all") => Selection::All,
            Some(p) => Selection::Only(p.parse::<Participant>()?),
        };

        Ok(Self {
            category,
            participant,
            search: search.unwrap_or_default().to_string(),
        })
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::Only(category.into());
        self
    }

    pub fn participant(mut self, participant: Participant) -> Self {
        self.participant = Selection::Only(participant);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn is_identity(&self) -> bool {
        self.category == Selection::All
            && self.participant == Selection::All
            && self.search.trim().is_empty()
    }

    /// Whether one expense passes every constraint
    pub fn matches(&self, expense: &ExpenseTransaction) -> bool {
        if !self.category.accepts(&expense.category) {
            return false;
        }
        if !self.participant.accepts(&expense.participant) {
            return false;
        }
        if self.search.trim().is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        expense.concept.to_lowercase().contains(&needle)
            || expense.category.to_lowercase().contains(&needle)
    }
}

/// Stateless filtering over a period's expenses
pub struct FilterEngine;

impl FilterEngine {
    /// Matching expenses in their original relative order
    pub fn apply(expenses: &[ExpenseTransaction], spec: &FilterSpec) -> Vec<ExpenseTransaction> {
        expenses
            .iter()
            .filter(|e| spec.matches(e))
            .cloned()
            .collect()
    }

    /// Distinct categories, sorted, for the category selector
    pub fn categories(expenses: &[ExpenseTransaction]) -> Vec<String> {
        let mut categories: Vec<String> = expenses.iter().map(|e| e.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

/// One slice of the distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Share of the distribution's grand total, 0 when that total is 0
    pub share_percent: f64,
}

/// Spending per category, largest first
pub struct Distribution;

impl Distribution {
    pub fn from_transactions(expenses: &[ExpenseTransaction]) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = Vec::new();
        for expense in expenses {
            match shares.iter().position(|s| s.category == expense.category) {
                Some(i) => shares[i].total += expense.amount(),
                None => shares.push(CategoryShare {
                    category: expense.category.clone(),
                    total: expense.amount(),
                    share_percent: 0.0,
                }),
            }
        }

        let grand_total: f64 = shares.iter().map(|s| s.total).sum();
        for share in &mut shares {
            share.share_percent = if grand_total > 0.0 {
                share.total / grand_total * 100.0
            } else {
                0.0
            };
        }

        // stable: ties keep first-appearance order
        shares.sort_by(|a, b| b.total.total_cmp(&a.total));
        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::Utc;

    fn expense(
        category: &str,
        concept: &str,
        amount: f64,
        participant: Participant,
    ) -> ExpenseTransaction {
        ExpenseTransaction {
            id: ExpenseId::new(),
            date: "2026-01-10".to_string(),
            category: category.to_string(),
            concept: concept.to_string(),
            amount,
            participant,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<ExpenseTransaction> {
        vec![
            expense("comida", "supermercado", 50.0, Participant::Primary),
            expense("ocio", "cervezas", 20.0, Participant::Secondary),
            expense("comida", "pan", 30.0, Participant::Secondary),
            expense("transporte", "gasolina", 45.0, Participant::Primary),
            expense("ocio", "cine", 12.0, Participant::Primary),
        ]
    }

    #[test]
    fn test_identity_filter_returns_input() {
        let expenses = sample();
        let spec = FilterSpec::all();
        assert!(spec.is_identity());
        assert_eq!(FilterEngine::apply(&expenses, &spec), expenses);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let expenses = sample();
        let spec = FilterSpec::all().participant(Participant::Primary).search("o");
        let once = FilterEngine::apply(&expenses, &spec);
        let twice = FilterEngine::apply(&once, &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_category_and_participant_filters() {
        let expenses = sample();

        let comida = FilterEngine::apply(&expenses, &FilterSpec::all().category("comida"));
        assert_eq!(comida.len(), 2);
        assert_eq!(comida[0].concept, "supermercado");
        assert_eq!(comida[1].concept, "pan");

        let secondary_ocio = FilterEngine::apply(
            &expenses,
            &FilterSpec::all()
                .category("ocio")
                .participant(Participant::Secondary),
        );
        assert_eq!(secondary_ocio.len(), 1);
        assert_eq!(secondary_ocio[0].concept, "cervezas");
    }

    #[test]
    fn test_search_matches_concept_or_category() {
        let expenses = sample();

        let by_concept = FilterEngine::apply(&expenses, &FilterSpec::all().search("CERVE"));
        assert_eq!(by_concept.len(), 1);

        let by_category = FilterEngine::apply(&expenses, &FilterSpec::all().search("trans"));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].concept, "gasolina");

        let blank = FilterEngine::apply(&expenses, &FilterSpec::all().search("   "));
        assert_eq!(blank.len(), expenses.len());
    }

    #[test]
    fn test_from_choices() {
        let spec = FilterSpec::from_choices(Some("all"), Some("ALL"), None).unwrap();
        assert!(spec.is_identity());

        let spec = FilterSpec::from_choices(Some("ocio"), Some("secondary"), Some("cine")).unwrap();
        assert_eq!(spec.category, Selection::Only("ocio".to_string()));
        assert_eq!(spec.participant, Selection::Only(Participant::Secondary));
        assert_eq!(spec.search, "cine");

        assert!(FilterSpec::from_choices(None, Some("nobody"), None).is_err());
    }

    #[test]
    fn test_category_choice_matches_stored_label() {
        let spec = FilterSpec::from_choices(Some("  Comida "), None, None).unwrap();
        assert_eq!(spec.category, Selection::Only("comida".to_string()));

        let matched = FilterEngine::apply(&sample(), &spec);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|e| e.category == "comida"));
    }

    #[test]
    fn test_categories_are_sorted_and_distinct() {
        assert_eq!(
            FilterEngine::categories(&sample()),
            vec!["comida", "ocio", "transporte"]
        );
    }

    #[test]
    fn test_distribution_sorted_descending() {
        let shares = Distribution::from_transactions(&sample());
        let order: Vec<_> = shares
            .iter()
            .map(|s| (s.category.as_str(), s.total))
            .collect();
        assert_eq!(
            order,
            vec![("comida", 80.0), ("transporte", 45.0), ("ocio", 32.0)]
        );

        let percent: f64 = shares.iter().map(|s| s.share_percent).sum();
        assert!((percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_of_filtered_set() {
        let filtered = FilterEngine::apply(
            &sample(),
            &FilterSpec::all().participant(Participant::Secondary),
        );
        let shares = Distribution::from_transactions(&filtered);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "comida");
        assert_eq!(shares[0].total, 30.0);
    }

    #[test]
    fn test_distribution_empty() {
        assert!(Distribution::from_transactions(&[]).is_empty());
    }
}
