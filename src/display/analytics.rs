//! Analysis view formatting

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::models::amount::format_amount;
use crate::models::color_for_category;
use crate::reports::{CategoryShare, FilterSpec};

use super::report::{format_bar, format_percentage};

/// Format the category distribution as a table with inline bars
pub fn format_distribution(shares: &[CategoryShare], symbol: &str) -> String {
    if shares.is_empty() {
        return "No expenses match the current filter.\n".to_string();
    }

    let max = shares.iter().map(|s| s.total).fold(0.0, f64::max);
    let mut builder = Builder::default();
    builder.push_record(["Category", "Total", "Share", "", "Color"]);
    for share in shares {
        builder.push_record([
            share.category.clone(),
            format_amount(share.total, symbol),
            format_percentage(share.share_percent),
            format_bar(share.total, max, 16),
            color_for_category(&share.category).to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..3)).with(Alignment::right()));
    format!("{}\n", table)
}

/// One-line description of the active filter
pub fn format_filter(filter: &FilterSpec) -> String {
    let search = filter.search.trim();
    if search.is_empty() {
        format!(
            "Category: {}  Participant: {}",
            filter.category, filter.participant
        )
    } else {
        format!(
            "Category: {}  Participant: {}  Search: \"{}\"",
            filter.category, filter.participant, search
        )
    }
}
