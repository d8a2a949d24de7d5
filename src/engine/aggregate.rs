use std::collections::BTreeMap;

use super::compute::round2;
use super::domain::Verdict;

pub(crate) const NO_EFFECTS_SUMMARY: &str = "No clear effects detected with current answers.";

/// Aggregated monetary totals across all eligible policy rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct MonetaryTotals {
    pub monthly_cost: f64,
    pub monthly_benefit: f64,
    pub net: f64,
}

/// Sum raw per-policy effects, rounding once at the end so that the
/// totals do not accumulate per-row rounding drift.
pub(crate) fn total_effects(effects: impl IntoIterator<Item = (f64, f64)>) -> MonetaryTotals {
    let mut monthly_cost = 0.0;
    let mut monthly_benefit = 0.0;

    for (cost, benefit) in effects {
        monthly_cost += cost;
        monthly_benefit += benefit;
    }

    MonetaryTotals {
        monthly_cost: round2(monthly_cost),
        monthly_benefit: round2(monthly_benefit),
        net: round2(monthly_benefit - monthly_cost),
    }
}

/// Deterministic verdict-tally summary, iterating the fixed priority
/// order and joining `"<verdict>: <count>"` segments.
pub(crate) fn summarize_verdicts(counts: &BTreeMap<Verdict, usize>) -> String {
    let parts: Vec<String> = Verdict::ordered()
        .into_iter()
        .filter_map(|verdict| {
            counts
                .get(&verdict)
                .filter(|count| **count > 0)
                .map(|count| format!("{}: {}", verdict.label(), count))
        })
        .collect();

    if parts.is_empty() {
        NO_EFFECTS_SUMMARY.to_string()
    } else {
        parts.join(" • ")
    }
}
