use std::collections::BTreeMap;

use super::filter::FilterConfig;
use super::model::{Dataset, RoofCategory, RoofSummaryRow, SeasonRoofRow};

// ---------------------------------------------------------------------------
// Weighted re-aggregation over the season table
// ---------------------------------------------------------------------------

/// Collapse per-season rows into one overall row per roof category, honoring
/// the category selection and the inclusive season range.
///
/// Categories with no surviving rows are simply absent from the output; no
/// placeholder row is synthesized. The emitted rows carry `None` for the
/// count columns since those no longer describe a single source table.
pub fn weighted_overall(rows: &[SeasonRoofRow], config: &FilterConfig) -> Vec<RoofSummaryRow> {
    let mut groups: BTreeMap<RoofCategory, Vec<&SeasonRoofRow>> = BTreeMap::new();
    for row in rows {
        if !config.includes(row.roof_norm) || !config.in_season_range(row.season) {
            continue;
        }
        groups.entry(row.roof_norm).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(cat, members)| RoofSummaryRow {
            roof_norm: cat,
            fg_pct: group_rate(&members),
            attempts: None,
            makes: None,
            avg_dist: None,
        })
        .collect()
}

/// Attempt-weighted mean when every contributing row carries a count,
/// otherwise the plain mean. The denominator is floored at 1 so an all-zero
/// attempts column cannot divide by zero.
fn group_rate(members: &[&SeasonRoofRow]) -> f64 {
    let counts: Vec<u64> = members
        .iter()
        .filter_map(|row| row.attempts.map(u64::from))
        .collect();

    if counts.len() == members.len() {
        let weighted: f64 = members
            .iter()
            .zip(&counts)
            .map(|(row, &n)| row.fg_pct * n as f64)
            .sum();
        weighted / counts.iter().sum::<u64>().max(1) as f64
    } else {
        members.iter().map(|row| row.fg_pct).sum::<f64>() / members.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Overall-summary dispatch
// ---------------------------------------------------------------------------

/// The per-roof figures feeding the KPI row and the overall bar chart.
///
/// With a season table and an active season range the figures are recomputed
/// from the per-season rows. Otherwise the pre-aggregated by-roof table is
/// already what we want and only the category filter applies.
pub fn overall_summary(dataset: &Dataset, config: &FilterConfig) -> Vec<RoofSummaryRow> {
    if let (Some(season_rows), Some(_)) = (dataset.season.as_deref(), config.season_range) {
        return weighted_overall(season_rows, config);
    }

    let mut rows: Vec<RoofSummaryRow> = dataset
        .by_roof
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter(|row| config.includes(row.roof_norm))
        .cloned()
        .collect();
    rows.sort_by_key(|row| row.roof_norm);
    rows
}
