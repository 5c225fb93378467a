use thiserror::Error;

use super::aggregate::overall_summary;
use super::filter::FilterConfig;
use super::model::{Dataset, DistanceBinRow, RoofCategory, RoofSummaryRow};

// ---------------------------------------------------------------------------
// MetricUnavailable – typed "no data to display"
// ---------------------------------------------------------------------------

/// Why a single KPI could not be computed. Carried into the display layer,
/// which renders the affected readout as a placeholder; the rest of the
/// render is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricUnavailable {
    #[error("no {0} row after filtering")]
    MissingCategory(RoofCategory),
    /// The by-roof invariant allows at most one row per category; two rows
    /// are a data-shape problem we report instead of picking one.
    #[error("duplicate {0} rows")]
    DuplicateCategory(RoofCategory),
    #[error("no {1} row for bucket {0}")]
    MissingBucketCategory(String, RoofCategory),
    #[error("duplicate {1} rows for bucket {0}")]
    DuplicateBucketCategory(String, RoofCategory),
}

pub type MetricResult = Result<f64, MetricUnavailable>;

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Success rate for one category in an overall summary. Exactly one row may
/// match.
pub fn category_rate(rows: &[RoofSummaryRow], cat: RoofCategory) -> MetricResult {
    let mut matches = rows.iter().filter(|row| row.roof_norm == cat);
    let first = matches
        .next()
        .ok_or(MetricUnavailable::MissingCategory(cat))?;
    if matches.next().is_some() {
        return Err(MetricUnavailable::DuplicateCategory(cat));
    }
    Ok(first.fg_pct)
}

/// Indoor-minus-outdoor gap within one distance bucket, in percentage
/// points. Positive favors indoor.
pub fn bin_delta(rows: &[DistanceBinRow], bucket: &str) -> MetricResult {
    let rate = |cat: RoofCategory| -> MetricResult {
        let mut matches = rows
            .iter()
            .filter(|row| row.dist_bin == bucket && row.roof_norm == cat);
        let first = matches.next().ok_or_else(|| {
            MetricUnavailable::MissingBucketCategory(bucket.to_string(), cat)
        })?;
        if matches.next().is_some() {
            return Err(MetricUnavailable::DuplicateBucketCategory(
                bucket.to_string(),
                cat,
            ));
        }
        Ok(first.fg_pct)
    };

    Ok((rate(RoofCategory::Indoor)? - rate(RoofCategory::Outdoor)?) * 100.0)
}

// ---------------------------------------------------------------------------
// KPI assembly
// ---------------------------------------------------------------------------

/// The distance buckets surfaced as standalone KPIs.
pub const MID_RANGE_BUCKET: &str = "40-49";
pub const LONG_RANGE_BUCKET: &str = "50+";

/// The full KPI row, recomputed whenever the tables or the filters change.
/// Every metric may independently be unavailable; one bad metric never
/// suppresses the others.
#[derive(Debug, Clone)]
pub struct Kpis {
    /// Per-roof overall figures, also backing the overall bar chart.
    pub overall: Vec<RoofSummaryRow>,
    pub indoor: MetricResult,
    pub outdoor: MetricResult,
    /// Indoor minus outdoor, percentage points, over the overall figures.
    pub headline_delta_pp: MetricResult,
    pub delta_mid_range: MetricResult,
    pub delta_long_range: MetricResult,
}

impl Kpis {
    pub fn compute(dataset: &Dataset, config: &FilterConfig) -> Self {
        let overall = overall_summary(dataset, config);

        let indoor = category_rate(&overall, RoofCategory::Indoor);
        let outdoor = category_rate(&overall, RoofCategory::Outdoor);
        let headline_delta_pp = match (&indoor, &outdoor) {
            (Ok(ind), Ok(out)) => Ok((ind - out) * 100.0),
            (Err(reason), _) | (_, Err(reason)) => Err(reason.clone()),
        };

        // The bucket deltas read the distance-bin table as-is: it is not
        // season-filtered and the KPI always compares both categories.
        let dist_rows = dataset.dist_bins.as_deref().unwrap_or(&[]);
        let delta_mid_range = bin_delta(dist_rows, MID_RANGE_BUCKET);
        let delta_long_range = bin_delta(dist_rows, LONG_RANGE_BUCKET);

        Kpis {
            overall,
            indoor,
            outdoor,
            headline_delta_pp,
            delta_mid_range,
            delta_long_range,
        }
    }

    /// Named readouts, for the degraded-metric log pass.
    pub fn readouts(&self) -> [(&'static str, &MetricResult); 5] {
        [
            ("indoor FG%", &self.indoor),
            ("outdoor FG%", &self.outdoor),
            ("headline delta", &self.headline_delta_pp),
            ("40-49 delta", &self.delta_mid_range),
            ("50+ delta", &self.delta_long_range),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn summary_row(cat: RoofCategory, fg_pct: f64) -> RoofSummaryRow {
        RoofSummaryRow {
            roof_norm: cat,
            fg_pct,
            attempts: None,
            makes: None,
            avg_dist: None,
        }
    }

    fn bin(label: &str, cat: RoofCategory, fg_pct: f64) -> DistanceBinRow {
        DistanceBinRow {
            dist_bin: label.to_string(),
            roof_norm: cat,
            fg_pct,
        }
    }

    #[test]
    fn bin_delta_in_percentage_points() {
        let rows = vec![
            bin("40-49", RoofCategory::Indoor, 0.75),
            bin("40-49", RoofCategory::Outdoor, 0.65),
        ];
        assert!((bin_delta(&rows, "40-49").unwrap() - 10.0).abs() < EPS);
    }

    #[test]
    fn bin_delta_is_antisymmetric() {
        let rows = vec![
            bin("50+", RoofCategory::Indoor, 0.62),
            bin("50+", RoofCategory::Outdoor, 0.55),
        ];
        let swapped = vec![
            bin("50+", RoofCategory::Indoor, 0.55),
            bin("50+", RoofCategory::Outdoor, 0.62),
        ];
        let forward = bin_delta(&rows, "50+").unwrap();
        let backward = bin_delta(&swapped, "50+").unwrap();
        assert!((forward + backward).abs() < EPS);
    }

    #[test]
    fn bin_delta_missing_category_is_unavailable() {
        let rows = vec![bin("50+", RoofCategory::Indoor, 0.62)];
        assert_eq!(
            bin_delta(&rows, "50+"),
            Err(MetricUnavailable::MissingBucketCategory(
                "50+".to_string(),
                RoofCategory::Outdoor,
            ))
        );
    }

    #[test]
    fn bin_delta_duplicate_rows_are_unavailable() {
        let rows = vec![
            bin("40-49", RoofCategory::Indoor, 0.75),
            bin("40-49", RoofCategory::Indoor, 0.76),
            bin("40-49", RoofCategory::Outdoor, 0.65),
        ];
        assert_eq!(
            bin_delta(&rows, "40-49"),
            Err(MetricUnavailable::DuplicateBucketCategory(
                "40-49".to_string(),
                RoofCategory::Indoor,
            ))
        );
    }

    #[test]
    fn bin_delta_ignores_other_buckets() {
        let rows = vec![
            bin("40-49", RoofCategory::Indoor, 0.75),
            bin("40-49", RoofCategory::Outdoor, 0.65),
            bin("50+", RoofCategory::Indoor, 0.60),
            bin("50+", RoofCategory::Outdoor, 0.50),
        ];
        assert!((bin_delta(&rows, "50+").unwrap() - 10.0).abs() < EPS);
    }

    #[test]
    fn category_rate_reports_duplicates() {
        let rows = vec![
            summary_row(RoofCategory::Indoor, 0.85),
            summary_row(RoofCategory::Indoor, 0.86),
        ];
        assert_eq!(
            category_rate(&rows, RoofCategory::Indoor),
            Err(MetricUnavailable::DuplicateCategory(RoofCategory::Indoor))
        );
    }

    #[test]
    fn headline_delta_from_by_roof_table() {
        let dataset = Dataset {
            by_roof: Some(vec![
                summary_row(RoofCategory::Indoor, 0.85),
                summary_row(RoofCategory::Outdoor, 0.80),
            ]),
            dist_bins: Some(Vec::new()),
            season: None,
        };
        let kpis = Kpis::compute(&dataset, &FilterConfig::default());
        assert!((kpis.headline_delta_pp.clone().unwrap() - 5.0).abs() < EPS);
    }

    #[test]
    fn one_missing_category_degrades_only_dependent_metrics() {
        let dataset = Dataset {
            by_roof: Some(vec![summary_row(RoofCategory::Indoor, 0.85)]),
            dist_bins: Some(vec![
                bin("40-49", RoofCategory::Indoor, 0.75),
                bin("40-49", RoofCategory::Outdoor, 0.65),
            ]),
            season: None,
        };
        let kpis = Kpis::compute(&dataset, &FilterConfig::default());
        assert!(kpis.indoor.is_ok());
        assert_eq!(
            kpis.outdoor,
            Err(MetricUnavailable::MissingCategory(RoofCategory::Outdoor))
        );
        assert!(kpis.headline_delta_pp.is_err());
        // The bucket delta does not depend on the overall lookup.
        assert!((kpis.delta_mid_range.clone().unwrap() - 10.0).abs() < EPS);
        assert_eq!(
            kpis.delta_long_range,
            Err(MetricUnavailable::MissingBucketCategory(
                "50+".to_string(),
                RoofCategory::Indoor,
            ))
        );
    }
}
