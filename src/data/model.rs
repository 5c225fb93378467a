use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoofCategory – the normalized stadium roof split
// ---------------------------------------------------------------------------

/// Stadium roof classification after normalization: dome/closed counts as
/// indoor, outdoors/open as outdoor. The CSVs carry it as the lowercase
/// `roof_norm` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoofCategory {
    Indoor,
    Outdoor,
}

impl RoofCategory {
    /// All categories, in display order.
    pub const ALL: [RoofCategory; 2] = [RoofCategory::Indoor, RoofCategory::Outdoor];

    /// The `roof_norm` spelling used in the CSVs and the UI.
    pub fn label(self) -> &'static str {
        match self {
            RoofCategory::Indoor => "indoor",
            RoofCategory::Outdoor => "outdoor",
        }
    }
}

impl fmt::Display for RoofCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Table rows – one struct per CSV schema
// ---------------------------------------------------------------------------

/// One row of `fg_by_roof.csv`: the pre-aggregated overall figures.
/// `attempts`/`makes`/`avg_dist` are optional columns; the weighted
/// re-aggregation emits rows without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofSummaryRow {
    pub roof_norm: RoofCategory,
    /// Success rate as a fraction in [0, 1].
    pub fg_pct: f64,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub makes: Option<u32>,
    #[serde(default)]
    pub avg_dist: Option<f64>,
}

/// One row of `fg_by_roof_distbins.csv`: success rate for a
/// (distance bucket, roof) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBinRow {
    /// Bucket label such as `"40-49"` or `"50+"`.
    pub dist_bin: String,
    pub roof_norm: RoofCategory,
    pub fg_pct: f64,
}

/// One row of the optional `fg_by_season_roof.csv`: per-season, per-roof
/// figures feeding the attempt-weighted aggregation and the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRoofRow {
    pub season: u16,
    pub roof_norm: RoofCategory,
    pub fg_pct: f64,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub avg_dist: Option<f64>,
}

// ---------------------------------------------------------------------------
// Dataset – the loaded tables
// ---------------------------------------------------------------------------

/// The tables currently loaded. The two mandatory tables arrive either
/// together (repo autodetect) or one at a time (file dialogs), so each slot
/// is individually optional; nothing renders until [`Dataset::is_ready`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub by_roof: Option<Vec<RoofSummaryRow>>,
    pub dist_bins: Option<Vec<DistanceBinRow>>,
    pub season: Option<Vec<SeasonRoofRow>>,
}

impl Dataset {
    /// Both mandatory tables are present.
    pub fn is_ready(&self) -> bool {
        self.by_roof.is_some() && self.dist_bins.is_some()
    }

    /// Inclusive (min, max) season over the season table, if loaded and
    /// non-empty. Seeds the range slider.
    pub fn season_bounds(&self) -> Option<(u16, u16)> {
        let rows = self.season.as_deref()?;
        let first = rows.first()?;
        let mut lo = first.season;
        let mut hi = first.season;
        for row in &rows[1..] {
            lo = lo.min(row.season);
            hi = hi.max(row.season);
        }
        Some((lo, hi))
    }

    /// Sorted unique distance-bucket labels from the distance-bin table.
    pub fn bucket_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .dist_bins
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|row| row.dist_bin.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}
