use std::path::Path;

use crate::color::ColorMap;
use crate::data::filter::FilterConfig;
use crate::data::kpi::Kpis;
use crate::data::loader;
use crate::data::model::{Dataset, DistanceBinRow, RoofSummaryRow, SeasonRoofRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded tables. Rendering halts at the upload prompt until both
    /// mandatory tables are present.
    pub dataset: Dataset,

    /// Side-panel controls, passed by reference into every computation.
    pub filters: FilterConfig,

    /// KPI figures derived from `dataset` + `filters` (cached; recomputed
    /// via [`AppState::refresh`]). `None` until the dataset is ready.
    pub kpis: Option<Kpis>,

    /// Fixed per-category colours shared by all charts.
    pub colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            filters: FilterConfig::default(),
            kpis: None,
            colors: ColorMap::roof_default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Look for the exported CSVs in the working directory; quietly fall
    /// back to the upload prompt when they are not committed.
    pub fn load_repo_tables(&mut self) {
        match loader::load_from_dir(Path::new(".")) {
            Ok(Some(dataset)) => {
                log::info!(
                    "Loaded committed tables: {} by-roof rows, {} distance-bin rows, season table {}",
                    dataset.by_roof.as_deref().map_or(0, |rows| rows.len()),
                    dataset.dist_bins.as_deref().map_or(0, |rows| rows.len()),
                    if dataset.season.is_some() { "present" } else { "absent" },
                );
                self.dataset = dataset;
                self.reset_season_range();
                self.refresh();
            }
            Ok(None) => {
                log::info!("No committed CSVs found; waiting for upload");
            }
            Err(e) => {
                log::error!("Failed to load committed CSVs: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn set_by_roof(&mut self, rows: Vec<RoofSummaryRow>) {
        self.dataset.by_roof = Some(rows);
        self.status_message = None;
        self.refresh();
    }

    pub fn set_dist_bins(&mut self, rows: Vec<DistanceBinRow>) {
        self.dataset.dist_bins = Some(rows);
        self.status_message = None;
        self.refresh();
    }

    pub fn set_season(&mut self, rows: Vec<SeasonRoofRow>) {
        self.dataset.season = Some(rows);
        self.status_message = None;
        self.reset_season_range();
        self.refresh();
    }

    /// Seed the range slider with the full span of the season table.
    fn reset_season_range(&mut self) {
        self.filters.season_range = self.dataset.season_bounds();
    }

    /// Recompute the cached KPI figures after a data or filter change, and
    /// log any metric that degraded to "unavailable".
    pub fn refresh(&mut self) {
        if !self.dataset.is_ready() {
            self.kpis = None;
            return;
        }
        let kpis = Kpis::compute(&self.dataset, &self.filters);
        for (name, metric) in kpis.readouts() {
            if let Err(reason) = metric {
                log::warn!("{name} unavailable: {reason}");
            }
        }
        self.kpis = Some(kpis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RoofCategory;

    fn summary_row(cat: RoofCategory, fg_pct: f64) -> RoofSummaryRow {
        RoofSummaryRow {
            roof_norm: cat,
            fg_pct,
            attempts: None,
            makes: None,
            avg_dist: None,
        }
    }

    #[test]
    fn kpis_appear_once_both_mandatory_tables_land() {
        let mut state = AppState::default();
        assert!(state.kpis.is_none());

        state.set_by_roof(vec![
            summary_row(RoofCategory::Indoor, 0.85),
            summary_row(RoofCategory::Outdoor, 0.80),
        ]);
        assert!(state.kpis.is_none());

        state.set_dist_bins(Vec::new());
        let kpis = state.kpis.as_ref().expect("kpis after both tables");
        assert!((kpis.headline_delta_pp.clone().unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn season_table_seeds_the_range() {
        let mut state = AppState::default();
        state.set_by_roof(vec![summary_row(RoofCategory::Indoor, 0.85)]);
        state.set_dist_bins(Vec::new());
        state.set_season(vec![
            SeasonRoofRow {
                season: 2015,
                roof_norm: RoofCategory::Indoor,
                fg_pct: 0.83,
                attempts: Some(300),
                avg_dist: None,
            },
            SeasonRoofRow {
                season: 2019,
                roof_norm: RoofCategory::Indoor,
                fg_pct: 0.87,
                attempts: Some(280),
                avg_dist: None,
            },
        ]);
        assert_eq!(state.filters.season_range, Some((2015, 2019)));
        // With a range in play the overall figures come from the season rows.
        let kpis = state.kpis.as_ref().unwrap();
        let indoor = kpis.indoor.clone().unwrap();
        assert!(indoor > 0.83 && indoor < 0.87);
    }

    #[test]
    fn filter_change_plus_refresh_updates_kpis() {
        let mut state = AppState::default();
        state.set_by_roof(vec![
            summary_row(RoofCategory::Indoor, 0.85),
            summary_row(RoofCategory::Outdoor, 0.80),
        ]);
        state.set_dist_bins(Vec::new());

        state.filters.toggle_roof(RoofCategory::Outdoor);
        state.refresh();
        let kpis = state.kpis.as_ref().unwrap();
        assert!(kpis.indoor.is_ok());
        assert!(kpis.outdoor.is_err());
        assert!(kpis.headline_delta_pp.is_err());
    }
}
