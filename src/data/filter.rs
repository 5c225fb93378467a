use std::collections::BTreeSet;

use super::model::RoofCategory;

// ---------------------------------------------------------------------------
// Filter configuration – snapshot of the side-panel controls
// ---------------------------------------------------------------------------

/// Everything the side panel can adjust, as plain data. The UI mutates its
/// copy and passes it by reference into each computation; the computations
/// never reach for ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Selected roof categories. An empty set selects nothing, so every
    /// derived table comes out empty.
    pub roofs: BTreeSet<RoofCategory>,
    /// Inclusive season range. `None` until a season table is loaded; while
    /// `None` the weighted re-aggregation is bypassed entirely.
    pub season_range: Option<(u16, u16)>,
    pub show_overall: bool,
    pub show_bins: bool,
    pub show_season: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            roofs: RoofCategory::ALL.into_iter().collect(),
            season_range: None,
            show_overall: true,
            show_bins: true,
            show_season: true,
        }
    }
}

impl FilterConfig {
    pub fn includes(&self, cat: RoofCategory) -> bool {
        self.roofs.contains(&cat)
    }

    /// Whether a season year passes the range filter. No range → no
    /// season filtering.
    pub fn in_season_range(&self, season: u16) -> bool {
        match self.season_range {
            Some((lo, hi)) => (lo..=hi).contains(&season),
            None => true,
        }
    }

    /// Toggle one category in the selected set.
    pub fn toggle_roof(&mut self, cat: RoofCategory) {
        if !self.roofs.remove(&cat) {
            self.roofs.insert(cat);
        }
    }
}
