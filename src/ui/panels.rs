use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::data::model::RoofCategory;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – data loading + filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: the upload prompt until both mandatory tables are
/// in, the filter widgets afterwards.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if !state.dataset.is_ready() {
        load_section(ui, state);
        return;
    }

    ui.heading("Filters");
    ui.separator();

    let mut changed = false;

    // ---- Roof category selection ----
    ui.strong("Roof types");
    for cat in RoofCategory::ALL {
        let mut checked = state.filters.includes(cat);
        let swatch = state.colors.color_for(cat);
        let text = RichText::new(cat.label()).color(swatch);
        if ui.checkbox(&mut checked, text).changed() {
            state.filters.toggle_roof(cat);
            changed = true;
        }
    }
    ui.separator();

    // ---- Season range (only with a season table) ----
    match state.dataset.season_bounds() {
        Some((min, max)) => {
            ui.strong("Season range");
            let (mut lo, mut hi) = state.filters.season_range.unwrap_or((min, max));
            changed |= ui
                .add(egui::Slider::new(&mut lo, min..=max).text("from"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut hi, min..=max).text("to"))
                .changed();
            if hi < lo {
                hi = lo;
            }
            state.filters.season_range = Some((lo, hi));
        }
        None => {
            ui.label("No season table loaded.");
            if ui.button("Load fg_by_season_roof.csv…").clicked() {
                open_table_dialog(state, TableKind::Season);
            }
        }
    }
    ui.separator();

    // ---- View toggles ----
    ui.strong("Views");
    changed |= ui
        .checkbox(&mut state.filters.show_overall, "Overall FG% by roof")
        .changed();
    changed |= ui
        .checkbox(&mut state.filters.show_bins, "FG% by distance bin")
        .changed();
    changed |= ui
        .checkbox(&mut state.filters.show_season, "Season trend")
        .changed();

    if changed {
        state.refresh();
    }
}

fn load_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Load data");
    ui.separator();
    ui.label("Upload the exported CSVs to begin:");
    ui.add_space(4.0);

    let by_roof_loaded = state.dataset.by_roof.is_some();
    let bins_loaded = state.dataset.dist_bins.is_some();
    let season_loaded = state.dataset.season.is_some();
    table_slot(ui, state, TableKind::ByRoof, by_roof_loaded);
    table_slot(ui, state, TableKind::DistBins, bins_loaded);
    table_slot(ui, state, TableKind::Season, season_loaded);
}

fn table_slot(ui: &mut Ui, state: &mut AppState, kind: TableKind, loaded: bool) {
    ui.horizontal(|ui: &mut Ui| {
        let mark = if loaded { "✔" } else { "…" };
        ui.label(mark);
        if ui.button(kind.button_label()).clicked() {
            open_table_dialog(state, kind);
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            for kind in [TableKind::ByRoof, TableKind::DistBins, TableKind::Season] {
                if ui.button(kind.menu_label()).clicked() {
                    open_table_dialog(state, kind);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if state.dataset.is_ready() {
            let by_roof = state.dataset.by_roof.as_deref().unwrap_or(&[]).len();
            let bins = state.dataset.dist_bins.as_deref().unwrap_or(&[]).len();
            let label = match state.dataset.season.as_deref() {
                Some(season) => format!(
                    "{by_roof} by-roof rows, {bins} bin rows, {} season rows",
                    season.len()
                ),
                None => format!("{by_roof} by-roof rows, {bins} bin rows"),
            };
            ui.label(label);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    ByRoof,
    DistBins,
    Season,
}

impl TableKind {
    fn menu_label(self) -> &'static str {
        match self {
            TableKind::ByRoof => "Open by-roof table…",
            TableKind::DistBins => "Open distance-bin table…",
            TableKind::Season => "Open season table…",
        }
    }

    fn button_label(self) -> &'static str {
        match self {
            TableKind::ByRoof => "fg_by_roof.csv…",
            TableKind::DistBins => "fg_by_roof_distbins.csv…",
            TableKind::Season => "fg_by_season_roof.csv (optional)…",
        }
    }

    fn dialog_title(self) -> &'static str {
        match self {
            TableKind::ByRoof => "Open fg_by_roof.csv",
            TableKind::DistBins => "Open fg_by_roof_distbins.csv",
            TableKind::Season => "Open fg_by_season_roof.csv",
        }
    }
}

pub fn open_table_dialog(state: &mut AppState, kind: TableKind) {
    let file = rfd::FileDialog::new()
        .set_title(kind.dialog_title())
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    let outcome = match kind {
        TableKind::ByRoof => loader::load_by_roof(&path).map(|rows| {
            log::info!("Loaded {} by-roof rows from {}", rows.len(), path.display());
            state.set_by_roof(rows);
        }),
        TableKind::DistBins => loader::load_dist_bins(&path).map(|rows| {
            log::info!(
                "Loaded {} distance-bin rows from {}",
                rows.len(),
                path.display()
            );
            state.set_dist_bins(rows);
        }),
        TableKind::Season => loader::load_season(&path).map(|rows| {
            log::info!("Loaded {} season rows from {}", rows.len(), path.display());
            state.set_season(rows);
        }),
    };

    if let Err(e) = outcome {
        log::error!("Failed to load {}: {e:#}", path.display());
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
