use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use egui_extras::{Column, TableBuilder};

use crate::data::kpi::{Kpis, MetricResult};
use crate::data::model::{RoofCategory, RoofSummaryRow, SeasonRoofRow};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – KPIs, charts, table previews
// ---------------------------------------------------------------------------

/// Render the dashboard. Until both mandatory tables are loaded this is the
/// prompt; afterwards the KPI row, the toggled charts, and the previews.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(kpis) = &state.kpis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load fg_by_roof.csv and fg_by_roof_distbins.csv to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            kpi_row(ui, kpis);
            ui.separator();

            if state.filters.show_overall {
                overall_chart(ui, state, &kpis.overall);
            }
            if state.filters.show_bins {
                bins_chart(ui, state);
            }
            if state.filters.show_season {
                if let Some(season_rows) = state.dataset.season.as_deref() {
                    if !season_rows.is_empty() {
                        season_chart(ui, state, season_rows);
                    }
                }
            }

            table_previews(ui, state, kpis);
        });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, kpis: &Kpis) {
    ui.columns(5, |cols: &mut [Ui]| {
        metric_cell(&mut cols[0], "FG% • Indoor", &kpis.indoor, fmt_pct);
        metric_cell(&mut cols[1], "FG% • Outdoor", &kpis.outdoor, fmt_pct);
        metric_cell(
            &mut cols[2],
            "Indoor − Outdoor (pp)",
            &kpis.headline_delta_pp,
            fmt_pp,
        );
        metric_cell(
            &mut cols[3],
            "Δ pp • 40-49 yds",
            &kpis.delta_mid_range,
            fmt_pp,
        );
        metric_cell(
            &mut cols[4],
            "Δ pp • 50+ yds",
            &kpis.delta_long_range,
            fmt_pp,
        );
    });
}

fn metric_cell(ui: &mut Ui, label: &str, value: &MetricResult, fmt: fn(f64) -> String) {
    ui.vertical(|ui: &mut Ui| {
        ui.small(label);
        match value {
            Ok(v) => {
                ui.heading(fmt(*v));
            }
            Err(reason) => {
                ui.heading("n/a");
                ui.small(RichText::new(reason.to_string()).color(Color32::GRAY));
            }
        }
    });
}

fn fmt_pct(v: f64) -> String {
    format!("{:.2}%", v * 100.0)
}

fn fmt_pp(v: f64) -> String {
    format!("{v:.2}")
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn overall_chart(ui: &mut Ui, state: &AppState, overall: &[RoofSummaryRow]) {
    let title = match (state.dataset.season.as_deref(), state.filters.season_range) {
        (Some(_), Some((lo, hi))) => format!("FG% by Roof (seasons {lo}-{hi})"),
        _ => "FG% by Roof".to_string(),
    };
    ui.strong(title);

    let labels: Vec<String> = overall
        .iter()
        .map(|row| row.roof_norm.label().to_string())
        .collect();

    Plot::new("overall_chart")
        .legend(Legend::default())
        .height(240.0)
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .show(ui, |plot_ui| {
            for (i, row) in overall.iter().enumerate() {
                let bar = Bar::new(i as f64, row.fg_pct).width(0.6);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .color(state.colors.color_for(row.roof_norm))
                        .name(row.roof_norm.label()),
                );
            }
        });
    ui.add_space(8.0);
}

fn bins_chart(ui: &mut Ui, state: &AppState) {
    let buckets = state.dataset.bucket_labels();
    if buckets.is_empty() {
        return;
    }
    ui.strong("FG% by Distance Bin & Roof (overall)");

    let rows = state.dataset.dist_bins.as_deref().unwrap_or(&[]);
    let cats: Vec<RoofCategory> = RoofCategory::ALL
        .into_iter()
        .filter(|&cat| state.filters.includes(cat))
        .collect();
    let group_width = 0.8 / cats.len().max(1) as f64;

    let labels = buckets.clone();
    Plot::new("bins_chart")
        .legend(Legend::default())
        .height(240.0)
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .show(ui, |plot_ui| {
            for (ci, &cat) in cats.iter().enumerate() {
                let offset = (ci as f64 - (cats.len() as f64 - 1.0) / 2.0) * group_width;
                let bars: Vec<Bar> = buckets
                    .iter()
                    .enumerate()
                    .filter_map(|(bi, bucket)| {
                        rows.iter()
                            .find(|row| row.roof_norm == cat && &row.dist_bin == bucket)
                            .map(|row| {
                                Bar::new(bi as f64 + offset, row.fg_pct)
                                    .width(group_width * 0.9)
                            })
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(state.colors.color_for(cat))
                        .name(cat.label()),
                );
            }
        });
    ui.add_space(8.0);
}

fn season_chart(ui: &mut Ui, state: &AppState, season_rows: &[SeasonRoofRow]) {
    ui.strong("FG% by Season & Roof");

    Plot::new("season_chart")
        .legend(Legend::default())
        .height(240.0)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| {
            if mark.value.fract().abs() < 1e-6 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .show(ui, |plot_ui| {
            for cat in RoofCategory::ALL {
                if !state.filters.includes(cat) {
                    continue;
                }
                let mut series: Vec<(u16, f64)> = season_rows
                    .iter()
                    .filter(|row| {
                        row.roof_norm == cat && state.filters.in_season_range(row.season)
                    })
                    .map(|row| (row.season, row.fg_pct))
                    .collect();
                series.sort_by_key(|&(season, _)| season);
                if series.is_empty() {
                    continue;
                }

                let color = state.colors.color_for(cat);
                let points: PlotPoints = series
                    .iter()
                    .map(|&(season, pct)| [f64::from(season), pct])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(cat.label())
                        .color(color)
                        .width(1.5),
                );

                let markers: PlotPoints = series
                    .iter()
                    .map(|&(season, pct)| [f64::from(season), pct])
                    .collect();
                plot_ui.points(
                    Points::new(markers)
                        .name(cat.label())
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .radius(3.0),
                );
            }
        });
    ui.add_space(8.0);
}

/// Map a tick position back to a categorical label; off-center ticks stay
/// blank.
fn axis_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 0.05 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Raw-table previews
// ---------------------------------------------------------------------------

fn table_previews(ui: &mut Ui, state: &AppState, kpis: &Kpis) {
    egui::CollapsingHeader::new("Data tables")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.strong("Overall (by-roof / weighted by season range)");
            overall_table(ui, &kpis.overall);
            ui.add_space(8.0);

            ui.strong("Distance bins");
            bins_table(ui, state);

            if let Some(season_rows) = state.dataset.season.as_deref() {
                ui.add_space(8.0);
                ui.strong("Season-level");
                season_table(ui, season_rows);
            }
        });
}

fn overall_table(ui: &mut Ui, rows: &[RoofSummaryRow]) {
    TableBuilder::new(ui)
        .id_salt("overall_table")
        .striped(true)
        .columns(Column::auto().at_least(70.0), 5)
        .header(18.0, |mut header| {
            for title in ["roof", "fg_pct", "attempts", "makes", "avg_dist"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(16.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.roof_norm.label());
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.4}", row.fg_pct));
                    });
                    table_row.col(|ui| {
                        ui.label(fmt_opt_u32(row.attempts));
                    });
                    table_row.col(|ui| {
                        ui.label(fmt_opt_u32(row.makes));
                    });
                    table_row.col(|ui| {
                        ui.label(fmt_opt_f64(row.avg_dist));
                    });
                });
            }
        });
}

fn bins_table(ui: &mut Ui, state: &AppState) {
    let rows = state.dataset.dist_bins.as_deref().unwrap_or(&[]);
    TableBuilder::new(ui)
        .id_salt("bins_table")
        .striped(true)
        .columns(Column::auto().at_least(70.0), 3)
        .header(18.0, |mut header| {
            for title in ["dist_bin", "roof", "fg_pct"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                if !state.filters.includes(row.roof_norm) {
                    continue;
                }
                body.row(16.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.dist_bin);
                    });
                    table_row.col(|ui| {
                        ui.label(row.roof_norm.label());
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.4}", row.fg_pct));
                    });
                });
            }
        });
}

fn season_table(ui: &mut Ui, rows: &[SeasonRoofRow]) {
    TableBuilder::new(ui)
        .id_salt("season_table")
        .striped(true)
        .columns(Column::auto().at_least(70.0), 5)
        .header(18.0, |mut header| {
            for title in ["season", "roof", "fg_pct", "attempts", "avg_dist"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(16.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.season.to_string());
                    });
                    table_row.col(|ui| {
                        ui.label(row.roof_norm.label());
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.4}", row.fg_pct));
                    });
                    table_row.col(|ui| {
                        ui.label(fmt_opt_u32(row.attempts));
                    });
                    table_row.col(|ui| {
                        ui.label(fmt_opt_f64(row.avg_dist));
                    });
                });
            }
        });
}

fn fmt_opt_u32(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}
