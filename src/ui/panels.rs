use std::time::Duration;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::prepare::{self, HeatmapRow};
use crate::state::AppState;
use crate::ui::charts;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: row counts and status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Japan wage open data (RESAS)").strong());

        ui.separator();

        ui.label(format!(
            "{} national, {} industry, {} prefectural rows",
            state.tables.national.len(),
            state.tables.category.len(),
            state.tables.regional.len(),
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Heatmap section
// ---------------------------------------------------------------------------

pub fn heatmap_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading(format!(
        "Per-capita wage heatmap by prefecture, {}",
        prepare::HEATMAP_YEAR
    ));
    ui.label("Hotter and larger markers mean a higher average wage; wages cluster around the Tokyo and Osaka metro areas.");

    let rows = prepare::heatmap_rows(
        &state.tables.regional,
        &state.tables.coords,
        prepare::HEATMAP_YEAR,
    );
    charts::heatmap(ui, &rows);

    ui.checkbox(&mut state.show_heatmap_table, "Show table");
    if state.show_heatmap_table {
        heatmap_table(ui, &rows);
    }
}

/// The joined heatmap rows as a plain table, toggled by the checkbox.
fn heatmap_table(ui: &mut Ui, rows: &[HeatmapRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(70.0), 4)
        .header(20.0, |mut header| {
            for title in ["Prefecture", "Wage (10k yen)", "Lat", "Lon", "Weight"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for row in rows {
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(&row.prefecture);
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.1}", row.wage));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.3}", row.lat));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.3}", row.lon));
                    });
                    table_row.col(|ui| {
                        ui.label(format!("{:.3}", row.weight));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Trend section
// ---------------------------------------------------------------------------

pub fn trend_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Per-capita wage trend: national vs. prefecture");

    egui::ComboBox::from_label("Prefecture")
        .selected_text(&state.selected_prefecture)
        .show_ui(ui, |ui: &mut Ui| {
            for pref in &state.prefectures {
                if ui
                    .selectable_label(state.selected_prefecture == *pref, pref)
                    .clicked()
                {
                    state.selected_prefecture = pref.clone();
                }
            }
        });

    match prepare::trend_rows(
        &state.tables.national,
        &state.tables.regional,
        &state.selected_prefecture,
    ) {
        Ok(rows) => charts::trend(ui, &rows, &state.selected_prefecture),
        Err(e) => state.status_message = Some(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Bubble section
// ---------------------------------------------------------------------------

pub fn bubble_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("National wage vs. bonus by age bracket");
    ui.label("Bubble size follows monthly salary; one frame per survey year.");

    let n_frames = state.bubble_years.len();
    state.bubble_anim.tick(ui.input(|i| i.time), n_frames);

    ui.horizontal(|ui: &mut Ui| {
        let icon = if state.bubble_anim.playing { "⏸" } else { "▶" };
        if ui.button(icon).clicked() {
            state.bubble_anim.playing = !state.bubble_anim.playing;
        }
        if n_frames > 0 {
            ui.add(
                egui::Slider::new(&mut state.bubble_anim.frame, 0..=n_frames - 1)
                    .show_value(false),
            );
            ui.label(format!("Year: {}", state.bubble_years[state.bubble_anim.frame]));
        }
    });

    if state.bubble_anim.playing {
        ui.ctx().request_repaint_after(Duration::from_millis(100));
    }

    let rows = prepare::bubble_rows(&state.tables.national);
    if let Some(&year) = state.bubble_years.get(state.bubble_anim.frame) {
        charts::bubbles(ui, state, &rows, year);
    }
}

// ---------------------------------------------------------------------------
// Category section
// ---------------------------------------------------------------------------

pub fn category_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Wage by industry category");

    egui::ComboBox::from_label("Year")
        .selected_text(state.selected_year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.category_years {
                if ui
                    .selectable_label(state.selected_year == year, year.to_string())
                    .clicked()
                {
                    state.selected_year = year;
                }
            }
        });

    egui::ComboBox::from_label("Wage metric")
        .selected_text(state.selected_metric.label())
        .show_ui(ui, |ui: &mut Ui| {
            for metric in crate::data::model::WageMetric::ALL {
                if ui
                    .selectable_label(state.selected_metric == metric, metric.label())
                    .clicked()
                {
                    state.selected_metric = metric;
                }
            }
        });

    let n_frames = state.age_brackets.len();
    state.category_anim.tick(ui.input(|i| i.time), n_frames);

    ui.horizontal(|ui: &mut Ui| {
        let icon = if state.category_anim.playing { "⏸" } else { "▶" };
        if ui.button(icon).clicked() {
            state.category_anim.playing = !state.category_anim.playing;
        }
        if n_frames > 0 {
            ui.add(
                egui::Slider::new(&mut state.category_anim.frame, 0..=n_frames - 1)
                    .show_value(false),
            );
            ui.label(format!("Age bracket: {}", state.age_brackets[state.category_anim.frame]));
        }
    });

    if state.category_anim.playing {
        ui.ctx().request_repaint_after(Duration::from_millis(100));
    }

    match prepare::category_slice(&state.tables.category, state.selected_year, state.selected_metric)
    {
        Ok(slice) => {
            if let Some(bracket) = state.age_brackets.get(state.category_anim.frame) {
                charts::category_bars(ui, state, &slice, bracket, state.selected_metric);
            }
        }
        Err(e) => state.status_message = Some(e.to_string()),
    }
}
