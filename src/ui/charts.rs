use eframe::egui::{Color32, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color;
use crate::data::model::{NationalWageRow, WageMetric};
use crate::data::prepare::{CategorySlice, HeatmapRow, TrendRow};
use crate::state::AppState;

// Fixed bubble axis ranges (10k yen). Constant across frames so the
// year animation stays visually comparable.
const BUBBLE_X_RANGE: [f64; 2] = [150.0, 700.0];
const BUBBLE_Y_RANGE: [f64; 2] = [0.0, 150.0];
/// Largest bubble radius in points, given to the highest monthly salary.
const BUBBLE_MAX_RADIUS: f32 = 19.0;

// ---------------------------------------------------------------------------
// Geographic heatmap
// ---------------------------------------------------------------------------

/// Weighted wage markers over a lat/lon plane. Hotter colour and larger
/// radius mean a higher normalized wage.
pub fn heatmap(ui: &mut Ui, rows: &[HeatmapRow]) {
    if rows.is_empty() {
        ui.label("No heatmap rows for the fixed year.");
        return;
    }

    Plot::new("wage_heatmap")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .min_size(Vec2::new(320.0, 320.0))
        .height(420.0)
        .show(ui, |plot_ui| {
            for row in rows {
                let points = Points::new(vec![[row.lon, row.lat]])
                    .name(format!("{}  {:.1}", row.prefecture, row.wage))
                    .color(color::heat_color(row.weight))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0 + 9.0 * row.weight as f32);
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// National vs. prefecture trend
// ---------------------------------------------------------------------------

/// Dual line chart of the aggregate-age wage, national vs. the
/// selected prefecture, by year.
pub fn trend(ui: &mut Ui, rows: &[TrendRow], prefecture: &str) {
    Plot::new("wage_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Per-capita wage (10k yen)")
        .height(300.0)
        .show(ui, |plot_ui| {
            let national: PlotPoints = rows
                .iter()
                .map(|r| [r.year as f64, r.national])
                .collect();
            let regional: PlotPoints = rows
                .iter()
                .map(|r| [r.year as f64, r.regional])
                .collect();

            plot_ui.line(
                Line::new(national)
                    .name("National")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(regional)
                    .name(prefecture)
                    .color(Color32::from_rgb(0xe8, 0x7a, 0x3a))
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Age-bracket bubble chart, one frame per year
// ---------------------------------------------------------------------------

/// One year's frame of the bubble chart: x = per-capita wage,
/// y = annual bonus, radius = monthly salary, colour = age bracket.
/// `rows` is the full per-bracket series; `year` selects the frame.
pub fn bubbles(ui: &mut Ui, state: &AppState, rows: &[NationalWageRow], year: i32) {
    let max_salary = rows
        .iter()
        .map(|r| r.salary)
        .fold(f64::NEG_INFINITY, f64::max);

    Plot::new("wage_bubbles")
        .legend(Legend::default())
        .x_axis_label("Per-capita wage (10k yen)")
        .y_axis_label("Annual bonus (10k yen)")
        .include_x(BUBBLE_X_RANGE[0])
        .include_x(BUBBLE_X_RANGE[1])
        .include_y(BUBBLE_Y_RANGE[0])
        .include_y(BUBBLE_Y_RANGE[1])
        .height(340.0)
        .show(ui, |plot_ui| {
            for row in rows.iter().filter(|r| r.year == year) {
                // radius scaled against the whole series, not the frame,
                // so bubbles keep their size across the animation
                let radius = if max_salary > 0.0 {
                    BUBBLE_MAX_RADIUS * (row.salary / max_salary) as f32
                } else {
                    4.0
                };
                let points = Points::new(vec![[row.wage, row.bonus]])
                    .name(&row.age_bracket)
                    .color(state.age_colors.color_for(&row.age_bracket))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius.max(2.0));
                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Industry bar chart, one frame per age bracket
// ---------------------------------------------------------------------------

/// Horizontal bars of the selected metric per industry, for one age
/// bracket of the selected year's slice. The x axis is pinned to the
/// slice's derived bound so frames share a scale.
pub fn category_bars(
    ui: &mut Ui,
    state: &AppState,
    slice: &CategorySlice,
    age_bracket: &str,
    metric: WageMetric,
) {
    let rows: Vec<_> = slice
        .rows
        .iter()
        .filter(|r| r.age_bracket == age_bracket)
        .collect();

    Plot::new("wage_category_bars")
        .legend(Legend::default())
        .x_axis_label(metric.label())
        .show_axes([true, false])
        .include_x(0.0)
        .include_x(slice.axis_max)
        .height(380.0)
        .show(ui, |plot_ui| {
            for (i, row) in rows.iter().enumerate() {
                let bar = Bar::new(i as f64, metric.of_category(row)).width(0.7);
                let chart = BarChart::new(vec![bar])
                    .horizontal()
                    .name(&row.industry)
                    .color(state.industry_colors.color_for(&row.industry));
                plot_ui.bar_chart(chart);
            }
        });
}
