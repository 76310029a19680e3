use crate::color::ColorMap;
use crate::data::model::{WageMetric, WageTables, AGGREGATE_AGE};
use crate::data::prepare;

/// Seconds between animation frames when a play toggle is on.
pub const FRAME_INTERVAL: f64 = 0.8;

// ---------------------------------------------------------------------------
// Animation frame state for the bubble and category charts
// ---------------------------------------------------------------------------

/// Current frame of an animated chart plus its play toggle.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    pub frame: usize,
    pub playing: bool,
    last_tick: f64,
}

impl AnimationState {
    /// Advance the frame on a fixed interval while playing. `now` is
    /// egui's input clock in seconds.
    pub fn tick(&mut self, now: f64, n_frames: usize) {
        if n_frames == 0 {
            self.frame = 0;
            return;
        }
        self.frame = self.frame.min(n_frames - 1);
        if self.playing && now - self.last_tick >= FRAME_INTERVAL {
            self.frame = (self.frame + 1) % n_frames;
            self.last_tick = now;
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The tables are read-only for the life of the process; everything a
/// chart shows is recomputed from them and the current selections on
/// every frame. The selection lists below are derived from the data
/// once, so the combo boxes can only offer valid values.
pub struct AppState {
    pub tables: WageTables,

    /// Distinct prefecture names, first-appearance order.
    pub prefectures: Vec<String>,
    /// Distinct years in the industry-category table.
    pub category_years: Vec<i32>,
    /// Distinct age brackets in the category table (animation frames).
    pub age_brackets: Vec<String>,
    /// Distinct years across the per-bracket national rows (bubble frames).
    pub bubble_years: Vec<i32>,

    /// Stable colours per age bracket (bubble chart).
    pub age_colors: ColorMap,
    /// Stable colours per industry category (bar chart).
    pub industry_colors: ColorMap,

    // Current control values, one set per chart section.
    pub show_heatmap_table: bool,
    pub selected_prefecture: String,
    pub selected_year: i32,
    pub selected_metric: WageMetric,
    pub bubble_anim: AnimationState,
    pub category_anim: AnimationState,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(tables: WageTables) -> Self {
        let prefectures = tables.prefecture_names();
        let category_years = tables.category_years();
        let age_brackets = tables.category_age_brackets();

        let mut bubble_years: Vec<i32> = prepare::bubble_rows(&tables.national)
            .iter()
            .map(|r| r.year)
            .collect();
        bubble_years.sort_unstable();
        bubble_years.dedup();

        let age_colors = ColorMap::new(
            tables
                .national
                .iter()
                .filter(|r| r.age_bracket != AGGREGATE_AGE)
                .map(|r| r.age_bracket.clone()),
        );
        let industry_colors = ColorMap::new(tables.industries());

        let selected_prefecture = prefectures.first().cloned().unwrap_or_default();
        let selected_year = category_years.first().copied().unwrap_or(prepare::HEATMAP_YEAR);

        Self {
            tables,
            prefectures,
            category_years,
            age_brackets,
            bubble_years,
            age_colors,
            industry_colors,
            show_heatmap_table: false,
            selected_prefecture,
            selected_year,
            selected_metric: WageMetric::PerCapitaWage,
            bubble_anim: AnimationState::default(),
            category_anim: AnimationState::default(),
            status_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_wraps_and_respects_interval() {
        let mut anim = AnimationState {
            playing: true,
            ..Default::default()
        };
        // at t=0 no interval has elapsed yet
        anim.tick(0.0, 3);
        assert_eq!(anim.frame, 0);

        anim.tick(1.0, 3);
        assert_eq!(anim.frame, 1);
        // too soon, no advance
        anim.tick(1.2, 3);
        assert_eq!(anim.frame, 1);
        anim.tick(2.0, 3);
        assert_eq!(anim.frame, 2);
        anim.tick(3.0, 3);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn animation_clamps_when_frame_count_shrinks() {
        let mut anim = AnimationState {
            frame: 9,
            ..Default::default()
        };
        anim.tick(0.0, 4);
        assert_eq!(anim.frame, 3);
        anim.tick(0.0, 0);
        assert_eq!(anim.frame, 0);
    }
}
