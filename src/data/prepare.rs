use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use super::model::{
    CategoryWageRow, NationalWageRow, PrefPoint, RegionalWageRow, WageMetric, AGGREGATE_AGE,
};

/// The year the geographic heatmap is pinned to.
pub const HEATMAP_YEAR: i32 = 2019;

/// Headroom added above the observed maximum for the category bar axis.
pub const CATEGORY_AXIS_MARGIN: f64 = 50.0;

/// A user selection outside the sets derived from the loaded data.
/// Controls are populated from those same sets, so these are boundary
/// checks rather than expected runtime paths.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("unknown prefecture '{0}'")]
    UnknownPrefecture(String),
    #[error("unknown wage metric '{0}'")]
    UnknownMetric(String),
    #[error("year {0} is not present in the industry-category table")]
    UnknownYear(i32),
}

// ---------------------------------------------------------------------------
// Heatmap: regional rows ⋈ coordinates, with a min-max weight
// ---------------------------------------------------------------------------

/// One regional wage row joined with its prefecture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRow {
    pub prefecture: String,
    pub wage: f64,
    pub lat: f64,
    pub lon: f64,
    /// Min-max normalized wage over the joined set, in [0, 1].
    pub weight: f64,
}

/// Aggregate-age regional wages for `year`, inner-joined with the
/// coordinate lookup on exact prefecture name. Rows without a matching
/// coordinate (or vice versa) are dropped. The weight column is the
/// wage min-max normalized over the rows that survive the join.
pub fn heatmap_rows(
    regional: &[RegionalWageRow],
    coords: &[PrefPoint],
    year: i32,
) -> Vec<HeatmapRow> {
    let lat_lon: HashMap<&str, (f64, f64)> = coords
        .iter()
        .map(|p| (p.pref_name.as_str(), (p.lat, p.lon)))
        .collect();

    let mut rows: Vec<HeatmapRow> = regional
        .iter()
        .filter(|r| r.age_bracket == AGGREGATE_AGE && r.year == year)
        .filter_map(|r| {
            let &(lat, lon) = lat_lon.get(r.prefecture.as_str())?;
            Some(HeatmapRow {
                prefecture: r.prefecture.clone(),
                wage: r.wage,
                lat,
                lon,
                weight: 0.0,
            })
        })
        .collect();

    normalize_weights(&mut rows);
    rows
}

/// Fill in `weight = (wage - min) / (max - min)` over `rows`.
/// A degenerate set where every wage is equal gets a constant 1.0 so
/// the heatmap still renders instead of propagating NaN.
fn normalize_weights(rows: &mut [HeatmapRow]) {
    let min = rows.iter().map(|r| r.wage).fold(f64::INFINITY, f64::min);
    let max = rows.iter().map(|r| r.wage).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    for row in rows {
        row.weight = if range.abs() < f64::EPSILON {
            1.0
        } else {
            (row.wage - min) / range
        };
    }
}

// ---------------------------------------------------------------------------
// Trend: national vs. one prefecture, joined on year
// ---------------------------------------------------------------------------

/// One year of the dual trend series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub year: i32,
    /// National aggregate-age per-capita wage.
    pub national: f64,
    /// Selected prefecture's aggregate-age per-capita wage.
    pub regional: f64,
}

/// Aggregate-age national and per-prefecture wage series, inner-joined
/// on year and ordered ascending. Years present in only one series are
/// dropped.
pub fn trend_rows(
    national: &[NationalWageRow],
    regional: &[RegionalWageRow],
    prefecture: &str,
) -> Result<Vec<TrendRow>, SelectionError> {
    if !regional.iter().any(|r| r.prefecture == prefecture) {
        return Err(SelectionError::UnknownPrefecture(prefecture.to_string()));
    }

    let national_by_year: BTreeMap<i32, f64> = national
        .iter()
        .filter(|r| r.age_bracket == AGGREGATE_AGE)
        .map(|r| (r.year, r.wage))
        .collect();

    let regional_by_year: BTreeMap<i32, f64> = regional
        .iter()
        .filter(|r| r.age_bracket == AGGREGATE_AGE && r.prefecture == prefecture)
        .map(|r| (r.year, r.wage))
        .collect();

    Ok(national_by_year
        .iter()
        .filter_map(|(&year, &nat)| {
            regional_by_year.get(&year).map(|&reg| TrendRow {
                year,
                national: nat,
                regional: reg,
            })
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Bubble series: per-bracket national rows, aggregate excluded
// ---------------------------------------------------------------------------

/// National rows for the individual age brackets, one per
/// (year, bracket). Values pass through raw; axis ranges are fixed by
/// the renderer so animation frames stay comparable.
pub fn bubble_rows(national: &[NationalWageRow]) -> Vec<NationalWageRow> {
    national
        .iter()
        .filter(|r| r.age_bracket != AGGREGATE_AGE)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Category slice: one year of the industry table + axis bound
// ---------------------------------------------------------------------------

/// The industry-category rows for one year plus the derived bar-axis bound.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub rows: Vec<CategoryWageRow>,
    /// max(metric over rows) + [`CATEGORY_AXIS_MARGIN`].
    pub axis_max: f64,
}

/// Filter the category table to `year` and derive the horizontal-axis
/// upper bound for `metric`. The year must be one of the years actually
/// present in the table.
pub fn category_slice(
    category: &[CategoryWageRow],
    year: i32,
    metric: WageMetric,
) -> Result<CategorySlice, SelectionError> {
    let rows: Vec<CategoryWageRow> = category.iter().filter(|r| r.year == year).cloned().collect();
    if rows.is_empty() {
        return Err(SelectionError::UnknownYear(year));
    }

    let axis_max = rows
        .iter()
        .map(|r| metric.of_category(r))
        .fold(f64::NEG_INFINITY, f64::max)
        + CATEGORY_AXIS_MARGIN;

    Ok(CategorySlice { rows, axis_max })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(year: i32, age: &str, pref: &str, wage: f64) -> RegionalWageRow {
        RegionalWageRow {
            year,
            age_bracket: age.to_string(),
            prefecture: pref.to_string(),
            wage,
            salary: wage / 16.0,
            bonus: wage * 0.18,
        }
    }

    fn nat(year: i32, age: &str, wage: f64) -> NationalWageRow {
        NationalWageRow {
            year,
            age_bracket: age.to_string(),
            wage,
            salary: wage / 16.0,
            bonus: wage * 0.18,
        }
    }

    fn cat(year: i32, age: &str, industry: &str, wage: f64) -> CategoryWageRow {
        CategoryWageRow {
            year,
            age_bracket: age.to_string(),
            industry: industry.to_string(),
            wage,
            salary: wage / 16.0,
            bonus: wage * 0.18,
        }
    }

    fn point(pref: &str, lat: f64, lon: f64) -> PrefPoint {
        PrefPoint {
            pref_name: pref.to_string(),
            lat,
            lon,
        }
    }

    #[test]
    fn heatmap_is_an_inner_join_on_prefecture_name() {
        let regional = vec![
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "東京都", 600.0),
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "青森県", 350.0),
            // no coordinates for this one
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "大阪府", 500.0),
            // wrong year / wrong bracket, must be filtered out
            reg(2018, AGGREGATE_AGE, "東京都", 590.0),
            reg(HEATMAP_YEAR, "30-34", "東京都", 620.0),
        ];
        let coords = vec![
            point("東京都", 35.689, 139.692),
            point("青森県", 40.824, 140.740),
            // coordinates with no wage row
            point("沖縄県", 26.212, 127.681),
        ];

        let rows = heatmap_rows(&regional, &coords, HEATMAP_YEAR);
        let names: Vec<&str> = rows.iter().map(|r| r.prefecture.as_str()).collect();
        assert_eq!(names, vec!["東京都", "青森県"]);
    }

    #[test]
    fn heatmap_weight_spans_zero_to_one() {
        let regional = vec![
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "東京都", 600.0),
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "大阪府", 475.0),
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "青森県", 350.0),
        ];
        let coords = vec![
            point("東京都", 35.689, 139.692),
            point("大阪府", 34.686, 135.520),
            point("青森県", 40.824, 140.740),
        ];

        let rows = heatmap_rows(&regional, &coords, HEATMAP_YEAR);
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert!((0.0..=1.0).contains(&row.weight), "weight out of range: {row:?}");
        }
        assert_eq!(rows[0].weight, 1.0); // max wage
        assert_eq!(rows[1].weight, 0.5);
        assert_eq!(rows[2].weight, 0.0); // min wage
    }

    #[test]
    fn degenerate_heatmap_weights_are_constant_not_nan() {
        let regional = vec![
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "東京都", 400.0),
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "大阪府", 400.0),
        ];
        let coords = vec![
            point("東京都", 35.689, 139.692),
            point("大阪府", 34.686, 135.520),
        ];

        let rows = heatmap_rows(&regional, &coords, HEATMAP_YEAR);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert!(!row.weight.is_nan());
            assert_eq!(row.weight, 1.0);
        }
    }

    #[test]
    fn heatmap_of_empty_filter_is_empty() {
        let regional = vec![reg(2010, AGGREGATE_AGE, "東京都", 400.0)];
        let coords = vec![point("東京都", 35.689, 139.692)];
        assert!(heatmap_rows(&regional, &coords, HEATMAP_YEAR).is_empty());
    }

    #[test]
    fn trend_joins_exactly_the_year_intersection() {
        let national: Vec<_> = (2010..=2019).map(|y| nat(y, AGGREGATE_AGE, 450.0 + y as f64)).collect();
        let mut regional: Vec<_> = (2010..=2019)
            .map(|y| reg(y, AGGREGATE_AGE, "北海道", 380.0 + y as f64))
            .collect();
        // a year only the regional series has
        regional.push(reg(2020, AGGREGATE_AGE, "北海道", 405.0));
        // per-bracket rows must not leak into the series
        regional.push(reg(2015, "30-34", "北海道", 430.0));

        let rows = trend_rows(&national, &regional, "北海道").unwrap();
        assert_eq!(rows.len(), 10);
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, (2010..=2019).collect::<Vec<_>>());
        assert_eq!(rows[5].national, 450.0 + 2015.0);
        assert_eq!(rows[5].regional, 380.0 + 2015.0);
    }

    #[test]
    fn trend_rejects_unknown_prefecture() {
        let national = vec![nat(2019, AGGREGATE_AGE, 450.0)];
        let regional = vec![reg(2019, AGGREGATE_AGE, "北海道", 380.0)];
        let err = trend_rows(&national, &regional, "蝦夷").unwrap_err();
        assert!(matches!(err, SelectionError::UnknownPrefecture(p) if p == "蝦夷"));
    }

    #[test]
    fn bubble_rows_never_contain_the_aggregate_bracket() {
        let national = vec![
            nat(2019, AGGREGATE_AGE, 450.0),
            nat(2019, "20-24", 260.0),
            nat(2019, "30-34", 390.0),
            nat(2018, AGGREGATE_AGE, 445.0),
            nat(2018, "20-24", 255.0),
        ];
        let rows = bubble_rows(&national);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.age_bracket != AGGREGATE_AGE));
    }

    #[test]
    fn category_slice_filters_year_and_derives_axis_bound() {
        let category = vec![
            cat(2019, AGGREGATE_AGE, "Manufacturing", 480.0),
            cat(2019, AGGREGATE_AGE, "Construction", 455.0),
            cat(2018, AGGREGATE_AGE, "Manufacturing", 470.0),
        ];
        let slice = category_slice(&category, 2019, WageMetric::PerCapitaWage).unwrap();
        assert_eq!(slice.rows.len(), 2);
        assert_eq!(slice.axis_max, 480.0 + CATEGORY_AXIS_MARGIN);
    }

    #[test]
    fn category_slice_uses_the_selected_metric() {
        let category = vec![
            cat(2019, AGGREGATE_AGE, "Manufacturing", 480.0),
            cat(2019, AGGREGATE_AGE, "Construction", 455.0),
        ];
        let slice = category_slice(&category, 2019, WageMetric::AnnualBonus).unwrap();
        assert_eq!(slice.axis_max, 480.0 * 0.18 + CATEGORY_AXIS_MARGIN);
    }

    #[test]
    fn category_slice_rejects_absent_year() {
        let category = vec![cat(2019, AGGREGATE_AGE, "Manufacturing", 480.0)];
        let err = category_slice(&category, 1999, WageMetric::PerCapitaWage).unwrap_err();
        assert!(matches!(err, SelectionError::UnknownYear(1999)));
    }

    #[test]
    fn preparers_are_pure() {
        let regional = vec![
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "東京都", 600.0),
            reg(HEATMAP_YEAR, AGGREGATE_AGE, "青森県", 350.0),
        ];
        let coords = vec![
            point("東京都", 35.689, 139.692),
            point("青森県", 40.824, 140.740),
        ];
        let national = vec![
            nat(2019, AGGREGATE_AGE, 450.0),
            nat(2019, "20-24", 260.0),
        ];

        assert_eq!(
            heatmap_rows(&regional, &coords, HEATMAP_YEAR),
            heatmap_rows(&regional, &coords, HEATMAP_YEAR)
        );
        assert_eq!(
            trend_rows(&national, &regional, "東京都").unwrap(),
            trend_rows(&national, &regional, "東京都").unwrap()
        );
        assert_eq!(bubble_rows(&national), bubble_rows(&national));
    }
}
