use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::prepare::SelectionError;

/// Sentinel age bracket meaning "averaged across all ages".
///
/// The source data carries this as its own row per (year, region/industry);
/// it is a distinct category and is never recomputed from the individual
/// brackets.
pub const AGGREGATE_AGE: &str = "All ages";

// ---------------------------------------------------------------------------
// Row types – one per source CSV
// ---------------------------------------------------------------------------

/// One row of the national all-industries wage table.
/// Monetary columns are in units of 10,000 yen, as published.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NationalWageRow {
    pub year: i32,
    pub age_bracket: String,
    /// Per-capita annual wage.
    #[serde(rename = "per_capita_wage")]
    pub wage: f64,
    /// Contractual monthly salary.
    #[serde(rename = "monthly_salary")]
    pub salary: f64,
    /// Annual bonus and other special payments.
    #[serde(rename = "annual_bonus")]
    pub bonus: f64,
}

/// One row of the national by-industry-category wage table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryWageRow {
    pub year: i32,
    pub age_bracket: String,
    pub industry: String,
    #[serde(rename = "per_capita_wage")]
    pub wage: f64,
    #[serde(rename = "monthly_salary")]
    pub salary: f64,
    #[serde(rename = "annual_bonus")]
    pub bonus: f64,
}

/// One row of the per-prefecture all-industries wage table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionalWageRow {
    pub year: i32,
    pub age_bracket: String,
    pub prefecture: String,
    #[serde(rename = "per_capita_wage")]
    pub wage: f64,
    #[serde(rename = "monthly_salary")]
    pub salary: f64,
    #[serde(rename = "annual_bonus")]
    pub bonus: f64,
}

/// Prefecture name → capital latitude/longitude lookup row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrefPoint {
    pub pref_name: String,
    pub lat: f64,
    pub lon: f64,
}

// ---------------------------------------------------------------------------
// WageTables – the four loaded tables, read-only after load
// ---------------------------------------------------------------------------

/// All source tables, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct WageTables {
    pub national: Vec<NationalWageRow>,
    pub category: Vec<CategoryWageRow>,
    pub regional: Vec<RegionalWageRow>,
    pub coords: Vec<PrefPoint>,
}

impl WageTables {
    /// Distinct prefecture names, in first-appearance order.
    /// Selection controls are populated from this set, so a selection
    /// passed back to a preparer is valid by construction.
    pub fn prefecture_names(&self) -> Vec<String> {
        distinct(self.regional.iter().map(|r| r.prefecture.clone()))
    }

    /// Distinct years present in the industry-category table.
    pub fn category_years(&self) -> Vec<i32> {
        distinct(self.category.iter().map(|r| r.year))
    }

    /// Distinct age brackets in the category table, in data order
    /// (the source lists brackets youngest-first, which sorting would lose).
    pub fn category_age_brackets(&self) -> Vec<String> {
        distinct(self.category.iter().map(|r| r.age_bracket.clone()))
    }

    /// Distinct industry-category names, in data order.
    pub fn industries(&self) -> Vec<String> {
        distinct(self.category.iter().map(|r| r.industry.clone()))
    }
}

/// Unique values in first-appearance order.
fn distinct<T: PartialEq>(iter: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for v in iter {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// WageMetric – the closed set of plottable wage columns
// ---------------------------------------------------------------------------

/// The three wage measures a chart can be parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WageMetric {
    PerCapitaWage,
    MonthlySalary,
    AnnualBonus,
}

impl WageMetric {
    pub const ALL: [WageMetric; 3] = [
        WageMetric::PerCapitaWage,
        WageMetric::MonthlySalary,
        WageMetric::AnnualBonus,
    ];

    /// Human-readable label, also the accepted input of [`WageMetric::from_str`].
    pub fn label(self) -> &'static str {
        match self {
            WageMetric::PerCapitaWage => "Per-capita wage (10k yen)",
            WageMetric::MonthlySalary => "Monthly salary (10k yen)",
            WageMetric::AnnualBonus => "Annual bonus (10k yen)",
        }
    }

    /// Project this metric's value out of a category-table row.
    pub fn of_category(self, row: &CategoryWageRow) -> f64 {
        match self {
            WageMetric::PerCapitaWage => row.wage,
            WageMetric::MonthlySalary => row.salary,
            WageMetric::AnnualBonus => row.bonus,
        }
    }
}

impl fmt::Display for WageMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WageMetric {
    type Err = SelectionError;

    /// Validated string boundary: anything outside the three labels is
    /// rejected rather than silently mapped to an empty result.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WageMetric::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| SelectionError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regional(year: i32, pref: &str) -> RegionalWageRow {
        RegionalWageRow {
            year,
            age_bracket: AGGREGATE_AGE.to_string(),
            prefecture: pref.to_string(),
            wage: 400.0,
            salary: 28.0,
            bonus: 70.0,
        }
    }

    #[test]
    fn prefecture_names_keep_first_appearance_order() {
        let tables = WageTables {
            national: Vec::new(),
            category: Vec::new(),
            regional: vec![
                regional(2018, "東京都"),
                regional(2018, "北海道"),
                regional(2019, "東京都"),
                regional(2019, "北海道"),
            ],
            coords: Vec::new(),
        };
        assert_eq!(tables.prefecture_names(), vec!["東京都", "北海道"]);
    }

    #[test]
    fn metric_round_trips_through_label() {
        for m in WageMetric::ALL {
            assert_eq!(m.label().parse::<WageMetric>().unwrap(), m);
        }
    }

    #[test]
    fn unknown_metric_label_is_rejected() {
        let err = "median wage".parse::<WageMetric>().unwrap_err();
        assert!(matches!(err, SelectionError::UnknownMetric(s) if s == "median wage"));
    }
}
