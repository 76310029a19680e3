use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::model::{CategoryWageRow, NationalWageRow, PrefPoint, RegionalWageRow, WageTables};

// Fixed file names under the data directory. The wage exports come out
// of RESAS as Shift_JIS; the coordinate lookup is plain UTF-8.
pub const NATIONAL_FILE: &str = "wage_national_all_industries.csv";
pub const CATEGORY_FILE: &str = "wage_national_by_industry.csv";
pub const REGIONAL_FILE: &str = "wage_prefecture_all_industries.csv";
pub const COORDS_FILE: &str = "pref_lat_lon.csv";

const WAGE_COLUMNS: &[&str] = &["year", "age_bracket", "per_capita_wage", "monthly_salary", "annual_bonus"];
const COORD_COLUMNS: &[&str] = &["pref_name", "lat", "lon"];

/// A dataset failed to load. Always fatal to startup; there is no
/// partial dashboard and no retry.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid {encoding}")]
    Encoding { path: PathBuf, encoding: &'static str },
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Load all four source tables from `dir`.
///
/// Required columns are checked against each header row before any row
/// is parsed, so a column-name typo in a file is reported by name here
/// rather than surfacing as an empty chart later.
pub fn load_tables(dir: &Path) -> Result<WageTables, DataLoadError> {
    let mut category_cols = WAGE_COLUMNS.to_vec();
    let mut regional_cols = WAGE_COLUMNS.to_vec();
    category_cols.push("industry");
    regional_cols.push("prefecture");

    let national: Vec<NationalWageRow> =
        read_csv(&dir.join(NATIONAL_FILE), SHIFT_JIS, WAGE_COLUMNS)?;
    let category: Vec<CategoryWageRow> =
        read_csv(&dir.join(CATEGORY_FILE), SHIFT_JIS, &category_cols)?;
    let regional: Vec<RegionalWageRow> =
        read_csv(&dir.join(REGIONAL_FILE), SHIFT_JIS, &regional_cols)?;
    let coords: Vec<PrefPoint> = read_csv(&dir.join(COORDS_FILE), UTF_8, COORD_COLUMNS)?;

    log::info!(
        "loaded wage tables: {} national, {} category, {} regional rows, {} coordinates",
        national.len(),
        category.len(),
        regional.len(),
        coords.len()
    );

    Ok(WageTables {
        national,
        category,
        regional,
        coords,
    })
}

/// Read one CSV with a declared encoding into typed rows.
fn read_csv<T: DeserializeOwned>(
    path: &Path,
    encoding: &'static Encoding,
    required: &[&'static str],
) -> Result<Vec<T>, DataLoadError> {
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // A lossy decode would corrupt join keys silently, so malformed
    // bytes are a hard error.
    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(DataLoadError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|source| DataLoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DataLoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}
