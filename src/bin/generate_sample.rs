//! Writes the four sample CSV datasets the dashboard expects into `data/`:
//! national, by-industry, and per-prefecture wage tables (Shift_JIS, like
//! the upstream RESAS exports) plus the prefecture coordinate lookup
//! (UTF-8). Output is deterministic.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::SHIFT_JIS;

const YEARS: std::ops::RangeInclusive<i32> = 2010..=2019;
const AGGREGATE_AGE: &str = "All ages";

/// (age bracket, base annual per-capita wage in 10k yen)
const AGE_PROFILE: &[(&str, f64)] = &[
    ("19 and under", 160.0),
    ("20-24", 265.0),
    ("25-29", 330.0),
    ("30-34", 390.0),
    ("35-39", 440.0),
    ("40-44", 480.0),
    ("45-49", 515.0),
    ("50-54", 535.0),
    ("55-59", 520.0),
    ("60-64", 355.0),
    ("65 and over", 280.0),
];

/// (industry category, multiplier on the national wage level)
const INDUSTRIES: &[(&str, f64)] = &[
    ("Construction", 1.00),
    ("Manufacturing", 1.02),
    ("Information & communications", 1.28),
    ("Transport & postal services", 0.88),
    ("Wholesale & retail trade", 0.95),
    ("Finance & insurance", 1.35),
    ("Real estate & goods rental", 1.08),
    ("Scientific research & professional services", 1.25),
    ("Accommodation & food services", 0.68),
    ("Medical, health care & welfare", 0.92),
    ("Education & learning support", 1.10),
    ("Other services", 0.80),
];

/// 47 prefectures: name, capital latitude/longitude, wage multiplier.
const PREFECTURES: &[(&str, f64, f64, f64)] = &[
    ("北海道", 43.064, 141.347, 0.90),
    ("青森県", 40.824, 140.740, 0.79),
    ("岩手県", 39.704, 141.153, 0.81),
    ("宮城県", 38.269, 140.872, 0.93),
    ("秋田県", 39.719, 140.102, 0.78),
    ("山形県", 38.240, 140.363, 0.81),
    ("福島県", 37.750, 140.468, 0.86),
    ("茨城県", 36.342, 140.447, 0.97),
    ("栃木県", 36.566, 139.884, 0.95),
    ("群馬県", 36.391, 139.060, 0.93),
    ("埼玉県", 35.857, 139.649, 1.00),
    ("千葉県", 35.605, 140.123, 1.00),
    ("東京都", 35.689, 139.692, 1.30),
    ("神奈川県", 35.448, 139.642, 1.12),
    ("新潟県", 37.902, 139.023, 0.84),
    ("富山県", 36.695, 137.211, 0.89),
    ("石川県", 36.594, 136.626, 0.90),
    ("福井県", 36.065, 136.222, 0.88),
    ("山梨県", 35.664, 138.568, 0.92),
    ("長野県", 36.651, 138.181, 0.90),
    ("岐阜県", 35.391, 136.722, 0.91),
    ("静岡県", 34.977, 138.383, 0.96),
    ("愛知県", 35.180, 136.907, 1.09),
    ("三重県", 34.730, 136.509, 0.97),
    ("滋賀県", 35.005, 135.869, 0.98),
    ("京都府", 35.021, 135.756, 1.02),
    ("大阪府", 34.686, 135.520, 1.10),
    ("兵庫県", 34.691, 135.183, 1.01),
    ("奈良県", 34.685, 135.833, 0.97),
    ("和歌山県", 34.226, 135.168, 0.88),
    ("鳥取県", 35.504, 134.238, 0.79),
    ("島根県", 35.472, 133.051, 0.80),
    ("岡山県", 34.662, 133.934, 0.92),
    ("広島県", 34.397, 132.460, 0.97),
    ("山口県", 34.186, 131.471, 0.90),
    ("徳島県", 34.066, 134.559, 0.85),
    ("香川県", 34.340, 134.043, 0.89),
    ("愛媛県", 33.842, 132.766, 0.84),
    ("高知県", 33.560, 133.531, 0.81),
    ("福岡県", 33.607, 130.418, 0.96),
    ("佐賀県", 33.249, 130.299, 0.81),
    ("長崎県", 32.745, 129.874, 0.82),
    ("熊本県", 32.790, 130.742, 0.84),
    ("大分県", 33.238, 131.613, 0.85),
    ("宮崎県", 31.911, 131.424, 0.77),
    ("鹿児島県", 31.560, 130.558, 0.80),
    ("沖縄県", 26.212, 127.681, 0.74),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One (wage, salary, bonus) sample, in 10k yen, for a bracket's base
/// wage scaled by a level multiplier and a mild upward year trend.
fn wage_sample(rng: &mut SimpleRng, base: f64, multiplier: f64, year: i32) -> (f64, f64, f64) {
    let trend = 1.0 + 0.008 * (year - 2010) as f64;
    let wage = rng.gauss(base * multiplier * trend, base * 0.02).max(50.0);
    let salary = wage / 16.0;
    let bonus = (wage * 0.18 + rng.gauss(0.0, 3.0)).max(0.0);
    (round1(wage), round1(salary), round1(bonus))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn write_shift_jis(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing csv buffer: {e}"))?;
    let text = String::from_utf8(buffer)?;
    let (encoded, _, _) = SHIFT_JIS.encode(&text);
    std::fs::write(path, &encoded).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let data_dir = Path::new("data");
    std::fs::create_dir_all(data_dir).context("creating data directory")?;

    let wage_header = |extra: Option<&str>| -> Vec<String> {
        let mut h = vec!["year".to_string(), "age_bracket".to_string()];
        if let Some(col) = extra {
            h.push(col.to_string());
        }
        h.extend(["per_capita_wage", "monthly_salary", "annual_bonus"].map(String::from));
        h
    };

    // ---- National all-industries table ----
    // The aggregate row is the mean of the generated brackets, so the
    // sentinel stays consistent with the per-bracket rows.
    let mut national = vec![wage_header(None)];
    for year in YEARS {
        let mut sums = (0.0, 0.0, 0.0);
        let mut bracket_rows = Vec::new();
        for &(bracket, base) in AGE_PROFILE {
            let (wage, salary, bonus) = wage_sample(&mut rng, base, 1.0, year);
            sums = (sums.0 + wage, sums.1 + salary, sums.2 + bonus);
            bracket_rows.push(vec![
                year.to_string(),
                bracket.to_string(),
                wage.to_string(),
                salary.to_string(),
                bonus.to_string(),
            ]);
        }
        let n = AGE_PROFILE.len() as f64;
        national.push(vec![
            year.to_string(),
            AGGREGATE_AGE.to_string(),
            round1(sums.0 / n).to_string(),
            round1(sums.1 / n).to_string(),
            round1(sums.2 / n).to_string(),
        ]);
        national.extend(bracket_rows);
    }
    write_shift_jis(&data_dir.join("wage_national_all_industries.csv"), &national)?;

    // ---- National by-industry table ----
    let mut category = vec![wage_header(Some("industry"))];
    for year in YEARS {
        for &(bracket, base) in
            std::iter::once(&(AGGREGATE_AGE, 400.0)).chain(AGE_PROFILE.iter())
        {
            for &(industry, multiplier) in INDUSTRIES {
                let (wage, salary, bonus) = wage_sample(&mut rng, base, multiplier, year);
                category.push(vec![
                    year.to_string(),
                    bracket.to_string(),
                    industry.to_string(),
                    wage.to_string(),
                    salary.to_string(),
                    bonus.to_string(),
                ]);
            }
        }
    }
    write_shift_jis(&data_dir.join("wage_national_by_industry.csv"), &category)?;

    // ---- Per-prefecture all-industries table ----
    let mut regional = vec![wage_header(Some("prefecture"))];
    for year in YEARS {
        for &(pref, _, _, multiplier) in PREFECTURES {
            for &(bracket, base) in
                std::iter::once(&(AGGREGATE_AGE, 400.0)).chain(AGE_PROFILE.iter())
            {
                let (wage, salary, bonus) = wage_sample(&mut rng, base, multiplier, year);
                regional.push(vec![
                    year.to_string(),
                    bracket.to_string(),
                    pref.to_string(),
                    wage.to_string(),
                    salary.to_string(),
                    bonus.to_string(),
                ]);
            }
        }
    }
    write_shift_jis(
        &data_dir.join("wage_prefecture_all_industries.csv"),
        &regional,
    )?;

    // ---- Coordinate lookup (UTF-8) ----
    let coords_path = data_dir.join("pref_lat_lon.csv");
    let mut writer = csv::Writer::from_path(&coords_path)
        .with_context(|| format!("creating {}", coords_path.display()))?;
    writer.write_record(["pref_name", "lat", "lon"])?;
    for &(pref, lat, lon, _) in PREFECTURES {
        writer.write_record([pref.to_string(), lat.to_string(), lon.to_string()])?;
    }
    writer.flush()?;

    println!(
        "Wrote {} national, {} industry, {} prefectural rows and {} coordinates to {}",
        national.len() - 1,
        category.len() - 1,
        regional.len() - 1,
        PREFECTURES.len(),
        data_dir.display()
    );
    Ok(())
}
