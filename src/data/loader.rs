use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;

use super::model::{Dataset, DistanceBinRow, RoofSummaryRow, SeasonRoofRow};

/// File names the dashboard looks for in the working directory before
/// falling back to interactive upload.
pub const BY_ROOF_FILE: &str = "fg_by_roof.csv";
pub const DIST_BINS_FILE: &str = "fg_by_roof_distbins.csv";
pub const SEASON_FILE: &str = "fg_by_season_roof.csv";

// ---------------------------------------------------------------------------
// Repo autodetect
// ---------------------------------------------------------------------------

/// Load whatever tables sit in `dir`. Both mandatory files must be present
/// for the autodetect to kick in; the optional season table rides along when
/// it exists. `Ok(None)` means "nothing committed, prompt for upload".
pub fn load_from_dir(dir: &Path) -> Result<Option<Dataset>> {
    let by_roof_path = dir.join(BY_ROOF_FILE);
    let dist_path = dir.join(DIST_BINS_FILE);
    if !by_roof_path.is_file() || !dist_path.is_file() {
        return Ok(None);
    }

    let by_roof = load_by_roof(&by_roof_path)?;
    let dist_bins = load_dist_bins(&dist_path)?;

    let season_path = dir.join(SEASON_FILE);
    let season = if season_path.is_file() {
        Some(load_season(&season_path)?)
    } else {
        None
    };

    Ok(Some(Dataset {
        by_roof: Some(by_roof),
        dist_bins: Some(dist_bins),
        season,
    }))
}

// ---------------------------------------------------------------------------
// Per-table loaders
// ---------------------------------------------------------------------------

pub fn load_by_roof(path: &Path) -> Result<Vec<RoofSummaryRow>> {
    by_roof_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_dist_bins(path: &Path) -> Result<Vec<DistanceBinRow>> {
    dist_bins_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_season(path: &Path) -> Result<Vec<SeasonRoofRow>> {
    season_from_reader(open(path)?, &path.display().to_string())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("opening {}", path.display()))
}

pub fn by_roof_from_reader<R: Read>(rdr: R, source: &str) -> Result<Vec<RoofSummaryRow>> {
    let rows: Vec<RoofSummaryRow> = read_rows(rdr, source)?;
    for (row_no, row) in rows.iter().enumerate() {
        check_rate(row.fg_pct, source, row_no)?;
    }
    Ok(rows)
}

pub fn dist_bins_from_reader<R: Read>(rdr: R, source: &str) -> Result<Vec<DistanceBinRow>> {
    let rows: Vec<DistanceBinRow> = read_rows(rdr, source)?;
    for (row_no, row) in rows.iter().enumerate() {
        check_rate(row.fg_pct, source, row_no)?;
        if row.dist_bin.trim().is_empty() {
            bail!("{source}: row {row_no}: empty dist_bin label");
        }
    }
    Ok(rows)
}

pub fn season_from_reader<R: Read>(rdr: R, source: &str) -> Result<Vec<SeasonRoofRow>> {
    let rows: Vec<SeasonRoofRow> = read_rows(rdr, source)?;
    for (row_no, row) in rows.iter().enumerate() {
        check_rate(row.fg_pct, source, row_no)?;
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// CSV plumbing
// ---------------------------------------------------------------------------

/// Header-driven typed deserialization. Missing optional columns come out as
/// `None`; a missing required column or an unparseable cell (including an
/// unknown `roof_norm` value) fails the whole table with the row number in
/// the error chain.
fn read_rows<T: DeserializeOwned, R: Read>(rdr: R, source: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| format!("{source}: row {row_no}"))?;
        rows.push(row);
    }
    Ok(rows)
}

fn check_rate(fg_pct: f64, source: &str, row_no: usize) -> Result<()> {
    if !(0.0..=1.0).contains(&fg_pct) {
        bail!("{source}: row {row_no}: fg_pct {fg_pct} outside [0, 1]");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RoofCategory;

    #[test]
    fn by_roof_with_all_columns() {
        let csv = "\
roof_norm,fg_pct,attempts,makes,avg_dist
indoor,0.8547,1234,1055,37.2
outdoor,0.8012,2456,1968,37.9
";
        let rows = by_roof_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].roof_norm, RoofCategory::Indoor);
        assert_eq!(rows[0].attempts, Some(1234));
        assert_eq!(rows[1].makes, Some(1968));
        assert!((rows[1].fg_pct - 0.8012).abs() < 1e-12);
    }

    #[test]
    fn by_roof_without_optional_columns() {
        let csv = "\
roof_norm,fg_pct
indoor,0.85
outdoor,0.80
";
        let rows = by_roof_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(rows[0].attempts, None);
        assert_eq!(rows[0].makes, None);
        assert_eq!(rows[0].avg_dist, None);
    }

    #[test]
    fn unknown_roof_value_fails_the_table() {
        let csv = "\
roof_norm,fg_pct
retractable,0.83
";
        let err = by_roof_from_reader(csv.as_bytes(), "test").unwrap_err();
        assert!(err.to_string().contains("row 0"));
    }

    #[test]
    fn out_of_range_rate_fails_the_table() {
        let csv = "\
roof_norm,fg_pct
indoor,85.47
";
        let err = by_roof_from_reader(csv.as_bytes(), "test").unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn dist_bins_parse() {
        let csv = "\
dist_bin,roof_norm,fg_pct
40-49,indoor,0.75
40-49,outdoor,0.65
50+,indoor,0.62
50+,outdoor,0.55
";
        let rows = dist_bins_from_reader(csv.as_bytes(), "test").unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].dist_bin, "50+");
        assert_eq!(rows[3].roof_norm, RoofCategory::Outdoor);
    }

    #[test]
    fn empty_bucket_label_fails() {
        let csv = "\
dist_bin,roof_norm,fg_pct
,indoor,0.75
";
        assert!(dist_bins_from_reader(csv.as_bytes(), "test").is_err());
    }

    #[test]
    fn season_with_and_without_attempts() {
        let with = "\
season,roof_norm,fg_pct,attempts,avg_dist
2018,indoor,0.80,100,36.5
2019,indoor,0.90,50,38.1
";
        let rows = season_from_reader(with.as_bytes(), "test").unwrap();
        assert_eq!(rows[0].season, 2018);
        assert_eq!(rows[1].attempts, Some(50));

        let without = "\
season,roof_norm,fg_pct
2018,outdoor,0.79
";
        let rows = season_from_reader(without.as_bytes(), "test").unwrap();
        assert_eq!(rows[0].attempts, None);
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "\
roof_norm
indoor
";
        assert!(by_roof_from_reader(csv.as_bytes(), "test").is_err());
    }
}
