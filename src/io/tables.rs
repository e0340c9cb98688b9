//! CSV export of comparison results. Values are rounded to 0.1 for presentation.

use crate::daylight::compare::{ComparisonRecord, PointHourTables};
use crate::{Error, Result};
use ndarray as nd;
use serde::Serialize;
use std::path::Path;

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[derive(Serialize)]
struct ComparisonRow<'a> {
    #[serde(rename = "Hour")]
    hour: &'a str,
    #[serde(rename = "Line")]
    line: usize,
    #[serde(rename = "Sensor")]
    sensor: &'a str,
    #[serde(rename = "Point")]
    point: usize,
    #[serde(rename = "Experimental_lux")]
    measured: f64,
    #[serde(rename = "Radiance_lux")]
    simulated: f64,
    #[serde(rename = "Difference_lux")]
    difference: f64,
    #[serde(rename = "Error_%")]
    error_pct: Option<f64>,
}

impl<'a> From<&'a ComparisonRecord> for ComparisonRow<'a> {
    fn from(r: &'a ComparisonRecord) -> Self {
        Self {
            hour: &r.hour,
            line: r.row + 1,
            sensor: &r.sensor,
            point: r.point + 1,
            measured: round1(r.measured),
            simulated: round1(r.simulated),
            difference: round1(r.difference()),
            error_pct: r.error_pct().map(round1),
        }
    }
}

/// One row per record. Line and point numbers are 1-based.
pub fn write_comparison_csv(path: &Path, records: &[ComparisonRecord]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
    for r in records {
        w.serialize(ComparisonRow::from(r)).map_err(|e| Error::csv(path, e))?;
    }
    w.flush().map_err(|e| Error::io(path, e))?;
    log::info!("Wrote {} comparison records to {}", records.len(), path.display());
    Ok(())
}

/// Points x hours matrix with a `Point` column followed by one column per hour.
pub fn write_point_hour_csv(path: &Path, hours: &[String], values: &nd::Array2<f64>) -> Result<()> {
    if values.ncols() != hours.len() {
        return Err(Error::IndexOutOfRange(format!(
            "{} hour labels for a table with {} columns",
            hours.len(),
            values.ncols()
        )));
    }
    let mut w = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
    let mut header = vec!["Point".to_string()];
    header.extend(hours.iter().cloned());
    w.write_record(&header).map_err(|e| Error::csv(path, e))?;
    for (i, row) in values.rows().into_iter().enumerate() {
        let mut rec = vec![(i + 1).to_string()];
        rec.extend(row.iter().map(|&v| format!("{:.1}", v)));
        w.write_record(&rec).map_err(|e| Error::csv(path, e))?;
    }
    w.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Writes `<prefix>_experimental.csv`, `<prefix>_radiance.csv` and
/// `<prefix>_difference.csv` into `dir`.
pub fn write_point_hour_tables(dir: &Path, prefix: &str, tables: &PointHourTables) -> Result<()> {
    for (suffix, values) in [
        ("experimental", &tables.measured),
        ("radiance", &tables.simulated),
        ("difference", &tables.difference),
    ] {
        let path = dir.join(format!("{}_{}.csv", prefix, suffix));
        write_point_hour_csv(&path, &tables.hours, values)?;
    }
    log::info!("Wrote point x hour tables {}_*.csv to {}", prefix, dir.display());
    Ok(())
}
