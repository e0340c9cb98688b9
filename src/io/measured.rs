//! Luxmeter survey tables: CSV files with one named column per sensor.

use crate::daylight::config::MeasuredConfig;
use crate::{Error, Result};
use ndarray as nd;
use std::path::Path;

/// Reads `columns` from a headed CSV file, in the given order, times `unit_scale`.
///
/// Other columns are ignored. Every selected cell must be a number.
pub fn read_measured_csv(path: &Path, columns: &[String], unit_scale: f64) -> Result<nd::Array2<f64>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    let headers = rdr.headers().map_err(|e| Error::csv(path, e))?.clone();
    let mut indices = Vec::with_capacity(columns.len());
    for name in columns {
        let idx = headers.iter().position(|h| h == name).ok_or_else(|| Error::MalformedTable {
            path: path.to_path_buf(),
            line: 1,
            reason: format!("missing column {}", name),
        })?;
        indices.push(idx);
    }

    let mut values = Vec::new();
    let mut nrows = 0;
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| Error::csv(path, e))?;
        // Line 1 is the header
        let line = record.position().map_or(i + 2, |p| p.line() as usize);
        for (&idx, name) in indices.iter().zip(columns) {
            let cell = record.get(idx).unwrap_or("");
            let v: f64 = cell.parse().map_err(|_| Error::MalformedTable {
                path: path.to_path_buf(),
                line,
                reason: format!("column {}: {:?} is not a number", name, cell),
            })?;
            values.push(v * unit_scale);
        }
        nrows += 1;
    }

    nd::Array2::from_shape_vec((nrows, columns.len()), values).map_err(|e| Error::MalformedTable {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })
}

/// Measured grid of `hour`, read from `dir` and brought into comparison order.
pub fn load_measured_hour(dir: &Path, config: &MeasuredConfig, hour: u32) -> Result<nd::Array2<f64>> {
    let path = dir.join(config.file_name(hour));
    let mut grid = read_measured_csv(&path, &config.columns, config.unit_scale)?;
    if config.reverse_rows_on_odd_hours && hour % 2 == 1 {
        grid.invert_axis(nd::Axis(0));
    }
    log::debug!("Read {} x {} measured values from {}", grid.nrows(), grid.ncols(), path.display());
    Ok(config.orientation.apply(&grid))
}
