//! Measured vs simulated illuminance, hour by hour.
//!
//! A `Comparison` collects one measured and one simulated grid per hour. Both
//! grids must have the same shape, and cell `[row, col]` of one must refer to
//! the same physical sensor as in the other. The sensor name of a cell comes
//! from its column.

use crate::daylight::hour::HourOfYear;
use crate::daylight::reshape::{GridOrientation, reshape_fixed};
use crate::daylight::sensor::SensorGrid;
use crate::daylight::table::IlluminanceTable;
use crate::vecutils::nan_mean;
use crate::{Error, Result};
use ndarray as nd;
use std::fmt;

/// One (hour, sensor) pair. `row`, `col` and `point` are zero-based; `point`
/// counts cells in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub hour: String,
    pub row: usize,
    pub col: usize,
    pub point: usize,
    pub sensor: String,
    pub measured: f64,
    pub simulated: f64,
}

impl ComparisonRecord {
    /// Simulated minus measured.
    pub fn difference(&self) -> f64 {
        self.simulated - self.measured
    }

    /// Relative difference in percent. None when nothing was measured.
    pub fn error_pct(&self) -> Option<f64> {
        (self.measured > 0.0).then(|| 100.0 * self.difference() / self.measured)
    }
}

/// Measured and simulated grids of one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourGrids {
    pub label: String,
    pub measured: nd::Array2<f64>,
    pub simulated: nd::Array2<f64>,
}

impl HourGrids {
    /// Mean illuminance of each grid row, measured then simulated. Rows whose
    /// ranking differs between the two hint at a wrong orientation.
    pub fn row_means(&self) -> (Vec<f64>, Vec<f64>) {
        let means = |a: &nd::Array2<f64>| -> Vec<f64> {
            a.rows()
                .into_iter()
                .map(|row| nan_mean(&row.to_vec()).unwrap_or(f64::NAN))
                .collect()
        };
        (means(&self.measured), means(&self.simulated))
    }
}

pub fn hour_label(hour: u32) -> String {
    format!("{}:00", hour)
}

#[derive(Debug, Clone, Default)]
pub struct Comparison {
    sensor_names: Vec<String>,
    hours: Vec<HourGrids>,
}

impl Comparison {
    pub fn new(sensor_names: Vec<String>) -> Self {
        Self {
            sensor_names,
            hours: Vec::new(),
        }
    }

    pub fn hours(&self) -> &[HourGrids] {
        &self.hours
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Adds one hour. Fails if the grids differ in shape or do not have one
    /// column per sensor name.
    pub fn push(
        &mut self,
        label: &str,
        measured: nd::Array2<f64>,
        simulated: nd::Array2<f64>,
    ) -> Result<()> {
        if measured.len() != simulated.len() {
            return Err(Error::SensorCountMismatch {
                expected: measured.len(),
                found: simulated.len(),
            });
        }
        if measured.dim() != simulated.dim() {
            return Err(Error::IndexOutOfRange(format!(
                "hour {}: measured grid is {:?} but simulated grid is {:?}",
                label,
                measured.dim(),
                simulated.dim()
            )));
        }
        if measured.ncols() != self.sensor_names.len() {
            return Err(Error::InvalidConfig(format!(
                "hour {}: grid has {} columns but {} sensor names are given",
                label,
                measured.ncols(),
                self.sensor_names.len()
            )));
        }
        if let Some(first) = self.hours.first() {
            if first.measured.dim() != measured.dim() {
                return Err(Error::IndexOutOfRange(format!(
                    "hour {}: grid is {:?} but earlier hours are {:?}",
                    label,
                    measured.dim(),
                    first.measured.dim()
                )));
            }
        }
        self.hours.push(HourGrids {
            label: label.to_string(),
            measured,
            simulated,
        });
        Ok(())
    }

    /// Records ordered by hour, then row, then column.
    pub fn records(&self) -> Vec<ComparisonRecord> {
        let mut records = Vec::new();
        for h in &self.hours {
            for ((row, col), &measured) in h.measured.indexed_iter() {
                records.push(ComparisonRecord {
                    hour: h.label.clone(),
                    row,
                    col,
                    point: row * h.measured.ncols() + col,
                    sensor: self.sensor_names[col].clone(),
                    measured,
                    simulated: h.simulated[[row, col]],
                });
            }
        }
        records
    }

    /// Error statistics of each hour, in insertion order.
    pub fn per_hour_summary(&self) -> Vec<(String, ErrorSummary)> {
        let records = self.records();
        self.hours
            .iter()
            .filter_map(|h| {
                let hour: Vec<ComparisonRecord> =
                    records.iter().filter(|r| r.hour == h.label).cloned().collect();
                ErrorSummary::from_records(&hour).map(|s| (h.label.clone(), s))
            })
            .collect()
    }

    pub fn summary(&self) -> Option<ErrorSummary> {
        ErrorSummary::from_records(&self.records())
    }

    /// Points x hours matrices. Point `i` is the `i`-th cell in row-major order.
    pub fn point_hour_tables(&self) -> PointHourTables {
        let npoints = self.hours.first().map_or(0, |h| h.measured.len());
        let mut measured = nd::Array2::zeros((npoints, self.hours.len()));
        let mut simulated = nd::Array2::zeros((npoints, self.hours.len()));
        for (j, h) in self.hours.iter().enumerate() {
            for (i, (&m, &s)) in h.measured.iter().zip(h.simulated.iter()).enumerate() {
                measured[[i, j]] = m;
                simulated[[i, j]] = s;
            }
        }
        PointHourTables {
            hours: self.hours.iter().map(|h| h.label.clone()).collect(),
            difference: &simulated - &measured,
            measured,
            simulated,
        }
    }
}

/// Simulated values of one hour as an (nx, ny) grid in the comparison orientation.
pub fn simulated_grid(
    table: &IlluminanceTable,
    grid: &SensorGrid,
    indexer: &HourOfYear,
    orientation: GridOrientation,
    (month, day, hour): (u32, u32, u32),
) -> Result<nd::Array2<f64>> {
    table.check_sensor_count(grid.len())?;
    let row = table.at(indexer, month, day, hour)?;
    reshape_fixed(&row.to_vec(), grid.nx, grid.ny, orientation)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointHourTables {
    pub hours: Vec<String>,
    pub measured: nd::Array2<f64>,
    pub simulated: nd::Array2<f64>,
    pub difference: nd::Array2<f64>,
}

/// Aggregate error of simulated against measured values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub count: usize,
    /// Mean bias error.
    pub mbe: f64,
    /// Sample standard deviation of the difference.
    pub std: f64,
    pub rmse: f64,
    pub min_diff: f64,
    pub max_diff: f64,
    pub measured_mean: f64,
}

impl ErrorSummary {
    pub fn from_records(records: &[ComparisonRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let diffs: Vec<f64> = records.iter().map(|r| r.difference()).collect();
        let mbe = diffs.iter().sum::<f64>() / n;
        let var = if records.len() > 1 {
            diffs.iter().map(|d| (d - mbe).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };
        Some(Self {
            count: records.len(),
            mbe,
            std: var.sqrt(),
            rmse: (diffs.iter().map(|d| d * d).sum::<f64>() / n).sqrt(),
            min_diff: diffs.iter().copied().fold(f64::INFINITY, f64::min),
            max_diff: diffs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            measured_mean: records.iter().map(|r| r.measured).sum::<f64>() / n,
        })
    }

    pub fn mbe_pct(&self) -> Option<f64> {
        (self.measured_mean != 0.0).then(|| 100.0 * self.mbe / self.measured_mean)
    }

    pub fn cv_rmse_pct(&self) -> Option<f64> {
        (self.measured_mean != 0.0).then(|| 100.0 * self.rmse / self.measured_mean)
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(1);
        let pct = |v: Option<f64>| match v {
            Some(v) => format!("{:+.*}%", prec, v),
            None => "n/a".to_string(),
        };
        writeln!(f, "Total points: {}", self.count)?;
        writeln!(f, "Mean Bias (MBE): {:+.*} lux", prec, self.mbe)?;
        writeln!(f, "Std Dev: {:.*} lux", prec, self.std)?;
        writeln!(f, "RMSE: {:.*} lux", prec, self.rmse)?;
        writeln!(
            f,
            "Range: {:+.*} to {:+.*} lux",
            prec, self.min_diff, prec, self.max_diff
        )?;
        writeln!(f, "Measured mean: {:.*} lux", prec, self.measured_mean)?;
        writeln!(f, "MBE %: {}", pct(self.mbe_pct()))?;
        write!(f, "CV(RMSE): {}", pct(self.cv_rmse_pct()).trim_start_matches('+'))
    }
}
