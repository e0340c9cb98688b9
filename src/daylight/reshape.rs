//! Re-gridding of per-sensor values onto a 2D spatial array.
//!
//! Two routes exist. `reshape_by_coords()` places every value at the cell of
//! its nearest distinct x and y coordinate and leaves unmatched cells NaN.
//! `reshape_fixed()` does a plain row-major reshape to a known shape.
//! Either result can be flipped with a `GridOrientation` for presentation.

use crate::daylight::sensor::SensorPoint;
use crate::vecutils::{distinct_sorted, nan_max, nan_mean, nan_median, nan_min, nearest_index};
use crate::{Error, Result};
use ndarray as nd;
use serde::{Deserialize, Serialize};

/// Coordinates closer than this are the same grid line.
const COORD_TOL: f64 = 1e-9;

/// Row and/or column reversal applied to a reshaped grid.
///
/// This is the single switch that aligns the emission order of the sensor
/// grid with the orientation of a plot or of a measured table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOrientation {
    #[serde(default)]
    pub reverse_rows: bool,
    #[serde(default)]
    pub reverse_cols: bool,
}

impl GridOrientation {
    pub const IDENTITY: Self = Self {
        reverse_rows: false,
        reverse_cols: false,
    };
    pub const REVERSE_ROWS: Self = Self {
        reverse_rows: true,
        reverse_cols: false,
    };
    pub const REVERSE_COLS: Self = Self {
        reverse_rows: false,
        reverse_cols: true,
    };
    pub const REVERSE_BOTH: Self = Self {
        reverse_rows: true,
        reverse_cols: true,
    };

    pub fn apply(&self, grid: &nd::Array2<f64>) -> nd::Array2<f64> {
        let rows = if self.reverse_rows { -1 } else { 1 };
        let cols = if self.reverse_cols { -1 } else { 1 };
        grid.slice(nd::s![..;rows, ..;cols]).to_owned()
    }
}

/// Values laid out on the distinct sensor coordinates.
///
/// `values[[iy, ix]]` belongs to `y[iy]`, `x[ix]`. Missing cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    pub values: nd::Array2<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl SpatialGrid {
    pub fn stats(&self) -> Option<GridStats> {
        GridStats::from_values(self.values.iter().copied())
    }

    pub fn oriented(&self, orientation: GridOrientation) -> Self {
        let flip = |axis: &[f64], rev: bool| {
            let mut v = axis.to_vec();
            if rev {
                v.reverse();
            }
            v
        };
        Self {
            values: orientation.apply(&self.values),
            x: flip(&self.x, orientation.reverse_cols),
            y: flip(&self.y, orientation.reverse_rows),
        }
    }
}

/// Aggregates over the cells that hold data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl GridStats {
    /// Returns None if every value is NaN (no data, e.g. at night).
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let vals: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        Some(Self {
            count: vals.len(),
            min: nan_min(&vals)?,
            max: nan_max(&vals)?,
            mean: nan_mean(&vals)?,
            median: nan_median(&vals)?,
        })
    }
}

/// Places `values[i]` at the cell nearest to `points[i]`.
pub fn reshape_by_coords(values: &[f64], points: &[SensorPoint]) -> Result<SpatialGrid> {
    if values.len() != points.len() {
        return Err(Error::SensorCountMismatch {
            expected: points.len(),
            found: values.len(),
        });
    }
    let xs: Vec<f64> = points.iter().map(|p| p.position.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.position.y).collect();
    let x = distinct_sorted(&xs, COORD_TOL);
    let y = distinct_sorted(&ys, COORD_TOL);

    let mut grid = nd::Array2::from_elem((y.len(), x.len()), f64::NAN);
    for ((&px, &py), &val) in xs.iter().zip(&ys).zip(values) {
        let (Some(ix), Some(iy)) = (nearest_index(&x, px), nearest_index(&y, py)) else {
            continue;
        };
        if !grid[[iy, ix]].is_nan() {
            log::warn!("Two sensors map to grid cell ({}, {}); keeping the later", iy, ix);
        }
        grid[[iy, ix]] = val;
    }

    Ok(SpatialGrid { values: grid, x, y })
}

/// Row-major reshape of `values` into `rows` x `cols`, then oriented.
pub fn reshape_fixed(
    values: &[f64],
    rows: usize,
    cols: usize,
    orientation: GridOrientation,
) -> Result<nd::Array2<f64>> {
    if rows * cols != values.len() {
        return Err(Error::IndexOutOfRange(format!(
            "cannot reshape {} values into {} x {}",
            values.len(),
            rows,
            cols
        )));
    }
    let grid = nd::Array2::from_shape_vec((rows, cols), values.to_vec())
        .map_err(|e| Error::IndexOutOfRange(e.to_string()))?;
    Ok(orientation.apply(&grid))
}
