use crate::daylight::hour::HourOfYear;
use crate::{Error, Result};
use ndarray as nd;

/// Annual illuminance values: rows are hours of the year, columns are sensors.
///
/// Column `j` belongs to the `j`-th point of the sensor-point list the
/// simulation was run with.
#[derive(Debug, Clone, PartialEq)]
pub struct IlluminanceTable {
    data: nd::Array2<f64>,
}

impl IlluminanceTable {
    pub fn new(data: nd::Array2<f64>) -> Self {
        Self { data }
    }

    /// Table with zero rows and zero columns.
    pub fn empty() -> Self {
        Self::new(nd::Array2::zeros((0, 0)))
    }

    /// Builds a table from row-major values.
    pub fn from_flat(
        nrows: usize,
        ncols: usize,
        values: Vec<f64>,
    ) -> std::result::Result<Self, nd::ShapeError> {
        Ok(Self::new(nd::Array2::from_shape_vec((nrows, ncols), values)?))
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn num_hours(&self) -> usize {
        self.data.nrows()
    }

    pub fn num_sensors(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> &nd::Array2<f64> {
        &self.data
    }

    /// Values of all sensors at row `idx`.
    pub fn row(&self, idx: usize) -> Result<nd::ArrayView1<'_, f64>> {
        if idx >= self.num_hours() {
            return Err(Error::IndexOutOfRange(format!(
                "row {} requested but the table has {} rows",
                idx,
                self.num_hours()
            )));
        }
        Ok(self.data.row(idx))
    }

    /// Values of all sensors representing clock time `hour`:00 on `month`/`day`.
    pub fn at(
        &self,
        indexer: &HourOfYear,
        month: u32,
        day: u32,
        hour: u32,
    ) -> Result<nd::ArrayView1<'_, f64>> {
        self.row(indexer.index(month, day, hour)?)
    }

    /// Fails unless the table has exactly `expected` sensor columns.
    pub fn check_sensor_count(&self, expected: usize) -> Result<()> {
        if self.num_sensors() != expected {
            return Err(Error::SensorCountMismatch {
                expected,
                found: self.num_sensors(),
            });
        }
        Ok(())
    }
}
