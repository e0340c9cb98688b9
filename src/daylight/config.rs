use crate::daylight::hour::{DEFAULT_YEAR, HourOfYear};
use crate::daylight::reshape::GridOrientation;
use crate::daylight::sensor::{
    DEFAULT_WORK_PLANE_HEIGHT, GridLayout, RoomBounds, SensorGrid, WallOffsets, auto_fit,
    sensor_count,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Layout of the measured (luxmeter) tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredConfig {
    /// Sensor columns to read, in grid column order.
    pub columns: Vec<String>,
    /// Factor converting file units to lux (1000 for klux).
    pub unit_scale: f64,
    /// File name per hour; `{hour}` is replaced by the zero-padded hour.
    pub file_pattern: String,
    /// Survey rows were walked in reverse on odd hours.
    pub reverse_rows_on_odd_hours: bool,
    #[serde(default)]
    pub orientation: GridOrientation,
}

impl MeasuredConfig {
    pub fn new() -> Self {
        Self {
            columns: ["I1N", "I2N", "I3N", "I4N", "I1S", "I2S", "I3S", "I4S", "I5S"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unit_scale: 1000.0,
            file_pattern: "{hour}h.csv".to_string(),
            reverse_rows_on_odd_hours: true,
            orientation: GridOrientation::IDENTITY,
        }
    }

    pub fn file_name(&self, hour: u32) -> String {
        self.file_pattern.replace("{hour}", &format!("{:02}", hour))
    }
}

impl Default for MeasuredConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_work_plane_height() -> f64 {
    DEFAULT_WORK_PLANE_HEIGHT
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

/// Configuration of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub room: RoomBounds,
    pub grid: GridLayout,
    #[serde(default = "default_work_plane_height")]
    pub work_plane_height: f64,
    #[serde(default = "default_year")]
    pub year: i32,
    /// Applied to the simulated (nx, ny) grid before comparison.
    #[serde(default)]
    pub simulated_orientation: GridOrientation,
    #[serde(default)]
    pub measured: MeasuredConfig,
}

impl AnalysisConfig {
    /// Luxmeter validation layout: 7 x 9 points, 1.08 m apart.
    pub fn new() -> Self {
        Self {
            room: RoomBounds::new(
                0.458644626504064,
                8.31864462650407,
                -9.65327504952668,
                -0.0832750495266698,
            ),
            grid: GridLayout::Explicit {
                nx: 7,
                ny: 9,
                spacing: 1.08,
                offsets: WallOffsets {
                    x_min: 0.71,
                    x_max: 0.68,
                    y_min: 0.51,
                    y_max: 0.51,
                },
            },
            work_plane_height: DEFAULT_WORK_PLANE_HEIGHT,
            year: DEFAULT_YEAR,
            simulated_orientation: GridOrientation::REVERSE_COLS,
            measured: MeasuredConfig::new(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::json(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| Error::json(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.room.max_x > self.room.min_x && self.room.max_y > self.room.min_y) {
            return Err(Error::InvalidConfig(format!(
                "room bounds are empty: x {}..{}, y {}..{}",
                self.room.min_x, self.room.max_x, self.room.min_y, self.room.max_y
            )));
        }
        if !(self.work_plane_height >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "work plane height must not be negative, got {}",
                self.work_plane_height
            )));
        }
        if !(self.measured.unit_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "measured unit scale must be positive, got {}",
                self.measured.unit_scale
            )));
        }
        match &self.grid {
            GridLayout::Explicit { nx, ny, .. } => {
                if self.measured.columns.len() != *ny {
                    return Err(Error::InvalidConfig(format!(
                        "{} measured columns given for a grid with ny = {}",
                        self.measured.columns.len(),
                        ny
                    )));
                }
                sensor_count(*nx, *ny)?;
            }
            GridLayout::AutoFit {
                candidates,
                offsets,
            } => {
                let width = self.room.max_x - self.room.min_x - offsets.x_min - offsets.x_max;
                let depth = self.room.max_y - self.room.min_y - offsets.y_min - offsets.y_max;
                auto_fit(width, depth, candidates)?;
            }
        }
        HourOfYear::new(self.year)?;
        Ok(())
    }

    pub fn sensor_grid(&self) -> Result<SensorGrid> {
        SensorGrid::generate(self.room, &self.grid, self.work_plane_height)
    }

    pub fn hour_indexer(&self) -> Result<HourOfYear> {
        HourOfYear::new(self.year)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}
