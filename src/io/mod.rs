//! File I/O for the daylight validation pipeline.
//!
//! Readers for scene geometry, annual illuminance matrices and measured
//! luxmeter tables, plus writers for sensor-point lists and comparison tables.

pub mod ill;
pub mod measured;
pub mod pts;
pub mod rad;
pub mod tables;

pub use ill::{IllHeader, parse_ill_str, read_ill};
pub use measured::{load_measured_hour, read_measured_csv};
pub use pts::{read_points, write_points};
pub use rad::{Scene, parse_rad_str, read_rad};
pub use tables::{write_comparison_csv, write_point_hour_csv, write_point_hour_tables};
