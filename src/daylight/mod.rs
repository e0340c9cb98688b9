//! Daylight validation: illuminance tables, hour-of-year indexing, sensor
//! grids, re-gridding and measured-vs-simulated comparison.

pub mod compare;
pub mod config;
pub mod hour;
pub mod reshape;
pub mod sensor;
pub mod table;
