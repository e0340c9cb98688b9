pub mod daylight;
pub mod error;
pub mod geom;
pub mod io;
pub mod vecutils;

// Prelude
pub use daylight::compare::{Comparison, ComparisonRecord, ErrorSummary};
pub use daylight::config::{AnalysisConfig, MeasuredConfig};
pub use daylight::hour::HourOfYear;
pub use daylight::reshape::{GridOrientation, SpatialGrid};
pub use daylight::sensor::{GridLayout, RoomBounds, SensorGrid, SensorPoint, WallOffsets};
pub use daylight::table::IlluminanceTable;
pub use error::{Error, Result};
pub use geom::bboxes::BoundingBox;
pub use geom::point::Point;
pub use geom::polygon::Polygon;
pub use geom::room::RoomGeometry;
pub use geom::vector::Vector;
