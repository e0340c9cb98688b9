use crate::daylight::sensor::RoomBounds;
use crate::geom::bboxes::BoundingBox;
use crate::io::rad::Scene;
use crate::Result;
use std::fmt;

/// Room dimensions derived from scene geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGeometry {
    pub floor: BoundingBox,
    /// Box around every polygon of the scene.
    pub room: BoundingBox,
    pub glazing: Option<BoundingBox>,
    /// Sum of the shoelace areas of the floor polygons.
    pub floor_area: f64,
    pub work_plane_height: f64,
}

impl RoomGeometry {
    /// Floor polygons are the ones whose material matches `floor_filter`.
    pub fn analyze<S: AsRef<str>>(
        scene: &Scene,
        floor_filter: &[S],
        glazing: Option<&Scene>,
        work_plane_height: f64,
    ) -> Result<Self> {
        let floor = scene.bbox(floor_filter)?;
        let floor_area = scene.plan_area(floor_filter)?;
        let all: [&str; 0] = [];
        let room = scene.bbox(&all)?;
        let glazing = match glazing {
            Some(g) => match g.bbox(&all) {
                Ok(b) => Some(b),
                Err(e) => {
                    log::warn!("No glazing geometry: {}", e);
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            floor,
            room,
            glazing,
            floor_area,
            work_plane_height,
        })
    }

    /// Floor extent along x.
    pub fn floor_length(&self) -> f64 {
        self.floor.extent_x()
    }

    /// Floor extent along y.
    pub fn floor_width(&self) -> f64 {
        self.floor.extent_y()
    }

    pub fn room_height(&self) -> f64 {
        self.room.extent_z()
    }

    /// Lowest glazing vertex.
    pub fn sill_height(&self) -> Option<f64> {
        self.glazing.map(|g| g.min.z)
    }

    pub fn work_plane_z(&self) -> f64 {
        self.floor.min.z + self.work_plane_height
    }

    pub fn bounds(&self) -> RoomBounds {
        RoomBounds::from_bbox(&self.floor)
    }

    /// Point counts of a square grid spanning the floor box at `spacing`.
    pub fn grid_size(&self, spacing: f64) -> (usize, usize) {
        let n = |extent: f64| (extent / spacing).floor() as usize + 1;
        (n(self.floor_length()), n(self.floor_width()))
    }
}

impl fmt::Display for RoomGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(3);
        writeln!(f, "Floor: {:.prec$}", self.floor, prec = prec)?;
        writeln!(
            f,
            "Floor length (X): {:.prec$} m, width (Y): {:.prec$} m, area: {:.2} m2",
            self.floor_length(),
            self.floor_width(),
            self.floor_area,
            prec = prec
        )?;
        writeln!(f, "Room: {:.prec$}", self.room, prec = prec)?;
        writeln!(f, "Room height: {:.prec$} m", self.room_height(), prec = prec)?;
        if let (Some(g), Some(sill)) = (self.glazing, self.sill_height()) {
            writeln!(f, "Glazing: {:.prec$}", g, prec = prec)?;
            writeln!(f, "Window sill height: {:.prec$} m", sill, prec = prec)?;
        }
        write!(
            f,
            "Work plane: {:.2} m above floor, z = {:.prec$} m",
            self.work_plane_height,
            self.work_plane_z(),
            prec = prec
        )
    }
}
