use crate::geom::bboxes::BoundingBox;
use crate::{Error, Point, Result, Vector};
use serde::{Deserialize, Serialize};

/// Nominal spacings tried by the auto-fit policy, smallest first.
pub const DEFAULT_CANDIDATE_SPACINGS: [f64; 7] = [0.4, 0.45, 0.5, 0.55, 0.6, 0.65, 0.7];

/// Default work-plane height above the floor [m].
pub const DEFAULT_WORK_PLANE_HEIGHT: f64 = 0.75;

/// Largest grid accepted by either layout.
pub const MAX_SENSORS: usize = 1_000_000;

/// A single sensor point on the work plane.
///
/// Its position in `SensorGrid::points` is its column index in the
/// illuminance table simulated for that grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPoint {
    pub position: Point,
    pub direction: Vector,
}

impl SensorPoint {
    pub fn new(position: Point, direction: Vector) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Plan extent of the room floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    #[serde(default)]
    pub floor_z: f64,
}

impl RoomBounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            floor_z: 0.0,
        }
    }

    /// Bounds of a floor bounding box; the floor level is its lowest z.
    pub fn from_bbox(bbox: &BoundingBox) -> Self {
        Self {
            min_x: bbox.min.x,
            max_x: bbox.max.x,
            min_y: bbox.min.y,
            max_y: bbox.max.y,
            floor_z: bbox.min.z,
        }
    }
}

/// Distance kept from each wall.
///
/// `x_min` is the wall at the lowest x, `y_max` the wall at the highest y, etc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallOffsets {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WallOffsets {
    pub fn uniform(offset: f64) -> Self {
        Self {
            x_min: offset,
            x_max: offset,
            y_min: offset,
            y_max: offset,
        }
    }
}

/// How the number of points and their spacing are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GridLayout {
    /// Picks the candidate spacing whose recomputed x and y spacings are
    /// closest to each other. Ties go to the first (smallest) candidate.
    AutoFit {
        #[serde(default = "default_candidates")]
        candidates: Vec<f64>,
        offsets: WallOffsets,
    },
    /// Fixed point counts and spacing, first point `offset` away from the
    /// `x_min`/`y_min` walls. The far-wall offsets are only checked.
    Explicit {
        nx: usize,
        ny: usize,
        spacing: f64,
        offsets: WallOffsets,
    },
}

impl GridLayout {
    pub fn offsets(&self) -> WallOffsets {
        match self {
            GridLayout::AutoFit { offsets, .. } | GridLayout::Explicit { offsets, .. } => *offsets,
        }
    }
}

/// `nx * ny`, or InvalidConfig when it overflows or exceeds `MAX_SENSORS`.
pub(crate) fn sensor_count(nx: usize, ny: usize) -> Result<usize> {
    match nx.checked_mul(ny) {
        Some(n) if n <= MAX_SENSORS => Ok(n),
        _ => Err(Error::InvalidConfig(format!(
            "{} x {} grid exceeds the limit of {} sensors",
            nx, ny, MAX_SENSORS
        ))),
    }
}

fn default_candidates() -> Vec<f64> {
    DEFAULT_CANDIDATE_SPACINGS.to_vec()
}

/// Outcome of the auto-fit search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoFit {
    pub nominal_spacing: f64,
    pub nx: usize,
    pub ny: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl AutoFit {
    /// Absolute difference between the x and y spacings [m].
    pub fn spacing_difference(&self) -> f64 {
        (self.spacing_x - self.spacing_y).abs()
    }
}

/// Tries each candidate spacing over the usable `width` x `depth` area.
///
/// Counts are `floor(extent / spacing) + 1` per axis and the actual spacing
/// is `extent / (count - 1)`.
pub fn auto_fit(width: f64, depth: f64, candidates: &[f64]) -> Result<AutoFit> {
    if !(width > 0.0 && depth > 0.0 && width.is_finite() && depth.is_finite()) {
        return Err(Error::InvalidConfig(format!(
            "usable area must be positive, got {} x {} m",
            width, depth
        )));
    }
    let mut best: Option<AutoFit> = None;
    for &spacing in candidates {
        if !(spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "candidate spacing must be positive, got {}",
                spacing
            )));
        }
        let count = |extent: f64| {
            let n = (extent / spacing).floor();
            if n < MAX_SENSORS as f64 {
                Ok(n as usize + 1)
            } else {
                Err(Error::InvalidConfig(format!(
                    "candidate spacing {} gives more than {} sensors",
                    spacing, MAX_SENSORS
                )))
            }
        };
        let (nx, ny) = (count(width)?, count(depth)?);
        sensor_count(nx, ny)?;
        let spacing_x = if nx > 1 { width / (nx - 1) as f64 } else { width };
        let spacing_y = if ny > 1 { depth / (ny - 1) as f64 } else { depth };
        let fit = AutoFit {
            nominal_spacing: spacing,
            nx,
            ny,
            spacing_x,
            spacing_y,
        };
        // Strict comparison keeps the first candidate on ties
        if best.is_none_or(|b| fit.spacing_difference() < b.spacing_difference()) {
            best = Some(fit);
        }
    }
    best.ok_or_else(|| Error::InvalidConfig("no candidate spacings given".to_string()))
}

/// Ordered sensor points on a rectangular work-plane grid.
///
/// Points are emitted with the x index in the outer loop and the y index in
/// the inner loop, so point `ix * ny + iy` sits at column `ix`, row `iy`.
#[derive(Debug, Clone)]
pub struct SensorGrid {
    pub points: Vec<SensorPoint>,
    pub nx: usize,
    pub ny: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub bounds: RoomBounds,
    pub layout: GridLayout,
}

impl SensorGrid {
    /// Generates the grid for `bounds` at `work_plane_height` above the floor.
    pub fn generate(bounds: RoomBounds, layout: &GridLayout, work_plane_height: f64) -> Result<Self> {
        let (start_x, start_y, nx, ny, spacing_x, spacing_y) = match layout {
            GridLayout::AutoFit {
                candidates,
                offsets,
            } => {
                let min_x = bounds.min_x + offsets.x_min;
                let max_x = bounds.max_x - offsets.x_max;
                let min_y = bounds.min_y + offsets.y_min;
                let max_y = bounds.max_y - offsets.y_max;
                let fit = auto_fit(max_x - min_x, max_y - min_y, candidates)?;
                log::info!(
                    "Auto-fit grid: nominal {:.2} m, actual {:.4} x {:.4} m ({:.2} mm apart), {} x {} points",
                    fit.nominal_spacing,
                    fit.spacing_x,
                    fit.spacing_y,
                    fit.spacing_difference() * 1000.0,
                    fit.nx,
                    fit.ny
                );
                (min_x, min_y, fit.nx, fit.ny, fit.spacing_x, fit.spacing_y)
            }
            GridLayout::Explicit {
                nx,
                ny,
                spacing,
                offsets,
            } => {
                if *nx == 0 || *ny == 0 || !(*spacing > 0.0 && spacing.is_finite()) {
                    return Err(Error::InvalidConfig(format!(
                        "explicit grid needs nx, ny > 0 and spacing > 0, got {} x {} at {}",
                        nx, ny, spacing
                    )));
                }
                (
                    bounds.min_x + offsets.x_min,
                    bounds.min_y + offsets.y_min,
                    *nx,
                    *ny,
                    *spacing,
                    *spacing,
                )
            }
        };

        let z = bounds.floor_z + work_plane_height;
        let mut points = Vec::with_capacity(sensor_count(nx, ny)?);
        for ix in 0..nx {
            let x = start_x + ix as f64 * spacing_x;
            for iy in 0..ny {
                let y = start_y + iy as f64 * spacing_y;
                points.push(SensorPoint::new(Point::new(x, y, z), Vector::up()));
            }
        }

        let grid = Self {
            points,
            nx,
            ny,
            spacing_x,
            spacing_y,
            bounds,
            layout: layout.clone(),
        };
        if let GridLayout::Explicit { offsets, .. } = layout {
            let (far_x, far_y) = grid.far_wall_offsets();
            if (far_x - offsets.x_max).abs() > 0.05 || (far_y - offsets.y_max).abs() > 0.05 {
                log::warn!(
                    "Explicit grid far-wall offsets are {:.3} m (x) and {:.3} m (y), configured {:.2} m and {:.2} m",
                    far_x,
                    far_y,
                    offsets.x_max,
                    offsets.y_max
                );
            }
        }
        Ok(grid)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the point at column `ix` (x axis) and row `iy` (y axis).
    pub fn index(&self, ix: usize, iy: usize) -> Option<usize> {
        (ix < self.nx && iy < self.ny).then_some(ix * self.ny + iy)
    }

    pub fn first(&self) -> Option<&SensorPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SensorPoint> {
        self.points.last()
    }

    /// Distances from the last column/row of points to the far x and y walls.
    ///
    /// A derived check value only: positions are never adjusted to it.
    pub fn far_wall_offsets(&self) -> (f64, f64) {
        let last_x = self.points.last().map_or(self.bounds.min_x, |p| p.position.x);
        let last_y = self.points.last().map_or(self.bounds.min_y, |p| p.position.y);
        (self.bounds.max_x - last_x, self.bounds.max_y - last_y)
    }

    /// Usable area, inside the wall offsets, served by each sensor [m2/sensor].
    pub fn density(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let o = self.layout.offsets();
        let width = (self.bounds.max_x - self.bounds.min_x - o.x_min - o.x_max).max(0.0);
        let depth = (self.bounds.max_y - self.bounds.min_y - o.y_min - o.y_max).max(0.0);
        width * depth / self.points.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_room() -> RoomBounds {
        RoomBounds::new(0.4586, 8.3186, -9.6533, -0.0833)
    }

    fn validation_layout() -> GridLayout {
        GridLayout::Explicit {
            nx: 7,
            ny: 9,
            spacing: 1.08,
            offsets: WallOffsets {
                x_min: 0.71,
                x_max: 0.68,
                y_min: 0.51,
                y_max: 0.51,
            },
        }
    }

    #[test]
    fn test_explicit_grid_corners() -> anyhow::Result<()> {
        let grid = SensorGrid::generate(validation_room(), &validation_layout(), 0.75)?;
        assert_eq!(grid.len(), 63);

        let first = grid.first().unwrap();
        assert!(first.position.is_within(&Point::new(1.1686, -9.1433, 0.75), 1e-9));
        assert_eq!(first.direction, Vector::new(0., 0., 1.));

        let last = grid.points[grid.index(6, 8).unwrap()];
        assert_eq!(grid.index(6, 8), Some(62));
        assert!(last.position.is_within(&Point::new(7.6486, -0.5033, 0.75), 1e-9));
        Ok(())
    }

    #[test]
    fn test_emission_order() -> anyhow::Result<()> {
        let grid = SensorGrid::generate(validation_room(), &validation_layout(), 0.75)?;
        // Inner loop walks y at constant x
        let p0 = grid.points[0].position;
        let p1 = grid.points[1].position;
        let p9 = grid.points[9].position;
        assert_eq!(p0.x, p1.x);
        assert!(p1.y > p0.y);
        assert!(p9.x > p0.x);
        assert_eq!(p9.y, p0.y);
        Ok(())
    }

    #[test]
    fn test_far_wall_offsets() -> anyhow::Result<()> {
        let grid = SensorGrid::generate(validation_room(), &validation_layout(), 0.75)?;
        let (far_x, far_y) = grid.far_wall_offsets();
        assert!((far_x - 0.67).abs() < 1e-9);
        assert!((far_y - 0.42).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_auto_fit_room() -> anyhow::Result<()> {
        let room = RoomBounds::new(
            0.458644626504064,
            8.31864462650407,
            -9.65327504952668,
            -0.0832750495266698,
        );
        let layout = GridLayout::AutoFit {
            candidates: DEFAULT_CANDIDATE_SPACINGS.to_vec(),
            offsets: WallOffsets::uniform(0.1),
        };
        let grid = SensorGrid::generate(room, &layout, 0.75)?;
        assert_eq!((grid.nx, grid.ny), (20, 24));
        assert_eq!(grid.len(), 480);
        assert!((grid.spacing_x - grid.spacing_y).abs() < 0.005);
        let first = grid.first().unwrap().position;
        assert!((first.x - 0.558644626504064).abs() < 1e-12);
        assert!((first.y + 9.55327504952668).abs() < 1e-12);
        let last = grid.last().unwrap().position;
        assert!((last.x - 8.21864462650407).abs() < 1e-9);
        assert!((last.y + 0.1832750495266698).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_auto_fit_is_deterministic() -> anyhow::Result<()> {
        let a = auto_fit(7.66, 9.37, &DEFAULT_CANDIDATE_SPACINGS)?;
        let b = auto_fit(7.66, 9.37, &DEFAULT_CANDIDATE_SPACINGS)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_auto_fit_tie_keeps_first() -> anyhow::Result<()> {
        // A square area gives identical x and y spacing for every candidate
        let fit = auto_fit(4.0, 4.0, &[0.5, 0.4, 0.8])?;
        assert_eq!(fit.nominal_spacing, 0.5);
        assert_eq!((fit.nx, fit.ny), (9, 9));
        Ok(())
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(matches!(
            auto_fit(0.0, 3.0, &DEFAULT_CANDIDATE_SPACINGS),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            auto_fit(3.0, 3.0, &[]),
            Err(Error::InvalidConfig(_))
        ));
        let layout = GridLayout::Explicit {
            nx: 0,
            ny: 9,
            spacing: 1.0,
            offsets: WallOffsets::default(),
        };
        assert!(matches!(
            SensorGrid::generate(validation_room(), &layout, 0.75),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_floor_level_offsets_work_plane() -> anyhow::Result<()> {
        let mut room = RoomBounds::new(0., 2., 0., 2.);
        room.floor_z = 3.2;
        let layout = GridLayout::Explicit {
            nx: 2,
            ny: 2,
            spacing: 1.0,
            offsets: WallOffsets::uniform(0.5),
        };
        let grid = SensorGrid::generate(room, &layout, 0.8)?;
        assert!(grid.points.iter().all(|p| (p.position.z - 4.0).abs() < 1e-12));
        // 1 x 1 m inside the offsets, shared by 4 points
        assert!((grid.density() - 0.25).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_density_uses_usable_area() -> anyhow::Result<()> {
        let room = RoomBounds::new(0., 4.5, 0., 3.5);
        let layout = GridLayout::AutoFit {
            candidates: vec![0.5],
            offsets: WallOffsets::uniform(0.25),
        };
        let grid = SensorGrid::generate(room, &layout, 0.75)?;
        assert_eq!((grid.nx, grid.ny), (9, 7));
        assert!((grid.density() - 4.0 * 3.0 / 63.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_oversized_grids_are_rejected() {
        assert!(matches!(
            auto_fit(7.66, 9.37, &[1e-6]),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            auto_fit(f64::INFINITY, 3.0, &[0.5]),
            Err(Error::InvalidConfig(_))
        ));
        let room = RoomBounds::new(0., 8., 0., 10.);
        let layout = GridLayout::AutoFit {
            candidates: vec![1e-6],
            offsets: WallOffsets::default(),
        };
        assert!(matches!(
            SensorGrid::generate(room, &layout, 0.75),
            Err(Error::InvalidConfig(_))
        ));
        let layout = GridLayout::Explicit {
            nx: usize::MAX,
            ny: 2,
            spacing: 1.0,
            offsets: WallOffsets::default(),
        };
        assert!(matches!(
            SensorGrid::generate(room, &layout, 0.75),
            Err(Error::InvalidConfig(_))
        ));
        let layout = GridLayout::Explicit {
            nx: 2000,
            ny: 2000,
            spacing: 0.001,
            offsets: WallOffsets::default(),
        };
        assert!(matches!(
            SensorGrid::generate(room, &layout, 0.75),
            Err(Error::InvalidConfig(_))
        ));
    }
}
