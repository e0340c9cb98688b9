use crate::geom::EPS;
use crate::geom::point::Point;
use std::fmt;

/// Axis-aligned bounding box.
///
/// Always recomputed from the points it covers, never updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Bounding box of all points `pts`. Returns None for an empty slice.
    pub fn from_points(pts: &[Point]) -> Option<Self> {
        let first = pts.first()?;
        let mut pmin = *first;
        let mut pmax = *first;
        for p in pts.iter().skip(1) {
            pmin.x = pmin.x.min(p.x);
            pmin.y = pmin.y.min(p.y);
            pmin.z = pmin.z.min(p.z);
            pmax.x = pmax.x.max(p.x);
            pmax.y = pmax.y.max(p.y);
            pmax.z = pmax.z.max(p.z);
        }
        Some(Self {
            min: pmin,
            max: pmax,
        })
    }

    pub fn extent_x(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn extent_y(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn extent_z(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Plan area of the box (x extent times y extent).
    pub fn plan_area(&self) -> f64 {
        self.extent_x() * self.extent_y()
    }

    /// Checks whether a point is inside the box (boundary included).
    pub fn contains(&self, ptest: Point) -> bool {
        ptest.x >= self.min.x - EPS
            && ptest.x <= self.max.x + EPS
            && ptest.y >= self.min.y - EPS
            && ptest.y <= self.max.y + EPS
            && ptest.z >= self.min.z - EPS
            && ptest.z <= self.max.z + EPS
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(3);
        write!(
            f,
            "X: {:.prec$} to {:.prec$} m, Y: {:.prec$} to {:.prec$} m, Z: {:.prec$} to {:.prec$} m",
            self.min.x,
            self.max.x,
            self.min.y,
            self.max.y,
            self.min.z,
            self.max.z,
            prec = prec
        )
    }
}
