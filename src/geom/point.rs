use crate::geom::EPS;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.z - other.z).abs() < EPS
    }

    /// Returns true if both points are within `tol` of each other on every axis.
    pub fn is_within(&self, other: &Self, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Point({:.prec$}, {:.prec$}, {:.prec$})",
            self.x,
            self.y,
            self.z,
            prec = prec
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5., 5.);
        let pb = Point::new(5.00000000000001, 5., 5.);
        let pc = Point::new(5.0001, 5., 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_is_within() {
        let pa = Point::new(1.1686, -9.1433, 0.75);
        let pb = Point::new(1.1686 + 1e-9, -9.1433, 0.75);
        assert!(pa.is_within(&pb, 1e-6));
        assert!(!pa.is_within(&Point::new(1.17, -9.1433, 0.75), 1e-6));
    }

    #[test]
    fn test_display_precision() {
        let p = Point::new(1.23456, 0., -2.5);
        assert_eq!(format!("{}", p), "Point(1.23, 0.00, -2.50)");
        assert_eq!(format!("{:.1}", p), "Point(1.2, 0.0, -2.5)");
    }
}
