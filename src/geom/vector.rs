use crate::geom::EPS;
use std::fmt;

/// Direction of a sensor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// Unit vector pointing straight up (+z).
    pub fn up() -> Self {
        Self::new(0., 0., 1.)
    }

    pub fn is_close(&self, other: &Self) -> bool {
        (self.dx - other.dx).abs() < EPS
            && (self.dy - other.dy).abs() < EPS
            && (self.dz - other.dz).abs() < EPS
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Vector({:.prec$}, {:.prec$}, {:.prec$})",
            self.dx,
            self.dy,
            self.dz,
            prec = prec
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up() {
        let v = Vector::up();
        assert!(v.is_close(&Vector::new(0., 0., 1.)));
        assert!(!v.is_close(&Vector::new(0., 0., -1.)));
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{}", Vector::up()), "Vector(0.00, 0.00, 1.00)");
        assert_eq!(format!("{:.0}", Vector::up()), "Vector(0, 0, 1)");
    }
}
