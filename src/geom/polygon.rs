use crate::geom::bboxes::BoundingBox;
use crate::Point;
use std::fmt;

/// Number of vertices in a scene polygon (one `12 x1 y1 z1 ... z4` line).
pub const NUM_VERTICES: usize = 4;

/// Quadrilateral read from a scene-description file.
///
/// `material` is the modifier preceding the `polygon` keyword and
/// `identifier` is the object name following it. Immutable after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub material: String,
    pub identifier: String,
    vertices: [Point; NUM_VERTICES],
}

impl Polygon {
    pub fn new(material: &str, identifier: &str, vertices: [Point; NUM_VERTICES]) -> Self {
        Self {
            material: material.to_string(),
            identifier: identifier.to_string(),
            vertices,
        }
    }

    /// Builds a polygon from 12 flat coordinates (x1 y1 z1 ... x4 y4 z4).
    pub fn from_coords(material: &str, identifier: &str, coords: &[f64; 12]) -> Self {
        let vertices = std::array::from_fn(|i| {
            Point::new(coords[3 * i], coords[3 * i + 1], coords[3 * i + 2])
        });
        Self::new(material, identifier, vertices)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Plan (x-y) area using the shoelace formula.
    ///
    /// Vertical polygons (walls, glazing) have zero plan area.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.vertices[i].x * self.vertices[j].y;
            sum -= self.vertices[j].x * self.vertices[i].y;
        }
        sum.abs() / 2.0
    }

    pub fn bbox(&self) -> BoundingBox {
        // Four vertices are always present
        let (mut pmin, mut pmax) = (self.vertices[0], self.vertices[0]);
        for p in &self.vertices[1..] {
            pmin = Point::new(pmin.x.min(p.x), pmin.y.min(p.y), pmin.z.min(p.z));
            pmax = Point::new(pmax.x.max(p.x), pmax.y.max(p.y), pmax.z.max(p.z));
        }
        BoundingBox {
            min: pmin,
            max: pmax,
        }
    }

    /// Case-insensitive substring match of the material name against any pattern.
    ///
    /// An empty pattern list matches every polygon.
    pub fn matches_material<S: AsRef<str>>(&self, patterns: &[S]) -> bool {
        if patterns.is_empty() {
            return true;
        }
        let material = self.material.to_lowercase();
        patterns
            .iter()
            .any(|p| material.contains(&p.as_ref().to_lowercase()))
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(f, "Polygon({} {}:", self.material, self.identifier)?;
        for p in &self.vertices {
            write!(f, " {:.prec$}", p, prec = prec)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_coords(
            "PISO-CONCRETO",
            "floor.0",
            &[0., 0., 0., 1., 0., 0., 1., 1., 0., 0., 1., 0.],
        )
    }

    #[test]
    fn test_from_coords() {
        let poly = unit_square();
        let expected = [
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 0.),
            Point::new(0., 1., 0.),
        ];
        assert_eq!(poly.vertices(), &expected);
    }

    #[test]
    fn test_shoelace_area() {
        let poly = unit_square();
        assert!((poly.area() - 1.0).abs() < 1e-12);

        // Clockwise order gives the same absolute area
        let cw = Polygon::from_coords(
            "m",
            "cw",
            &[0., 0., 0., 0., 2., 0., 3., 2., 0., 3., 0., 0.],
        );
        assert!((cw.area() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_polygon_area() {
        // 2 m wide, 1.5 m tall window in the plane y = 0
        let glazing = Polygon::from_coords(
            "VIDRIO",
            "win",
            &[2., 0., 0.75, 4., 0., 0.75, 4., 0., 2.25, 2., 0., 2.25],
        );
        assert!(glazing.area().abs() < 1e-12);
        let bbox = glazing.bbox();
        assert_eq!((bbox.min.z, bbox.max.z), (0.75, 2.25));
    }

    #[test]
    fn test_bbox() {
        let poly = unit_square();
        let bbox = poly.bbox();
        assert!(bbox.min.is_close(&Point::new(0., 0., 0.)));
        assert!(bbox.max.is_close(&Point::new(1., 1., 0.)));
    }

    #[test]
    fn test_matches_material() {
        let poly = unit_square();
        assert!(poly.matches_material(&["piso"]));
        assert!(poly.matches_material(&["WALL", "PISO"]));
        assert!(!poly.matches_material(&["VIDRIO"]));
        let empty: [&str; 0] = [];
        assert!(poly.matches_material(&empty));
    }
}
