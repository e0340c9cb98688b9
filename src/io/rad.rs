//! Scene-geometry reader.
//!
//! Only the subset of the scene description needed for room analysis is read:
//! a line `<material> polygon <identifier>` names the object, and a later line
//! `12 x1 y1 z1 x2 y2 z2 x3 y3 z3 x4 y4 z4` holds its four vertices. Every
//! other line is ignored.

use crate::geom::bboxes::BoundingBox;
use crate::geom::polygon::Polygon;
use crate::{Error, Point, Result};
use std::path::{Path, PathBuf};

const POLYGON_KEYWORD: &str = "polygon";
const COORD_COUNT_MARKER: &str = "12";

/// All polygons parsed from one scene file.
#[derive(Debug, Clone)]
pub struct Scene {
    pub path: PathBuf,
    pub polygons: Vec<Polygon>,
}

impl Scene {
    /// Polygons whose material matches any of `filter` (all polygons if empty).
    ///
    /// Fails with `MissingGeometry` if nothing matches.
    pub fn select<S: AsRef<str>>(&self, filter: &[S]) -> Result<Vec<&Polygon>> {
        let selected: Vec<&Polygon> = self
            .polygons
            .iter()
            .filter(|p| p.matches_material(filter))
            .collect();
        if selected.is_empty() {
            return Err(Error::MissingGeometry {
                path: self.path.clone(),
                filter: filter.iter().map(|s| s.as_ref().to_string()).collect(),
            });
        }
        Ok(selected)
    }

    /// Bounding box over the vertices of all polygons matching `filter`.
    pub fn bbox<S: AsRef<str>>(&self, filter: &[S]) -> Result<BoundingBox> {
        let pts: Vec<Point> = self
            .select(filter)?
            .iter()
            .flat_map(|p| p.vertices().iter().copied())
            .collect();
        // select() guarantees at least one polygon
        BoundingBox::from_points(&pts).ok_or_else(|| Error::MissingGeometry {
            path: self.path.clone(),
            filter: filter.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    /// Sum of the plan (shoelace) areas of all polygons matching `filter`.
    pub fn plan_area<S: AsRef<str>>(&self, filter: &[S]) -> Result<f64> {
        Ok(self.select(filter)?.iter().map(|p| p.area()).sum())
    }
}

/// Reads a scene-geometry file.
pub fn read_rad(path: &Path) -> Result<Scene> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let polygons = parse_rad_str(&content);
    log::info!(
        "Read {} polygons from {}",
        polygons.len(),
        path.display()
    );
    Ok(Scene {
        path: path.to_path_buf(),
        polygons,
    })
}

/// Parses scene-geometry text into polygons tagged with the preceding name.
///
/// A coordinate line seen before any `polygon` line gets an empty material.
pub fn parse_rad_str(content: &str) -> Vec<Polygon> {
    let mut polygons = Vec::new();
    let mut material = String::new();
    let mut identifier = String::new();

    for (i, line) in content.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2 && tokens[1] == POLYGON_KEYWORD {
            material = tokens[0].to_string();
            identifier = tokens.get(2).copied().unwrap_or_default().to_string();
        } else if tokens.first() == Some(&COORD_COUNT_MARKER) {
            match parse_coords(&tokens[1..]) {
                Some(coords) => {
                    polygons.push(Polygon::from_coords(&material, &identifier, &coords));
                }
                None => log::debug!("Ignoring coordinate line {}: {}", i + 1, line.trim()),
            }
        }
    }

    polygons
}

fn parse_coords(tokens: &[&str]) -> Option<[f64; 12]> {
    if tokens.len() != 12 {
        return None;
    }
    let mut coords = [0.0; 12];
    for (c, t) in coords.iter_mut().zip(tokens) {
        *c = t.parse().ok()?;
    }
    Some(coords)
}
