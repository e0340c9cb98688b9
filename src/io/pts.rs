//! Sensor-point list files: one `x y z dx dy dz` line per point.
//!
//! Line order is the column order of the simulation output run with the file.

use crate::daylight::sensor::SensorPoint;
use crate::{Error, Point, Result, Vector};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_points(path: &Path, points: &[SensorPoint]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut w = BufWriter::new(file);
    for sp in points {
        let (p, d) = (sp.position, sp.direction);
        writeln!(w, "{:.6} {:.6} {:.4} {} {} {}", p.x, p.y, p.z, d.dx, d.dy, d.dz)
            .map_err(|e| Error::io(path, e))?;
    }
    w.flush().map_err(|e| Error::io(path, e))?;
    log::info!("Wrote {} sensor points to {}", points.len(), path.display());
    Ok(())
}

pub fn read_points(path: &Path) -> Result<Vec<SensorPoint>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut points = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let vals: Vec<f64> = line
            .split_whitespace()
            .map(|t| t.parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::MalformedTable {
                path: path.to_path_buf(),
                line: i + 1,
                reason: e.to_string(),
            })?;
        if vals.len() != 6 {
            return Err(Error::MalformedTable {
                path: path.to_path_buf(),
                line: i + 1,
                reason: format!("expected 6 values, found {}", vals.len()),
            });
        }
        points.push(SensorPoint::new(
            Point::new(vals[0], vals[1], vals[2]),
            Vector::new(vals[3], vals[4], vals[5]),
        ));
    }
    Ok(points)
}
