//! Annual illuminance matrix reader.
//!
//! The file starts with a header block of arbitrary length. A line belongs to
//! the header iff it starts with one of `HEADER_KEYWORDS`. The first non-empty
//! line that is not a header line starts the data block: one whitespace
//! separated row per hour of the year, one column per sensor point.

use crate::daylight::table::IlluminanceTable;
use crate::{Error, Result};
use std::path::Path;

/// Line prefixes that mark header/metadata lines.
pub const HEADER_KEYWORDS: [&str; 13] = [
    "#",
    "NCOMP",
    "NROWS",
    "NCOLS",
    "FORMAT",
    "SOFTWARE",
    "CAPDATE",
    "GMT",
    "rmtxop",
    "dctimestep",
    "Applied",
    "Transposed",
    "LATLONG",
];

/// Metadata captured from the header block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IllHeader {
    pub lines: Vec<String>,
    pub nrows: Option<usize>,
    pub ncols: Option<usize>,
    pub ncomp: Option<usize>,
    pub format: Option<String>,
}

impl IllHeader {
    fn push(&mut self, line: &str) {
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            match key.trim() {
                "NROWS" => self.nrows = value.parse().ok(),
                "NCOLS" => self.ncols = value.parse().ok(),
                "NCOMP" => self.ncomp = value.parse().ok(),
                "FORMAT" => self.format = Some(value.to_string()),
                _ => {}
            }
        }
        self.lines.push(line.to_string());
    }
}

/// Returns true if the line starts with any recognized header keyword.
///
/// The check is made on the raw line: leading whitespace disqualifies it.
pub fn is_header_line(line: &str) -> bool {
    HEADER_KEYWORDS.iter().any(|kw| line.starts_with(kw))
}

/// Index of the first non-empty, non-header line, if any.
pub fn find_data_start(content: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| !is_header_line(line) && !line.trim().is_empty())
}

/// Reads an annual illuminance file into a table.
///
/// A file with no data lines yields an empty table, which the caller must
/// check with `IlluminanceTable::is_empty()`.
pub fn read_ill(path: &Path) -> Result<IlluminanceTable> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let (header, table) = parse_ill_str(&content, path)?;

    if let Some(nrows) = header.nrows.filter(|&n| n != table.num_hours()) {
        log::warn!(
            "{}: header declares NROWS={} but {} data rows were parsed",
            path.display(),
            nrows,
            table.num_hours()
        );
    }
    if let Some(ncols) = header.ncols.filter(|&n| n != table.num_sensors()) {
        log::warn!(
            "{}: header declares NCOLS={} but {} data columns were parsed",
            path.display(),
            ncols,
            table.num_sensors()
        );
    }
    log::info!(
        "Read {} x {} illuminance table from {}",
        table.num_hours(),
        table.num_sensors(),
        path.display()
    );

    Ok(table)
}

/// Parses illuminance text. `path` is only used in error messages.
pub fn parse_ill_str(content: &str, path: &Path) -> Result<(IllHeader, IlluminanceTable)> {
    let mut header = IllHeader::default();
    let Some(data_start) = find_data_start(content) else {
        for line in content.lines().filter(|l| is_header_line(l)) {
            header.push(line);
        }
        return Ok((header, IlluminanceTable::empty()));
    };

    let mut flat: Vec<f64> = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0;

    for (i, line) in content.lines().enumerate() {
        if i < data_start {
            if is_header_line(line) {
                header.push(line);
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let values: std::result::Result<Vec<f64>, _> =
            line.split_whitespace().map(str::parse::<f64>).collect();
        let Ok(values) = values else {
            log::debug!("{}: skipping non-numeric line {}", path.display(), i + 1);
            continue;
        };
        match ncols {
            None => ncols = Some(values.len()),
            Some(n) if n != values.len() => {
                return Err(Error::MalformedTable {
                    path: path.to_path_buf(),
                    line: i + 1,
                    reason: format!("expected {} columns, found {}", n, values.len()),
                });
            }
            Some(_) => {}
        }
        flat.extend(values);
        nrows += 1;
    }

    let table = match ncols {
        Some(n) => IlluminanceTable::from_flat(nrows, n, flat).map_err(|_| {
            Error::MalformedTable {
                path: path.to_path_buf(),
                line: data_start + 1,
                reason: format!("cannot shape {} rows into a table", nrows),
            }
        })?,
        None => IlluminanceTable::empty(),
    };

    Ok((header, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const HEADER: &str = "\
#?RADIANCE
rmtxop -fa -c 47.4 119.9 11.6 dc.mtx
dctimestep -n 8760 sky.smx
SOFTWARE= RADIANCE 5.4a
CAPDATE= 2024:06:26 12:00:00
GMT= 2024:06:26 17:00:00
LATLONG= -33.45 70.66
NROWS=10
NCOLS=3
NCOMP=1
FORMAT=ascii
Applied scaling
Transposed
";

    fn dummy_path() -> &'static Path {
        Path::new("annual.ill")
    }

    #[test]
    fn test_data_start_detection() {
        let content = format!("{}\n\n0 0 0\n1 1 1\n", HEADER);
        let start = find_data_start(&content).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[start], "0 0 0");
        for line in &lines[..start] {
            assert!(is_header_line(line) || line.trim().is_empty());
        }
    }

    #[test]
    fn test_indented_keyword_is_not_header() {
        assert!(is_header_line("#comment"));
        assert!(is_header_line("NROWS=8760"));
        assert!(!is_header_line("  # indented"));
        assert!(!is_header_line("1.0 2.0"));
    }

    #[test]
    fn test_parse_rows_and_header() -> Result<()> {
        let mut content = HEADER.to_string();
        for i in 0..10 {
            if i == 8 {
                content.push_str("100 200 300\n");
            } else {
                content.push_str(&format!("{} {} {}\n", i, i, i));
            }
        }
        let (header, table) = parse_ill_str(&content, dummy_path())?;
        assert_eq!(header.nrows, Some(10));
        assert_eq!(header.ncols, Some(3));
        assert_eq!(header.ncomp, Some(1));
        assert_eq!(header.format.as_deref(), Some("ascii"));
        assert_eq!(header.lines.len(), 13);

        assert_eq!(table.num_hours(), 10);
        assert_eq!(table.num_sensors(), 3);
        assert_eq!(table.row(8)?.to_vec(), vec![100.0, 200.0, 300.0]);
        Ok(())
    }

    #[test]
    fn test_non_numeric_and_blank_lines_skipped() -> Result<()> {
        let content = "1 2\n\n3 4\nend of data\n5 6\n   \n";
        let (_, table) = parse_ill_str(content, dummy_path())?;
        assert_eq!(table.num_hours(), 3);
        assert_eq!(table.row(2)?.to_vec(), vec![5.0, 6.0]);
        Ok(())
    }

    #[test]
    fn test_jagged_rows_rejected() {
        let content = "1 2 3\n4 5 6\n7 8\n";
        let err = parse_ill_str(content, dummy_path()).unwrap_err();
        match err {
            Error::MalformedTable { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 3 columns, found 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() -> Result<()> {
        let (header, table) = parse_ill_str(HEADER, dummy_path())?;
        assert!(table.is_empty());
        assert_eq!(header.nrows, Some(10));

        let (_, table) = parse_ill_str("", dummy_path())?;
        assert!(table.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_ill_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("annual.ill");
        std::fs::write(&path, format!("{}0.5 1.5 2.5\n", HEADER))?;
        let table = read_ill(&path)?;
        assert_eq!(table.num_hours(), 1);
        assert_eq!(table.num_sensors(), 3);
        Ok(())
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_ill(Path::new("/nonexistent/path/annual.ill"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
