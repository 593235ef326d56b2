//! Reading and writing point files.
//!
//! A point file holds one point per line:
//! ```text
//! <x> <y> [ignored...]
//! ```
//! Fields are separated by tabs or spaces. Blank lines are skipped.

use std::io::Write;
use std::path::{Path, PathBuf};

use glam::DVec2;
use thiserror::Error;

/// Extension appended to point file names given without one.
pub const DEFAULT_EXTENSION: &str = "pnt";

/// Errors while reading a point file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    FormatError { line: usize, message: String },
}

/// Append the default `.pnt` extension when `path` has none.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

pub fn read_points(path: &Path) -> Result<Vec<DVec2>, ParseError> {
    let path = resolve_path(path);
    let content = std::fs::read_to_string(&path).map_err(|source| ParseError::Io {
        path: path.clone(),
        source,
    })?;
    let points = parse_points(&content)?;
    log::debug!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse points from the contents of a point file.
pub fn parse_points(content: &str) -> Result<Vec<DVec2>, ParseError> {
    let mut points = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(x) = fields.next() else {
            continue;
        };
        let Some(y) = fields.next() else {
            return Err(ParseError::FormatError {
                line: idx + 1,
                message: format!("Expected 'x y', got '{}'", line.trim()),
            });
        };

        let x: f64 = x.parse().map_err(|_| ParseError::FormatError {
            line: idx + 1,
            message: format!("Invalid x coordinate: {}", x),
        })?;
        let y: f64 = y.parse().map_err(|_| ParseError::FormatError {
            line: idx + 1,
            message: format!("Invalid y coordinate: {}", y),
        })?;

        points.push(DVec2::new(x, y));
    }
    Ok(points)
}

/// Write one tab-separated `x y` line per point.
pub fn write_points<W: Write>(writer: &mut W, points: &[DVec2]) -> std::io::Result<()> {
    for p in points {
        writeln!(writer, "{}\t{}", p.x, p.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_third_column() {
        let points = parse_points("0.0\t0.0\t0.0\n1.5\t2.0\t9.0\n-3\t4e2\n").unwrap();
        assert_eq!(
            points,
            vec![DVec2::new(0.0, 0.0), DVec2::new(1.5, 2.0), DVec2::new(-3.0, 400.0)]
        );
    }

    #[test]
    fn parse_skips_blank_lines() {
        let points = parse_points("\n1 2\n   \n3 4\n\n").unwrap();
        assert_eq!(points, vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)]);
    }

    #[test]
    fn parse_reports_line_of_bad_number() {
        let err = parse_points("1 2\n3 four\n").unwrap_err();
        match err {
            ParseError::FormatError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("four"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_reports_missing_y() {
        let err = parse_points("1 2\n3 4\n5\n").unwrap_err();
        assert!(matches!(err, ParseError::FormatError { line: 3, .. }));
    }

    #[test]
    fn resolve_path_appends_extension_only_when_missing() {
        assert_eq!(resolve_path(Path::new("data/wave")), PathBuf::from("data/wave.pnt"));
        assert_eq!(resolve_path(Path::new("data/wave.txt")), PathBuf::from("data/wave.txt"));
    }

    #[test]
    fn read_points_reports_missing_file() {
        let path = std::env::temp_dir().join("bezier-interp-does-not-exist");
        let err = read_points(&path).unwrap_err();
        match err {
            ParseError::Io { path, .. } => assert_eq!(path.extension().unwrap(), "pnt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn write_then_read_file() {
        let path = std::env::temp_dir().join(format!("bezier-interp-{}.pnt", std::process::id()));
        let points = vec![DVec2::new(0.25, -1.0), DVec2::new(3.0, 1e-3)];
        let mut file = std::fs::File::create(&path).unwrap();
        write_points(&mut file, &points).unwrap();
        drop(file);

        let read = read_points(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, points);
    }
}
