//! Whitespace-delimited XYZ point cloud format
//!
//! One record per line, exactly three numeric fields interpreted
//! positionally as X, Y and Z, separated by any run of spaces or tabs.
//! There is no header row. Blank lines are skipped.

use crate::error::IoError;
use cloudview_core::{Point3d, PointCloud3d};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// XYZ reader implementation
pub struct XyzReader;

impl XyzReader {
    /// Read a point cloud from an XYZ file
    pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud3d, IoError> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => IoError::FileNotFound {
                path: origin.clone(),
            },
            _ => IoError::Unreadable {
                path: origin.clone(),
                source,
            },
        })?;

        let cloud = Self::parse_str(&text, &origin)?;
        log::info!("Loaded {} records from {}", cloud.len(), origin);
        Ok(cloud)
    }

    /// Parse XYZ text. `origin` names the source in error messages.
    pub fn parse_str(text: &str, origin: &str) -> Result<PointCloud3d, IoError> {
        let mut cloud = PointCloud3d::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let point = Self::parse_line(line).map_err(|message| IoError::Malformed {
                path: origin.to_string(),
                line: index + 1,
                message,
            })?;
            cloud.push(point);
        }

        if cloud.is_empty() {
            return Err(IoError::Empty {
                path: origin.to_string(),
            });
        }
        Ok(cloud)
    }

    /// Parse a single line into a point
    fn parse_line(line: &str) -> Result<Point3d, String> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(format!(
                "expected 3 fields (x, y, z), found {}",
                parts.len()
            ));
        }

        let mut coords = [0.0f64; 3];
        for (slot, (part, axis)) in coords.iter_mut().zip(parts.iter().zip(["x", "y", "z"])) {
            let value = part
                .parse::<f64>()
                .map_err(|_| format!("invalid {} coordinate {:?}", axis, part))?;
            if !value.is_finite() {
                return Err(format!("non-finite {} coordinate {:?}", axis, part));
            }
            *slot = value;
        }

        Ok(Point3d::new(coords[0], coords[1], coords[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_every_row_in_order() {
        let file = write_temp("1.0 2.0 3.0\n4.0 5.0 6.0\n7.0 8.0 9.0\n");
        let cloud = XyzReader::read_point_cloud(file.path()).unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(cloud[1], Point3d::new(4.0, 5.0, 6.0));
        assert_eq!(cloud[2], Point3d::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_mixed_whitespace_runs() {
        let cloud = XyzReader::parse_str("  1\t\t2   3\n-4.5e1 \t 0.25 -0\r\n", "mem").unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(cloud[1], Point3d::new(-45.0, 0.25, 0.0));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let cloud = XyzReader::parse_str("\n0 0 -2\n\n   \n0 0 0\n0 0 1\n\n", "mem").unwrap();
        assert_eq!(cloud.len(), 3);
        assert_eq!(cloud.column(2), vec![-2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = XyzReader::read_point_cloud(dir.path().join("nope.xyz")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = XyzReader::read_point_cloud(dir.path()).unwrap_err();
        assert!(matches!(err, IoError::Unreadable { .. }));
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = XyzReader::parse_str("1 2 3\n1 2\n", "cloud.xyz").unwrap_err();
        match err {
            IoError::Malformed { path, line, .. } => {
                assert_eq!(path, "cloud.xyz");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(XyzReader::parse_str("1 2 3 4\n", "mem").is_err());
    }

    #[test]
    fn test_header_row_is_rejected() {
        let err = XyzReader::parse_str("x y z\n1 2 3\n", "mem").unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert!(XyzReader::parse_str("nan 0 0\n", "mem").is_err());
        assert!(XyzReader::parse_str("0 inf 0\n", "mem").is_err());
    }

    #[test]
    fn test_empty_input() {
        let err = XyzReader::parse_str("\n \n", "mem").unwrap_err();
        assert!(matches!(err, IoError::Empty { .. }));
    }

    #[test]
    fn test_converts_to_load_error() {
        let err: cloudview_core::Error = XyzReader::parse_str("a b c\n", "mem").unwrap_err().into();
        assert!(matches!(err, cloudview_core::Error::Load(_)));
        assert!(err.to_string().contains("line 1"));
    }
}
