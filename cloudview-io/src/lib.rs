//! I/O operations for point clouds
//!
//! Reads whitespace-delimited X Y Z text files into a [`PointCloud3d`].

pub mod xyz;
pub mod error;

pub use error::*;
pub use xyz::XyzReader;

use cloudview_core::PointCloud3d;
use std::path::Path;

/// Read a point cloud from a whitespace-delimited XYZ file
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> std::result::Result<PointCloud3d, IoError> {
    XyzReader::read_point_cloud(path)
}
