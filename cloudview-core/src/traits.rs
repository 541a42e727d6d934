//! Bounding boxes and the trait that produces them

use crate::point::{Point3d, Vector3d};
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3d,
    pub max: Point3d,
}

impl Aabb {
    pub fn extent(&self) -> Vector3d {
        self.max - self.min
    }

    pub fn center(&self) -> Point3d {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Trait for objects with a spatial extent
pub trait Bounded {
    /// Exact per-axis minima and maxima, or `None` when there is nothing to bound
    fn bounding_box(&self) -> Option<Aabb>;
}

impl Bounded for PointCloud<Point3d> {
    fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.points.first()?;
        let mut min = first;
        let mut max = first;

        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Aabb { min, max })
    }
}
