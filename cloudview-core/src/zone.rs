//! Z-zone colouring
//!
//! Every renderer colours points the same way: either uniformly, or by
//! bucketing each point on its Z coordinate against two fixed thresholds.

use crate::point::Point3d;
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colour bucket for a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorZone {
    /// No zoning applied
    Default,
    /// `z < -1`
    Low,
    /// `-1 <= z < 0.5`
    Mid,
    /// `z >= 0.5`
    High,
}

impl ColorZone {
    pub const LOW_THRESHOLD: f64 = -1.0;
    pub const HIGH_THRESHOLD: f64 = 0.5;

    /// The three buckets produced by zoning, in drawing order
    pub const ZONES: [ColorZone; 3] = [ColorZone::Low, ColorZone::Mid, ColorZone::High];

    /// Classify a Z value. Never returns `Default`.
    ///
    /// A NaN compares false against both thresholds and lands in `High`;
    /// the loader rejects non-finite values so this only matters for
    /// hand-built clouds.
    pub fn classify(z: f64) -> Self {
        if z < Self::LOW_THRESHOLD {
            ColorZone::Low
        } else if z < Self::HIGH_THRESHOLD {
            ColorZone::Mid
        } else {
            ColorZone::High
        }
    }

    pub fn of_point(point: &Point3d) -> Self {
        Self::classify(point.z)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorZone::Default => (0, 0, 255),
            ColorZone::Low => (255, 0, 0),
            ColorZone::Mid => (255, 165, 0),
            ColorZone::High => (0, 128, 0),
        }
    }

    /// CSS colour keyword matching `rgb()`
    pub fn css_name(&self) -> &'static str {
        match self {
            ColorZone::Default => "blue",
            ColorZone::Low => "red",
            ColorZone::Mid => "orange",
            ColorZone::High => "green",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorZone::Default => "default",
            ColorZone::Low => "low",
            ColorZone::Mid => "mid",
            ColorZone::High => "high",
        }
    }
}

impl fmt::Display for ColorZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether points are drawn in one colour or by Z-zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColoringMode {
    #[default]
    Uniform,
    Zoned,
}

impl ColoringMode {
    pub fn from_zoned(zoned: bool) -> Self {
        if zoned {
            ColoringMode::Zoned
        } else {
            ColoringMode::Uniform
        }
    }

    pub fn is_zoned(&self) -> bool {
        matches!(self, ColoringMode::Zoned)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ColoringMode::Uniform => ColoringMode::Zoned,
            ColoringMode::Zoned => ColoringMode::Uniform,
        }
    }

    /// Zone a point is drawn with under this mode
    pub fn zone_of(&self, point: &Point3d) -> ColorZone {
        match self {
            ColoringMode::Uniform => ColorZone::Default,
            ColoringMode::Zoned => ColorZone::of_point(point),
        }
    }
}

/// Indices of a cloud's points split into the Low, Mid and High buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZonePartition {
    pub low: Vec<usize>,
    pub mid: Vec<usize>,
    pub high: Vec<usize>,
}

impl ZonePartition {
    pub fn of(cloud: &PointCloud<Point3d>) -> Self {
        let bucket = |zone: ColorZone| -> Vec<usize> {
            cloud
                .iter()
                .enumerate()
                .filter(|(_, p)| ColorZone::of_point(p) == zone)
                .map(|(i, _)| i)
                .collect()
        };
        Self {
            low: bucket(ColorZone::Low),
            mid: bucket(ColorZone::Mid),
            high: bucket(ColorZone::High),
        }
    }

    pub fn indices(&self, zone: ColorZone) -> &[usize] {
        match zone {
            ColorZone::Low => &self.low,
            ColorZone::Mid => &self.mid,
            ColorZone::High => &self.high,
            ColorZone::Default => &[],
        }
    }

    /// Point counts as `(low, mid, high)`
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.low.len(), self.mid.len(), self.high.len())
    }
}
