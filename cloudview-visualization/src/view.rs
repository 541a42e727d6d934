//! Camera and axis-limit state for the embedded renderer

use cloudview_core::{Aabb, Error, Result};
use serde::{Deserialize, Serialize};

/// Closed interval shown along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Shrink (factor > 1) or grow (factor < 1) about the center
    fn scaled(&self, factor: f64) -> Self {
        let center = self.center();
        let half = self.span() / 2.0 / factor;
        Self::new(center - half, center + half)
    }

    /// Drawable range. A zero-width axis is padded by 0.5 on each side.
    pub fn padded(&self) -> std::ops::Range<f64> {
        if self.span() > 0.0 {
            self.min..self.max
        } else {
            (self.min - 0.5)..(self.max + 0.5)
        }
    }
}

/// Snapshot of the embedded renderer's camera: angles in degrees plus the
/// three axis ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub elevation: f64,
    pub azimuth: f64,
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl ViewState {
    pub const DEFAULT_ELEVATION: f64 = 30.0;
    pub const DEFAULT_AZIMUTH: f64 = -60.0;

    /// View with the given angles and axes set to the exact extrema of `bounds`
    pub fn fit(bounds: &Aabb, elevation: f64, azimuth: f64) -> Self {
        Self {
            elevation,
            azimuth,
            x: AxisRange::new(bounds.min.x, bounds.max.x),
            y: AxisRange::new(bounds.min.y, bounds.max.y),
            z: AxisRange::new(bounds.min.z, bounds.max.z),
        }
    }

    /// Keep the angles, replace the axis ranges
    pub fn refit(&mut self, bounds: &Aabb) {
        *self = Self::fit(bounds, self.elevation, self.azimuth);
    }

    /// Orbit the camera. Elevation is clamped to [-90, 90] and azimuth
    /// wrapped to [-180, 180).
    pub fn rotate(&mut self, d_elevation: f64, d_azimuth: f64) -> Result<()> {
        self.set_angles(self.elevation + d_elevation, self.azimuth + d_azimuth)
    }

    pub fn set_angles(&mut self, elevation: f64, azimuth: f64) -> Result<()> {
        if !elevation.is_finite() || !azimuth.is_finite() {
            return Err(Error::InvalidData(format!(
                "camera angles must be finite, got elevation {} azimuth {}",
                elevation, azimuth
            )));
        }
        self.elevation = elevation.clamp(-90.0, 90.0);
        self.azimuth = (azimuth + 180.0).rem_euclid(360.0) - 180.0;
        Ok(())
    }

    /// Zoom every axis about its center; `factor > 1` zooms in.
    ///
    /// The view is left unchanged when the zoomed ranges would not be finite.
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::InvalidData(format!(
                "zoom factor must be positive, got {}",
                factor
            )));
        }
        let (x, y, z) = (self.x.scaled(factor), self.y.scaled(factor), self.z.scaled(factor));
        if ![x, y, z].iter().all(AxisRange::is_finite) {
            return Err(Error::InvalidData(format!(
                "zooming by {} leaves the axis ranges out of bounds",
                factor
            )));
        }
        self.x = x;
        self.y = y;
        self.z = z;
        Ok(())
    }

    /// Projection angles in radians as `(pitch, yaw)`
    pub fn projection_angles(&self) -> (f64, f64) {
        (self.elevation.to_radians(), self.azimuth.to_radians())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            elevation: Self::DEFAULT_ELEVATION,
            azimuth: Self::DEFAULT_AZIMUTH,
            x: AxisRange::new(0.0, 1.0),
            y: AxisRange::new(0.0, 1.0),
            z: AxisRange::new(0.0, 1.0),
        }
    }
}
