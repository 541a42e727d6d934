//! Point cloud viewer
//!
//! [`PointCloudViewer`] owns the loaded dataset, the current colouring mode
//! and at most one embedded surface. A host (GUI, shell, tests) drives it
//! through named triggers: load, render, toggle, reset, close.
//!
//! The embedded surface is Closed until the first render request opens it,
//! stays Open across re-renders, and is Closed again by [`close`]. Reopening
//! starts a new session with a fresh reset snapshot.
//!
//! [`close`]: PointCloudViewer::close

use std::path::{Path, PathBuf};

use cloudview_core::{ColorZone, ColoringMode, Error, Point3d, PointCloud3d, Result};
use cloudview_io::XyzReader;
use log::{debug, info, warn};

use crate::embedded::{EmbeddedSurface, SurfaceConfig};
use crate::external;

/// The dataset currently held by the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// Where the data came from, for display
    pub source: String,
    pub cloud: PointCloud3d,
}

#[derive(Debug, Default)]
pub struct PointCloudViewer {
    dataset: Option<LoadedDataset>,
    mode: ColoringMode,
    config: SurfaceConfig,
    surface: Option<EmbeddedSurface>,
}

impl PointCloudViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SurfaceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load a whitespace-delimited XYZ file, replacing the current dataset.
    ///
    /// On failure the previous dataset is kept as is.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<&LoadedDataset> {
        let path = path.as_ref();
        let cloud = XyzReader::read_point_cloud(path)?;
        Ok(self.replace_dataset(LoadedDataset {
            source: path.display().to_string(),
            cloud,
        }))
    }

    /// Hold an in-memory cloud as the current dataset
    pub fn load_cloud(&mut self, source: impl Into<String>, cloud: PointCloud3d) -> Result<&LoadedDataset> {
        if cloud.is_empty() {
            return Err(Error::Load("point cloud has no records".to_string()));
        }
        Ok(self.replace_dataset(LoadedDataset {
            source: source.into(),
            cloud,
        }))
    }

    fn replace_dataset(&mut self, dataset: LoadedDataset) -> &LoadedDataset {
        info!("Holding {} records from {}", dataset.cloud.len(), dataset.source);
        self.dataset.insert(dataset)
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }

    pub fn cloud(&self) -> Option<&PointCloud3d> {
        self.dataset.as_ref().map(|d| &d.cloud)
    }

    pub fn mode(&self) -> ColoringMode {
        self.mode
    }

    pub fn color_zone(point: &Point3d) -> ColorZone {
        ColorZone::of_point(point)
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&EmbeddedSurface> {
        self.surface.as_ref()
    }

    /// Draw the dataset on the embedded surface, opening it if needed
    pub fn render_embedded(&mut self) -> Result<&EmbeddedSurface> {
        let Some(dataset) = &self.dataset else {
            warn!("Render requested with no data loaded");
            return Err(Error::Precondition("no data loaded; load a file first".to_string()));
        };

        let (mut surface, fresh) = match self.surface.take() {
            Some(surface) => (surface, false),
            None => (EmbeddedSurface::open(self.config.clone())?, true),
        };

        if let Err(e) = surface.render(&dataset.cloud, self.mode) {
            if !fresh {
                self.surface = Some(surface);
            }
            return Err(e);
        }
        if fresh {
            debug!("Embedded surface opened");
        }
        Ok(&*self.surface.insert(surface))
    }

    /// Switch between uniform and zoned colouring, redrawing an open surface.
    /// Does nothing while no data is loaded.
    pub fn set_zoning(&mut self, zoned: bool) -> Result<()> {
        if self.dataset.is_none() {
            return Ok(());
        }
        self.mode = ColoringMode::from_zoned(zoned);
        debug!("Colouring mode set to {:?}", self.mode);
        if self.surface.is_some() {
            self.render_embedded()?;
        }
        Ok(())
    }

    pub fn toggle_zoning(&mut self) -> Result<()> {
        self.set_zoning(!self.mode.is_zoned())
    }

    /// Restore the camera captured after the surface's first render
    pub fn reset_view(&mut self) -> Result<()> {
        match self.surface.as_mut() {
            Some(surface) => surface.reset_view(),
            None => Ok(()),
        }
    }

    pub fn rotate_view(&mut self, d_elevation: f64, d_azimuth: f64) -> Result<()> {
        match self.surface.as_mut() {
            Some(surface) => surface.rotate(d_elevation, d_azimuth),
            None => Ok(()),
        }
    }

    pub fn zoom_view(&mut self, factor: f64) -> Result<()> {
        match self.surface.as_mut() {
            Some(surface) => surface.zoom(factor),
            None => Ok(()),
        }
    }

    /// Write a standalone browser page for the dataset
    pub fn render_external<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        external::ensure_available()?;
        let Some(dataset) = &self.dataset else {
            warn!("Browser render requested with no data loaded");
            return Err(Error::Precondition("no data loaded; load a file first".to_string()));
        };
        external::render_external(&dataset.cloud, path)
    }

    /// Release the embedded surface. Safe to call when already closed.
    pub fn close(&mut self) {
        if self.surface.take().is_some() {
            debug!("Embedded surface closed");
        }
    }
}
