//! Embedded scatter renderer
//!
//! An [`EmbeddedSurface`] is a persistent raster view surface. Each render
//! rebuilds the scene from the dataset, refits the axes to the data's exact
//! extrema and redraws into an RGB frame buffer with plotters. The camera
//! state reached right after the first render is kept as the reset target
//! for the rest of the surface's life.

use std::path::Path;

use cloudview_core::{
    Bounded, ColorZone, ColoringMode, Error, Point3d, PointCloud3d, Result, ZonePartition,
};
use log::{debug, info};
use plotters::prelude::*;

use crate::view::ViewState;

/// Embedded surface configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Marker radius in pixels
    pub marker_size: u32,
    pub margin: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            marker_size: 1,
            margin: 10,
        }
    }
}

/// One colour group of the scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub zone: ColorZone,
    pub points: Vec<Point3d>,
}

/// Split a cloud into the series drawn for `mode`
pub fn build_scene(cloud: &PointCloud3d, mode: ColoringMode) -> Vec<ScatterSeries> {
    match mode {
        ColoringMode::Uniform => vec![ScatterSeries {
            zone: ColorZone::Default,
            points: cloud.points.clone(),
        }],
        ColoringMode::Zoned => {
            let partition = ZonePartition::of(cloud);
            ColorZone::ZONES
                .iter()
                .map(|&zone| ScatterSeries {
                    zone,
                    points: partition.indices(zone).iter().map(|&i| cloud[i]).collect(),
                })
                .collect()
        }
    }
}

fn draw_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Visualization(e.to_string())
}

/// In-process 3D scatter view surface
#[derive(Debug)]
pub struct EmbeddedSurface {
    config: SurfaceConfig,
    frame: Vec<u8>,
    scene: Vec<ScatterSeries>,
    view: ViewState,
    initial_view: Option<ViewState>,
}

impl EmbeddedSurface {
    /// Largest accepted width or height in pixels
    pub const MAX_DIMENSION: u32 = 16_384;

    /// Create a blank surface
    pub fn open(config: SurfaceConfig) -> Result<Self> {
        let (width, height) = (config.width, config.height);
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(Error::InvalidData(format!(
                "surface size must be between 1x1 and {max}x{max}, got {}x{}",
                width,
                height,
                max = Self::MAX_DIMENSION
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .ok_or_else(|| Error::InvalidData(format!("surface {}x{} is too large", width, height)))?;
        let frame = vec![255u8; len];
        debug!("Opened {}x{} embedded surface", config.width, config.height);

        Ok(Self {
            config,
            frame,
            scene: Vec::new(),
            view: ViewState::default(),
            initial_view: None,
        })
    }

    /// Draw `cloud` coloured according to `mode`
    pub fn render(&mut self, cloud: &PointCloud3d, mode: ColoringMode) -> Result<()> {
        let bounds = cloud
            .bounding_box()
            .ok_or_else(|| Error::Precondition("cannot render an empty point cloud".to_string()))?;

        self.scene = build_scene(cloud, mode);
        self.view.refit(&bounds);
        self.redraw()?;

        if self.initial_view.is_none() {
            self.initial_view = Some(self.view);
            debug!("Captured initial view {:?}", self.view);
        }
        Ok(())
    }

    /// Restore the view captured after the first render
    pub fn reset_view(&mut self) -> Result<()> {
        let Some(initial) = self.initial_view else {
            return Ok(());
        };
        self.view = initial;
        self.redraw()
    }

    pub fn rotate(&mut self, d_elevation: f64, d_azimuth: f64) -> Result<()> {
        self.ensure_drawn()?;
        self.view.rotate(d_elevation, d_azimuth)?;
        self.redraw()
    }

    pub fn set_angles(&mut self, elevation: f64, azimuth: f64) -> Result<()> {
        self.ensure_drawn()?;
        self.view.set_angles(elevation, azimuth)?;
        self.redraw()
    }

    /// Zoom all axes about their centers; `factor > 1` zooms in
    pub fn zoom(&mut self, factor: f64) -> Result<()> {
        self.ensure_drawn()?;
        self.view.zoom(factor)?;
        self.redraw()
    }

    pub fn scene(&self) -> &[ScatterSeries] {
        &self.scene
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn initial_view(&self) -> Option<&ViewState> {
        self.initial_view.as_ref()
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// RGB8 pixels, row-major
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Write the current frame as a PNG
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = image::RgbImage::from_raw(self.config.width, self.config.height, self.frame.clone())
            .ok_or_else(|| Error::Visualization("frame buffer does not match surface size".to_string()))?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(draw_error)?;
        info!("Saved embedded view to {}", path.display());
        Ok(())
    }

    fn ensure_drawn(&self) -> Result<()> {
        if self.initial_view.is_none() {
            return Err(Error::Precondition("nothing has been rendered yet".to_string()));
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let size = (self.config.width, self.config.height);
        let margin = self.config.margin;
        let marker = self.config.marker_size;
        let (pitch, yaw) = self.view.projection_angles();
        // plotters draws its second axis vertically, so Z goes there
        let x_range = self.view.x.padded();
        let vertical = self.view.z.padded();
        let depth = self.view.y.padded();
        let scene = &self.scene;

        let root = BitMapBackend::with_buffer(&mut self.frame, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;
        {
            let mut chart = ChartBuilder::on(&root)
                .margin(margin)
                .build_cartesian_3d(x_range, vertical, depth)
                .map_err(draw_error)?;

            chart.with_projection(|mut pb| {
                pb.pitch = pitch;
                pb.yaw = yaw;
                pb.scale = 0.8;
                pb.into_matrix()
            });

            chart
                .configure_axes()
                .x_labels(0)
                .y_labels(0)
                .z_labels(0)
                .light_grid_style(BLACK.mix(0.15))
                .max_light_lines(3)
                .draw()
                .map_err(draw_error)?;

            for series in scene {
                let (r, g, b) = series.zone.rgb();
                let style = RGBColor(r, g, b).filled();
                chart
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|p| Circle::new((p.x, p.z, p.y), marker, style)),
                    )
                    .map_err(draw_error)?;
            }
        }
        root.present().map_err(draw_error)?;
        Ok(())
    }
}
