//! Browser renderer
//!
//! Builds a standalone HTML page that draws the cloud with plotly.js. The
//! page carries two precomputed colour arrays, uniform and Z-zoned, and a
//! dropdown that swaps between them on the client. Nothing here touches the
//! embedded renderer.
//!
//! Requires the `plotly` feature; without it [`render_external`] reports
//! [`Error::DependencyUnavailable`] before looking at the data.

use std::path::{Path, PathBuf};

use cloudview_core::{Error, PointCloud3d, Result};

/// plotly.js bundle loaded by the generated page
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

pub const TITLE: &str = "3D point cloud";
pub const MARKER_SIZE: u32 = 3;

/// Whether the browser renderer was compiled in
pub fn is_available() -> bool {
    cfg!(feature = "plotly")
}

const MISSING: &str = "the browser renderer was not compiled in; rebuild with `--features plotly`";

/// Fail with `DependencyUnavailable` when the browser renderer is missing
pub fn ensure_available() -> Result<()> {
    if is_available() {
        Ok(())
    } else {
        Err(Error::DependencyUnavailable(MISSING.to_string()))
    }
}

/// Write a browser page for `cloud` to `path`
#[cfg(feature = "plotly")]
pub fn render_external<P: AsRef<Path>>(cloud: &PointCloud3d, path: P) -> Result<PathBuf> {
    ExternalPlot::from_cloud(cloud).write_html(path)
}

/// Without the `plotly` feature the page cannot be built
#[cfg(not(feature = "plotly"))]
pub fn render_external<P: AsRef<Path>>(_cloud: &PointCloud3d, _path: P) -> Result<PathBuf> {
    Err(Error::DependencyUnavailable(MISSING.to_string()))
}

#[cfg(feature = "plotly")]
pub use figure::ExternalPlot;

#[cfg(feature = "plotly")]
mod figure {
    use super::*;
    use cloudview_core::ColoringMode;
    use serde_json::{json, Value};

    /// Columns and colour arrays for the plotly figure
    #[derive(Debug, Clone, PartialEq)]
    pub struct ExternalPlot {
        pub x: Vec<f64>,
        pub y: Vec<f64>,
        pub z: Vec<f64>,
        pub uniform_colors: Vec<&'static str>,
        pub zoned_colors: Vec<&'static str>,
    }

    impl ExternalPlot {
        pub fn from_cloud(cloud: &PointCloud3d) -> Self {
            let colors = |mode: ColoringMode| -> Vec<&'static str> {
                cloud.iter().map(|p| mode.zone_of(p).css_name()).collect()
            };
            Self {
                x: cloud.column(0),
                y: cloud.column(1),
                z: cloud.column(2),
                uniform_colors: colors(ColoringMode::Uniform),
                zoned_colors: colors(ColoringMode::Zoned),
            }
        }

        pub fn len(&self) -> usize {
            self.x.len()
        }

        pub fn is_empty(&self) -> bool {
            self.x.is_empty()
        }

        /// plotly figure: one scatter3d trace plus the colour dropdown
        pub fn figure(&self) -> Value {
            json!({
                "data": [{
                    "type": "scatter3d",
                    "mode": "markers",
                    "x": self.x,
                    "y": self.y,
                    "z": self.z,
                    "marker": {
                        "size": MARKER_SIZE,
                        "color": self.uniform_colors,
                    },
                }],
                "layout": {
                    "title": { "text": TITLE },
                    "updatemenus": [{
                        "buttons": [
                            {
                                "label": "Default markers",
                                "method": "update",
                                "args": [{ "marker.color": [self.uniform_colors] }],
                            },
                            {
                                "label": "Apply color mask",
                                "method": "update",
                                "args": [{ "marker.color": [self.zoned_colors] }],
                            },
                        ],
                        "direction": "down",
                        "showactive": true,
                        "x": 1.02,
                        "xanchor": "left",
                        "y": 0.5,
                        "yanchor": "middle",
                    }],
                },
            })
        }

        pub fn to_html(&self) -> Result<String> {
            let figure = serde_json::to_string(&self.figure())
                .map_err(|e| Error::Visualization(e.to_string()))?
                .replace("</", "<\\/");

            Ok(format!(
                r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="plot" style="width:100%;height:95vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("plot", figure.data, figure.layout);
</script>
</body>
</html>
"#,
                title = TITLE,
                cdn = PLOTLY_CDN,
                figure = figure,
            ))
        }

        pub fn write_html<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
            let path = path.as_ref();
            std::fs::write(path, self.to_html()?)?;
            log::info!("Wrote browser view of {} points to {}", self.len(), path.display());
            Ok(path.to_path_buf())
        }
    }

}
