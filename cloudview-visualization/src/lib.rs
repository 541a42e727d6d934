//! Visualization for point clouds
//!
//! Two independent renderers share the same data and the same Z-zone
//! colouring:
//! - [`EmbeddedSurface`]: an in-process raster scatter plot with a
//!   resettable camera
//! - [`external`]: a standalone plotly.js page with a client-side
//!   uniform/zoned colour switch
//!
//! [`PointCloudViewer`] ties them to a loaded dataset.

pub mod view;
pub mod embedded;
pub mod external;
pub mod viewer;

pub use view::*;
pub use embedded::*;
pub use viewer::*;
