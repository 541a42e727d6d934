//! Core data structures for cloudview
//!
//! This crate provides the fundamental types shared by the loader and the
//! renderers: points, point clouds, bounding boxes and the Z-zone colouring
//! used by every renderer.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod zone;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use zone::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
