//! Integration tests for cloudview-visualization
//!
//! These drive the viewer through the same triggers a host would use and
//! check the loading, colouring and camera behaviour end to end.

use std::fs;
use std::path::PathBuf;

use cloudview_core::{ColorZone, ColoringMode, Error, Point3d};
use cloudview_visualization::*;
use tempfile::TempDir;

fn write_cloud(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn small_viewer() -> PointCloudViewer {
    PointCloudViewer::with_config(SurfaceConfig {
        width: 200,
        height: 150,
        ..SurfaceConfig::default()
    })
}

/// A small surface patch with Z spanning all three zones
fn patch_content() -> String {
    let mut content = String::new();
    for i in 0..10 {
        for j in 0..10 {
            let x = i as f64 * 0.5;
            let y = j as f64 * 0.5;
            let z = (x - 2.0) * (y - 1.0) * 0.3;
            content.push_str(&format!("{} {}\t{}\n", x, y, z));
        }
    }
    content
}

#[test]
fn test_load_keeps_every_row_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "patch.xyz", &patch_content());

    let mut viewer = small_viewer();
    let dataset = viewer.load(&path).unwrap();
    assert_eq!(dataset.cloud.len(), 100);
    assert_eq!(dataset.cloud[0], Point3d::new(0.0, 0.0, 0.6));
    assert_eq!(dataset.cloud[1].y, 0.5);
    assert_eq!(dataset.cloud[99].x, 4.5);
}

#[test]
fn test_failed_load_keeps_previous_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_cloud(&dir, "good.xyz", "0 0 -2\n0 0 0\n0 0 1\n");
    let bad = write_cloud(&dir, "bad.xyz", "1 2 3\n4 five 6\n");

    let mut viewer = small_viewer();
    viewer.load(&good).unwrap();
    let before = viewer.dataset().cloned().unwrap();

    let err = viewer.load(&bad).unwrap_err();
    assert!(matches!(err, Error::Load(_)));
    assert_eq!(viewer.dataset(), Some(&before));

    let err = viewer.load(dir.path().join("missing.xyz")).unwrap_err();
    assert!(matches!(err, Error::Load(_)));
    assert_eq!(viewer.dataset(), Some(&before));
}

#[test]
fn test_example_zones_and_axis_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "example.xyz", "0 0 -2\n0 0 0\n0 0 1\n");

    let mut viewer = small_viewer();
    viewer.load(&path).unwrap();
    let zones: Vec<&str> = viewer
        .cloud()
        .unwrap()
        .iter()
        .map(|p| PointCloudViewer::color_zone(p).name())
        .collect();
    assert_eq!(zones, vec!["low", "mid", "high"]);

    viewer.set_zoning(true).unwrap();
    let surface = viewer.render_embedded().unwrap();
    assert_eq!(surface.view().z, AxisRange::new(-2.0, 1.0));
}

#[test]
fn test_toggle_round_trip_restores_partition() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "patch.xyz", &patch_content());

    let mut viewer = small_viewer();
    viewer.load(&path).unwrap();
    viewer.render_embedded().unwrap();
    let first_scene = viewer.surface().unwrap().scene().to_vec();
    let first_frame = viewer.surface().unwrap().frame().to_vec();

    viewer.set_zoning(true).unwrap();
    let zoned = viewer.surface().unwrap().scene().to_vec();
    assert_eq!(zoned.len(), 3);
    for series in &zoned {
        for p in &series.points {
            assert_eq!(ColorZone::of_point(p), series.zone);
        }
    }
    assert_ne!(viewer.surface().unwrap().frame(), &first_frame[..]);

    viewer.set_zoning(false).unwrap();
    assert_eq!(viewer.mode(), ColoringMode::Uniform);
    assert_eq!(viewer.surface().unwrap().scene(), &first_scene[..]);
    assert_eq!(viewer.surface().unwrap().frame(), &first_frame[..]);
}

#[test]
fn test_reset_restores_first_render_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "patch.xyz", &patch_content());

    let mut viewer = small_viewer();
    viewer.load(&path).unwrap();
    viewer.render_embedded().unwrap();
    let initial = *viewer.surface().unwrap().view();
    let initial_frame = viewer.surface().unwrap().frame().to_vec();

    viewer.rotate_view(25.0, -70.0).unwrap();
    viewer.zoom_view(3.0).unwrap();
    viewer.toggle_zoning().unwrap();
    viewer.rotate_view(-10.0, 200.0).unwrap();
    assert_ne!(*viewer.surface().unwrap().view(), initial);

    viewer.toggle_zoning().unwrap();
    viewer.reset_view().unwrap();
    assert_eq!(*viewer.surface().unwrap().view(), initial);
    assert_eq!(viewer.surface().unwrap().frame(), &initial_frame[..]);
}

#[test]
fn test_reopening_takes_a_fresh_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let small = write_cloud(&dir, "small.xyz", "0 0 -2\n0 0 0\n0 0 1\n");
    let large = write_cloud(&dir, "large.xyz", "-10 -10 -10\n10 10 10\n");

    let mut viewer = small_viewer();
    viewer.load(&small).unwrap();
    viewer.render_embedded().unwrap();
    viewer.rotate_view(10.0, 10.0).unwrap();

    viewer.close();
    assert!(!viewer.is_open());
    viewer.close();

    viewer.load(&large).unwrap();
    let surface = viewer.render_embedded().unwrap();
    let initial = surface.initial_view().unwrap();
    assert_eq!(initial.z, AxisRange::new(-10.0, 10.0));
    assert_eq!(initial.elevation, ViewState::DEFAULT_ELEVATION);
    assert_eq!(initial.azimuth, ViewState::DEFAULT_AZIMUTH);
}

#[test]
fn test_loading_does_not_redraw_open_surface() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_cloud(&dir, "first.xyz", "0 0 -2\n0 0 0\n0 0 1\n");
    let second = write_cloud(&dir, "second.xyz", "5 5 5\n6 6 6\n");

    let mut viewer = small_viewer();
    viewer.load(&first).unwrap();
    viewer.render_embedded().unwrap();
    viewer.load(&second).unwrap();
    assert_eq!(viewer.surface().unwrap().view().z, AxisRange::new(-2.0, 1.0));

    viewer.render_embedded().unwrap();
    assert_eq!(viewer.surface().unwrap().view().z, AxisRange::new(5.0, 6.0));
}

#[cfg(feature = "plotly")]
#[test]
fn test_external_render_is_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "example.xyz", "0 0 -2\n0 0 0\n0 0 1\n");

    let mut viewer = small_viewer();
    assert!(matches!(
        viewer.render_external(dir.path().join("none.html")).unwrap_err(),
        Error::Precondition(_)
    ));

    viewer.load(&path).unwrap();
    let page = viewer.render_external(dir.path().join("cloud.html")).unwrap();
    assert!(!viewer.is_open());
    assert_eq!(viewer.mode(), ColoringMode::Uniform);

    let html = fs::read_to_string(page).unwrap();
    assert!(html.contains(r#"["blue","blue","blue"]"#));
    assert!(html.contains(r#"["red","orange","green"]"#));
}

#[cfg(not(feature = "plotly"))]
#[test]
fn test_external_render_reports_missing_dependency_first() {
    let viewer = small_viewer();
    let err = viewer.render_external("unused.html").unwrap_err();
    assert!(matches!(err, Error::DependencyUnavailable(_)));
}

#[test]
fn test_camera_input_is_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "example.xyz", "0 0 -2\n0 0 0\n0 0 1\n");

    let mut viewer = small_viewer();
    viewer.load(&path).unwrap();
    viewer.render_embedded().unwrap();
    let before = *viewer.surface().unwrap().view();

    assert!(matches!(
        viewer.rotate_view(f64::NAN, f64::INFINITY).unwrap_err(),
        Error::InvalidData(_)
    ));
    assert!(viewer.zoom_view(f64::INFINITY).is_err());
    assert_eq!(*viewer.surface().unwrap().view(), before);

    let mut overflowed = false;
    for _ in 0..8 {
        if viewer.zoom_view(1e-120).is_err() {
            overflowed = true;
            break;
        }
    }
    assert!(overflowed);
    let view = viewer.surface().unwrap().view();
    assert!(view.x.is_finite() && view.y.is_finite() && view.z.is_finite());

    viewer.reset_view().unwrap();
    assert_eq!(*viewer.surface().unwrap().view(), before);
}

#[test]
fn test_oversized_surface_is_rejected_and_stays_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_cloud(&dir, "example.xyz", "0 0 -2\n0 0 0\n0 0 1\n");

    let mut viewer = PointCloudViewer::with_config(SurfaceConfig {
        width: u32::MAX,
        height: u32::MAX,
        ..SurfaceConfig::default()
    });
    viewer.load(&path).unwrap();
    assert!(matches!(viewer.render_embedded().unwrap_err(), Error::InvalidData(_)));
    assert!(!viewer.is_open());
}
