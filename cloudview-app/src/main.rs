use anyhow::Result;
use clap::Parser;
use cloudview_core::{Bounded, ColoringMode, ZonePartition};
use cloudview_visualization::{external, EmbeddedSurface, PointCloudViewer, SurfaceConfig};
use log::info;
use std::io;
use std::path::Path;

mod cli;
mod opener;
mod shell;

use crate::cli::{Args, Command};
use crate::shell::{Shell, ShellCommand};

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(args.log_level)?;

    match args.command {
        Command::Info { file } => info_command(&file),
        Command::Render {
            file,
            zoned,
            elevation,
            azimuth,
            output,
            surface,
        } => render_command(&file, zoned, elevation, azimuth, &output, surface.into()),
        Command::Html { file, output, open } => {
            let mut viewer = PointCloudViewer::new();
            viewer.load(&file)?;
            let page = viewer.render_external(&output)?;
            println!("wrote {}", page.display());
            if open {
                opener::open_in_browser(&page)?;
            }
            Ok(())
        }
        Command::Shell { file, surface } => {
            let mut shell = Shell::new(PointCloudViewer::with_config(surface.into()));
            if let Some(file) = file {
                if let Err(e) = shell.execute(&ShellCommand::Load(file), &mut io::stdout()) {
                    println!("error: {:#}", e);
                }
            }
            shell.run(io::stdin().lock(), io::stdout())
        }
    }
}

fn info_command(file: &Path) -> Result<()> {
    let cloud = cloudview_io::read_point_cloud(file)?;
    println!("file: {}", file.display());
    println!("records: {}", cloud.len());
    if let Some(bounds) = cloud.bounding_box() {
        println!("x: [{}, {}]", bounds.min.x, bounds.max.x);
        println!("y: [{}, {}]", bounds.min.y, bounds.max.y);
        println!("z: [{}, {}]", bounds.min.z, bounds.max.z);
    }
    let (low, mid, high) = ZonePartition::of(&cloud).counts();
    println!("zones: low {} mid {} high {}", low, mid, high);
    println!(
        "browser renderer: {}",
        if external::is_available() { "available" } else { "unavailable" }
    );
    Ok(())
}

fn render_command(
    file: &Path,
    zoned: bool,
    elevation: Option<f64>,
    azimuth: Option<f64>,
    output: &Path,
    config: SurfaceConfig,
) -> Result<()> {
    let cloud = cloudview_io::read_point_cloud(file)?;
    let mut surface = EmbeddedSurface::open(config)?;
    surface.render(&cloud, ColoringMode::from_zoned(zoned))?;

    if elevation.is_some() || azimuth.is_some() {
        let view = *surface.view();
        surface.set_angles(
            elevation.unwrap_or(view.elevation),
            azimuth.unwrap_or(view.azimuth),
        )?;
    }

    surface.save_png(output)?;
    info!("Rendered {} points", cloud.len());
    println!("wrote {}", output.display());
    Ok(())
}
