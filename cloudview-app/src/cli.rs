use clap::{Args as ClapArgs, Parser, Subcommand};
use cloudview_visualization::SurfaceConfig;
use std::path::PathBuf;

/// Inspect 3D point clouds stored as whitespace-delimited X Y Z text.
#[derive(Parser, Debug)]
#[command(name = "cloudview", version)]
pub struct Args {
    /// Verbosity of the command line output.
    #[arg(long, default_value = "info")]
    pub log_level: log::Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print record count, bounds and Z-zone counts.
    Info {
        file: PathBuf,
    },

    /// Render the embedded scatter view to a PNG.
    Render {
        file: PathBuf,

        /// Colour points by Z-zone instead of uniformly.
        #[arg(long)]
        zoned: bool,

        /// Camera elevation in degrees.
        #[arg(long, allow_hyphen_values = true)]
        elevation: Option<f64>,

        /// Camera azimuth in degrees.
        #[arg(long, allow_hyphen_values = true)]
        azimuth: Option<f64>,

        #[arg(short, long, default_value = "cloud.png")]
        output: PathBuf,

        #[command(flatten)]
        surface: SurfaceArgs,
    },

    /// Write an interactive browser page with a uniform/zoned colour switch.
    Html {
        file: PathBuf,

        #[arg(short, long, default_value = "cloud.html")]
        output: PathBuf,

        /// Open the page with the system browser.
        #[arg(long)]
        open: bool,
    },

    /// Drive the viewer interactively from stdin.
    Shell {
        /// File to load before the first prompt.
        file: Option<PathBuf>,

        #[command(flatten)]
        surface: SurfaceArgs,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SurfaceArgs {
    /// Embedded view width in pixels.
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Embedded view height in pixels.
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Marker radius in pixels.
    #[arg(long, default_value = "1")]
    pub marker_size: u32,
}

impl From<SurfaceArgs> for SurfaceConfig {
    fn from(args: SurfaceArgs) -> Self {
        SurfaceConfig {
            width: args.width,
            height: args.height,
            marker_size: args.marker_size,
            ..SurfaceConfig::default()
        }
    }
}
