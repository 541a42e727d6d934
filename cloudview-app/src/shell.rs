//! Line-oriented host for the viewer
//!
//! Each input line is one trigger. Failures are printed as a single
//! `error: ...` notice and the session carries on.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use cloudview_core::{Bounded, ZonePartition};
use cloudview_visualization::{external, PointCloudViewer};

const HELP: &str = "\
commands:
  load <path>              load a whitespace-delimited X Y Z file
  plot                     render the embedded view
  mask on|off|toggle       switch Z-zone colouring
  rotate <d_elev> <d_azim> orbit the embedded camera (degrees)
  zoom <factor>            zoom the embedded view (>1 zooms in)
  reset                    restore the view captured at first render
  save <png>               write the embedded view to a PNG
  browser <html>           write the interactive browser page
  close                    close the embedded view
  status                   show what is loaded and open
  quit                     leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Load(PathBuf),
    Plot,
    Mask(MaskSwitch),
    Rotate(f64, f64),
    Zoom(f64),
    Reset,
    Save(PathBuf),
    Browser(PathBuf),
    Close,
    Status,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSwitch {
    On,
    Off,
    Toggle,
}

fn number(word: Option<&str>, what: &str) -> Result<f64> {
    let word = word.ok_or_else(|| anyhow!("missing {}", what))?;
    word.parse::<f64>()
        .with_context(|| format!("invalid {} {:?}", what, word))
}

fn path(word: Option<&str>, what: &str) -> Result<PathBuf> {
    word.map(PathBuf::from)
        .ok_or_else(|| anyhow!("missing {} path", what))
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb {
            "help" | "?" => ShellCommand::Help,
            "load" => ShellCommand::Load(path(words.next(), "input")?),
            "plot" => ShellCommand::Plot,
            "mask" => ShellCommand::Mask(match words.next() {
                Some("on") => MaskSwitch::On,
                Some("off") => MaskSwitch::Off,
                Some("toggle") | None => MaskSwitch::Toggle,
                Some(other) => bail!("mask takes on, off or toggle, not {:?}", other),
            }),
            "rotate" => ShellCommand::Rotate(
                number(words.next(), "elevation change")?,
                number(words.next(), "azimuth change")?,
            ),
            "zoom" => ShellCommand::Zoom(number(words.next(), "zoom factor")?),
            "reset" => ShellCommand::Reset,
            "save" => ShellCommand::Save(path(words.next(), "output")?),
            "browser" => ShellCommand::Browser(path(words.next(), "output")?),
            "close" => ShellCommand::Close,
            "status" => ShellCommand::Status,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("unknown command {:?}, try `help`", other),
        };
        Ok(Some(command))
    }
}

pub struct Shell {
    viewer: PointCloudViewer,
}

impl Shell {
    pub fn new(viewer: PointCloudViewer) -> Self {
        Self { viewer }
    }

    pub fn viewer(&self) -> &PointCloudViewer {
        &self.viewer
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match ShellCommand::parse(&line) {
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(command)) => {
                    if let Err(e) = self.execute(&command, &mut output) {
                        writeln!(output, "error: {:#}", e)?;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(output, "error: {:#}", e)?,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        self.viewer.close();
        writeln!(output)?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: &ShellCommand, out: &mut W) -> Result<()> {
        match command {
            ShellCommand::Help => writeln!(out, "{}", HELP)?,
            ShellCommand::Load(path) => {
                let dataset = self.viewer.load(path)?;
                writeln!(out, "loaded {} [{} records]", dataset.source, dataset.cloud.len())?;
            }
            ShellCommand::Plot => {
                self.viewer.render_embedded()?;
                writeln!(out, "plotted ({:?} colouring)", self.viewer.mode())?;
            }
            ShellCommand::Mask(switch) => {
                match switch {
                    MaskSwitch::On => self.viewer.set_zoning(true)?,
                    MaskSwitch::Off => self.viewer.set_zoning(false)?,
                    MaskSwitch::Toggle => self.viewer.toggle_zoning()?,
                }
                writeln!(out, "colouring: {:?}", self.viewer.mode())?;
            }
            ShellCommand::Rotate(d_elevation, d_azimuth) => {
                self.viewer.rotate_view(*d_elevation, *d_azimuth)?;
                self.print_view(out)?;
            }
            ShellCommand::Zoom(factor) => {
                self.viewer.zoom_view(*factor)?;
                self.print_view(out)?;
            }
            ShellCommand::Reset => {
                self.viewer.reset_view()?;
                self.print_view(out)?;
            }
            ShellCommand::Save(path) => {
                let surface = self
                    .viewer
                    .surface()
                    .ok_or_else(|| anyhow!("no embedded view is open; run `plot` first"))?;
                surface.save_png(path)?;
                writeln!(out, "saved {}", path.display())?;
            }
            ShellCommand::Browser(path) => {
                let written = self.viewer.render_external(path)?;
                writeln!(out, "wrote {}", written.display())?;
            }
            ShellCommand::Close => {
                self.viewer.close();
                writeln!(out, "closed")?;
            }
            ShellCommand::Status => self.print_status(out)?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    fn print_view<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.viewer.surface() {
            Some(surface) => {
                let view = surface.view();
                writeln!(
                    out,
                    "elev {:.1} azim {:.1} x [{:.3}, {:.3}] y [{:.3}, {:.3}] z [{:.3}, {:.3}]",
                    view.elevation,
                    view.azimuth,
                    view.x.min,
                    view.x.max,
                    view.y.min,
                    view.y.max,
                    view.z.min,
                    view.z.max,
                )?;
            }
            None => writeln!(out, "no embedded view is open")?,
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        match self.viewer.dataset() {
            Some(dataset) => {
                let (low, mid, high) = ZonePartition::of(&dataset.cloud).counts();
                writeln!(out, "data: {} [{} records]", dataset.source, dataset.cloud.len())?;
                if let Some(bounds) = dataset.cloud.bounding_box() {
                    writeln!(out, "bounds: {:?} .. {:?}", bounds.min.coords.as_slice(), bounds.max.coords.as_slice())?;
                }
                writeln!(out, "zones: low {} mid {} high {}", low, mid, high)?;
            }
            None => writeln!(out, "data: none")?,
        }
        writeln!(out, "colouring: {:?}", self.viewer.mode())?;
        writeln!(
            out,
            "embedded view: {}",
            if self.viewer.is_open() { "open" } else { "closed" }
        )?;
        writeln!(
            out,
            "browser renderer: {}",
            if external::is_available() { "available" } else { "unavailable" }
        )?;
        Ok(())
    }
}
