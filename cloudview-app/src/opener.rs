use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Hand a file to the platform's default application
pub fn open_in_browser(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(path)
        .spawn()
        .with_context(|| format!("could not open {}", path.display()))?;
    Ok(())
}
