//! Open a generated report with the platform's default handler

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", target]);
    cmd
}

#[cfg(target_os = "macos")]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

/// `file://` URL for `path`, made absolute
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    Ok(format!("file://{}", absolute.display()))
}

/// Launch the default browser on `path` without waiting for it to exit
pub fn open(path: &Path) -> Result<()> {
    let url = file_url(path)?;
    tracing::debug!("opening {}", url);
    opener(&url)
        .spawn()
        .with_context(|| format!("Failed to open {} in browser", url))?;
    Ok(())
}
