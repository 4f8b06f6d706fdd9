//! Hand a written image to the platform's default viewer.

use log::debug;
use std::path::Path;
use std::process::Command;

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Launch the viewer without waiting for it to close.
pub fn open(path: &Path) -> std::io::Result<()> {
    let mut command = viewer_command(path);
    debug!("launching {:?}", command);
    command.spawn().map(|_| ())
}
