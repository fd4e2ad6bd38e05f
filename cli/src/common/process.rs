//! # Luxe Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Hands URLs (WhatsApp deep links) to the platform's opener so they land in
//! the user's browser or WhatsApp client, the terminal equivalent of
//! `window.open(url, '_blank')`.
//!
//! - Linux/BSD: `xdg-open <url>`
//! - macOS: `open <url>`
//! - Windows: `cmd /C start "" <url>`
//!
use crate::core::error::{LuxeError, Result};
use anyhow::Context;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Builds the opener command for the current platform without running it.
pub fn opener_command(url: &str) -> Command {
    let mut cmd;
    if cfg!(target_os = "macos") {
        cmd = Command::new("open");
        cmd.arg(url);
    } else if cfg!(target_os = "windows") {
        cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
    } else {
        cmd = Command::new("xdg-open");
        cmd.arg(url);
    }
    cmd
}

/// Opens `url` with the platform opener and waits for the opener to exit.
///
/// # Errors
///
/// Returns `LuxeError::ExternalCommand` when the opener exits unsuccessfully,
/// or an I/O error with context when it cannot be started at all.
pub fn open_url(url: &str) -> Result<()> {
    let mut cmd = opener_command(url);
    let program = cmd.get_program().to_string_lossy().into_owned();
    debug!("Running {:?}", cmd);

    let status = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to launch '{}'", program))?;

    if !status.success() {
        anyhow::bail!(LuxeError::ExternalCommand {
            cmd: format!("{} {}", program, url),
            status: status.to_string(),
        });
    }
    info!("Opened {} with {}", url, program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_command_passes_url_last() {
        let url = "https://wa.me/15551234567?text=hi";
        let cmd = opener_command(url);
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args.last().map(String::as_str), Some(url));
    }
}
