//! System browser launcher

use super::Browser;
use crate::{Error, Result};

/// Opens URLs with the platform's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "opening in browser");

        let mut command = opener_command();
        command.arg(url);

        let status = command
            .status()
            .map_err(|e| Error::Browser(format!("failed to launch browser: {e}")))?;

        if !status.success() {
            return Err(Error::Browser(format!("browser exited with {status}")));
        }

        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command() -> std::process::Command {
    std::process::Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener_command() -> std::process::Command {
    let mut command = std::process::Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command() -> std::process::Command {
    std::process::Command::new("xdg-open")
}
