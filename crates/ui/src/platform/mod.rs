use std::process::Command;
use std::sync::Arc;

/// Opens reference links outside the app window.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str);
}

pub type LinkOpenerRef = Arc<dyn LinkOpener>;

/// Hands links to the operating system's default browser.
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        if let Err(err) = system_command(url).spawn() {
            tracing::warn!(url, error = %err, "failed to open link");
        }
    }
}

#[cfg(target_os = "macos")]
fn system_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn system_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
