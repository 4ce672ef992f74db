//! Secure sinks for revealed passwords.

use crate::error::{Result, SafeError};
use tracing::debug;

#[cfg(target_os = "linux")]
use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

#[cfg(not(target_os = "linux"))]
use copypasta::{ClipboardContext, ClipboardProvider};

/// Write-only destination for a secret that should not appear on screen.
pub trait SecureSink {
    /// Replace the sink's current content with `secret`.
    fn copy(&mut self, secret: &str) -> Result<()>;
}

/// Clipboard helper program on Linux.
///
/// X11 and Wayland selections live only as long as their owner, so the
/// secret is handed to a helper that forks and keeps serving it after we exit.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardHelper {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// Environment variable that must be set for the helper's display server.
    pub display_var: &'static str,
}

#[cfg(target_os = "linux")]
pub const CLIPBOARD_HELPERS: &[ClipboardHelper] = &[
    ClipboardHelper {
        program: "wl-copy",
        args: &[],
        display_var: "WAYLAND_DISPLAY",
    },
    ClipboardHelper {
        program: "xclip",
        args: &["-selection", "clipboard"],
        display_var: "DISPLAY",
    },
    ClipboardHelper {
        program: "xsel",
        args: &["--clipboard", "--input"],
        display_var: "DISPLAY",
    },
];

/// Pick the first helper whose display server is present and whose binary
/// can be found.
#[cfg(target_os = "linux")]
pub fn find_helper(
    has_display: impl Fn(&str) -> bool,
    locate: impl Fn(&str) -> Option<PathBuf>,
) -> Option<(ClipboardHelper, PathBuf)> {
    CLIPBOARD_HELPERS
        .iter()
        .filter(|helper| has_display(helper.display_var))
        .find_map(|helper| locate(helper.program).map(|path| (*helper, path)))
}

/// System clipboard sink.
pub struct ClipboardSink {
    #[cfg(target_os = "linux")]
    helper: ClipboardHelper,
    #[cfg(target_os = "linux")]
    path: PathBuf,
    #[cfg(not(target_os = "linux"))]
    ctx: ClipboardContext,
}

impl ClipboardSink {
    /// Open the system clipboard, or `None` when the platform has none.
    #[cfg(target_os = "linux")]
    pub fn detect() -> Option<Self> {
        let found = find_helper(
            |var| std::env::var_os(var).is_some_and(|v| !v.is_empty()),
            |program| which::which(program).ok(),
        );
        match found {
            Some((helper, path)) => {
                debug!(helper = helper.program, "using clipboard helper");
                Some(Self { helper, path })
            }
            None => {
                debug!("no clipboard helper or display, falling back to echo");
                None
            }
        }
    }

    /// Open the system clipboard, or `None` when the platform has none.
    #[cfg(not(target_os = "linux"))]
    pub fn detect() -> Option<Self> {
        match ClipboardContext::new() {
            Ok(ctx) => Some(Self { ctx }),
            Err(e) => {
                debug!(error = %e, "clipboard unavailable, falling back to echo");
                None
            }
        }
    }
}

#[cfg(target_os = "linux")]
impl SecureSink for ClipboardSink {
    fn copy(&mut self, secret: &str) -> Result<()> {
        // The helper's daemon must not hold on to our stdout or stderr.
        let mut child = Command::new(&self.path)
            .args(self.helper.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                debug!(helper = self.helper.program, error = %e, "failed to spawn clipboard helper");
                SafeError::ClipboardFailed
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(secret.as_bytes())
                .map_err(|_| SafeError::ClipboardFailed)?;
        }

        let status = child.wait().map_err(|_| SafeError::ClipboardFailed)?;
        if !status.success() {
            debug!(helper = self.helper.program, %status, "clipboard helper failed");
            return Err(SafeError::ClipboardFailed);
        }

        debug!("password copied to clipboard");
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl SecureSink for ClipboardSink {
    fn copy(&mut self, secret: &str) -> Result<()> {
        self.ctx
            .set_contents(secret.to_string())
            .map_err(|_| SafeError::ClipboardFailed)?;
        debug!("password copied to clipboard");
        Ok(())
    }
}
