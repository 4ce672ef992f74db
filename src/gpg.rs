//! GPG integration for decrypting the password safe.

use crate::error::{Result, SafeError};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Turns an encrypted file into plaintext bytes.
pub trait Decryptor {
    fn decrypt(&self, path: &Path) -> Result<Zeroizing<Vec<u8>>>;
}

/// GPG operations for password safe files.
#[derive(Debug, Default)]
pub struct GpgOperations;

impl GpgOperations {
    pub fn new() -> Self {
        Self
    }

    /// Check if a file looks GPG encrypted.
    pub fn is_gpg_file(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();
            ext_str == "gpg" || ext_str == "asc"
        } else {
            false
        }
    }
}

impl Decryptor for GpgOperations {
    /// Decrypt with `gpg --use-agent --no-tty -qd`.
    ///
    /// stdin and stderr stay attached to the terminal so the agent or
    /// pinentry can ask for the passphrase. No timeout is applied.
    fn decrypt(&self, path: &Path) -> Result<Zeroizing<Vec<u8>>> {
        if !Self::is_gpg_file(path) {
            debug!(path = %path.display(), "store has no .gpg/.asc extension");
        }

        trace!(path = %path.display(), "spawning gpg");
        let child = Command::new("gpg")
            .args(["--use-agent", "--no-tty", "-qd"])
            .arg(path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    SafeError::DecryptionFailed("gpg not found. Please install GPG.".to_string())
                }
                _ => SafeError::DecryptionFailed(format!("failed to run gpg: {e}")),
            })?;

        let output = child
            .wait_with_output()
            .map_err(|e| SafeError::DecryptionFailed(format!("failed to wait for gpg: {e}")))?;
        let plaintext = Zeroizing::new(output.stdout);

        if !output.status.success() {
            return Err(SafeError::DecryptionFailed(format!(
                "gpg exited with {}",
                output.status
            )));
        }

        debug!(bytes = plaintext.len(), "decrypted password safe");
        Ok(plaintext)
    }
}
