//! Error types and exit codes for pw.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful lookup, including multi-result disclosure.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for startup failures (missing store, gpg, malformed YAML).
pub const EXIT_FAILURE: i32 = 255;
/// Exit code when the query matched no entry.
pub const EXIT_NOT_FOUND: i32 = 254;
/// Exit code when strict mode refused an ambiguous result set.
pub const EXIT_AMBIGUOUS: i32 = 253;
/// Exit code after Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Main error type for password safe operations.
#[derive(Error, Debug)]
pub enum SafeError {
    #[error("Password safe not found at {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Malformed password safe: {0}")]
    MalformedDocument(#[from] serde_yaml::Error),

    #[error("Clipboard operation failed")]
    ClipboardFailed,

    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SafeError {
    /// Process exit code for this error.
    ///
    /// Every error is fatal before any entry reaches the output, so they
    /// all share the generic failure code.
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }
}

pub type Result<T> = std::result::Result<T, SafeError>;
