//! Utility functions for path handling and terminal output.

use crate::error::{Result, SafeError};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File name of the password safe inside the home directory.
pub const DEFAULT_STORE_NAME: &str = ".passwords.yaml.asc";

/// Canonicalize a path, query fragment or user name into a comparable key.
///
/// Spaces become underscores and everything is lowercased.
pub fn normalize(raw: &str) -> String {
    raw.replace(' ', "_").to_lowercase()
}

/// Normalize a single character. Used where match positions must be
/// mapped back onto the original text.
pub fn normalize_char(ch: char) -> String {
    if ch == ' ' {
        "_".to_string()
    } else {
        ch.to_lowercase().collect()
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(SafeError::NoHomeDirectory)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

/// Default location of the password safe.
pub fn default_store_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(SafeError::NoHomeDirectory)?;
    Ok(home.join(DEFAULT_STORE_NAME))
}

/// Check file permissions and return warnings.
pub fn check_file_permissions(path: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    #[cfg(unix)]
    {
        if let Ok(metadata) = fs::metadata(path) {
            let mode = metadata.permissions().mode();

            // Group or others can read the safe
            if mode & 0o077 != 0 {
                warnings.push(format!(
                    "File has insecure permissions: {:o}. Run 'chmod 600 {}' to fix.",
                    mode & 0o777,
                    path.display()
                ));
            }
        }
    }

    warnings
}

/// Print an error message and exit.
pub fn error_exit(message: &str, code: i32) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(code);
}
