//! Service layer: load the password safe and answer queries.

use crate::error::{Result, SafeError};
use crate::flatten::{flatten, sort_entries};
use crate::gpg::{Decryptor, GpgOperations};
use crate::models::Entry;
use crate::utils;
use crate::yaml_parser::YamlParser;
use std::path::Path;
use tracing::{debug, warn};

/// Service for password safe lookups.
pub struct SafeService<D = GpgOperations> {
    decryptor: D,
    parser: YamlParser,
}

impl Default for SafeService {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeService {
    /// Create a service decrypting with gpg.
    pub fn new() -> Self {
        Self::with_decryptor(GpgOperations::new())
    }
}

impl<D: Decryptor> SafeService<D> {
    pub fn with_decryptor(decryptor: D) -> Self {
        Self {
            decryptor,
            parser: YamlParser::new(),
        }
    }

    /// Decrypt, parse and flatten the safe at `path` into sorted entries.
    ///
    /// Fails before producing any entry if the file is missing, decryption
    /// fails, or the plaintext is not valid YAML.
    pub fn load_entries(&self, path: &Path) -> Result<Vec<Entry>> {
        if !path.exists() {
            return Err(SafeError::StoreNotFound(path.to_path_buf()));
        }

        for warning in utils::check_file_permissions(path) {
            warn!("{warning}");
        }

        let plaintext = self.decryptor.decrypt(path)?;
        let tree = self.parser.parse(&plaintext)?;
        drop(plaintext);

        let mut entries = flatten(&tree);
        sort_entries(&mut entries);

        debug!(entries = entries.len(), path = %path.display(), "loaded password safe");
        Ok(entries)
    }
}
