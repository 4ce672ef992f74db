//! Data models for the password safe.

use crate::utils::normalize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Reserved mapping key holding the password.
pub const KEY_PASSWORD: &str = "P";
/// Reserved mapping key holding the user name.
pub const KEY_USER: &str = "U";
/// Reserved mapping key holding a link.
pub const KEY_LINK: &str = "L";
/// Reserved mapping key holding free-form notes.
pub const KEY_NOTES: &str = "N";

/// A flattened account record.
///
/// Fields are private and only exposed through accessors, so an entry
/// cannot change after flattening. Its contents are wiped when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entry {
    normalized_path: String,
    user: Option<String>,
    password: String,
    link: Option<String>,
    notes: Option<String>,
}

impl Entry {
    /// Create an entry at `path`. The path is normalized here.
    pub fn new(path: &str, password: impl Into<String>) -> Self {
        Self {
            normalized_path: normalize(path),
            user: None,
            password: password.into(),
            link: None,
            notes: None,
        }
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Dotted, normalized path of the entry.
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    /// User name as stored in the safe (not normalized).
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Whether the entry carries a link or notes.
    pub fn has_extras(&self) -> bool {
        self.link.is_some() || self.notes.is_some()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("normalized_path", &self.normalized_path)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("link", &self.link)
            .field("notes", &self.notes.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Generic document tree produced by the YAML parser.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Explicit null or an empty document.
    Null,
    /// String, number or boolean in its string form.
    Scalar(String),
    /// Key/value pairs in document order.
    Mapping(Vec<(String, TreeNode)>),
    /// Sibling items sharing the parent's path.
    Sequence(Vec<TreeNode>),
}

impl TreeNode {
    /// Look up a key in a mapping node.
    pub fn get(&self, key: &str) -> Option<&TreeNode> {
        match self {
            TreeNode::Mapping(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// A mapping with a `P` key is an account record rather than a subtree.
    pub fn is_account(&self) -> bool {
        self.get(KEY_PASSWORD).is_some()
    }

    /// String form of a scalar node; `None` for null and collections.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            TreeNode::Scalar(value) => Some(value),
            _ => None,
        }
    }
}
