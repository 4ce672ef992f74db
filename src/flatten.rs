//! Flattening of the document tree into searchable entries.

use crate::models::{Entry, TreeNode, KEY_LINK, KEY_NOTES, KEY_PASSWORD, KEY_USER};
use tracing::debug;

/// Walk `root` and collect one entry per account record, in document order.
///
/// Sequences do not extend the path, so all of their items land on the
/// parent's path. Mappings without a `P` key are subtrees whose keys become
/// dotted path segments.
pub fn flatten(root: &TreeNode) -> Vec<Entry> {
    let mut entries = Vec::new();
    if *root != TreeNode::Null {
        collect_entries(root, "", &mut entries);
    }
    entries
}

/// Stable sort by normalized path; accounts sharing a path keep document order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.normalized_path().cmp(b.normalized_path()));
}

fn collect_entries(node: &TreeNode, path: &str, entries: &mut Vec<Entry>) {
    match node {
        TreeNode::Sequence(items) => {
            for item in items {
                entries.push(account_entry(item, path));
            }
        }
        TreeNode::Mapping(pairs) if !node.is_account() => {
            for (key, value) in pairs {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                collect_entries(value, &child_path, entries);
            }
        }
        _ => entries.push(account_entry(node, path)),
    }
}

/// Build an entry from an account record. Bare scalars are passwords.
fn account_entry(node: &TreeNode, path: &str) -> Entry {
    match node {
        TreeNode::Scalar(password) => Entry::new(path, password.as_str()),
        TreeNode::Mapping(_) => {
            let password = match node.get(KEY_PASSWORD) {
                Some(TreeNode::Scalar(password)) => password.clone(),
                Some(TreeNode::Null) | None => String::new(),
                Some(_) => {
                    debug!(path, "password is not a scalar, using empty password");
                    String::new()
                }
            };

            Entry::new(path, password)
                .with_user(field(node, KEY_USER, path))
                .with_link(field(node, KEY_LINK, path))
                .with_notes(field(node, KEY_NOTES, path))
        }
        TreeNode::Null => Entry::new(path, ""),
        TreeNode::Sequence(_) => {
            debug!(path, "nested sequence inside account list, using empty password");
            Entry::new(path, "")
        }
    }
}

fn field(node: &TreeNode, key: &str, path: &str) -> Option<String> {
    match node.get(key)? {
        TreeNode::Scalar(value) => Some(value.clone()),
        TreeNode::Null => None,
        _ => {
            debug!(path, key, "ignoring non-scalar field");
            None
        }
    }
}
