//! YAML parser turning decrypted plaintext into a generic tree.

use crate::error::Result;
use crate::models::TreeNode;
use serde_yaml::Value;
use tracing::trace;

/// Parse password safe documents.
#[derive(Debug, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create a new parser instance.
    pub fn new() -> Self {
        Self
    }

    /// Parse plaintext bytes into a tree. An empty document is `TreeNode::Null`.
    ///
    /// Merge keys (`<<: *anchor`) are resolved before conversion. Duplicate
    /// keys in one mapping are rejected as malformed.
    pub fn parse(&self, content: &[u8]) -> Result<TreeNode> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(TreeNode::Null);
        }

        let mut value: Value = serde_yaml::from_slice(content)?;
        value.apply_merge()?;
        let tree = TreeNode::from(value);
        trace!(bytes = content.len(), "parsed YAML document");
        Ok(tree)
    }
}

impl From<Value> for TreeNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => TreeNode::Null,
            Value::Bool(b) => TreeNode::Scalar(b.to_string()),
            Value::Number(n) => TreeNode::Scalar(n.to_string()),
            Value::String(s) => TreeNode::Scalar(s),
            Value::Sequence(items) => {
                TreeNode::Sequence(items.into_iter().map(TreeNode::from).collect())
            }
            Value::Mapping(map) => TreeNode::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key_to_string(key), TreeNode::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => TreeNode::from(tagged.value),
        }
    }
}

/// Render a mapping key as a path segment.
fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
