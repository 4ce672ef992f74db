//! Query parsing and matching over flattened entries.

use crate::models::Entry;
use crate::utils::normalize;
use tracing::debug;

/// Separator between the path and user fragments, as in `github:alice`.
pub const QUERY_SEPARATOR: char = ':';

/// A parsed lookup query. Both fragments are normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    path_fragment: String,
    user_fragment: String,
}

impl Query {
    /// Parse the optional command-line argument `path[:user]`.
    ///
    /// Only the first separator splits; anything after it belongs to the
    /// user fragment.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => Self::default(),
            Some(arg) => match arg.split_once(QUERY_SEPARATOR) {
                Some((path, user)) => Self::new(path, user),
                None => Self::new(arg, ""),
            },
        }
    }

    pub fn new(path: &str, user: &str) -> Self {
        Self {
            path_fragment: normalize(path),
            user_fragment: normalize(user),
        }
    }

    pub fn path_fragment(&self) -> &str {
        &self.path_fragment
    }

    pub fn user_fragment(&self) -> &str {
        &self.user_fragment
    }

    /// Whether `entry` satisfies both fragments. Empty fragments match anything,
    /// but a user fragment never matches an entry without a user.
    pub fn matches(&self, entry: &Entry) -> bool {
        if !entry.normalized_path().contains(&self.path_fragment) {
            return false;
        }
        if self.user_fragment.is_empty() {
            return true;
        }
        entry
            .user()
            .is_some_and(|user| normalize(user).contains(&self.user_fragment))
    }

    /// Filter sorted entries, keeping their relative order.
    pub fn filter<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let results: Vec<&Entry> = entries.iter().filter(|e| self.matches(e)).collect();
        debug!(
            path = %self.path_fragment,
            user = %self.user_fragment,
            total = entries.len(),
            matched = results.len(),
            "query evaluated"
        );
        results
    }
}
