//! pw: credential lookup in a GPG-encrypted YAML password safe.

pub mod cli;
pub mod disclosure;
pub mod display;
pub mod error;
pub mod flatten;
pub mod gpg;
pub mod models;
pub mod query;
pub mod security;
pub mod service;
pub mod utils;
pub mod yaml_parser;

// Re-export commonly used types
pub use error::{Result, SafeError};
pub use models::{Entry, TreeNode};
pub use query::Query;
pub use service::SafeService;
