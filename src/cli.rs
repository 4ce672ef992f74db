//! Command-line interface implementation.

use crate::disclosure::{disclose, DisclosureFlags, Outcome};
use crate::error::Result;
use crate::query::Query;
use crate::security::{ClipboardSink, SecureSink};
use crate::service::SafeService;
use crate::utils;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Look up credentials in a GPG-encrypted YAML password safe.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the password safe
    #[arg(
        short = 'f',
        long,
        env = "PW_DATABASE",
        help = "Path to the password safe (default: ~/.passwords.yaml.asc)"
    )]
    pub file: Option<PathBuf>,

    /// Echo passwords on the console instead of copying them
    #[arg(
        short = 'E',
        long,
        visible_alias = "display",
        visible_short_alias = 'd',
        help = "Echo passwords on console (default if no clipboard is available)"
    )]
    pub echo: bool,

    /// Refuse to copy a password when more than one record matches
    #[arg(short, long)]
    pub strict: bool,

    /// Show debug output on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Query of the form PATH or PATH:USER
    #[arg(value_name = "PATH[:USER]")]
    pub query: Option<String>,
}

impl Cli {
    /// Get the password safe path.
    pub fn get_store_path(&self) -> Result<PathBuf> {
        match &self.file {
            Some(path) => utils::expand_home(path),
            None => utils::default_store_path(),
        }
    }

    fn flags(&self) -> DisclosureFlags {
        DisclosureFlags {
            echo: self.echo,
            strict: self.strict,
        }
    }

    /// Run the lookup and report the result on stdout.
    pub fn execute(&self) -> Result<Outcome> {
        let store_path = self.get_store_path()?;
        debug!(path = %store_path.display(), "using password safe");

        let entries = SafeService::new().load_entries(&store_path)?;
        let query = Query::parse(self.query.as_deref());
        let results = query.filter(&entries);

        let mut clipboard = if self.echo {
            None
        } else {
            ClipboardSink::detect()
        };
        let sink = clipboard.as_mut().map(|c| c as &mut dyn SecureSink);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        disclose(&mut out, &results, &query, self.flags(), sink)
    }
}
