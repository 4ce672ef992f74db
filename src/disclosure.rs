//! Disclosure policy: how lookup results and their passwords are revealed.

use crate::display::{copied_style, header, password_style};
use crate::error::{Result, EXIT_AMBIGUOUS, EXIT_NOT_FOUND, EXIT_SUCCESS};
use crate::models::Entry;
use crate::query::Query;
use crate::security::SecureSink;
use std::io::Write;
use tracing::debug;

/// Indentation of detail lines in expanded mode.
const INDENT: &str = "   ";

/// Mode flags from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisclosureFlags {
    /// Print passwords instead of using the secure sink.
    pub echo: bool,
    /// Refuse to pick a password when several entries match.
    pub strict: bool,
}

/// How a password is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Printed in plain text.
    Echo,
    /// Sent to the secure sink (first result only).
    Copy,
}

/// What to do with a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    NotFound,
    Refused,
    /// Single result, shown in full.
    Expanded(Reveal),
    /// Several results, one line each.
    Abbreviated(Reveal),
}

/// Final status of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Disclosed,
    NotFound,
    Refused,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Disclosed => EXIT_SUCCESS,
            Outcome::NotFound => EXIT_NOT_FOUND,
            Outcome::Refused => EXIT_AMBIGUOUS,
        }
    }
}

impl From<Decision> for Outcome {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::NotFound => Outcome::NotFound,
            Decision::Refused => Outcome::Refused,
            Decision::Expanded(_) | Decision::Abbreviated(_) => Outcome::Disclosed,
        }
    }
}

pub struct DisclosurePolicy;

impl DisclosurePolicy {
    /// Decide from the result count and flags. Echo is forced when no sink exists.
    pub fn decide(count: usize, flags: DisclosureFlags, sink_available: bool) -> Decision {
        let reveal = if flags.echo || !sink_available {
            Reveal::Echo
        } else {
            Reveal::Copy
        };

        match count {
            0 => Decision::NotFound,
            1 => Decision::Expanded(reveal),
            _ if flags.strict && reveal == Reveal::Copy => Decision::Refused,
            _ => Decision::Abbreviated(reveal),
        }
    }
}

/// Render `results` to `out`, copying at most one password into `sink`.
pub fn disclose<W: Write>(
    out: &mut W,
    results: &[&Entry],
    query: &Query,
    flags: DisclosureFlags,
    sink: Option<&mut dyn SecureSink>,
) -> Result<Outcome> {
    let decision = DisclosurePolicy::decide(results.len(), flags, sink.is_some());
    debug!(results = results.len(), ?decision, "disclosure decided");

    // Taken on first use, so a second copy is impossible.
    let mut sink = sink;

    match decision {
        Decision::NotFound => writeln!(out, "no record found")?,
        Decision::Refused => writeln!(out, "multiple records found")?,
        Decision::Expanded(reveal) => {
            let entry = results[0];
            // Copy before printing, so a failed copy leaves stdout empty.
            let copied = reveal == Reveal::Copy && copy_once(&mut sink, entry)?;
            writeln!(out, "{}", header(entry, query))?;
            if copied {
                writeln!(out, "{INDENT}{}", copied_style())?;
            } else {
                writeln!(out, "{INDENT}{}", password_style(entry.password()))?;
            }
            if let Some(link) = entry.link() {
                writeln!(out, "{INDENT}{link}")?;
            }
            if let Some(notes) = entry.notes() {
                writeln!(out, "{INDENT}{notes}")?;
            }
        }
        Decision::Abbreviated(reveal) => {
            for entry in results {
                let copied = reveal == Reveal::Copy && copy_once(&mut sink, entry)?;
                write!(out, "{}", header(entry, query))?;
                match reveal {
                    Reveal::Echo => write!(out, " | {}", password_style(entry.password()))?,
                    Reveal::Copy if copied => write!(out, " {}", copied_style())?,
                    Reveal::Copy => write!(out, " | ***")?,
                }
                if entry.has_extras() {
                    write!(out, " [...]")?;
                }
                writeln!(out)?;
            }
        }
    }

    Ok(decision.into())
}

/// Copy the entry's password if the sink has not been used yet.
fn copy_once(sink: &mut Option<&mut dyn SecureSink>, entry: &Entry) -> Result<bool> {
    match sink.take() {
        Some(sink) => {
            sink.copy(entry.password())?;
            Ok(true)
        }
        None => Ok(false),
    }
}
