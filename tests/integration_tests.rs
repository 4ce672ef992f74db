// Integration tests for pw
// These tests run the lookup pipeline end to end without gpg

use pw::disclosure::{disclose, DisclosureFlags, Outcome};
use pw::error::{EXIT_AMBIGUOUS, EXIT_NOT_FOUND};
use pw::gpg::Decryptor;
use pw::security::SecureSink;
use pw::{Entry, Query, SafeService};
use std::io::Write;
use std::path::Path;
use zeroize::Zeroizing;

const SAFE: &str = "\
Email:
  P: x
  U: bob
Email2:
  - P: y
  - P: z
    U: carol
Work Stuff:
  VPN:
    P: vpn-secret
    U: Alice Smith
    L: https://vpn.example.com
    N: rotate every 90 days
  Wiki: wiki-pass
Site: abc123
";

/// Reads the "encrypted" file as plaintext.
struct PlaintextDecryptor;

impl Decryptor for PlaintextDecryptor {
    fn decrypt(&self, path: &Path) -> pw::Result<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(std::fs::read(path)?))
    }
}

#[derive(Default)]
struct RecordingSink {
    copies: Vec<String>,
}

impl SecureSink for RecordingSink {
    fn copy(&mut self, secret: &str) -> pw::Result<()> {
        self.copies.push(secret.to_string());
        Ok(())
    }
}

fn load(content: &str) -> Vec<Entry> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    SafeService::with_decryptor(PlaintextDecryptor)
        .load_entries(file.path())
        .unwrap()
}

fn lookup(
    entries: &[Entry],
    arg: Option<&str>,
    flags: DisclosureFlags,
    sink: Option<&mut RecordingSink>,
) -> (Outcome, String) {
    colored::control::set_override(false);
    let query = Query::parse(arg);
    let results = query.filter(entries);
    let mut out = Vec::new();
    let outcome = disclose(
        &mut out,
        &results,
        &query,
        flags,
        sink.map(|s| s as &mut dyn SecureSink),
    )
    .unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_flatten_and_sort_document() {
    let entries = load(SAFE);
    let summary: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.normalized_path(), e.password()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("email", "x"),
            ("email2", "y"),
            ("email2", "z"),
            ("site", "abc123"),
            ("work_stuff.vpn", "vpn-secret"),
            ("work_stuff.wiki", "wiki-pass"),
        ]
    );
}

#[test]
fn test_bare_scalar_round_trip() {
    let entries = load("Site: abc123\n");
    assert_eq!(entries, vec![Entry::new("site", "abc123")]);
}

#[test]
fn test_empty_query_returns_everything() {
    let entries = load(SAFE);
    assert_eq!(Query::parse(None).filter(&entries).len(), entries.len());
}

#[test]
fn test_not_found_exit_code() {
    let entries = load(SAFE);
    let mut sink = RecordingSink::default();
    let (outcome, out) = lookup(
        &entries,
        Some("nothing"),
        DisclosureFlags::default(),
        Some(&mut sink),
    );

    assert_eq!(outcome.exit_code(), EXIT_NOT_FOUND);
    assert_eq!(out, "no record found\n");
    assert!(sink.copies.is_empty());
}

#[test]
fn test_strict_ambiguity_leaves_clipboard_untouched() {
    let entries = load(SAFE);
    let mut sink = RecordingSink::default();
    let flags = DisclosureFlags {
        echo: false,
        strict: true,
    };
    let (outcome, out) = lookup(&entries, Some("email2"), flags, Some(&mut sink));

    assert_eq!(outcome.exit_code(), EXIT_AMBIGUOUS);
    assert_eq!(out, "multiple records found\n");
    assert!(sink.copies.is_empty());
}

#[test]
fn test_single_result_copies_exact_password() {
    let entries = load(SAFE);
    let mut sink = RecordingSink::default();
    let (outcome, out) = lookup(
        &entries,
        Some("vpn:alice smith"),
        DisclosureFlags::default(),
        Some(&mut sink),
    );

    assert_eq!(outcome, Outcome::Disclosed);
    assert_eq!(sink.copies, vec!["vpn-secret"]);
    assert!(!out.contains("vpn-secret"));
    assert_eq!(
        out,
        "work_stuff.vpn: Alice Smith\n   *** PASSWORD COPIED TO CLIPBOARD ***\n   https://vpn.example.com\n   rotate every 90 days\n"
    );
}

#[test]
fn test_multiple_results_keep_sequence_order() {
    let entries = load(SAFE);
    let mut sink = RecordingSink::default();
    let (outcome, out) = lookup(
        &entries,
        Some("EMAIL2"),
        DisclosureFlags::default(),
        Some(&mut sink),
    );

    assert_eq!(outcome, Outcome::Disclosed);
    assert_eq!(sink.copies, vec!["y"]);
    assert_eq!(
        out,
        "email2 *** PASSWORD COPIED TO CLIPBOARD ***\nemail2: carol | ***\n"
    );
}

#[test]
fn test_echo_mode_prints_all_passwords() {
    let entries = load(SAFE);
    let mut sink = RecordingSink::default();
    let flags = DisclosureFlags {
        echo: true,
        strict: true,
    };
    let (outcome, out) = lookup(&entries, Some("work"), flags, Some(&mut sink));

    assert_eq!(outcome, Outcome::Disclosed);
    assert!(sink.copies.is_empty());
    assert_eq!(
        out,
        "work_stuff.vpn: Alice Smith | vpn-secret [...]\nwork_stuff.wiki | wiki-pass\n"
    );
}

#[test]
fn test_user_query_without_path() {
    let entries = load(SAFE);
    let results = Query::parse(Some(":carol")).filter(&entries);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].password(), "z");
}
