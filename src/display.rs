//! Terminal styling for lookup results.

use crate::models::Entry;
use crate::query::Query;
use crate::utils::{normalize, normalize_char};
use colored::*;

/// Message shown instead of a password that went to the clipboard.
pub const COPIED_MESSAGE: &str = "*** PASSWORD COPIED TO CLIPBOARD ***";

/// Highlight every occurrence of `fragment` in `text`.
///
/// Matching runs on the normalized form of `text`, so a normalized fragment
/// also finds `Bob Smith` for `bob_smith`. The highlighted spans are taken
/// from the original text.
pub fn highlight(text: &str, fragment: &str) -> String {
    highlight_with(text, fragment, match_style)
}

fn highlight_with(text: &str, fragment: &str, style: impl Fn(&str) -> String) -> String {
    if fragment.is_empty() {
        return text.to_string();
    }

    // Normalized text plus, for each of its bytes, the span of the source char.
    let mut normalized = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        let lowered = normalize_char(ch);
        origin.extend(std::iter::repeat((start, end)).take(lowered.len()));
        normalized.push_str(&lowered);
    }

    // Context-sensitive lowercasing (final sigma) keeps byte lengths, so the
    // whole-string form can reuse the per-char span table.
    let whole = normalize(text);
    if whole.len() == normalized.len() {
        normalized = whole;
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (idx, matched) in normalized.match_indices(fragment) {
        let start = origin[idx].0;
        let end = origin[idx + matched.len() - 1].1;
        if start < cursor {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str(&style(&text[start..end]));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Result header: `path` or `path: user`, with query matches highlighted.
pub fn header(entry: &Entry, query: &Query) -> String {
    let path = highlight(entry.normalized_path(), query.path_fragment());
    match entry.user() {
        Some(user) if !user.is_empty() => {
            format!("{}: {}", path, highlight(user, query.user_fragment()))
        }
        _ => path,
    }
}

pub fn match_style(text: &str) -> String {
    text.yellow().bold().to_string()
}

pub fn password_style(password: &str) -> String {
    password.red().bold().to_string()
}

pub fn copied_style() -> String {
    COPIED_MESSAGE.green().bold().reversed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_highlight_without_fragment() {
        plain();
        assert_eq!(highlight("email.work", ""), "email.work");
    }

    #[test]
    fn test_highlight_preserves_text() {
        plain();
        assert_eq!(highlight("mail.gmail", "mail"), "mail.gmail");
        assert_eq!(highlight("Bob Smith", "bob_s"), "Bob Smith");
        assert_eq!(highlight("Straße", "ß"), "Straße");
    }

    fn bracket(text: &str, fragment: &str) -> String {
        highlight_with(text, fragment, |s| format!("[{s}]"))
    }

    #[test]
    fn test_highlight_marks_all_occurrences() {
        assert_eq!(bracket("mail.gmail", "mail"), "[mail].g[mail]");
        assert_eq!(bracket("aaaa", "aa"), "[aa][aa]");
        assert_eq!(bracket("github", "x"), "github");
    }

    #[test]
    fn test_highlight_maps_back_to_original_text() {
        assert_eq!(bracket("Bob Smith", "b_s"), "Bo[b S]mith");
        assert_eq!(bracket("Carol", "carol"), "[Carol]");
        assert_eq!(bracket("ÄRGER", "ä"), "[Ä]RGER");
    }

    #[test]
    fn test_highlight_final_sigma() {
        let fragment = normalize("ΟΔΟΣ");
        assert_eq!(fragment, "οδος");
        assert_eq!(bracket("ΟΔΟΣ", &fragment), "[ΟΔΟΣ]");
        assert_eq!(bracket("ΟΔΟΣ Α", "ς_α"), "ΟΔΟ[Σ Α]");
    }

    #[test]
    fn test_matched_user_is_highlighted() {
        let query = Query::parse(Some(":ΟΔΟΣ"));
        let entry = Entry::new("site", "x").with_user(Some("ΟΔΟΣ".to_string()));
        assert!(query.matches(&entry));
        assert_eq!(bracket("ΟΔΟΣ", query.user_fragment()), "[ΟΔΟΣ]");
    }

    #[test]
    fn test_header() {
        plain();
        let query = Query::parse(Some("mail:bob"));
        let entry = Entry::new("email", "x").with_user(Some("Bob".to_string()));
        assert_eq!(header(&entry, &query), "email: Bob");

        let entry = Entry::new("email", "x");
        assert_eq!(header(&entry, &query), "email");

        let entry = Entry::new("email", "x").with_user(Some(String::new()));
        assert_eq!(header(&entry, &query), "email");
    }
}
