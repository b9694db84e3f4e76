//! URL slug derivation for catalog entries.
//!
//! Slugs are never stored; they are recomputed from a title every time an
//! entry needs to be addressed, so this function must stay deterministic.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Anything that is not a letter, a number or a dash (any script).
fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}-]+").expect("static slug pattern"))
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace pattern"))
}

fn dash_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-{2,}").expect("static dash pattern"))
}

/// Whether `c` is in the Combining Diacritical Marks block.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Turn a title into a URL-friendly slug.
///
/// Accents are decomposed and dropped, `&` becomes `and`, whitespace runs
/// become a single dash, and everything that is not a letter, a digit or a
/// dash is removed. The result is lower-cased.
///
/// ```
/// use site_content::slug::sanitize;
///
/// assert_eq!(sanitize("Café & Co."), "cafe-and-co");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let decomposed: String = trimmed
        .nfkd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect();

    let with_and = decomposed.replace('&', "and");
    let dashed = whitespace_runs().replace_all(&with_and, "-");
    let filtered = disallowed_chars().replace_all(&dashed, "");
    let collapsed = dash_runs().replace_all(&filtered, "-");

    collapsed.to_lowercase()
}
