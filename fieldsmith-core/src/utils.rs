//! Naming rules shared by labels, names, and keys.
//!
//! Both rules are ASCII-only: non-ASCII characters pass through untouched.

/// Convert a declared name to a human label (e.g., "hero-banner_title" -> "Hero Banner Title")
///
/// Dashes and underscores become spaces, then the first letter of every
/// whitespace-separated word is upper-cased. Other letters keep their case.
pub fn sanitize_label(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if word_start {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
        word_start = matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c');
    }
    result
}

/// Convert a declared name to a machine name (e.g., "Hero Banner" -> "hero_banner")
///
/// Lower-cases, then turns spaces and dashes into underscores.
pub fn sanitize_name(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
