//! Text normalization helpers shared by the quality gate and fingerprinting.

use unicode_normalization::UnicodeNormalization;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Canonical content form used by fingerprints and placeholder checks:
/// compatibility-normalized (NFKC), lowercased, inner whitespace collapsed.
///
/// NFKC folds the width variants common in Japanese question text, so
/// `７` and `7` (or `ｶﾞ` and `ガ`) fingerprint identically.
pub fn normalize_content<T: AsRef<str>>(text: T) -> String {
    let folded: String = text.as_ref().nfkc().collect();
    normalize_inline_whitespace(folded.to_lowercase())
}
