//! Locale-aware ordering of display names.
//!
//! Names are compared in three passes: base letters (canonical decomposition
//! with combining marks dropped, case folded), then the accented letters,
//! then case (lowercase first). Raw code points break any remaining tie so
//! the order is total. Composed and decomposed spellings of a name sort
//! together.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two display names the way a user expects them listed.
///
/// # Examples
///
/// ```
/// use pdfbind::files::locale_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(locale_cmp("apple.pdf", "Banana.pdf"), Ordering::Less);
/// assert_eq!(locale_cmp("Łódź.pdf", "Lublin.pdf"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
    {
        match c {
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ß' => key.push_str("ss"),
            other => key.push(base_letter(other)),
        }
    }
    key
}

fn secondary_key(s: &str) -> String {
    s.nfc().flat_map(char::to_lowercase).collect()
}

// Lowercase sorts before uppercase.
fn case_key(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfc().map(char::is_uppercase)
}

// Letters whose stroke or bar has no canonical decomposition.
fn base_letter(c: char) -> char {
    match c {
        'đ' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ł' => 'l',
        'ø' => 'o',
        'ŧ' => 't',
        other => other,
    }
}
