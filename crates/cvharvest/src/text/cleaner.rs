//! Canonical whitespace/character form for extracted text.
//!
//! Cleaning keeps word characters, whitespace and a small punctuation set
//! (`- . , ; : ( ) [ ]`), collapses whitespace runs to single spaces and trims
//! the ends. Disallowed characters are removed before whitespace is collapsed,
//! so a removed character can never leave a double space behind and
//! `clean_text(clean_text(x)) == clean_text(x)` holds for every input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static DISALLOWED_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\w\s\-.,;:()\[\]]+").expect("Disallowed chars regex pattern is valid and should compile")
});
static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Whitespace regex pattern is valid and should compile"));

/// Normalize raw extracted text.
///
/// # Example
///
/// ```rust
/// use cvharvest::text::clean_text;
///
/// assert_eq!(clean_text("  Jane\tDoe \u{2022} C++ \n\n Rust  "), "Jane Doe C Rust");
/// ```
pub fn clean_text(text: &str) -> String {
    let filtered: Cow<'_, str> = DISALLOWED_CHARS.replace_all(text, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&filtered, " ");
    collapsed.trim().to_string()
}

/// Length of cleaned text as reported to the callback (Unicode scalar values).
pub fn cleaned_length(text: &str) -> usize {
    text.chars().count()
}
