//! URL-safe identifiers derived from display names.

use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

/// Runs of anything outside `[a-z0-9]`, matched after lowercasing
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern is valid"));

/// Lowercase `input`, collapse every non-alphanumeric run into one hyphen and
/// trim hyphens from both ends. May return an empty string.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// [`slugify`] followed by `-<unix seconds>`.
pub fn unique_slug(input: &str) -> String {
    format!("{}-{}", slugify(input), Utc::now().timestamp())
}

pub fn create_slug(input: &str, unique: bool) -> String {
    if unique {
        unique_slug(input)
    } else {
        slugify(input)
    }
}
