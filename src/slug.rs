//! # Slug normalizer.
//!
//! ```rust
//! use ph_toolbox::slugify;
//!
//! assert_eq!(slugify("Test Title"), "test-title");
//! assert_eq!(slugify("1 Test 2TiTlE?"), "1-test-2title");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").expect("static regex"));

/// Turns arbitrary text into a URL-friendly slug.
///
/// Lowercases, drops everything but word characters, whitespace and hyphens,
/// collapses whitespace/hyphen runs into one hyphen, then strips leading and
/// trailing hyphens and underscores.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let cleaned = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = SEPARATORS.replace_all(cleaned.trim(), "-");
    hyphenated.trim_matches(|c| c == '-' || c == '_').to_string()
}
