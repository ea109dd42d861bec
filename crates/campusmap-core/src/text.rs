//! Cleanup helpers for provider-supplied display text.

use regex::Regex;

/// Strips HTML tags from provider text.
///
/// Keyword-search providers highlight the matched term with `<b>` markup
/// inside `title` and `address` fields; display fields must carry plain text.
#[must_use]
pub fn strip_html(text: &str) -> String {
    let tags = Regex::new(r"<[^>]*>").expect("valid tag regex");
    tags.replace_all(text, "").into_owned()
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
