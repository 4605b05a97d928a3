pub mod codeblock;

use regex::Regex;

/// Derive an anchor ID from heading text.
///
/// Lowercases the text, collapses every run of whitespace into a single `-`
/// and drops any character that is neither a word character (alphanumeric or
/// `_`) nor `-`. No trimming or deduplication happens here, so two headings
/// with the same text share an ID.
///
/// The heading scanner and the HTML renderer both call this; keep it the only
/// place the rule lives.
#[must_use]
pub fn slugify(text: &str) -> String {
  let mut slug = String::with_capacity(text.len());
  let mut in_whitespace = false;

  for c in text.chars().flat_map(char::to_lowercase) {
    if c.is_whitespace() {
      if !in_whitespace {
        slug.push('-');
        in_whitespace = true;
      }
      continue;
    }

    in_whitespace = false;
    if c.is_alphanumeric() || c == '_' || c == '-' {
      slug.push(c);
    }
  }

  slug
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
