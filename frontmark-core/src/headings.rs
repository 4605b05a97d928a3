//! Fence-aware heading scanner.
//!
//! Finds ATX-style heading lines in raw Markdown without building an AST.
//! Lines inside fenced code blocks are skipped, see
//! [`FenceTracker`](crate::utils::codeblock::FenceTracker) for the exact
//! toggle rule.
use std::sync::LazyLock;

use log::trace;
use regex::Regex;

use crate::{
  types::Heading,
  utils::{self, codeblock::FenceTracker},
};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(#{1,6})\s*(.+)$").unwrap_or_else(|e| {
    log::error!("Failed to compile HEADING_RE regex: {e}");
    utils::never_matching_regex()
  })
});

/// Parse a single source line as an ATX heading.
///
/// The line is trimmed first. One to six `#` characters followed by at least
/// one more character make a heading; the name is the rest of the line,
/// trimmed. The renderer uses this on the source line of every heading so the
/// `id` attributes in the HTML match the scanner's IDs.
#[must_use]
pub fn parse_heading_line(line: &str) -> Option<Heading> {
  let caps = HEADING_RE.captures(line.trim())?;
  #[allow(
    clippy::cast_possible_truncation,
    reason = "The pattern matches at most six hashes"
  )]
  let level = caps[1].len() as u8;
  Some(Heading::new(level, caps[2].trim()))
}

/// Scan Markdown text for headings, ignoring anything inside code fences.
///
/// Every line is trimmed before it is checked. A line starting with three
/// backticks flips the fence state and is never a heading. Outside a fence,
/// lines are parsed with [`parse_heading_line`]. Seven or more hashes are not
/// rejected: the first six form the level and the rest stays in the name.
/// Likewise a line made only of hashes gives up its last hash as the name
/// (`###` is a level 2 heading named `#`).
///
/// An unterminated fence hides every heading after it.
#[must_use]
pub fn scan_headings(text: &str) -> Vec<Heading> {
  let mut fence = FenceTracker::new();
  let mut headings = Vec::new();

  for (index, line) in text.lines().enumerate() {
    let next = fence.process_line(line);
    if next != fence {
      fence = next;
      trace!(
        "Line {}: fence delimiter, inside fence = {}",
        index + 1,
        fence.in_code_block()
      );
      continue;
    }

    if fence.in_code_block() {
      continue;
    }

    headings.extend(parse_heading_line(line));
  }

  headings
}
