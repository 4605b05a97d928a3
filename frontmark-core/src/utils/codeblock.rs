/// The literal that opens and closes a fenced code block.
pub const FENCE_DELIMITER: &str = "```";

/// Return true if an already-trimmed line is a code fence delimiter.
///
/// Anything after the backticks (a language tag, extra backticks, stray text)
/// is ignored.
#[must_use]
pub fn is_fence_delimiter(trimmed: &str) -> bool {
  trimmed.starts_with(FENCE_DELIMITER)
}

/// State tracking for code fence detection in markdown.
///
/// This is a single flag that flips on every fence delimiter line. There is
/// no awareness of fence length, `~~~` fences or nesting, so an unterminated
/// fence keeps the tracker inside a code block for the rest of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FenceTracker {
  in_code_block: bool,
}

impl FenceTracker {
  /// Create a new fence tracker.
  #[must_use]
  pub const fn new() -> Self {
    Self {
      in_code_block: false,
    }
  }

  /// Check if currently inside a code block.
  #[must_use]
  pub const fn in_code_block(&self) -> bool {
    self.in_code_block
  }

  /// Flip the fence state.
  #[must_use]
  pub const fn toggled(&self) -> Self {
    Self {
      in_code_block: !self.in_code_block,
    }
  }

  /// Process a line and update fence state.
  ///
  /// Returns the updated state after processing the line. The line is
  /// trimmed before the delimiter check.
  #[must_use]
  pub fn process_line(&self, line: &str) -> Self {
    if is_fence_delimiter(line.trim()) {
      self.toggled()
    } else {
      *self
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fence_tracker_basic() {
    let tracker = FenceTracker::new();
    assert!(!tracker.in_code_block());

    // Opening fence
    let tracker = tracker.process_line("```rust");
    assert!(tracker.in_code_block());

    // Inside code block
    let tracker = tracker.process_line("fn main() {}");
    assert!(tracker.in_code_block());

    // Closing fence
    let tracker = tracker.process_line("```");
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_ignores_tildes() {
    let tracker = FenceTracker::new().process_line("~~~");
    assert!(!tracker.in_code_block());

    let tracker = tracker.process_line("```").process_line("~~~");
    assert!(tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_any_backtick_run_toggles() {
    // Four backticks open, three close: only the prefix matters
    let tracker = FenceTracker::new().process_line("````");
    assert!(tracker.in_code_block());

    let tracker = tracker.process_line("```");
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_indented() {
    let tracker = FenceTracker::new();

    let tracker = tracker.process_line("    ```");
    assert!(tracker.in_code_block());

    let tracker = tracker.process_line("\t```   ");
    assert!(!tracker.in_code_block());
  }

  #[test]
  fn test_fence_tracker_unterminated() {
    let mut tracker = FenceTracker::new().process_line("```sh");
    for line in ["echo hi", "# comment", "", "done"] {
      tracker = tracker.process_line(line);
    }
    assert!(tracker.in_code_block());
  }

  #[test]
  fn test_inline_backticks_are_not_delimiters() {
    assert!(!is_fence_delimiter("use `code` here"));
    assert!(!is_fence_delimiter("``"));
    assert!(is_fence_delimiter("```"));
    assert!(is_fence_delimiter("```{=include=}"));
  }
}
