//! Multi-line text normalisation for ingredient and step lists.

use std::fmt;

/// Drop blank and line-ending-only lines from `text`.
///
/// Splits on `\n`, strips every trailing `\r` from each entry, discards the
/// entries that are then empty, and rejoins with `\n`. Lines made of other
/// whitespace are kept. The function is idempotent.
///
/// # Examples
/// ```
/// use galleta::domain::normalize_lines;
///
/// assert_eq!(normalize_lines("a\n\nb\r\nc"), "a\nb\nc");
/// assert_eq!(normalize_lines(&normalize_lines("a\r\n\r\nb")), "a\nb");
/// ```
pub fn normalize_lines(text: &str) -> String {
    non_empty_lines(text).collect::<Vec<_>>().join("\n")
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
}

/// Ordered list of non-empty lines (ingredients or steps).
///
/// ## Invariants
/// - No entry is empty and no entry ends with `\r`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeLines(Vec<String>);

impl RecipeLines {
    /// Normalise free text into lines.
    pub fn parse(text: &str) -> Self {
        Self(non_empty_lines(text).map(str::to_owned).collect())
    }

    /// The lines in order.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }

    /// True when normalisation left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stored representation: lines joined with `\n`.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }
}

impl fmt::Display for RecipeLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
