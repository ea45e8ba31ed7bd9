/// Position tracking for error reporting
///
/// Converts byte offsets reported by the lexers into line/column pairs
/// so parse errors can point at the offending spot in the input text.
use text_size::TextSize;

/// A position in source text (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate a byte offset in `text`.
    ///
    /// Offsets past the end clamp to the end of the text; columns count
    /// characters, not bytes.
    pub fn of_offset(text: &str, offset: TextSize) -> Self {
        let offset = usize::from(offset).min(text.len());
        let mut line = 0;
        let mut line_start = 0;
        for (index, ch) in text.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                line_start = index + 1;
            }
        }
        let column = text
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}
