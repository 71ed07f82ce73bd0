use std::fmt;
use std::sync::Arc;

/// A location in the source text.
///
/// Lines and columns are 1-indexed, the offset is a 0-indexed byte count
/// from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A position snapshot tied to the file it was taken from.
///
/// The file name is shared, so snapshots stay cheap to take once per token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    position: Position,
    file: Arc<str>,
}

impl Source {
    pub fn new(file: Arc<str>, position: Position) -> Self {
        Self { position, file }
    }

    /// The snapshot for the very start of `file`.
    pub fn start_of(file: Arc<str>) -> Self {
        Self::new(file, Position::new())
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Absolute byte offset into the input.
    pub fn position(&self) -> usize {
        self.position.offset
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the shared file name.
    pub fn file_arc(&self) -> Arc<str> {
        Arc::clone(&self.file)
    }

    /// Returns the line/column/offset triple without the file.
    pub fn location(&self) -> Position {
        self.position
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.position)
    }
}
