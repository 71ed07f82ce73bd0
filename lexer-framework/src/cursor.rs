use crate::error::AdvanceError;
use crate::match_result::{MatchInfo, MatchResult, MatchToken};
use crate::tab::TabPolicy;
use crate::token::Token;
use common_framework::{Position, Source, TextSlice};
use std::sync::Arc;
use tracing::{debug, trace};

/// Tracks where the next match starts inside one input buffer.
///
/// The buffer and file name never change after construction. The only way
/// to move is [`Cursor::advance`], which reads line terminators and tabs
/// out of the consumed span according to the match's hints.
#[derive(Debug, Clone)]
pub struct Cursor {
    file: Arc<str>,
    buffer: Arc<str>,
    position: Position,
    tabs: TabPolicy,
}

impl Cursor {
    /// Creates a cursor over `input`, resolving `tab_width` to a [`TabPolicy`].
    pub fn new<F, S>(file: F, tab_width: i64, input: S) -> Self
    where
        F: Into<Arc<str>>,
        S: Into<String>,
    {
        Self::with_policy(file, TabPolicy::from_width(tab_width), input)
    }

    pub fn with_policy<F, S>(file: F, tabs: TabPolicy, input: S) -> Self
    where
        F: Into<Arc<str>>,
        S: Into<String>,
    {
        let owned = input.into();
        Self::with_arc(file.into(), tabs, Arc::<str>::from(owned))
    }

    /// Creates a cursor over an existing shared buffer.
    pub fn with_arc(file: Arc<str>, tabs: TabPolicy, buffer: Arc<str>) -> Self {
        debug!(file = %file, len = buffer.len(), policy = ?tabs, "cursor created");
        Self {
            file,
            buffer,
            position: Position::new(),
            tabs,
        }
    }

    /// Line the next match starts on (1-indexed).
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// Column the next match starts at (1-indexed).
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Bytes consumed since construction.
    pub fn position(&self) -> usize {
        self.position.offset
    }

    pub fn location(&self) -> Position {
        self.position
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn tab_policy(&self) -> TabPolicy {
        self.tabs
    }

    /// Snapshot of the current location, for the token about to be matched.
    pub fn source(&self) -> Source {
        Source::new(Arc::clone(&self.file), self.position)
    }

    /// The whole input, consumed or not.
    pub fn input(&self) -> &str {
        &self.buffer
    }

    /// Total input length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The unconsumed input. This is what a matcher is given.
    pub fn tail(&self) -> &str {
        &self.buffer[self.position.offset..]
    }

    /// The unconsumed input as a shared slice.
    pub fn tail_slice(&self) -> TextSlice {
        TextSlice::new(
            Arc::clone(&self.buffer),
            self.position.offset,
            self.buffer.len(),
        )
    }

    /// Returns true once every byte has been consumed.
    pub fn eoi(&self) -> bool {
        self.position.offset == self.buffer.len()
    }

    /// The `length` bytes an advance by `length` would consume.
    pub fn peek(&self, length: usize) -> Result<TextSlice, AdvanceError> {
        let start = self.position.offset;
        head(&self.buffer, start, length)?;
        Ok(TextSlice::new(
            Arc::clone(&self.buffer),
            start,
            start + length,
        ))
    }

    /// Moves past the span described by `info`.
    ///
    /// With `multiline` set the span is split on `\n\r`, `\r\n`, `\n` and
    /// `\r` (two-byte forms win), the line count grows by the number of
    /// terminators and the column restarts at `1 +` the width of the segment
    /// after the last one, or of the whole span when it has none. Otherwise
    /// the column grows by the span's width. Tabs are only expanded when
    /// `tabs` is set. A zero-length advance changes nothing.
    pub fn advance(&mut self, info: &MatchInfo) -> Result<(), AdvanceError> {
        let span = head(&self.buffer, self.position.offset, info.length)?;
        if span.is_empty() {
            return Ok(());
        }

        if info.multiline {
            let (breaks, trailing_start) = line_breaks(span);
            let trailing = &span[trailing_start..];
            let width = if info.tabs {
                self.tabs.width(trailing)
            } else {
                trailing.len()
            };
            self.position.line += breaks;
            self.position.column = width.saturating_add(1);
        } else if info.tabs {
            self.position.column = self.position.column.saturating_add(self.tabs.width(span));
        } else {
            self.position.column = self.position.column.saturating_add(info.length);
        }
        self.position.offset += info.length;

        trace!(
            length = info.length,
            multiline = info.multiline,
            tabs = info.tabs,
            line = self.position.line,
            column = self.position.column,
            offset = self.position.offset,
            "advanced"
        );
        Ok(())
    }

    /// Advances by the header of `result`, whether it succeeded or not.
    pub fn advance_result(&mut self, result: &MatchResult) -> Result<(), AdvanceError> {
        self.advance(&result.info())
    }

    /// Consumes a successful match and builds its token, if it asked for one.
    ///
    /// The token's source is the location before the advance.
    pub fn accept(&mut self, matched: &MatchToken) -> Result<Option<Token>, AdvanceError> {
        let source = self.source();
        let content = self.peek(matched.length())?;
        self.advance(&matched.info)?;
        Ok(Token::from_match(source, content, matched))
    }
}

/// The `length` bytes of `buffer` starting at `start`.
fn head(buffer: &str, start: usize, length: usize) -> Result<&str, AdvanceError> {
    let remaining = buffer.len() - start;
    if length > remaining {
        return Err(AdvanceError::LengthOutOfBounds { length, remaining });
    }
    let end = start + length;
    buffer
        .get(start..end)
        .ok_or(AdvanceError::NotCharBoundary { offset: end })
}

/// Returns true if `text` contains a `\n` or `\r`.
///
/// Matchers use this to decide whether a span needs the `multiline` flag:
/// a flagged span restarts the column even when it holds no terminator.
pub fn contains_line_break(text: &str) -> bool {
    memchr::memchr2(b'\n', b'\r', text.as_bytes()).is_some()
}

/// Counts line terminators in `span` and returns where the text after the
/// last one starts.
fn line_breaks(span: &str) -> (usize, usize) {
    let bytes = span.as_bytes();
    let mut breaks = 0;
    let mut next = 0;
    while let Some(found) = memchr::memchr2(b'\n', b'\r', &bytes[next..]) {
        let at = next + found;
        let partner = if bytes[at] == b'\n' { b'\r' } else { b'\n' };
        next = if bytes.get(at + 1) == Some(&partner) {
            at + 2
        } else {
            at + 1
        };
        breaks += 1;
    }
    (breaks, next)
}
