//! Result values produced by a [`Matcher`](crate::Matcher).
//!
//! A match attempt either succeeds with a [`MatchToken`] or fails with a
//! [`MatchFailure`]. Both carry a [`MatchInfo`] header telling the cursor how
//! much input the attempt claims and whether that span may contain line
//! terminators or tabs.

use std::fmt;

/// How much input a match claims, plus fast-path hints for the cursor.
///
/// `multiline` and `tabs` are hints, not promises the cursor checks: a span
/// flagged `tabs = false` is counted at one column per byte even if it
/// contains a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchInfo {
    /// Bytes claimed, measured from the start of the matched text.
    pub length: usize,
    /// The span may contain line terminators.
    pub multiline: bool,
    /// The span may contain tab characters.
    pub tabs: bool,
}

impl MatchInfo {
    /// A single-line, tab-free span of `length` bytes.
    pub const fn new(length: usize) -> Self {
        Self {
            length,
            multiline: false,
            tabs: false,
        }
    }

    pub const fn multiline(self, multiline: bool) -> Self {
        Self { multiline, ..self }
    }

    pub const fn tabs(self, tabs: bool) -> Self {
        Self { tabs, ..self }
    }
}

/// A successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchToken {
    pub info: MatchInfo,
    /// Tags for the emitted token.
    ///
    /// `None` means the input is consumed without emitting a token (skipped
    /// whitespace, comments). `Some(vec![])` emits a token with no tags.
    pub tags: Option<Vec<String>>,
}

impl MatchToken {
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.info.multiline = multiline;
        self
    }

    pub fn tabs(mut self, tabs: bool) -> Self {
        self.info.tabs = tabs;
        self
    }

    /// Returns true if the driver should emit a token for this match.
    pub fn emits_token(&self) -> bool {
        self.tags.is_some()
    }

    pub fn length(&self) -> usize {
        self.info.length
    }
}

/// A localized problem inside a failed match attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchError {
    /// Offset from the start of the attempt to the problem. May be negative
    /// or point past the claimed length.
    pub offset: isize,
    /// Number of characters to highlight, `0` for none.
    pub highlight: usize,
    pub message: String,
}

impl MatchError {
    pub fn new(offset: isize, highlight: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            highlight,
            message: message.into(),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

/// A failed match attempt.
///
/// A nonzero length reports how far the matcher got before giving up. It
/// exists for diagnostics and resynchronization; nothing has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
    pub info: MatchInfo,
    pub errors: Vec<MatchError>,
}

impl MatchFailure {
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.info.multiline = multiline;
        self
    }

    pub fn tabs(mut self, tabs: bool) -> Self {
        self.info.tabs = tabs;
        self
    }

    /// Sets the highlight width of every error. Defaults to `0`.
    pub fn highlight(mut self, highlight: usize) -> Self {
        for error in &mut self.errors {
            error.highlight = highlight;
        }
        self
    }

    /// Appends another error, for matchers that aggregate diagnostics.
    pub fn with_error(mut self, error: MatchError) -> Self {
        self.errors.push(error);
        self
    }

    /// Returns true if this is the "did not even attempt" result.
    pub fn is_no_match(&self) -> bool {
        *self == NO_MATCH
    }

    pub fn length(&self) -> usize {
        self.info.length
    }
}

/// The outcome of a single match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Token(MatchToken),
    Failure(MatchFailure),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Token(_))
    }

    /// The header shared by both outcomes.
    pub fn info(&self) -> MatchInfo {
        match self {
            MatchResult::Token(token) => token.info,
            MatchResult::Failure(failure) => failure.info,
        }
    }

    pub fn length(&self) -> usize {
        self.info().length
    }

    pub fn as_token(&self) -> Option<&MatchToken> {
        match self {
            MatchResult::Token(token) => Some(token),
            MatchResult::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&MatchFailure> {
        match self {
            MatchResult::Token(_) => None,
            MatchResult::Failure(failure) => Some(failure),
        }
    }
}

impl From<MatchToken> for MatchResult {
    fn from(token: MatchToken) -> Self {
        MatchResult::Token(token)
    }
}

impl From<MatchFailure> for MatchResult {
    fn from(failure: MatchFailure) -> Self {
        MatchResult::Failure(failure)
    }
}

/// The neutral failure: nothing claimed, no diagnostics.
pub const NO_MATCH: MatchFailure = MatchFailure {
    info: MatchInfo::new(0),
    errors: Vec::new(),
};

/// [`NO_MATCH`] wrapped as a [`MatchResult`].
pub fn no_match() -> MatchResult {
    MatchResult::Failure(NO_MATCH)
}

/// Builds a successful match. Flags default to `false`; chain
/// [`MatchToken::multiline`] or [`MatchToken::tabs`] to set them.
///
/// `tags` is stored as given, so `None` and `Some(vec![])` stay distinct.
pub fn match_found(length: usize, tags: Option<Vec<String>>) -> MatchToken {
    MatchToken {
        info: MatchInfo::new(length),
        tags,
    }
}

/// Builds a successful match that emits a token with `tags`.
pub fn match_tagged<I, S>(length: usize, tags: I) -> MatchToken
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match_found(length, Some(tags.into_iter().map(Into::into).collect()))
}

/// Builds a successful match that consumes input without emitting a token.
pub fn match_skip(length: usize) -> MatchToken {
    match_found(length, None)
}

/// Builds a failure carrying exactly one [`MatchError`] with no highlight.
pub fn match_fail(length: usize, offset: isize, message: impl Into<String>) -> MatchFailure {
    MatchFailure {
        info: MatchInfo::new(length),
        errors: vec![MatchError::new(offset, 0, message)],
    }
}
