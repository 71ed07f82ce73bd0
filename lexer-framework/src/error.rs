use thiserror::Error;

/// Reasons a cursor refuses to move.
///
/// These are caller bugs (a matcher claimed more than it was given), not
/// lexical errors; lexical errors travel as [`MatchFailure`](crate::MatchFailure)
/// values. The cursor is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvanceError {
    #[error("match length {length} exceeds the {remaining} bytes of input left")]
    LengthOutOfBounds { length: usize, remaining: usize },

    #[error("match would end inside a character at offset {offset}")]
    NotCharBoundary { offset: usize },
}
