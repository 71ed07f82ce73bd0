//! Positional bookkeeping and the match-result protocol for tokenizers.
//!
//! A driver loop hands [`Cursor::tail`] to a [`Matcher`], gets back a
//! [`MatchResult`], and on success moves the cursor with
//! [`Cursor::advance`] (or [`Cursor::accept`], which also builds the
//! [`Token`]). Failures are plain data; what to do with them is up to the
//! driver.

pub mod cursor;
pub mod error;
pub mod match_result;
pub mod tab;
pub mod token;
pub mod traits;

pub use common_framework::{Position, Source, TextSlice};
pub use cursor::{contains_line_break, Cursor};
pub use error::AdvanceError;
pub use match_result::{
    match_fail, match_found, match_skip, match_tagged, no_match, MatchError, MatchFailure,
    MatchInfo, MatchResult, MatchToken, NO_MATCH,
};
pub use tab::{TabPolicy, DEFAULT_TAB_WIDTH};
pub use token::Token;
pub use traits::{FnMatcher, Matcher};
