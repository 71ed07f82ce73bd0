use crate::match_result::MatchResult;
use std::sync::Arc;

/// A matcher recognizes one kind of lexeme at the start of a piece of text.
///
/// Matchers are shared, read-only values: `try_match` takes `&self` and must
/// give the same result for the same text, so one matcher graph can serve
/// many cursors at once, including cursors on other threads.
///
/// On success the reported length must not exceed `text.len()`. On failure
/// the length may be nonzero to show how far the attempt got; nothing is
/// consumed either way until the driver advances the cursor.
pub trait Matcher: Send + Sync {
    /// Identifies the matcher. Informational only.
    fn id(&self) -> &str;

    /// Attempts a match at the start of `text`.
    fn try_match(&self, text: &str) -> MatchResult;
}

impl<M: Matcher + ?Sized> Matcher for &M {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn try_match(&self, text: &str) -> MatchResult {
        (**self).try_match(text)
    }
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn try_match(&self, text: &str) -> MatchResult {
        (**self).try_match(text)
    }
}

impl<M: Matcher + ?Sized> Matcher for Arc<M> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn try_match(&self, text: &str) -> MatchResult {
        (**self).try_match(text)
    }
}

/// Wraps a plain function as a [`Matcher`].
///
/// ```
/// use lexer_framework::{match_tagged, no_match, FnMatcher, Matcher};
///
/// let digits = FnMatcher::new("digits", |text: &str| {
///     let len = text.bytes().take_while(u8::is_ascii_digit).count();
///     if len == 0 {
///         no_match()
///     } else {
///         match_tagged(len, ["number"]).into()
///     }
/// });
/// assert_eq!(digits.try_match("42 + 1").length(), 2);
/// ```
pub struct FnMatcher<F> {
    id: String,
    func: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str) -> MatchResult + Send + Sync,
{
    pub fn new(id: impl Into<String>, func: F) -> Self {
        Self {
            id: id.into(),
            func,
        }
    }
}

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&str) -> MatchResult + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn try_match(&self, text: &str) -> MatchResult {
        (self.func)(text)
    }
}

impl<F> std::fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMatcher").field("id", &self.id).finish()
    }
}
