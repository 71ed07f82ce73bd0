use crate::match_result::MatchToken;
use common_framework::{Position, Source, TextSlice};
use std::collections::HashSet;
use std::fmt;

/// A matched piece of input with a set of classification tags.
///
/// Location and text are fixed when the token is built. Tags stay mutable so
/// later passes can reclassify a token (say, promote an identifier to a
/// keyword) without lexing again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    source: Source,
    content: TextSlice,
    tags: HashSet<String>,
}

impl Token {
    /// Creates a token. Duplicate tags collapse into one.
    pub fn new<I, S>(source: Source, content: TextSlice, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            content,
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the token a successful match asked for.
    ///
    /// Returns `None` for matches without tags, which consume input silently.
    pub fn from_match(source: Source, content: TextSlice, matched: &MatchToken) -> Option<Self> {
        let tags = matched.tags.as_ref()?;
        Some(Self::new(source, content, tags.iter().cloned()))
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn location(&self) -> Position {
        self.source.location()
    }

    pub fn line(&self) -> usize {
        self.source.line()
    }

    pub fn column(&self) -> usize {
        self.source.column()
    }

    /// Byte offset of the token's first byte.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    pub fn file(&self) -> &str {
        self.source.file()
    }

    pub fn content(&self) -> &TextSlice {
        &self.content
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Adds `tag` if it is not already present.
    pub fn add(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    /// Removes `tag` if present.
    pub fn delete(&mut self, tag: &str) -> &mut Self {
        self.tags.remove(tag);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.tags.clear();
        self
    }

    /// Iterates the tags in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        write!(f, "{} {:?} [{}]", self.source, &*self.content, tags.join(", "))
    }
}
