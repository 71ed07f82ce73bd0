use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable window onto a shared input buffer.
///
/// A slice keeps its `Arc<str>` alive, so tokens can hold their text without
/// borrowing from the cursor that produced them. Derefs to `&str`.
///
/// Equality and hashing look at the text only, not at which buffer it
/// came from.
#[derive(Clone, Debug)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        debug_assert!(buffer.is_char_boundary(start) && buffer.is_char_boundary(end));
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Absolute start offset in the buffer.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Absolute end offset in the buffer.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Narrows the slice to `start..end`, relative to this slice.
    ///
    /// Returns `None` if the range is out of bounds or splits a character.
    pub fn slice(&self, start: usize, end: usize) -> Option<TextSlice> {
        let text = self.deref();
        if start > end || end > text.len() {
            return None;
        }
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        Some(TextSlice {
            buffer: Arc::clone(&self.buffer),
            start: self.start + start,
            end: self.start + end,
        })
    }

    /// The first `len` bytes of the slice, see [`TextSlice::slice`].
    pub fn prefix(&self, len: usize) -> Option<TextSlice> {
        self.slice(0, len)
    }

    /// Everything after the first `len` bytes, see [`TextSlice::slice`].
    pub fn skip(&self, len: usize) -> Option<TextSlice> {
        self.slice(len, self.len())
    }
}

impl std::fmt::Display for TextSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self)
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.buffer[self.start..self.end]
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl From<&str> for TextSlice {
    fn from(text: &str) -> Self {
        Self::from_arc(Arc::from(text))
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.deref() == *other
    }
}

impl PartialEq<str> for TextSlice {
    fn eq(&self, other: &str) -> bool {
        self.deref() == other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.deref()
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.deref() == other.deref()
    }
}

impl Eq for TextSlice {}

impl Hash for TextSlice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.deref().hash(state);
    }
}
