/// Tab width used by drivers that were not given one.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// How tab characters widen the column count.
///
/// Resolved once from the configured width when a cursor is built. The
/// policy is only consulted for spans flagged as containing tabs; every
/// other span counts one column per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabPolicy {
    /// Width `<= 1`: a tab is one column, like any other byte.
    NoExpand,
    /// Width `2`: each tab adds one column on top of its own byte.
    PlusOne,
    /// Width `> 2`: each tab adds the stored number of extra columns
    /// (`width - 1`).
    PlusWidthMinusOne(usize),
}

impl TabPolicy {
    pub fn from_width(width: i64) -> Self {
        match width {
            i64::MIN..=1 => TabPolicy::NoExpand,
            2 => TabPolicy::PlusOne,
            // `width > 2` here, so the conversion only fails past usize::MAX
            w => TabPolicy::PlusWidthMinusOne(usize::try_from(w - 1).unwrap_or(usize::MAX)),
        }
    }

    /// Columns each tab adds beyond the one its byte already counts for.
    pub fn extra_per_tab(self) -> usize {
        match self {
            TabPolicy::NoExpand => 0,
            TabPolicy::PlusOne => 1,
            TabPolicy::PlusWidthMinusOne(extra) => extra,
        }
    }

    /// The configured width this policy was built from.
    pub fn tab_width(self) -> usize {
        self.extra_per_tab() + 1
    }

    /// Column width of `span`, expanding tabs.
    pub fn width(self, span: &str) -> usize {
        match self {
            TabPolicy::NoExpand => span.len(),
            TabPolicy::PlusOne => span.len() + count_tabs(span),
            TabPolicy::PlusWidthMinusOne(extra) => {
                span.len().saturating_add(count_tabs(span).saturating_mul(extra))
            }
        }
    }
}

impl Default for TabPolicy {
    fn default() -> Self {
        TabPolicy::from_width(DEFAULT_TAB_WIDTH as i64)
    }
}

fn count_tabs(span: &str) -> usize {
    memchr::memchr_iter(b'\t', span.as_bytes()).count()
}
