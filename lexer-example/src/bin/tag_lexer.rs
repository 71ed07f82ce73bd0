//! 标签词法分析器示例
//! 展示如何在 lexer-framework 之上实现 Matcher，并用 Cursor 驱动整个分词循环
//!
//! Usage: `tag-lexer [TAB_WIDTH] [PATH]`. Reads stdin when no path is given.
//! Set `RUST_LOG=lexer_framework=trace` to watch every cursor advance.

use lexer_framework::{
    contains_line_break, match_fail, match_skip, match_tagged, no_match, AdvanceError, Cursor,
    MatchError, MatchFailure, MatchInfo, MatchResult, Matcher, Position, Token, DEFAULT_TAB_WIDTH,
};
use std::io::Read;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const KEYWORDS: &[&str] = &["fn", "let", "if", "else", "while", "return"];

#[derive(Debug, Error)]
enum LexError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tab width `{0}`")]
    TabWidth(String),

    #[error(transparent)]
    Advance(#[from] AdvanceError),
}

fn run_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

/// 空白：消费但不产出 Token
struct Whitespace;

impl Matcher for Whitespace {
    fn id(&self) -> &str {
        "whitespace"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        match run_len(text, char::is_whitespace) {
            0 => no_match(),
            len => match_skip(len)
                .multiline(contains_line_break(&text[..len]))
                .tabs(true)
                .into(),
        }
    }
}

/// 行注释 `// ...`
struct LineComment;

impl Matcher for LineComment {
    fn id(&self) -> &str {
        "line-comment"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        if !text.starts_with("//") {
            return no_match();
        }
        match_skip(run_len(text, |c| c != '\n' && c != '\r'))
            .tabs(true)
            .into()
    }
}

/// 字符串字面量，支持 `\"` `\\` `\n` `\t` 转义
struct StringLiteral;

impl Matcher for StringLiteral {
    fn id(&self) -> &str {
        "string"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        if !text.starts_with('"') {
            return no_match();
        }
        let mut errors = Vec::new();
        let mut chars = text.char_indices().skip(1);
        while let Some((at, ch)) = chars.next() {
            match ch {
                '"' => {
                    let length = at + 1;
                    if errors.is_empty() {
                        return match_tagged(length, ["string"]).tabs(true).into();
                    }
                    return MatchFailure {
                        info: MatchInfo::new(length).tabs(true),
                        errors,
                    }
                    .into();
                }
                '\\' => match chars.next() {
                    Some((_, '"' | '\\' | 'n' | 't')) => {}
                    Some((_, other)) => errors.push(MatchError::new(
                        at as isize,
                        1 + other.len_utf8(),
                        format!("unknown escape `\\{other}`"),
                    )),
                    None => break,
                },
                '\n' | '\r' => return unterminated(at, errors),
                _ => {}
            }
        }
        unterminated(text.len(), errors)
    }
}

/// The string ran out after `length` bytes. Escape errors found on the way
/// are reported along with it.
fn unterminated(length: usize, mut errors: Vec<MatchError>) -> MatchResult {
    errors.push(MatchError::new(0, 1, "unterminated string"));
    MatchFailure {
        info: MatchInfo::new(length).tabs(true),
        errors,
    }
    .into()
}

struct Number;

impl Matcher for Number {
    fn id(&self) -> &str {
        "number"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        let len = run_len(text, |c| c.is_ascii_digit());
        if len == 0 {
            return no_match();
        }
        let rest = &text[len..];
        if rest.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            let bad = run_len(rest, |c| c.is_alphanumeric() || c == '_');
            return match_fail(len + bad, len as isize, "invalid digit in number")
                .highlight(bad)
                .into();
        }
        match_tagged(len, ["number"]).into()
    }
}

struct Identifier;

impl Matcher for Identifier {
    fn id(&self) -> &str {
        "identifier"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        if !text.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            return no_match();
        }
        let len = run_len(text, |c| c.is_alphanumeric() || c == '_');
        match_tagged(len, ["identifier"]).into()
    }
}

/// 标点与操作符，按最长匹配优先排列
struct Punctuation {
    symbols: Vec<(&'static str, &'static str)>,
}

impl Punctuation {
    fn new() -> Self {
        let mut symbols = vec![
            ("==", "operator"),
            ("!=", "operator"),
            ("<=", "operator"),
            (">=", "operator"),
            ("->", "arrow"),
            ("=", "operator"),
            ("<", "operator"),
            (">", "operator"),
            ("+", "operator"),
            ("-", "operator"),
            ("*", "operator"),
            ("/", "operator"),
            ("(", "open"),
            (")", "close"),
            ("{", "open"),
            ("}", "close"),
            (",", "separator"),
            (";", "separator"),
        ];
        symbols.sort_by_key(|(s, _)| std::cmp::Reverse(s.len()));
        Self { symbols }
    }
}

impl Matcher for Punctuation {
    fn id(&self) -> &str {
        "punctuation"
    }

    fn try_match(&self, text: &str) -> MatchResult {
        self.symbols
            .iter()
            .find(|(symbol, _)| text.starts_with(symbol))
            .map_or_else(no_match, |(symbol, tag)| {
                match_tagged(symbol.len(), ["punctuation", *tag]).into()
            })
    }
}

fn default_matchers() -> Vec<Box<dyn Matcher>> {
    vec![
        Box::new(Whitespace),
        Box::new(LineComment),
        Box::new(StringLiteral),
        Box::new(Number),
        Box::new(Identifier),
        Box::new(Punctuation::new()),
    ]
}

struct Diagnostic {
    at: Position,
    highlight: usize,
    message: String,
}

/// Maps an error offset onto a line and column, starting from the cursor
/// the failed attempt began at.
fn locate(start: &Cursor, error: &MatchError) -> Position {
    if error.offset < 0 {
        let mut at = start.location();
        at.column = at.column.saturating_sub(error.offset.unsigned_abs()).max(1);
        at.offset = at.offset.saturating_sub(error.offset.unsigned_abs());
        return at;
    }
    let mut probe = start.clone();
    let mut offset = usize::try_from(error.offset)
        .unwrap_or(0)
        .min(probe.tail().len());
    while !probe.tail().is_char_boundary(offset) {
        offset -= 1;
    }
    let multiline = contains_line_break(&probe.tail()[..offset]);
    match probe.advance(&MatchInfo::new(offset).multiline(multiline).tabs(true)) {
        Ok(()) => probe.location(),
        Err(_) => start.location(),
    }
}

/// Runs `matchers` in order over the whole input.
///
/// The first success wins. When every matcher fails, the failure that got
/// furthest is reported and skipped; if none got anywhere one character is
/// skipped.
fn lex(
    cursor: &mut Cursor,
    matchers: &[Box<dyn Matcher>],
) -> Result<(Vec<Token>, Vec<Diagnostic>), LexError> {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    'input: while !cursor.eoi() {
        let mut deepest: Option<MatchFailure> = None;
        for matcher in matchers {
            match matcher.try_match(cursor.tail()) {
                MatchResult::Token(found) => {
                    tokens.extend(cursor.accept(&found)?);
                    continue 'input;
                }
                MatchResult::Failure(failure) if failure.is_no_match() => {}
                MatchResult::Failure(failure) => {
                    debug!(
                        matcher = matcher.id(),
                        length = failure.length(),
                        errors = failure.errors.len(),
                        "match failed"
                    );
                    if deepest
                        .as_ref()
                        .map_or(true, |d| failure.length() > d.length())
                    {
                        deepest = Some(failure);
                    }
                }
            }
        }

        let next_char = cursor.tail().chars().next().map_or(0, char::len_utf8);
        let skip = match deepest {
            Some(failure) => {
                let start = &*cursor;
                diagnostics.extend(failure.errors.iter().map(|error| Diagnostic {
                    at: locate(start, error),
                    highlight: error.highlight,
                    message: error.message.clone(),
                }));
                if failure.length() == 0 {
                    MatchInfo::new(next_char)
                } else {
                    failure.info
                }
            }
            None => {
                warn!(
                    line = cursor.line(),
                    column = cursor.column(),
                    "no matcher made progress"
                );
                diagnostics.push(Diagnostic {
                    at: cursor.location(),
                    highlight: 1,
                    message: "unexpected character".to_string(),
                });
                MatchInfo::new(next_char)
            }
        };
        cursor.advance(&skip)?;
    }

    Ok((tokens, diagnostics))
}

/// Second pass: identifiers that spell a keyword become keywords.
fn promote_keywords(tokens: &mut [Token]) {
    for token in tokens.iter_mut().filter(|t| t.has("identifier")) {
        if KEYWORDS.contains(&&**token.content()) {
            token.delete("identifier").add("keyword");
        }
    }
}

fn run() -> Result<bool, LexError> {
    let mut args = std::env::args().skip(1);
    let tab_width = match args.next() {
        Some(raw) => raw.parse::<i64>().map_err(|_| LexError::TabWidth(raw))?,
        None => DEFAULT_TAB_WIDTH as i64,
    };
    let (file, input) = match args.next() {
        Some(path) => {
            let input = std::fs::read_to_string(&path)?;
            (path, input)
        }
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            ("<stdin>".to_string(), input)
        }
    };

    let mut cursor = Cursor::new(file.as_str(), tab_width, input);
    let (mut tokens, diagnostics) = lex(&mut cursor, &default_matchers())?;
    promote_keywords(&mut tokens);
    info!(tokens = tokens.len(), errors = diagnostics.len(), "lexed {file}");

    for token in &tokens {
        println!("{token}");
    }
    for diagnostic in &diagnostics {
        eprintln!(
            "{}:{}: error: {} (highlight {})",
            file, diagnostic.at, diagnostic.message, diagnostic.highlight
        );
    }
    Ok(diagnostics.is_empty())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_str(text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut cursor = Cursor::new("test", 4, text);
        let (mut tokens, diagnostics) = lex(&mut cursor, &default_matchers()).unwrap();
        promote_keywords(&mut tokens);
        (tokens, diagnostics)
    }

    #[test]
    fn test_keywords_promoted() {
        let (tokens, diagnostics) = lex_str("let answer = 42;");
        assert!(diagnostics.is_empty());
        assert!(tokens[0].has("keyword"));
        assert!(!tokens[0].has("identifier"));
        assert!(tokens[1].has("identifier"));
        assert!(tokens[2].has("operator"));
        assert!(tokens[3].has("number"));
        assert!(tokens[4].has("separator"));
    }

    #[test]
    fn test_longest_punctuation_wins() {
        let (tokens, _) = lex_str("a->b==c");
        let texts: Vec<String> = tokens.iter().map(|t| t.content().to_string()).collect();
        assert_eq!(texts, vec!["a", "->", "b", "==", "c"]);
    }

    #[test]
    fn test_comment_is_skipped() {
        let (tokens, _) = lex_str("x // trailing\ny");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].location(), Position::at(2, 1, 14));
    }

    #[test]
    fn test_bad_escape_reported_inside_string() {
        let (tokens, diagnostics) = lex_str("\tx = \"a\\qb\";");
        assert_eq!(diagnostics.len(), 1);
        // string starts at column 9, the escape two bytes later
        assert_eq!(diagnostics[0].at, Position::at(1, 11, 7));
        assert_eq!(diagnostics[0].highlight, 2);
        // the failed string is skipped as a whole
        let texts: Vec<String> = tokens.iter().map(|t| t.content().to_string()).collect();
        assert_eq!(texts, vec!["x", "=", ";"]);
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let (tokens, diagnostics) = lex_str("\"open\nnext");
        assert_eq!(diagnostics[0].message, "unterminated string");
        assert_eq!(diagnostics[0].at, Position::at(1, 1, 0));
        assert_eq!(tokens.last().map(|t| t.line()), Some(2));
    }

    #[test]
    fn test_unterminated_string_keeps_escape_errors() {
        let (_, diagnostics) = lex_str("x = \"a\\qb\nnext");
        let found: Vec<(Position, &str)> = diagnostics
            .iter()
            .map(|d| (d.at, d.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                (Position::at(1, 7, 6), "unknown escape `\\q`"),
                (Position::at(1, 5, 4), "unterminated string"),
            ]
        );
    }

    #[test]
    fn test_error_after_indentation_keeps_column() {
        let (_, diagnostics) = lex_str("a\n    9z");
        assert_eq!(diagnostics[0].at, Position::at(2, 6, 7));
    }

    #[test]
    fn test_invalid_digit_offset() {
        let (_, diagnostics) = lex_str("12ab");
        assert_eq!(diagnostics[0].at, Position::at(1, 3, 2));
        assert_eq!(diagnostics[0].highlight, 2);
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, diagnostics) = lex_str("a @ b");
        assert_eq!(diagnostics[0].message, "unexpected character");
        assert_eq!(diagnostics[0].at, Position::at(1, 3, 2));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_negative_offset_clamps_to_line_start() {
        let cursor = Cursor::new("test", 4, "abc");
        let at = locate(&cursor, &MatchError::new(-5, 0, "before start"));
        assert_eq!(at, Position::at(1, 1, 0));
    }
}
