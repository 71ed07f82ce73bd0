use lexer_framework::{
    match_fail, match_found, match_skip, match_tagged, AdvanceError, Cursor, MatchInfo, Position,
    TabPolicy,
};
use pretty_assertions::assert_eq;

#[test]
fn test_cursor_new() {
    let cursor = Cursor::new("f", 4, "hello");
    assert_eq!(cursor.location(), Position::new());
    assert_eq!(cursor.file(), "f");
    assert_eq!(cursor.len(), 5);
    assert_eq!(cursor.tail(), "hello");
    assert_eq!(cursor.tab_policy(), TabPolicy::PlusWidthMinusOne(3));
    assert!(!cursor.eoi());
}

#[test]
fn test_cursor_empty_input_is_eoi() {
    let cursor = Cursor::new("f", 4, "");
    assert!(cursor.eoi());
    assert!(cursor.is_empty());
    assert_eq!(cursor.tail(), "");
}

#[test]
fn test_advance_plain_span() {
    let mut cursor = Cursor::new("f", 4, "hello world");
    cursor.advance(&MatchInfo::new(5)).unwrap();
    assert_eq!(cursor.location(), Position::at(1, 6, 5));
    assert_eq!(cursor.tail(), " world");
}

#[test]
fn test_advance_fast_path_ignores_tabs_when_not_flagged() {
    let mut cursor = Cursor::new("f", 8, "\t\tx");
    cursor.advance(&MatchInfo::new(2)).unwrap();
    assert_eq!(cursor.column(), 3);
}

#[test]
fn test_advance_fast_path_ignores_newlines_when_not_flagged() {
    let mut cursor = Cursor::new("f", 4, "a\nb");
    cursor.advance(&MatchInfo::new(3)).unwrap();
    assert_eq!(cursor.line(), 1);
    assert_eq!(cursor.column(), 4);
}

#[test]
fn test_tabs_with_width_four() {
    let mut cursor = Cursor::new("f", 4, "ab\tc");
    cursor.advance(&MatchInfo::new(4).tabs(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(1, 8, 4));
}

#[test]
fn test_tabs_with_width_two() {
    let mut cursor = Cursor::new("f", 2, "a\tb\tc");
    cursor.advance(&MatchInfo::new(5).tabs(true)).unwrap();
    assert_eq!(cursor.column(), 8);
}

#[test]
fn test_tabs_with_width_one_count_as_one_column() {
    let mut cursor = Cursor::new("f", 1, "a\tb\tc");
    cursor.advance(&MatchInfo::new(5).tabs(true)).unwrap();
    assert_eq!(cursor.column(), 6);
}

#[test]
fn test_multiline_single_terminator() {
    let mut cursor = Cursor::new("f", 1, "line1\nline2");
    cursor.advance(&MatchInfo::new(6).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, 1, 6));
    assert_eq!(cursor.tail(), "line2");
}

#[test]
fn test_multiline_trailing_segment_sets_column() {
    let mut cursor = Cursor::new("f", 4, "ab\ncd ef");
    cursor.advance(&MatchInfo::new(5).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, 3, 5));
}

#[test]
fn test_multiline_trailing_segment_expands_tabs() {
    let mut cursor = Cursor::new("f", 4, "x\n\ty");
    cursor.advance(&MatchInfo::new(4).multiline(true).tabs(true)).unwrap();
    // trailing "\ty" is 2 + 3 wide
    assert_eq!(cursor.location(), Position::at(2, 6, 4));
}

#[test]
fn test_multiline_trailing_segment_raw_without_tabs_flag() {
    let mut cursor = Cursor::new("f", 4, "x\n\ty");
    cursor.advance(&MatchInfo::new(4).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, 3, 4));
}

#[test]
fn test_multiline_without_terminator_restarts_column() {
    let mut cursor = Cursor::new("f", 4, "abcdef");
    cursor.advance(&MatchInfo::new(3)).unwrap();
    assert_eq!(cursor.column(), 4);
    // the whole span is the trailing segment
    cursor.advance(&MatchInfo::new(3).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(1, 4, 6));
}

#[test]
fn test_multiline_without_terminator_expands_tabs() {
    let mut cursor = Cursor::new("f", 4, "abc	d");
    cursor.advance(&MatchInfo::new(3)).unwrap();
    cursor.advance(&MatchInfo::new(2).multiline(true).tabs(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(1, 6, 5));
}

#[test]
fn test_huge_tab_width_saturates_column() {
    let mut cursor = Cursor::new("f", i64::MAX, "\t\t\tx");
    cursor.advance(&MatchInfo::new(3).tabs(true)).unwrap();
    assert_eq!(cursor.column(), usize::MAX);
    cursor.advance(&MatchInfo::new(1)).unwrap();
    assert_eq!(cursor.column(), usize::MAX);
    assert_eq!(cursor.position(), 4);
}

#[test]
fn test_huge_tab_width_saturates_multiline_column() {
    let mut cursor = Cursor::new("f", i64::MAX, "\n\t\t\t");
    cursor.advance(&MatchInfo::new(4).multiline(true).tabs(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, usize::MAX, 4));
}

#[test]
fn test_multiline_counts_every_terminator_style() {
    let text = "a\nb\r\nc\rd\n\re";
    let mut cursor = Cursor::new("f", 4, text);
    cursor.advance(&MatchInfo::new(text.len()).multiline(true)).unwrap();
    assert_eq!(cursor.line(), 5);
    assert_eq!(cursor.column(), 2);
    assert!(cursor.eoi());
}

#[test]
fn test_multiline_regression_uses_offset_relative_head() {
    // Later chunks must read the span at the current offset, not from the
    // start of the buffer.
    let mut cursor = Cursor::new("f", 4, "abcdef\n\tx\ny");
    cursor.advance(&MatchInfo::new(6)).unwrap();
    assert_eq!(cursor.location(), Position::at(1, 7, 6));

    cursor.advance(&MatchInfo::new(1).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, 1, 7));

    cursor.advance(&MatchInfo::new(2).tabs(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(2, 6, 9));

    cursor.advance(&MatchInfo::new(2).multiline(true)).unwrap();
    assert_eq!(cursor.location(), Position::at(3, 2, 11));
    assert!(cursor.eoi());
}

#[test]
fn test_zero_length_advance_is_noop() {
    let mut cursor = Cursor::new("f", 4, "a\tb");
    cursor.advance(&MatchInfo::new(1)).unwrap();
    let before = cursor.location();
    cursor.advance(&MatchInfo::new(0).multiline(true).tabs(true)).unwrap();
    assert_eq!(cursor.location(), before);
    assert!(!cursor.eoi());
}

#[test]
fn test_zero_length_advance_at_eoi_stays_eoi() {
    let mut cursor = Cursor::new("f", 4, "ab");
    cursor.advance(&MatchInfo::new(2)).unwrap();
    assert!(cursor.eoi());
    cursor.advance(&MatchInfo::new(0)).unwrap();
    assert!(cursor.eoi());
    assert_eq!(cursor.position(), 2);
}

#[test]
fn test_advance_past_end_is_rejected() {
    let mut cursor = Cursor::new("f", 4, "abc");
    cursor.advance(&MatchInfo::new(1)).unwrap();
    let err = cursor.advance(&MatchInfo::new(5)).unwrap_err();
    assert_eq!(
        err,
        AdvanceError::LengthOutOfBounds {
            length: 5,
            remaining: 2
        }
    );
    assert_eq!(cursor.location(), Position::at(1, 2, 1));
}

#[test]
fn test_advance_inside_character_is_rejected() {
    let mut cursor = Cursor::new("f", 4, "é!");
    let err = cursor.advance(&MatchInfo::new(1)).unwrap_err();
    assert_eq!(err, AdvanceError::NotCharBoundary { offset: 1 });
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_peek_matches_advance_span() {
    let mut cursor = Cursor::new("f", 4, "let x");
    cursor.advance(&MatchInfo::new(4)).unwrap();
    let peeked = cursor.peek(1).unwrap();
    assert_eq!(peeked, "x");
    assert_eq!(peeked.start(), 4);
    assert!(cursor.peek(2).is_err());
}

#[test]
fn test_source_snapshot() {
    let mut cursor = Cursor::new("main.lx", 4, "ab\ncd");
    cursor.advance(&MatchInfo::new(4).multiline(true)).unwrap();
    let source = cursor.source();
    assert_eq!(source.file(), "main.lx");
    assert_eq!(source.line(), 2);
    assert_eq!(source.column(), 2);
    assert_eq!(source.position(), 4);
}

#[test]
fn test_tail_slice_tracks_offset() {
    let mut cursor = Cursor::new("f", 4, "one two");
    cursor.advance(&MatchInfo::new(4)).unwrap();
    let tail = cursor.tail_slice();
    assert_eq!(tail, "two");
    assert_eq!(tail.start(), 4);
}

#[test]
fn test_accept_builds_token_from_pre_advance_location() {
    let mut cursor = Cursor::new("f", 4, "x = 1");
    cursor.advance(&MatchInfo::new(2)).unwrap();

    let token = cursor.accept(&match_tagged(1, ["operator"])).unwrap().unwrap();
    assert_eq!(token.content(), &"=");
    assert_eq!(token.location(), Position::at(1, 3, 2));
    assert!(token.has("operator"));
    assert_eq!(cursor.location(), Position::at(1, 4, 3));
}

#[test]
fn test_accept_skip_match_consumes_without_token() {
    let mut cursor = Cursor::new("f", 4, "  x");
    let token = cursor.accept(&match_skip(2)).unwrap();
    assert!(token.is_none());
    assert_eq!(cursor.position(), 2);
}

#[test]
fn test_accept_empty_tags_emits_untagged_token() {
    let mut cursor = Cursor::new("f", 4, "?");
    let token = cursor.accept(&match_found(1, Some(vec![]))).unwrap().unwrap();
    assert_eq!(token.tag_count(), 0);
}

#[test]
fn test_advance_result_uses_failure_length() {
    let mut cursor = Cursor::new("f", 4, "\"abc");
    let failure = match_fail(4, 0, "unterminated string").into();
    cursor.advance_result(&failure).unwrap();
    assert!(cursor.eoi());
}

#[test]
fn test_clone_is_independent() {
    let mut cursor = Cursor::new("f", 4, "abc");
    let snapshot = cursor.clone();
    cursor.advance(&MatchInfo::new(3)).unwrap();
    assert_eq!(snapshot.position(), 0);
    assert_eq!(cursor.position(), 3);
}
