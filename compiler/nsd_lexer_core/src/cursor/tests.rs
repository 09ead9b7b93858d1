use super::*;

#[test]
fn peek_and_advance_walk_characters() {
    let mut cursor = Cursor::new("a≤b");
    assert_eq!(cursor.current(), Some('a'));
    assert_eq!(cursor.peek(1), Some('≤'));
    cursor.advance();
    assert_eq!(cursor.current(), Some('≤'));
    cursor.advance_by(5);
    assert_eq!(cursor.current(), None);
    assert_eq!(cursor.pos(), 3);
}

#[test]
fn eat_while_stops_at_predicate_failure() {
    let mut cursor = Cursor::new("abc123");
    cursor.eat_while(char::is_alphabetic);
    assert_eq!(cursor.slice_from(0), "abc");
    assert_eq!(cursor.rest(), &['1', '2', '3']);
}

#[test]
fn advance_at_end_is_harmless() {
    let mut cursor = Cursor::new("");
    cursor.advance();
    assert_eq!(cursor.pos(), 0);
    assert!(cursor.current().is_none());
}
