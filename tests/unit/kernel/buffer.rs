use super::*;

#[test]
fn load_resets_cursor_and_selection() {
    let mut buffer = EditorBuffer::new("abc");
    buffer.set_selection(1, 3);

    buffer.load("hello");

    assert_eq!(buffer.text(), "hello");
    assert_eq!(buffer.cursor(), 0);
    assert!(!buffer.has_selection());
}

#[test]
fn insert_and_delete_at_cursor() {
    let mut buffer = EditorBuffer::new("");
    assert!(buffer.insert_str("héllo"));
    assert_eq!(buffer.cursor(), 5);

    assert!(buffer.delete_backward());
    assert_eq!(buffer.text(), "héll");

    buffer.move_cursor(Motion::DocStart, false);
    assert!(buffer.delete_forward());
    assert_eq!(buffer.text(), "éll");
    assert!(!buffer.delete_backward());
}

#[test]
fn typing_replaces_selection() {
    let mut buffer = EditorBuffer::new("Teh cat");
    buffer.set_selection(0, 3);
    assert_eq!(buffer.selected_text(), "Teh");

    buffer.insert_char('A');

    assert_eq!(buffer.text(), "A cat");
    assert_eq!(buffer.cursor(), 1);
    assert!(!buffer.has_selection());
}

#[test]
fn shift_motion_extends_selection_in_both_directions() {
    let mut buffer = EditorBuffer::new("abcdef");
    buffer.set_selection(3, 3);

    buffer.move_cursor(Motion::Right, true);
    buffer.move_cursor(Motion::Right, true);
    assert_eq!(buffer.selection(), (3, 5));

    buffer.move_cursor(Motion::LineStart, true);
    assert_eq!(buffer.selection(), (0, 3));
    assert_eq!(buffer.selected_text(), "abc");
}

#[test]
fn plain_left_collapses_selection_to_start() {
    let mut buffer = EditorBuffer::new("abcdef");
    buffer.set_selection(1, 4);

    assert!(buffer.move_cursor(Motion::Left, false));

    assert_eq!(buffer.cursor(), 1);
    assert!(!buffer.has_selection());
}

#[test]
fn vertical_motion_keeps_preferred_column() {
    let mut buffer = EditorBuffer::new("abcdef\nxy\nlonger line");
    buffer.set_selection(5, 5);

    buffer.move_cursor(Motion::Down, false);
    assert_eq!(buffer.line_col(buffer.cursor()), (1, 2));

    buffer.move_cursor(Motion::Down, false);
    assert_eq!(buffer.line_col(buffer.cursor()), (2, 5));

    buffer.move_cursor(Motion::Down, false);
    assert_eq!(buffer.cursor(), buffer.char_len());
}

#[test]
fn line_end_and_offsets() {
    let mut buffer = EditorBuffer::new("one\ntwo\nthree");
    buffer.set_selection(4, 4);

    buffer.move_cursor(Motion::LineEnd, false);
    assert_eq!(buffer.cursor(), 7);
    assert_eq!(buffer.offset_of(2, 100), 13);
    assert_eq!(buffer.line_count(), 3);
}

#[test]
fn select_all_covers_whole_text() {
    let mut buffer = EditorBuffer::new("a\nb");
    assert!(buffer.select_all());
    assert_eq!(buffer.selected_text(), "a\nb");
    assert!(buffer.clear_selection());
    assert!(!buffer.clear_selection());
}

#[test]
fn char_slice_clamps_and_respects_multibyte() {
    assert_eq!(char_slice("añb", 1, 2), "ñ");
    assert_eq!(char_slice("abc", 2, 10), "c");
    assert_eq!(char_slice("abc", 5, 9), "");
    assert_eq!(byte_offset("añb", 2), 3);
}
