use super::*;

fn texts(markdown: &str) -> Vec<String> {
    layout(markdown).iter().map(PreviewLine::text).collect()
}

#[test]
fn heading_and_paragraph_are_separated_by_blank() {
    let lines = layout("# Title\n\nSome text.");

    assert_eq!(lines[0].block, PreviewBlock::Heading(1));
    assert_eq!(lines[0].text(), "Title");
    assert_eq!(lines[1].block, PreviewBlock::Blank);
    assert_eq!(lines[2].text(), "Some text.");
    assert_eq!(lines.len(), 3);
}

#[test]
fn inline_emphasis_is_styled_without_markers() {
    let lines = layout("plain **bold** and `code`");
    let spans = &lines[0].spans;

    assert_eq!(lines[0].text(), "plain bold and code");
    assert!(spans.iter().any(|s| s.text == "bold" && s.style.bold));
    assert!(spans.iter().any(|s| s.text == "code" && s.style.code));
}

#[test]
fn lists_get_bullets_and_numbers() {
    assert_eq!(texts("- one\n- two"), vec!["• one", "• two"]);
    assert_eq!(texts("3. c\n4. d"), vec!["3. c", "4. d"]);
    assert_eq!(
        texts("- [x] done\n- [ ] todo"),
        vec!["• [x] done", "• [ ] todo"]
    );
}

#[test]
fn code_block_keeps_lines_verbatim() {
    let lines = layout("```rust\nfn main() {\n\n}\n```");

    assert!(lines.iter().all(|l| l.block == PreviewBlock::CodeBlock));
    assert_eq!(
        lines.iter().map(PreviewLine::text).collect::<Vec<_>>(),
        vec!["fn main() {", "", "}"]
    );
}

#[test]
fn quotes_are_prefixed_with_bar() {
    assert_eq!(texts("> quoted"), vec!["│ quoted"]);
}

#[test]
fn tables_render_as_rows() {
    let lines = texts("| a | b |\n|---|---|\n| 1 | 2 |");

    assert_eq!(lines, vec!["a │ b", "1 │ 2"]);
}

#[test]
fn rule_becomes_line() {
    let lines = layout("above\n\n---\n\nbelow");

    assert!(lines.iter().any(|l| l.block == PreviewBlock::Rule));
    assert_eq!(lines.last().map(PreviewLine::text).as_deref(), Some("below"));
}

#[test]
fn empty_document_has_no_lines() {
    assert!(layout("").is_empty());
}

#[test]
fn to_lines_keeps_line_count() {
    let preview = layout("# A\n\ntext");
    let lines = to_lines(&preview, &UiTheme::dark());

    assert_eq!(lines.len(), preview.len());
}
