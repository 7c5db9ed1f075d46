//! Markdown preview: pulldown-cmark events → styled terminal lines.
//!
//! The layout pass (`layout`) is pure and produces [`PreviewLine`]s; `to_lines`
//! maps them onto a [`UiTheme`].

use super::theme::UiTheme;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

const BULLET: &str = "• ";
const QUOTE_BAR: &str = "│ ";
const CELL_SEPARATOR: &str = " │ ";
const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewBlock {
    Paragraph,
    Heading(u8),
    ListItem,
    CodeBlock,
    Rule,
    TableRow,
    Blank,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
    pub link: bool,
    /// List bullets, quote bars, table separators.
    pub marker: bool,
    pub quote: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSpan {
    pub text: String,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub block: PreviewBlock,
    pub spans: Vec<PreviewSpan>,
}

impl PreviewLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Default)]
struct Layout {
    lines: Vec<PreviewLine>,
    current: Vec<PreviewSpan>,
    block: Option<PreviewBlock>,
    bold: usize,
    italic: usize,
    strike: usize,
    link: usize,
    quote_depth: usize,
    /// `None` for bullet lists, `Some(next)` for ordered ones.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    in_table_head: bool,
}

impl Layout {
    fn style(&self) -> InlineStyle {
        InlineStyle {
            bold: self.bold > 0 || self.in_table_head,
            italic: self.italic > 0,
            strike: self.strike > 0,
            code: false,
            link: self.link > 0,
            marker: false,
            quote: self.quote_depth > 0,
        }
    }

    fn push(&mut self, text: &str, style: InlineStyle) {
        if text.is_empty() {
            return;
        }
        if self.current.is_empty() && self.quote_depth > 0 {
            let bar = QUOTE_BAR.repeat(self.quote_depth);
            self.current.push(PreviewSpan {
                text: bar,
                style: InlineStyle {
                    marker: true,
                    quote: true,
                    ..InlineStyle::default()
                },
            });
        }
        match self.current.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.push(PreviewSpan {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn push_marker(&mut self, text: &str) {
        let style = InlineStyle {
            marker: true,
            quote: self.quote_depth > 0,
            ..InlineStyle::default()
        };
        self.push(text, style);
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let block = self.block.unwrap_or(PreviewBlock::Paragraph);
        let spans = std::mem::take(&mut self.current);
        self.lines.push(PreviewLine { block, spans });
    }

    fn blank(&mut self) {
        self.flush();
        if self
            .lines
            .last()
            .is_some_and(|l| l.block != PreviewBlock::Blank)
        {
            self.lines.push(PreviewLine {
                block: PreviewBlock::Blank,
                spans: Vec::new(),
            });
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.flush();
                    self.block = Some(PreviewBlock::Paragraph);
                }
            }
            Tag::Heading { level, .. } => {
                self.flush();
                self.block = Some(PreviewBlock::Heading(heading_level(level)));
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock { .. } => {
                self.flush();
                self.in_code_block = true;
                self.block = Some(PreviewBlock::CodeBlock);
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                self.block = Some(PreviewBlock::ListItem);
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{indent}{next}. ");
                        *next += 1;
                        marker
                    }
                    _ => format!("{indent}{BULLET}"),
                };
                self.push_marker(&marker);
            }
            Tag::Emphasis => self.italic += 1,
            Tag::Strong => self.bold += 1,
            Tag::Strikethrough => self.strike += 1,
            Tag::Link { .. } => self.link += 1,
            Tag::Image { .. } => self.push_marker("[image: "),
            Tag::Table { .. } => self.flush(),
            Tag::TableHead => {
                self.in_table_head = true;
                self.block = Some(PreviewBlock::TableRow);
            }
            Tag::TableRow => self.block = Some(PreviewBlock::TableRow),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank();
                } else {
                    self.flush();
                }
            }
            TagEnd::Heading { .. } => self.blank(),
            TagEnd::BlockQuote { .. } => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank();
                }
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.blank();
            }
            TagEnd::List { .. } => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Strikethrough => self.strike = self.strike.saturating_sub(1),
            TagEnd::Link => self.link = self.link.saturating_sub(1),
            TagEnd::Image => self.push_marker("]"),
            TagEnd::TableCell => self.push_marker(CELL_SEPARATOR),
            TagEnd::TableHead => {
                self.trim_cell_separator();
                self.flush();
                self.in_table_head = false;
            }
            TagEnd::TableRow => {
                self.trim_cell_separator();
                self.flush();
            }
            TagEnd::Table => self.blank(),
            _ => {}
        }
    }

    fn trim_cell_separator(&mut self) {
        if self
            .current
            .last()
            .is_some_and(|s| s.style.marker && s.text == CELL_SEPARATOR)
        {
            self.current.pop();
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            let style = InlineStyle {
                code: true,
                quote: self.quote_depth > 0,
                ..InlineStyle::default()
            };
            let mut parts = text.split('\n').peekable();
            while let Some(part) = parts.next() {
                self.push(part, style);
                if parts.peek().is_some() {
                    if self.current.is_empty() {
                        // Keep empty code lines visible.
                        self.lines.push(PreviewLine {
                            block: PreviewBlock::CodeBlock,
                            spans: Vec::new(),
                        });
                    } else {
                        self.flush();
                    }
                }
            }
            return;
        }
        let style = self.style();
        self.push(text, style);
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|l| l.block == PreviewBlock::Blank)
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

pub fn layout(markdown: &str) -> Vec<PreviewLine> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let mut layout = Layout::default();

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(tag) => layout.start(tag),
            Event::End(tag) => layout.end(tag),
            Event::Text(text) => layout.text(&text),
            Event::Code(code) => {
                let style = InlineStyle {
                    code: true,
                    ..layout.style()
                };
                layout.push(&code, style);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = layout.style();
                layout.push(html.trim_end_matches('\n'), style);
            }
            Event::SoftBreak => {
                let style = layout.style();
                layout.push(" ", style);
            }
            Event::HardBreak => layout.flush(),
            Event::Rule => {
                layout.flush();
                layout.lines.push(PreviewLine {
                    block: PreviewBlock::Rule,
                    spans: vec![PreviewSpan {
                        text: "─".repeat(RULE_WIDTH),
                        style: InlineStyle {
                            marker: true,
                            ..InlineStyle::default()
                        },
                    }],
                });
                layout.blank();
            }
            Event::TaskListMarker(done) => layout.push_marker(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    layout.finish()
}

/// Owned lines so the caller can cache them across frames.
pub fn to_lines(preview: &[PreviewLine], theme: &UiTheme) -> Vec<Line<'static>> {
    preview
        .iter()
        .map(|line| {
            let spans = line
                .spans
                .iter()
                .map(|span| Span::styled(span.text.clone(), span_style(line.block, span.style, theme)))
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn span_style(block: PreviewBlock, inline: InlineStyle, theme: &UiTheme) -> Style {
    let mut style = theme.base();
    match block {
        PreviewBlock::Heading(level) => {
            style = style.fg(theme.heading_fg).add_modifier(Modifier::BOLD);
            if level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }
        PreviewBlock::CodeBlock => style = style.fg(theme.code_fg).bg(theme.code_bg),
        PreviewBlock::Rule => style = style.fg(theme.muted_fg),
        _ => {}
    }
    if inline.quote {
        style = style.fg(theme.quote_fg);
    }
    if inline.marker {
        style = style.fg(theme.accent_fg);
    }
    if inline.code {
        style = style.fg(theme.code_fg).bg(theme.code_bg);
    }
    if inline.link {
        style = style.fg(theme.link_fg).add_modifier(Modifier::UNDERLINED);
    }
    if inline.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strike {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    style
}

#[cfg(test)]
#[path = "../../tests/unit/app/preview.rs"]
mod tests;
